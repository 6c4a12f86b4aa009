// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "ai/mod.rs"]
pub mod ai;

#[path = "ask/mod.rs"]
pub mod ask;

#[path = "guilds/allow_list.rs"]
pub mod guilds;

#[path = "registration/command_registrar.rs"]
pub mod registration;
