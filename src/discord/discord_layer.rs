// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "ask/mod.rs"]
pub mod ask;

#[path = "registration/serenity_registry.rs"]
pub mod registration;

// Re-export command types for convenience
pub use commands::{Data, Error};
