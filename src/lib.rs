// Gemini-backed Q&A bot for Discord.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (Gemini API)
// - `discord/` = Discord-specific adapters (commands, events)
//
// The bot binary lives in `main.rs`, the standalone image generator in
// `bin/generate_image.rs`. Both are wired from the modules below.

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
pub mod core;
#[path = "discord/discord_layer.rs"]
pub mod discord;
#[path = "infra/infra_layer.rs"]
pub mod infra;

pub mod config;
