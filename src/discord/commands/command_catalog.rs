// Discord commands module.
// Each slash command gets its own file with its builder.

use crate::core::ai::TextGenerator;
use crate::core::ask::CommandRouter;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub mod ask;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Shared state handed to every event handler by poise.
pub struct Data {
    pub router: Arc<CommandRouter<Box<dyn TextGenerator>>>,
}

/// The full set of slash commands registered in every allowed guild.
pub fn canonical_commands() -> Vec<serenity::CreateCommand> {
    // Keep exactly one `ask` here. A second registration shows up as a
    // duplicate in the client.
    vec![ask::create_ask_command()]
}
