// Serenity implementation of the registrar's `CommandRegistry` port.

use crate::core::registration::{CommandRegistry, RegisteredCommand, RegistrationError};
use crate::discord::commands::canonical_commands;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

fn platform(e: serenity::Error) -> RegistrationError {
    RegistrationError::Platform(Box::new(e))
}

pub struct SerenityCommandRegistry {
    http: Arc<serenity::Http>,
}

impl SerenityCommandRegistry {
    /// The HTTP client must already know the application ID, which serenity
    /// sets once the gateway reports ready.
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandRegistry for SerenityCommandRegistry {
    async fn list_guild_commands(
        &self,
        guild_id: u64,
    ) -> Result<Vec<RegisteredCommand>, RegistrationError> {
        let commands = serenity::GuildId::new(guild_id)
            .get_commands(&self.http)
            .await
            .map_err(platform)?;

        Ok(commands
            .into_iter()
            .map(|command| RegisteredCommand {
                id: command.id.get(),
                name: command.name,
            })
            .collect())
    }

    async fn delete_guild_command(
        &self,
        guild_id: u64,
        command_id: u64,
    ) -> Result<(), RegistrationError> {
        serenity::GuildId::new(guild_id)
            .delete_command(&self.http, serenity::CommandId::new(command_id))
            .await
            .map_err(platform)
    }

    async fn register_guild_commands(&self, guild_id: u64) -> Result<(), RegistrationError> {
        serenity::GuildId::new(guild_id)
            .set_commands(&self.http, canonical_commands())
            .await
            .map(|_| ())
            .map_err(platform)
    }

    async fn clear_global_commands(&self) -> Result<(), RegistrationError> {
        serenity::Command::set_global_commands(&self.http, Vec::new())
            .await
            .map(|_| ())
            .map_err(platform)
    }
}
