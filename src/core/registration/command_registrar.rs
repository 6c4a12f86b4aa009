// Slash-command registration, run once when the bot becomes ready.
//
// Commands must only ever show up in allow-listed guilds, so every start:
// 1. For each allowed guild, wipe all existing commands if there is more than
//    one (leftovers from earlier duplicate registrations)
// 2. Bulk-register the canonical command set in that guild
// 3. Clear the global command list
//
// Every step is best-effort: failures are logged and never stop the bot.

use crate::core::guilds::GuildAllowList;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Discord API error: {0}")]
    Platform(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A command as Discord currently has it registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCommand {
    pub id: u64,
    pub name: String,
}

/// The Discord endpoints the registrar needs.
///
/// The canonical command set is owned by the implementation so this trait
/// stays free of serenity builder types.
#[async_trait]
pub trait CommandRegistry: Send + Sync {
    async fn list_guild_commands(
        &self,
        guild_id: u64,
    ) -> Result<Vec<RegisteredCommand>, RegistrationError>;

    async fn delete_guild_command(
        &self,
        guild_id: u64,
        command_id: u64,
    ) -> Result<(), RegistrationError>;

    /// Overwrites the guild's commands with the canonical set.
    async fn register_guild_commands(&self, guild_id: u64) -> Result<(), RegistrationError>;

    /// Overwrites the global command list with nothing.
    async fn clear_global_commands(&self) -> Result<(), RegistrationError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    pub guilds_synced: usize,
    pub guilds_failed: usize,
    pub commands_deleted: usize,
    pub global_cleared: bool,
}

pub struct CommandRegistrar<R: CommandRegistry> {
    registry: R,
}

impl<R: CommandRegistry> CommandRegistrar<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub async fn sync(&self, allow_list: &GuildAllowList) -> RegistrationReport {
        let mut report = RegistrationReport::default();

        tracing::info!("Started registering commands in allowed guilds only.");

        for guild_id in allow_list.ids() {
            match self.sync_guild(guild_id).await {
                Ok(deleted) => {
                    report.guilds_synced += 1;
                    report.commands_deleted += deleted;
                    tracing::info!(guild_id, "Successfully registered commands in guild");
                }
                Err(e) => {
                    report.guilds_failed += 1;
                    tracing::error!(guild_id, "Error managing application commands: {}", e);
                }
            }
        }

        match self.registry.clear_global_commands().await {
            Ok(()) => {
                report.global_cleared = true;
                tracing::info!("Successfully removed all global commands.");
            }
            Err(e) => tracing::error!("Failed to remove global commands: {}", e),
        }

        report
    }

    /// Returns how many stale commands were deleted.
    async fn sync_guild(&self, guild_id: u64) -> Result<usize, RegistrationError> {
        let existing = self.registry.list_guild_commands(guild_id).await?;
        tracing::info!(
            guild_id,
            "Found {} existing commands in guild",
            existing.len()
        );

        let mut deleted = 0;
        if existing.len() > 1 {
            tracing::info!(guild_id, "Cleaning up duplicate commands in guild");
            for command in &existing {
                self.registry
                    .delete_guild_command(guild_id, command.id)
                    .await?;
                deleted += 1;
                tracing::info!(
                    guild_id,
                    "Deleted command {} ({})",
                    command.name,
                    command.id
                );
            }
        }

        self.registry.register_guild_commands(guild_id).await?;
        Ok(deleted)
    }
}
