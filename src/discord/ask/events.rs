// Event glue for the ask commands.
//
// **Notice the pattern:**
// 1. Extract primitive data from Discord types
// 2. Call the core router
// 3. Let the router talk back through the serenity responders
//
// This layer is THIN - no business logic, just translation.

use super::responders::{InteractionReplier, MessageReplier};
use crate::core::ask::{InboundCommand, InboundMessage};
use crate::discord::commands::ask::QUESTION_OPTION;
use crate::discord::{Data, Error};
use poise::serenity_prelude as serenity;

pub fn inbound_message(message: &serenity::Message) -> InboundMessage {
    InboundMessage {
        guild_id: message.guild_id.map(|id| id.get()),
        author_is_bot: message.author.bot,
        content: message.content.clone(),
    }
}

pub fn inbound_command(command: &serenity::CommandInteraction) -> InboundCommand {
    let question = command
        .data
        .options
        .iter()
        .find(|option| option.name == QUESTION_OPTION)
        .and_then(|option| option.value.as_str())
        .map(str::to_string);

    InboundCommand {
        guild_id: command.guild_id.map(|id| id.get()),
        name: command.data.name.clone(),
        question,
    }
}

pub async fn handle_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    let inbound = inbound_message(message);
    let replier = MessageReplier { ctx, message };

    let outcome = data.router.handle_message(&inbound, &replier).await?;
    tracing::debug!(message_id = message.id.get(), ?outcome, "Handled message");

    Ok(())
}

/// Only application commands are routed. Components, autocomplete and
/// modals are ignored.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::Interaction,
    data: &Data,
) -> Result<(), Error> {
    let serenity::Interaction::Command(command) = interaction else {
        return Ok(());
    };

    let inbound = inbound_command(command);
    let replier = InteractionReplier { ctx, command };

    let outcome = data.router.handle_command(&inbound, &replier).await?;
    tracing::info!(
        guild_id = ?inbound.guild_id,
        command = %inbound.name,
        ?outcome,
        "Handled slash command"
    );

    Ok(())
}
