// Serenity implementations of the core reply ports.
//
// These are deliberately dumb: one serenity call per method, errors wrapped
// into `DeliveryError` and nothing else.

use crate::core::ask::{DeliveryError, InteractionResponder, MessageResponder};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

fn platform(e: serenity::Error) -> DeliveryError {
    DeliveryError::Platform(Box::new(e))
}

/// Replies to a single chat message.
pub struct MessageReplier<'a> {
    pub ctx: &'a serenity::Context,
    pub message: &'a serenity::Message,
}

#[async_trait]
impl<'a> MessageResponder for MessageReplier<'a> {
    async fn start_typing(&self) -> Result<(), DeliveryError> {
        self.message
            .channel_id
            .broadcast_typing(&self.ctx.http)
            .await
            .map_err(platform)
    }

    async fn reply(&self, content: &str) -> Result<(), DeliveryError> {
        self.message
            .reply(&self.ctx.http, content)
            .await
            .map(|_| ())
            .map_err(platform)
    }
}

/// Responds to a single slash-command interaction.
pub struct InteractionReplier<'a> {
    pub ctx: &'a serenity::Context,
    pub command: &'a serenity::CommandInteraction,
}

#[async_trait]
impl<'a> InteractionResponder for InteractionReplier<'a> {
    async fn reply_ephemeral(&self, content: &str) -> Result<(), DeliveryError> {
        self.command
            .create_response(
                &self.ctx.http,
                serenity::CreateInteractionResponse::Message(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(content)
                        .ephemeral(true),
                ),
            )
            .await
            .map_err(platform)
    }

    async fn defer(&self) -> Result<(), DeliveryError> {
        self.command
            .create_response(
                &self.ctx.http,
                serenity::CreateInteractionResponse::Defer(
                    serenity::CreateInteractionResponseMessage::new(),
                ),
            )
            .await
            .map_err(platform)
    }

    async fn edit_reply(&self, content: &str) -> Result<(), DeliveryError> {
        self.command
            .edit_response(
                &self.ctx.http,
                serenity::EditInteractionResponse::new().content(content),
            )
            .await
            .map(|_| ())
            .map_err(platform)
    }

    async fn follow_up(&self, content: &str) -> Result<(), DeliveryError> {
        self.command
            .create_followup(
                &self.ctx.http,
                serenity::CreateInteractionResponseFollowup::new().content(content),
            )
            .await
            .map(|_| ())
            .map_err(platform)
    }
}
