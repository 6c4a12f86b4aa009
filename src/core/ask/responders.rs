// Ports the router uses to talk back to the chat platform.
//
// The Discord layer implements these over serenity's message and interaction
// APIs. Tests implement them with in-memory recorders.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Platform error: {0}")]
    Platform(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Replies to a plain chat message.
#[async_trait]
pub trait MessageResponder: Send + Sync {
    /// Shows the "bot is typing" indicator in the message's channel.
    async fn start_typing(&self) -> Result<(), DeliveryError>;

    /// Sends `content` as a reply to the original message.
    async fn reply(&self, content: &str) -> Result<(), DeliveryError>;
}

/// Responds to a slash-command interaction.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Immediate reply only the invoking user can see.
    async fn reply_ephemeral(&self, content: &str) -> Result<(), DeliveryError>;

    /// Acknowledges the interaction so the answer can arrive later.
    async fn defer(&self) -> Result<(), DeliveryError>;

    /// Replaces the deferred (or original) response.
    async fn edit_reply(&self, content: &str) -> Result<(), DeliveryError>;

    async fn follow_up(&self, content: &str) -> Result<(), DeliveryError>;
}
