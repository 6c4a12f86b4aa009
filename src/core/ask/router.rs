// The command router is where the bot's behaviour lives.
//
// It works on platform-neutral `InboundMessage` / `InboundCommand` values and
// talks back through the responder ports, so the whole pipeline (allow-list,
// parsing, model call, chunking, error replies) runs without Discord.
//
// Dispatch goes through two explicit tables, `PREFIX_COMMANDS` and
// `SLASH_COMMANDS`. Adding a command means adding a row and a match arm.

use super::chunking::{chunk_text, MESSAGE_CHUNK_LIMIT, SLASH_CHUNK_LIMIT};
use super::responders::{DeliveryError, InteractionResponder, MessageResponder};
use crate::core::ai::{AiError, TextGenerator};
use crate::core::guilds::GuildAllowList;
use thiserror::Error;

pub const PREFIX: &str = "!";

pub const USAGE_REPLY: &str = "Please provide a question.";
pub const EMPTY_QUESTION_REPLY: &str = "Please provide a question to ask.";
pub const RESTRICTED_REPLY: &str = "This bot is restricted to specific servers only.";
pub const ERROR_REPLY: &str = "Sorry, I encountered an error trying to answer your question.";
pub const JAWA_REPLY: &str = "Jawa! Jawa! Jawa!";

const CONTINUED_HEADER: &str = "**Answer (continued):**\n";

// ============================================================================
// INBOUND EVENTS
// ============================================================================

/// What the router needs to know about a chat message.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub guild_id: Option<u64>,
    pub author_is_bot: bool,
    pub content: String,
}

/// What the router needs to know about a slash-command invocation.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub guild_id: Option<u64>,
    pub name: String,
    pub question: Option<String>,
}

// ============================================================================
// DISPATCH TABLES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCommand {
    Ask,
    Jawa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    Ask,
}

pub const PREFIX_COMMANDS: &[(&str, PrefixCommand)] =
    &[("ask", PrefixCommand::Ask), ("jawa", PrefixCommand::Jawa)];

pub const SLASH_COMMANDS: &[(&str, SlashCommand)] = &[("ask", SlashCommand::Ask)];

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, command)| *command)
}

// ============================================================================
// OUTCOMES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    GuildNotAllowed,
    BotAuthor,
    MissingPrefix,
    UnknownCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Ignored(IgnoreReason),
    UsageShown,
    Answered { segments: usize },
    Jawa,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Denied,
    Ignored(IgnoreReason),
    EmptyQuestion,
    Answered { segments: usize },
    Failed,
}

#[derive(Debug, Error)]
enum AskError {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// A `!`-prefixed command line split into its name and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: String,
    pub args: Vec<&'a str>,
}

/// Parses `!name arg arg ...`. Arguments are separated by runs of spaces and
/// the name is case-insensitive. Returns `None` if the prefix is missing.
pub fn parse_prefix_command(content: &str) -> Option<ParsedCommand<'_>> {
    let rest = content.strip_prefix(PREFIX)?;
    let mut tokens = rest.trim().split(' ').filter(|token| !token.is_empty());
    let name = tokens.next().unwrap_or_default().to_lowercase();

    Some(ParsedCommand {
        name,
        args: tokens.collect(),
    })
}

// ============================================================================
// ROUTER
// ============================================================================

pub struct CommandRouter<G: TextGenerator> {
    generator: G,
    allow_list: GuildAllowList,
}

impl<G: TextGenerator> CommandRouter<G> {
    pub fn new(generator: G, allow_list: GuildAllowList) -> Self {
        Self {
            generator,
            allow_list,
        }
    }

    pub fn allow_list(&self) -> &GuildAllowList {
        &self.allow_list
    }

    /// Handles a chat message. Messages that are not for us are dropped
    /// without any reply.
    ///
    /// Only a failure to deliver the apology itself is returned as an error.
    pub async fn handle_message<R>(
        &self,
        message: &InboundMessage,
        responder: &R,
    ) -> Result<MessageOutcome, DeliveryError>
    where
        R: MessageResponder + ?Sized,
    {
        if !self.allow_list.permits(message.guild_id) {
            return Ok(MessageOutcome::Ignored(IgnoreReason::GuildNotAllowed));
        }
        if message.author_is_bot {
            return Ok(MessageOutcome::Ignored(IgnoreReason::BotAuthor));
        }

        let Some(parsed) = parse_prefix_command(&message.content) else {
            return Ok(MessageOutcome::Ignored(IgnoreReason::MissingPrefix));
        };
        let Some(command) = lookup(PREFIX_COMMANDS, &parsed.name) else {
            return Ok(MessageOutcome::Ignored(IgnoreReason::UnknownCommand));
        };

        tracing::debug!(guild_id = ?message.guild_id, ?command, "Dispatching prefix command");

        match command {
            PrefixCommand::Ask => self.ask_from_message(&parsed.args, responder).await,
            PrefixCommand::Jawa => {
                responder.reply(JAWA_REPLY).await?;
                Ok(MessageOutcome::Jawa)
            }
        }
    }

    /// Handles a slash-command invocation.
    pub async fn handle_command<R>(
        &self,
        command: &InboundCommand,
        responder: &R,
    ) -> Result<InteractionOutcome, DeliveryError>
    where
        R: InteractionResponder + ?Sized,
    {
        if !self.allow_list.permits(command.guild_id) {
            tracing::info!(
                guild_id = ?command.guild_id,
                command = %command.name,
                "Rejecting slash command from a guild that is not allowed"
            );
            responder.reply_ephemeral(RESTRICTED_REPLY).await?;
            return Ok(InteractionOutcome::Denied);
        }

        let Some(slash) = lookup(SLASH_COMMANDS, &command.name) else {
            tracing::debug!(command = %command.name, "Ignoring unknown slash command");
            return Ok(InteractionOutcome::Ignored(IgnoreReason::UnknownCommand));
        };

        match slash {
            SlashCommand::Ask => {
                self.ask_from_interaction(command.question.as_deref(), responder)
                    .await
            }
        }
    }

    async fn ask_from_message<R>(
        &self,
        args: &[&str],
        responder: &R,
    ) -> Result<MessageOutcome, DeliveryError>
    where
        R: MessageResponder + ?Sized,
    {
        if args.is_empty() {
            responder.reply(USAGE_REPLY).await?;
            return Ok(MessageOutcome::UsageShown);
        }

        let prompt = args.join(" ");
        match self.answer_message(&prompt, responder).await {
            Ok(segments) => Ok(MessageOutcome::Answered { segments }),
            Err(e) => {
                tracing::error!("Error generating text with Gemini: {}", e);
                responder.reply(ERROR_REPLY).await?;
                Ok(MessageOutcome::Failed)
            }
        }
    }

    async fn answer_message<R>(&self, prompt: &str, responder: &R) -> Result<usize, AskError>
    where
        R: MessageResponder + ?Sized,
    {
        if let Err(e) = responder.start_typing().await {
            tracing::debug!("Failed to send typing indicator: {}", e);
        }

        let text = self.generator.generate_text(prompt).await?;
        let chunks = chunk_text(&text, MESSAGE_CHUNK_LIMIT);
        for chunk in &chunks {
            responder.reply(chunk).await?;
        }

        Ok(chunks.len())
    }

    async fn ask_from_interaction<R>(
        &self,
        question: Option<&str>,
        responder: &R,
    ) -> Result<InteractionOutcome, DeliveryError>
    where
        R: InteractionResponder + ?Sized,
    {
        let question = match question {
            Some(q) if !q.trim().is_empty() => q,
            _ => {
                responder.reply_ephemeral(EMPTY_QUESTION_REPLY).await?;
                return Ok(InteractionOutcome::EmptyQuestion);
            }
        };

        match self.answer_interaction(question, responder).await {
            Ok(segments) => Ok(InteractionOutcome::Answered { segments }),
            Err(e) => {
                tracing::error!("Error generating text with Gemini: {}", e);
                responder
                    .edit_reply(&format!(
                        "Sorry, I encountered an error trying to answer your question: \"{}\"",
                        question
                    ))
                    .await?;
                Ok(InteractionOutcome::Failed)
            }
        }
    }

    async fn answer_interaction<R>(&self, question: &str, responder: &R) -> Result<usize, AskError>
    where
        R: InteractionResponder + ?Sized,
    {
        // Gemini regularly takes longer than Discord's 3 second ack window.
        responder.defer().await?;

        let text = self.generator.generate_text(question).await?;
        let header = question_header(question);
        let formatted = format!("{header}{text}");

        if formatted.chars().count() <= MESSAGE_CHUNK_LIMIT {
            responder.edit_reply(&formatted).await?;
            return Ok(1);
        }

        let chunks = chunk_text(&text, SLASH_CHUNK_LIMIT);
        let mut chunks_iter = chunks.iter();
        if let Some(first) = chunks_iter.next() {
            responder.edit_reply(&format!("{header}{first}")).await?;
        }
        for chunk in chunks_iter {
            responder
                .follow_up(&format!("{CONTINUED_HEADER}{chunk}"))
                .await?;
        }

        Ok(chunks.len())
    }
}

fn question_header(question: &str) -> String {
    format!("> **Question:** {question}\n\n**Answer:**\n")
}
