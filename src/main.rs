// This is the entry point of the Discord bot.
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register slash commands and route events to the core router

use gemini_discord_bot::config::BotConfig;
use gemini_discord_bot::core::ai::TextGenerator;
use gemini_discord_bot::core::ask::CommandRouter;
use gemini_discord_bot::core::registration::CommandRegistrar;
use gemini_discord_bot::discord::ask::{handle_interaction, handle_message};
use gemini_discord_bot::discord::registration::SerenityCommandRegistry;
use gemini_discord_bot::discord::{Data, Error};
use gemini_discord_bot::infra::ai::GeminiClient;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for gateway events.
/// Messages carry prefix commands, interactions carry slash commands.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            handle_message(ctx, new_message, data).await?;
        }
        serenity::FullEvent::InteractionCreate { interaction } => {
            handle_interaction(ctx, interaction, data).await?;
        }
        _ => {}
    }

    Ok(())
}

/// Last line of defence: anything a handler didn't deal with ends up here
/// and is logged. The bot keeps running.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::EventHandler { error, event, .. } => {
            tracing::error!(
                "Unhandled error while handling {}: {}",
                event.snake_case_name(),
                error
            );
        }
        // No commands are registered with poise, so every `/ask` lands here
        // after the event handler has already answered it.
        poise::FrameworkError::UnknownInteraction { interaction, .. } => {
            tracing::debug!(
                "Slash command {} handled outside poise",
                interaction.data.name
            );
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().expect("Failed to load bot configuration");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // The Gemini client is built once here and only reaches the handlers
    // through the router, which is what lets tests swap it out.

    let gemini = GeminiClient::new(config.gemini_api_key.clone())
        .with_text_model(config.gemini_model.clone());
    tracing::info!("Using Gemini model {}", gemini.text_model());

    let generator: Box<dyn TextGenerator> = Box::new(gemini);
    let data = Data {
        router: Arc::new(CommandRouter::new(generator, config.allowed_guilds.clone())),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read prefix commands
        | serenity::GatewayIntents::DIRECT_MESSAGES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Slash commands are registered and routed by hand so they only
            // exist in allow-listed guilds.
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!("Logged in as {}!", ready.user.tag());

                let registrar =
                    CommandRegistrar::new(SerenityCommandRegistry::new(ctx.http.clone()));
                let report = registrar.sync(data.router.allow_list()).await;
                tracing::info!(
                    guilds_synced = report.guilds_synced,
                    guilds_failed = report.guilds_failed,
                    commands_deleted = report.commands_deleted,
                    global_cleared = report.global_cleared,
                    "Command registration finished"
                );

                tracing::info!(
                    "Bot is ready and restricted to {} specific servers.",
                    data.router.allow_list().len()
                );

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
