// Startup configuration, read from the environment (after `.env` is loaded).
//
// Everything here is read exactly once in `main` and then handed to the
// services that need it.

use crate::core::guilds::GuildAllowList;
use crate::infra::ai::gemini_client::DEFAULT_TEXT_MODEL;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable! Add it to your .env file.")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub allowed_guilds: GuildAllowList,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests don't have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let discord_token = required("DISCORD_BOT_TOKEN")?;
        let gemini_api_key = required("GEMINI_API_KEY")?;
        let gemini_model = lookup("GEMINI_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());

        let allowed = lookup("ALLOWED_GUILD_IDS");
        let legacy = lookup("GUILD_ID");
        let allowed_guilds = GuildAllowList::from_config(allowed.as_deref(), legacy.as_deref());

        Ok(Self {
            discord_token,
            gemini_api_key,
            gemini_model,
            allowed_guilds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn reads_all_values() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("ALLOWED_GUILD_IDS", "1, 2"),
            ("GUILD_ID", "3"),
        ]))
        .unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.gemini_api_key, "key");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.allowed_guilds.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn model_defaults_when_unset() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("GEMINI_API_KEY", "key"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_model, DEFAULT_TEXT_MODEL);
        assert!(config.allowed_guilds.is_empty());
    }

    #[test]
    fn missing_token_is_reported_by_name() {
        let err = BotConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "key")])).unwrap_err();

        assert!(matches!(err, ConfigError::Missing("DISCORD_BOT_TOKEN")));
        assert!(err.to_string().contains("DISCORD_BOT_TOKEN"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = BotConfig::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("GEMINI_API_KEY", "  "),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("GEMINI_API_KEY")));
    }
}
