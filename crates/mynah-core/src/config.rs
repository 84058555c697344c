//! Environment-backed runtime configuration.
//!
//! An optional `.env` file is loaded first; variables already present in the
//! process environment win.

use std::env;

use crate::error::MynahError;

/// Default number of characters of a raw API response echoed into the logs.
pub const DEFAULT_LOG_PREVIEW_LIMIT: usize = 200;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API credential (`TELEGRAM_BOT_TOKEN`). Required.
    pub bot_token: String,
    /// Debug flag (`MYNAH_DEBUG`). Lowers the default log filter to `debug`.
    pub debug: bool,
    /// Max characters of raw API responses echoed into the logs
    /// (`MYNAH_LOG_PREVIEW_LIMIT`).
    pub log_preview_limit: usize,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Fails when `TELEGRAM_BOT_TOKEN` is missing or empty.
    pub fn load() -> Result<Self, MynahError> {
        dotenvy::dotenv().ok();

        let bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(MynahError::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        Ok(Self {
            bot_token,
            debug: env_bool("MYNAH_DEBUG").unwrap_or(false),
            log_preview_limit: env_usize("MYNAH_LOG_PREVIEW_LIMIT")
                .unwrap_or(DEFAULT_LOG_PREVIEW_LIMIT),
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}
