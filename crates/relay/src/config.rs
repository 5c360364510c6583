// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::catalog::Catalog;
use crate::id::UserId;

/// Anonymous chat relay bot for Telegram.
#[derive(Debug, Clone, Parser)]
#[command(name = "anonrelay", version, about)]
pub struct RelayConfig {
    /// Telegram bot token.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    /// Telegram user id allowed to run admin commands. Admin commands are
    /// disabled when unset.
    #[arg(long, env = "ADMIN_USER_ID")]
    pub admin_user_id: Option<i64>,

    /// Host address for the health probe.
    #[arg(long, env = "ANONRELAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Health probe port.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Bot API base URL.
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = "https://api.telegram.org")]
    pub api_base: String,

    /// Long-poll timeout for getUpdates, in seconds.
    #[arg(long, env = "ANONRELAY_POLL_TIMEOUT_SECS", default_value_t = 30)]
    pub poll_timeout_secs: u64,

    /// JSON file of `{"name", "emoji"}` entries replacing the built-in names.
    #[arg(long, env = "ANONRELAY_NAMES_FILE")]
    pub names_file: Option<PathBuf>,

    /// Log format (json or text).
    #[arg(long, env = "ANONRELAY_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "ANONRELAY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl RelayConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.bot_token.as_deref().map(str::trim) {
            None | Some("") => {
                anyhow::bail!("a bot token is required (--bot-token or TELEGRAM_BOT_TOKEN)")
            }
            Some(_) => {}
        }
        if self.poll_timeout_secs == 0 {
            anyhow::bail!("--poll-timeout-secs must be at least 1");
        }
        match self.log_format.as_str() {
            "json" | "text" => {}
            other => anyhow::bail!("invalid log format: {other}"),
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        self.bot_token.as_deref().unwrap_or_default().trim()
    }

    pub fn admin(&self) -> Option<UserId> {
        self.admin_user_id.map(UserId)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn health_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the configured names file, or the built-in catalog.
    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        match self.names_file {
            Some(ref path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
