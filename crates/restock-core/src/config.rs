use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::AppConfig;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const DEFAULT_STATE_FILE: &str = "./state/snapshot.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load watcher configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config_from_env() -> Result<AppConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let shop_base_url = require("RESTOCK_SHOP_BASE_URL")?;
    let store_id = require("RESTOCK_STORE_ID")?;
    let telegram_bot_token = require("RESTOCK_TELEGRAM_BOT_TOKEN")?;
    let telegram_chat_id = require("RESTOCK_TELEGRAM_CHAT_ID")?;

    let state_file = PathBuf::from(or_default("RESTOCK_STATE_FILE", DEFAULT_STATE_FILE));
    let cookie_jar_file = PathBuf::from(or_default(
        "RESTOCK_COOKIE_JAR_FILE",
        "./state/cookies.json",
    ));
    let cookie_max_age_secs = parse_u64("RESTOCK_COOKIE_MAX_AGE_SECS", "86400")?;
    let allow_list = parse_allow_list(&or_default("RESTOCK_ALLOW_LIST", ""));
    let request_timeout_secs = parse_u64("RESTOCK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("RESTOCK_USER_AGENT", DEFAULT_USER_AGENT);
    let page_size = parse_u32("RESTOCK_PAGE_SIZE", "100")?;
    let log_level = or_default("RESTOCK_LOG_LEVEL", "info");

    Ok(AppConfig {
        shop_base_url,
        store_id,
        telegram_bot_token,
        telegram_chat_id,
        state_file,
        cookie_jar_file,
        cookie_max_age_secs,
        allow_list,
        request_timeout_secs,
        user_agent,
        page_size,
        log_level,
    })
}

/// Resolve just the persisted snapshot path, for inspection modes that never
/// touch the network or messaging. The messaging credentials are not
/// required and not read.
///
/// Calls `dotenvy::dotenv().ok()` like [`load_config`].
#[must_use]
pub fn state_file_from_env() -> PathBuf {
    dotenvy::dotenv().ok();
    state_file_from_lookup(|key| std::env::var(key))
}

fn state_file_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    PathBuf::from(lookup("RESTOCK_STATE_FILE").unwrap_or_else(|_| DEFAULT_STATE_FILE.to_owned()))
}

/// Split a comma-separated SKU list into a set, ignoring blanks around and
/// between commas. An empty or whitespace-only string yields an empty set
/// (meaning "notify on everything").
fn parse_allow_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
