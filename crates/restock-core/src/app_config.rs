use std::collections::HashSet;
use std::path::PathBuf;

/// Runtime configuration for one watcher run, read from the environment.
///
/// No ambient globals: the loaded value is passed explicitly into the
/// pipeline at construction.
#[derive(Clone)]
pub struct AppConfig {
    /// Storefront origin, e.g. `https://shop.example.com`.
    pub shop_base_url: String,
    /// Region/store identifier pinned during session negotiation.
    pub store_id: String,
    /// Telegram bot token (the messaging credential).
    pub telegram_bot_token: String,
    /// Telegram chat id (the messaging destination).
    pub telegram_chat_id: String,
    /// Persisted snapshot file.
    pub state_file: PathBuf,
    /// Cached cookie jar file (optional warm-up skip).
    pub cookie_jar_file: PathBuf,
    /// Cached cookies older than this are discarded and negotiation starts cold.
    pub cookie_max_age_secs: u64,
    /// SKUs of interest for notifications; empty means notify on everything.
    pub allow_list: HashSet<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Catalog page size (`limit` query parameter).
    pub page_size: u32,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shop_base_url", &self.shop_base_url)
            .field("store_id", &self.store_id)
            .field("telegram_bot_token", &"[redacted]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("state_file", &self.state_file)
            .field("cookie_jar_file", &self.cookie_jar_file)
            .field("cookie_max_age_secs", &self.cookie_max_age_secs)
            .field("allow_list", &self.allow_list)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("log_level", &self.log_level)
            .finish()
    }
}
