use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::{Client, Url};

use crate::error::ScraperError;

/// HTTP client for the storefront, shared across every step of a run.
///
/// One cookie jar backs all requests — the session negotiation mutates it
/// and the catalog fetch relies on it — and all requests carry the same
/// user-agent and timeout. The jar can be pre-seeded from a cached run so
/// the warm-up fetch can be skipped.
pub struct StorefrontClient {
    http: Client,
    base: Url,
}

impl StorefrontClient {
    /// Creates a client with configured timeout and `User-Agent`, seeding
    /// the cookie jar with any cached `Set-Cookie` values.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] when `base_url` does not
    /// parse, [`ScraperError::Transport`] when the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        seed_cookies: &[String],
    ) -> Result<Self, ScraperError> {
        let base = Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let jar = Arc::new(Jar::default());
        for cookie in seed_cookies {
            jar.add_cookie_str(cookie, &base);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .cookie_provider(jar)
            .build()?;

        Ok(Self { http, base })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Storefront origin as a string, for deriving product page URLs.
    pub(crate) fn base_str(&self) -> &str {
        self.base.as_str()
    }

    /// Resolves an absolute-path endpoint against the storefront origin.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ScraperError> {
        self.base.join(path).map_err(|e| ScraperError::InvalidBaseUrl {
            url: format!("{}{path}", self.base),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
