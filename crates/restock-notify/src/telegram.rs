//! Thin client for the Telegram Bot API `sendMessage` method.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::NotifyError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Rendering mode for outbound messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Plain,
    /// Telegram's legacy Markdown mode — enough for bold names and links.
    SimpleMarkup,
}

/// Per-message delivery options.
#[derive(Debug, Clone, Copy)]
pub struct SendOptions {
    /// Suppress Telegram's link preview card (restock messages carry a
    /// product URL, and the preview doubles the message height).
    pub no_link_preview: bool,
    pub format: MessageFormat,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            no_link_preview: true,
            format: MessageFormat::SimpleMarkup,
        }
    }
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

/// The subset of Telegram's response envelope we act on.
#[derive(Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Messaging collaborator: sends one text message per call.
pub struct Notifier {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl Notifier {
    /// Creates a notifier against the real Telegram API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        Self::with_api_base(token, timeout_secs, TELEGRAM_API_BASE)
    }

    /// Same as [`Notifier::new`] with an overridable API origin, for tests.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_api_base(
        token: &str,
        timeout_secs: u64,
        api_base: &str,
    ) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
        })
    }

    /// Sends one text message to `chat_id`.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Http`] — transport failure or timeout.
    /// - [`NotifyError::Api`] — Telegram answered but refused the send; the
    ///   description comes from the API when it provides one.
    pub async fn send(
        &self,
        chat_id: &str,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let request = SendMessageRequest {
            chat_id,
            text,
            disable_web_page_preview: options.no_link_preview,
            parse_mode: match options.format {
                MessageFormat::Plain => None,
                MessageFormat::SimpleMarkup => Some("Markdown"),
            },
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        // Telegram errors come back as JSON envelopes with non-2xx status;
        // prefer the API's own description over the bare status code.
        let envelope = response.json::<ApiEnvelope>().await.ok();

        match envelope {
            Some(envelope) if envelope.ok => Ok(()),
            Some(envelope) => Err(NotifyError::Api {
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP status {status}")),
            }),
            None => Err(NotifyError::Api {
                description: format!("HTTP status {status} with unreadable body"),
            }),
        }
    }
}
