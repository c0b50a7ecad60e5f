//! Chat notifications for restock events, delivered through the Telegram
//! Bot API.
//!
//! Delivery is best-effort and independent per event: a failed send is
//! logged and the remaining events still go out. Nothing in here can abort
//! a run.

use thiserror::Error;

pub mod message;
pub mod telegram;

pub use message::{format_event, notify_events};
pub use telegram::{MessageFormat, Notifier, SendOptions};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("messaging API rejected the send: {description}")]
    Api { description: String },
}
