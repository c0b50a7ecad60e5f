//! Durable state for the watcher: the persisted snapshot file and the
//! optional cached cookie jar.
//!
//! Both files live on local disk and are only ever touched by a single run
//! at a time (the external scheduler guarantees non-overlapping
//! invocations), so there is no in-process locking.

use thiserror::Error;

pub mod cookies;
pub mod snapshot;

pub use cookies::{load_cookie_cache, save_cookie_cache};
pub use snapshot::{load_snapshot, save_snapshot};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<tempfile::PersistError> for StoreError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}
