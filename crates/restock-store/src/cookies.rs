//! Cached cookie jar: a pure optimization that lets a run skip the warm-up
//! fetch when a recent run already established baseline cookies.
//!
//! Correctness never depends on this cache. A missing, unreadable, stale,
//! or malformed cache simply means the next run starts negotiation cold.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::StoreError;

/// On-disk shape of the cached jar: raw `Set-Cookie` header values captured
/// during negotiation, stamped with when they were saved.
#[derive(Debug, Serialize, Deserialize)]
struct CookieCache {
    saved_at: DateTime<Utc>,
    cookies: Vec<String>,
}

/// Loads cached cookies if they are younger than `max_age_secs`.
///
/// Returns `None` when the file is absent, unreadable, malformed, or too
/// old — callers treat all of those the same way: start cold.
#[must_use]
pub fn load_cookie_cache(path: &Path, max_age_secs: u64) -> Option<Vec<String>> {
    let raw = fs::read_to_string(path).ok()?;
    let cache: CookieCache = match serde_json::from_str(&raw) {
        Ok(cache) => cache,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cookie cache unreadable, ignoring");
            return None;
        }
    };

    let age_secs = (Utc::now() - cache.saved_at).num_seconds();
    // A negative age means a clock went backwards; treat as expired.
    if age_secs < 0 || u64::try_from(age_secs).is_ok_and(|a| a >= max_age_secs) {
        debug!(path = %path.display(), age_secs, "cookie cache expired, ignoring");
        return None;
    }

    if cache.cookies.is_empty() {
        return None;
    }
    Some(cache.cookies)
}

/// Saves the captured `Set-Cookie` values, stamped with the current time.
///
/// # Errors
///
/// Returns [`StoreError`] on I/O or serialization failure. Callers treat
/// this as non-fatal: losing the cache only costs the next run a warm-up.
pub fn save_cookie_cache(path: &Path, cookies: &[String]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let cache = CookieCache {
        saved_at: Utc::now(),
        cookies: cookies.to_vec(),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, &cache)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
#[path = "cookies_test.rs"]
mod tests;
