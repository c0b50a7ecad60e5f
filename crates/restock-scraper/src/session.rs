//! Session negotiation against the storefront API.
//!
//! The catalog endpoint enforces region-scoped stock and pricing, so every
//! run must first establish a session pinned to the configured store. The
//! protocol is a fixed three-step sequence; no step may be skipped or
//! reordered (the warm-up alone may be skipped when a fresh cached cookie
//! jar was seeded into the client):
//!
//! 1. `GET /collections/{CATEGORY}` — the human-facing category page, fetched
//!    only for its session-cookie side effect; the body is discarded.
//! 2. `GET /api/1/session` — returns a script-like assignment embedding a
//!    JSON object; the session token is its `tid` field.
//! 3. `PUT /api/1/preferences` — body `{"data":{"store":...}}` with the
//!    token in the `tid` header, pinning subsequent queries to the store.
//!
//! Any transport failure or non-success status aborts the run; there is no
//! retry within a run. The next scheduled invocation negotiates from scratch.

use serde_json::Value;
use tracing::{debug, info};

use crate::client::StorefrontClient;
use crate::error::ScraperError;

/// Fixed category this watcher tracks; doubles as the warm-up landing page
/// slug and the catalog query filter.
pub const CATEGORY: &str = "mechanical-keyboards";

/// Header carrying the session token on authenticated calls, named after
/// the JSON field the session endpoint exposes it under.
pub(crate) const SESSION_TOKEN_HEADER: &str = "tid";

const SESSION_INFO_PATH: &str = "/api/1/session";
const PREFERENCES_PATH: &str = "/api/1/preferences";

/// Authenticated context for one run. The cookie state lives inside the
/// shared client's jar; this carries the token plus the raw `Set-Cookie`
/// values observed during negotiation so the caller can refresh the cache.
/// Never persisted as-is across runs — the cache has its own max-age.
#[derive(Debug)]
pub struct SessionContext {
    pub token: String,
    pub set_cookies: Vec<String>,
}

/// Runs the negotiation sequence and returns the authenticated context.
///
/// `skip_warmup` should be `true` only when the client's jar was seeded
/// from a fresh cookie cache; correctness must hold when every run passes
/// `false` and starts cold.
///
/// # Errors
///
/// - [`ScraperError::Transport`] — network or timeout failure at any step.
/// - [`ScraperError::UnexpectedStatus`] — non-success status at any step.
/// - [`ScraperError::Session`] — session response not in the expected shape.
pub async fn negotiate(
    client: &StorefrontClient,
    store_id: &str,
    skip_warmup: bool,
) -> Result<SessionContext, ScraperError> {
    let mut set_cookies = Vec::new();

    if skip_warmup {
        debug!("cookie jar seeded from cache, skipping warm-up fetch");
    } else {
        let url = client.endpoint(&format!("/collections/{CATEGORY}"))?;
        let response = client.http().get(url.clone()).send().await?;
        collect_set_cookies(&response, &mut set_cookies);
        ensure_success(&response, url.as_str())?;
        debug!("warm-up fetch complete");
    }

    let url = client.endpoint(SESSION_INFO_PATH)?;
    let response = client.http().get(url.clone()).send().await?;
    collect_set_cookies(&response, &mut set_cookies);
    ensure_success(&response, url.as_str())?;
    let body = response.text().await?;
    let token = extract_session_token(&body)?;
    debug!("session token acquired");

    let url = client.endpoint(PREFERENCES_PATH)?;
    let response = client
        .http()
        .put(url.clone())
        .header(SESSION_TOKEN_HEADER, &token)
        .json(&serde_json::json!({ "data": { "store": store_id } }))
        .send()
        .await?;
    collect_set_cookies(&response, &mut set_cookies);
    ensure_success(&response, url.as_str())?;
    info!(store_id, "session pinned to store");

    Ok(SessionContext { token, set_cookies })
}

/// Extracts the session token from the session-info response body.
///
/// The endpoint returns a script-like assignment, e.g.
/// `window.__SESSION__ = {"tid":"abc123","locale":"en"};`. The grammar this
/// parser accepts is deliberately narrow: everything after the first `=`
/// (with an optional trailing `;`) must parse as a JSON object carrying a
/// string field `tid`. Any deviation is a [`ScraperError::Session`] rather
/// than a best-effort recovery.
fn extract_session_token(body: &str) -> Result<String, ScraperError> {
    let (_, rhs) = body.split_once('=').ok_or_else(|| ScraperError::Session {
        reason: "session response contains no assignment".to_owned(),
    })?;
    let json = rhs.trim().trim_end_matches(';').trim_end();

    let value: Value = serde_json::from_str(json).map_err(|e| ScraperError::Session {
        reason: format!("assignment right-hand side is not valid JSON: {e}"),
    })?;

    value
        .get("tid")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ScraperError::Session {
            reason: "session payload has no string `tid` field".to_owned(),
        })
}

fn ensure_success(response: &reqwest::Response, url: &str) -> Result<(), ScraperError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        })
    }
}

/// Captures raw `Set-Cookie` values so the caller can persist the jar for
/// the next run's warm-up skip.
fn collect_set_cookies(response: &reqwest::Response, into: &mut Vec<String>) {
    for value in response.headers().get_all(reqwest::header::SET_COOKIE) {
        if let Ok(s) = value.to_str() {
            into.push(s.to_owned());
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
