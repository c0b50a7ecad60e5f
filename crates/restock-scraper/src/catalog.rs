//! Catalog fetch: the authenticated product-listing query, normalized into
//! a snapshot.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use restock_core::Snapshot;

use crate::client::StorefrontClient;
use crate::error::ScraperError;
use crate::normalize::normalize_record;
use crate::session::{SessionContext, CATEGORY, SESSION_TOKEN_HEADER};
use crate::types::RawProduct;

/// Field selection sent with every catalog query.
const PRODUCT_FIELDS: &str = "sku,name,slug,price,inventory_quantity,low_stock_threshold";

const PRODUCTS_PATH: &str = "/api/1/products";

/// Maximum number of pages to fetch before returning an error.
/// Prevents infinite loops if the API keeps returning full pages.
const MAX_PAGES: usize = 50;

/// Fetches the full catalog for the configured category and store, and
/// normalizes it into a [`Snapshot`].
///
/// Pagination is offset-based: pages are requested with `start` advancing
/// by `page_size` until a short (or empty) page comes back. Every request
/// carries the session token header and the shared cookie jar. All entries
/// are stamped with one fetch time, taken when the fetch started.
///
/// Records missing `sku`, `inventory_quantity`, or `low_stock_threshold`
/// are skipped without failing the fetch; duplicate SKUs across the
/// response are last-write-wins.
///
/// # Errors
///
/// - [`ScraperError::Transport`] — network or timeout failure.
/// - [`ScraperError::UnexpectedStatus`] — non-success status.
/// - [`ScraperError::Deserialize`] — response body is not JSON.
/// - [`ScraperError::ResponseFormat`] — no top-level `data` list.
/// - [`ScraperError::PaginationLimit`] — more than [`MAX_PAGES`] full pages.
pub async fn fetch_snapshot(
    client: &StorefrontClient,
    session: &SessionContext,
    store_id: &str,
    page_size: u32,
) -> Result<Snapshot, ScraperError> {
    let fetched_at = Utc::now();
    let mut snapshot = Snapshot::new();
    let mut start: u32 = 0;
    let mut page_count = 0usize;

    loop {
        page_count += 1;
        let url = client.endpoint(PRODUCTS_PATH)?;
        if page_count > MAX_PAGES {
            return Err(ScraperError::PaginationLimit {
                url: url.to_string(),
                max_pages: MAX_PAGES,
            });
        }

        let limit_param = page_size.to_string();
        let start_param = start.to_string();
        let response = client
            .http()
            .get(url.clone())
            .query(&[
                ("fields", PRODUCT_FIELDS),
                ("category", CATEGORY),
                ("limit", limit_param.as_str()),
                ("start", start_param.as_str()),
                ("store", store_id),
            ])
            .header(SESSION_TOKEN_HEADER, &session.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let document: Value =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("catalog page at start={start}"),
                source: e,
            })?;
        let records = document
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| ScraperError::ResponseFormat {
                url: url.to_string(),
                reason: "response has no top-level `data` list".to_owned(),
            })?;

        let page_len = records.len();
        debug!(start, page_len, "catalog page fetched");

        for record in records {
            match serde_json::from_value::<RawProduct>(record.clone()) {
                Ok(raw) => {
                    if let Some(state) = normalize_record(raw, client.base_str(), fetched_at) {
                        snapshot.insert(state);
                    }
                }
                Err(e) => {
                    debug!(error = %e, "skipping catalog record that does not match the expected shape");
                }
            }
        }

        if page_len < page_size as usize {
            break;
        }
        start += page_size;
    }

    info!(
        products = snapshot.len(),
        pages = page_count,
        "catalog fetch complete"
    );
    Ok(snapshot)
}
