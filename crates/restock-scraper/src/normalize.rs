//! Normalization from raw catalog records to [`restock_core::ProductState`].

use chrono::{DateTime, Utc};
use tracing::debug;

use restock_core::{Availability, ProductState};

use crate::types::{RawPrice, RawProduct};

/// Sentinel carried verbatim in place of an absent price. Never parsed.
pub const PRICE_UNAVAILABLE: &str = "NA";

/// Converts one raw record into a snapshot entry, or `None` when the record
/// is missing a field the snapshot cannot do without.
///
/// Skipping is per-record by design: partial data for one SKU must not
/// abort the whole fetch. Missing `name`/`slug` get empty-string defaults;
/// a missing `price` becomes the `"NA"` sentinel.
pub(crate) fn normalize_record(
    raw: RawProduct,
    base_url: &str,
    fetched_at: DateTime<Utc>,
) -> Option<ProductState> {
    let Some(sku) = raw.sku.filter(|s| !s.is_empty()) else {
        debug!("skipping catalog record with no sku");
        return None;
    };
    let Some(quantity) = raw.inventory_quantity else {
        debug!(sku = %sku, "skipping catalog record with no inventory_quantity");
        return None;
    };
    let Some(threshold) = raw.low_stock_threshold else {
        debug!(sku = %sku, "skipping catalog record with no low_stock_threshold");
        return None;
    };

    let slug = raw.slug.unwrap_or_default();
    let url = format!("{}/product/{slug}", base_url.trim_end_matches('/'));
    let price = raw
        .price
        .map_or_else(|| PRICE_UNAVAILABLE.to_owned(), RawPrice::into_display);

    Some(ProductState {
        sku,
        name: raw.name.unwrap_or_default(),
        url,
        price,
        inventory_quantity: quantity,
        low_stock_threshold: threshold,
        availability: Availability::from_levels(quantity, threshold),
        last_checked: fetched_at,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
