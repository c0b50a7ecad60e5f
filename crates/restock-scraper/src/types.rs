//! Raw catalog response types.
//!
//! Every field is optional at the deserialization boundary: the API has been
//! observed to omit fields per record, and one incomplete record must never
//! abort the whole fetch. `normalize` decides which omissions make a record
//! unusable (no `sku`, `inventory_quantity`, or `low_stock_threshold`) and
//! which get defaults.

use serde::Deserialize;

/// One product record from the catalog `data` list, as the API sends it.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// URL slug the canonical product page is derived from.
    #[serde(default)]
    pub slug: Option<String>,

    /// Observed as both a decimal string (`"1499.00"`) and a bare number.
    /// Carried verbatim either way, never parsed numerically.
    #[serde(default)]
    pub price: Option<RawPrice>,

    #[serde(default)]
    pub inventory_quantity: Option<i64>,

    /// Retailer-configured buffer below which the item is not orderable
    /// even with nonzero inventory.
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
}

/// Price exactly as the API serialized it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl RawPrice {
    /// Verbatim display form: strings pass through, numbers render with
    /// serde_json's canonical formatting.
    #[must_use]
    pub fn into_display(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}
