//! Snapshot data model: per-SKU product state, the ordered snapshot map,
//! and the restock event projection.
//!
//! ## Availability vs. raw inventory
//!
//! The storefront treats an item as orderable only while its on-hand count
//! exceeds the retailer-configured `low_stock_threshold`. An item with
//! `inventory_quantity = 3` and `low_stock_threshold = 5` shows as sold out
//! on the storefront even though the count is nonzero. [`Availability`]
//! encodes exactly that rule and is recomputed on every fetch; the value in
//! the persisted file is never treated as an independent source of truth.
//!
//! ## Price
//!
//! Prices are carried verbatim as strings (`"1499.00"`, `"NA"` when the API
//! omits the field) and never parsed numerically. Notification formatting
//! passes them through unchanged.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Storefront availability derived from inventory levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "IN_STOCK")]
    InStock,
    #[serde(rename = "OUT_OF_STOCK")]
    OutOfStock,
}

impl Availability {
    /// Derives availability from inventory levels.
    ///
    /// In stock iff `quantity > threshold` — strict inequality, so a count
    /// exactly at the threshold is out of stock.
    #[must_use]
    pub fn from_levels(quantity: i64, threshold: i64) -> Self {
        if quantity > threshold {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }

    #[must_use]
    pub fn is_in_stock(self) -> bool {
        matches!(self, Self::InStock)
    }
}

/// One snapshot entry: the observed state of a single SKU at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductState {
    pub sku: String,
    pub name: String,
    /// Canonical product page URL, derived from the API's slug field.
    pub url: String,
    /// Price exactly as the API returned it; `"NA"` when absent.
    pub price: String,
    pub inventory_quantity: i64,
    pub low_stock_threshold: i64,
    /// Recomputed from the two fields above on every fetch.
    pub availability: Availability,
    pub last_checked: DateTime<Utc>,
}

impl ProductState {
    /// Sellable buffer above the low-stock cutoff. This — not the raw
    /// inventory count — is what notifications report as "units available".
    #[must_use]
    pub fn units_available(&self) -> i64 {
        (self.inventory_quantity - self.low_stock_threshold).max(0)
    }
}

/// A restock detected for one SKU: projection of the current entry for the
/// notifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockEvent {
    pub sku: String,
    pub name: String,
    pub price: String,
    pub url: String,
    pub inventory_quantity: i64,
    pub low_stock_threshold: i64,
    pub detected_at: DateTime<Utc>,
}

impl RestockEvent {
    /// Builds the event projection from a current snapshot entry. The
    /// detection timestamp is the fetch time that revealed the transition.
    #[must_use]
    pub fn from_state(state: &ProductState) -> Self {
        Self {
            sku: state.sku.clone(),
            name: state.name.clone(),
            price: state.price.clone(),
            url: state.url.clone(),
            inventory_quantity: state.inventory_quantity,
            low_stock_threshold: state.low_stock_threshold,
            detected_at: state.last_checked,
        }
    }

    /// Same sellable-buffer computation as [`ProductState::units_available`].
    #[must_use]
    pub fn units_available(&self) -> i64 {
        (self.inventory_quantity - self.low_stock_threshold).max(0)
    }
}

/// The full set of tracked products' state as of one fetch.
///
/// Keyed by SKU with last-write-wins on duplicate inserts, while preserving
/// insertion order so downstream event emission is deterministic and follows
/// the order the fetch produced. Serializes as a JSON object keyed by SKU
/// (the persisted state-file format).
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<ProductState>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any existing entry with the same SKU in
    /// place (the original position is kept).
    pub fn insert(&mut self, state: ProductState) {
        if let Some(&pos) = self.index.get(&state.sku) {
            self.entries[pos] = state;
        } else {
            self.index.insert(state.sku.clone(), self.entries.len());
            self.entries.push(state);
        }
    }

    #[must_use]
    pub fn get(&self, sku: &str) -> Option<&ProductState> {
        self.index.get(sku).map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn contains(&self, sku: &str) -> bool {
        self.index.contains_key(sku)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductState> {
        self.entries.iter()
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl FromIterator<ProductState> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ProductState>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for state in iter {
            snapshot.insert(state);
        }
        snapshot
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for state in &self.entries {
            map.serialize_entry(&state.sku, state)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = Snapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping SKU to product state")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Snapshot, A::Error> {
                let mut snapshot = Snapshot::new();
                // The map key duplicates the entry's own `sku` field; the
                // entry wins so a hand-edited file cannot desynchronize them.
                while let Some((_key, state)) = access.next_entry::<String, ProductState>()? {
                    snapshot.insert(state);
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
