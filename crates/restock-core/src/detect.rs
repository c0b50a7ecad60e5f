//! Restock detection: the diff between two consecutive snapshots.

use crate::model::{RestockEvent, Snapshot};

/// Diffs the freshly fetched snapshot against the previous run's snapshot and
/// returns one event per SKU that transitioned out-of-stock → in-stock.
///
/// Edge-triggered, not level-triggered:
/// - A SKU absent from `previous` never fires, regardless of its current
///   availability. New products and cold starts (empty or missing state
///   file) produce zero events by design.
/// - Only the rising edge fires; in→in, out→out, and in→out are all silent.
///
/// Events come out in the iteration order of `current`, which is the
/// insertion order from the fetch.
#[must_use]
pub fn detect_restocks(current: &Snapshot, previous: &Snapshot) -> Vec<RestockEvent> {
    current
        .iter()
        .filter_map(|state| {
            let prior = previous.get(&state.sku)?;
            (!prior.availability.is_in_stock() && state.availability.is_in_stock())
                .then(|| RestockEvent::from_state(state))
        })
        .collect()
}

#[cfg(test)]
#[path = "detect_test.rs"]
mod tests;
