use chrono::Utc;

use super::*;
use crate::model::{Availability, ProductState};

fn state(sku: &str, quantity: i64, threshold: i64) -> ProductState {
    ProductState {
        sku: sku.to_owned(),
        name: format!("Product {sku}"),
        url: format!("https://shop.example.com/product/{sku}"),
        price: "999.00".to_owned(),
        inventory_quantity: quantity,
        low_stock_threshold: threshold,
        availability: Availability::from_levels(quantity, threshold),
        last_checked: Utc::now(),
    }
}

fn snapshot(states: Vec<ProductState>) -> Snapshot {
    states.into_iter().collect()
}

#[test]
fn out_to_in_transition_fires_one_event() {
    // Scenario A: X1 goes 0/5 → 10/5; one event with units-available 5.
    let previous = snapshot(vec![state("X1", 0, 5)]);
    let current = snapshot(vec![state("X1", 10, 5)]);

    let events = detect_restocks(&current, &previous);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].sku, "X1");
    assert_eq!(events[0].units_available(), 5);
}

#[test]
fn cold_start_fires_nothing() {
    // Scenario B: empty previous snapshot, in-stock current entry.
    let previous = Snapshot::new();
    let current = snapshot(vec![state("X1", 10, 5)]);
    assert!(detect_restocks(&current, &previous).is_empty());
}

#[test]
fn newly_observed_sku_fires_nothing_even_when_in_stock() {
    let previous = snapshot(vec![state("X1", 10, 5)]);
    let current = snapshot(vec![state("X1", 10, 5), state("X2", 20, 5)]);
    assert!(detect_restocks(&current, &previous).is_empty());
}

#[test]
fn in_to_in_fires_nothing() {
    // Scenario C: unchanged in-stock entry.
    let previous = snapshot(vec![state("X1", 10, 5)]);
    let current = snapshot(vec![state("X1", 11, 5)]);
    assert!(detect_restocks(&current, &previous).is_empty());
}

#[test]
fn out_to_out_fires_nothing() {
    let previous = snapshot(vec![state("X1", 0, 5)]);
    let current = snapshot(vec![state("X1", 4, 5)]);
    assert!(detect_restocks(&current, &previous).is_empty());
}

#[test]
fn in_to_out_fires_nothing() {
    let previous = snapshot(vec![state("X1", 10, 5)]);
    let current = snapshot(vec![state("X1", 0, 5)]);
    assert!(detect_restocks(&current, &previous).is_empty());
}

#[test]
fn threshold_crossing_uses_adjusted_rule_not_raw_quantity() {
    // 4/5 → 5/5 is still out of stock on both sides (strict inequality),
    // even though raw quantity is nonzero and rising.
    let previous = snapshot(vec![state("X1", 4, 5)]);
    let current = snapshot(vec![state("X1", 5, 5)]);
    assert!(detect_restocks(&current, &previous).is_empty());

    // 5/5 → 6/5 crosses the threshold and fires.
    let previous = snapshot(vec![state("X1", 5, 5)]);
    let current = snapshot(vec![state("X1", 6, 5)]);
    assert_eq!(detect_restocks(&current, &previous).len(), 1);
}

#[test]
fn events_follow_current_snapshot_order() {
    let previous = snapshot(vec![
        state("B2", 0, 5),
        state("A1", 0, 5),
        state("C3", 0, 5),
    ]);
    let current = snapshot(vec![
        state("C3", 10, 5),
        state("A1", 10, 5),
        state("B2", 10, 5),
    ]);

    let skus: Vec<String> = detect_restocks(&current, &previous)
        .into_iter()
        .map(|e| e.sku)
        .collect();
    assert_eq!(skus, vec!["C3", "A1", "B2"]);
}

#[test]
fn mixed_snapshot_only_rising_edges_fire() {
    let previous = snapshot(vec![
        state("RESTOCKED", 0, 5),
        state("STILL_OUT", 2, 5),
        state("STILL_IN", 10, 5),
        state("SOLD_OUT", 10, 5),
        state("DELISTED", 0, 5),
    ]);
    let current = snapshot(vec![
        state("RESTOCKED", 9, 5),
        state("STILL_OUT", 3, 5),
        state("STILL_IN", 8, 5),
        state("SOLD_OUT", 1, 5),
        state("BRAND_NEW", 50, 5),
    ]);

    let events = detect_restocks(&current, &previous);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].sku, "RESTOCKED");
}
