use chrono::{TimeZone, Utc};

use restock_core::{Availability, ProductState};

use super::*;

fn state(sku: &str, quantity: i64, threshold: i64) -> ProductState {
    ProductState {
        sku: sku.to_owned(),
        name: format!("Product {sku}"),
        url: format!("https://shop.example.com/product/{sku}"),
        price: "NA".to_owned(),
        inventory_quantity: quantity,
        low_stock_threshold: threshold,
        availability: Availability::from_levels(quantity, threshold),
        last_checked: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn load_missing_file_returns_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = load_snapshot(&dir.path().join("does-not-exist.json"));
    assert!(snapshot.is_empty());
}

#[test]
fn load_corrupt_file_returns_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, "{ not json").unwrap();
    let snapshot = load_snapshot(&path);
    assert!(snapshot.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let snapshot: restock_core::Snapshot =
        [state("K1", 10, 5), state("K2", 0, 3)].into_iter().collect();
    save_snapshot(&path, &snapshot).unwrap();

    let loaded = load_snapshot(&path);
    assert_eq!(loaded, snapshot);

    // Idempotent serialization: saving what was loaded changes nothing.
    let first = std::fs::read_to_string(&path).unwrap();
    save_snapshot(&path, &loaded).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn save_fully_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let old: restock_core::Snapshot =
        [state("GONE", 10, 5), state("KEPT", 10, 5)].into_iter().collect();
    save_snapshot(&path, &old).unwrap();

    let new: restock_core::Snapshot = [state("KEPT", 2, 5)].into_iter().collect();
    save_snapshot(&path, &new).unwrap();

    let loaded = load_snapshot(&path);
    assert_eq!(loaded.len(), 1);
    assert!(loaded.get("GONE").is_none(), "replaced SKU must not survive");
    assert_eq!(loaded.get("KEPT").unwrap().inventory_quantity, 2);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/state/snapshot.json");

    let snapshot: restock_core::Snapshot = [state("K1", 10, 5)].into_iter().collect();
    save_snapshot(&path, &snapshot).unwrap();
    assert_eq!(load_snapshot(&path).len(), 1);
}
