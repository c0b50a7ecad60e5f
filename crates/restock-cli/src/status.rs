//! Inspection mode: print what the last run persisted, no network.

use std::path::Path;

pub fn print(state_file: &Path) -> anyhow::Result<()> {
    let snapshot = restock_store::load_snapshot(state_file);
    if snapshot.is_empty() {
        println!("no snapshot recorded at {}", state_file.display());
        return Ok(());
    }

    println!(
        "{} tracked products ({})",
        snapshot.len(),
        state_file.display()
    );
    for state in snapshot.iter() {
        let availability = if state.availability.is_in_stock() {
            "IN_STOCK"
        } else {
            "OUT_OF_STOCK"
        };
        println!(
            "{:<24} {:<13} qty {:>5}  threshold {:>4}  price {:>12}  checked {}",
            state.sku,
            availability,
            state.inventory_quantity,
            state.low_stock_threshold,
            state.price,
            state.last_checked.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }
    Ok(())
}
