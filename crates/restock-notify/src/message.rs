//! Event-to-message formatting and the per-run delivery loop.

use std::collections::HashSet;

use tracing::{error, info};

use restock_core::RestockEvent;

use crate::telegram::{Notifier, SendOptions};

/// Renders one restock event as a chat message.
///
/// The headline number is the sellable buffer above the low-stock cutoff
/// (`inventory_quantity - low_stock_threshold`), not the raw inventory
/// count — raw counts overstate what the storefront will actually sell.
/// The price is passed through verbatim, including the `"NA"` sentinel.
#[must_use]
pub fn format_event(event: &RestockEvent) -> String {
    format!(
        "*Back in stock: {name}*\nUnits available: {units}\nPrice: {price}\n{url}\nDetected: {ts} UTC",
        name = event.name,
        units = event.units_available(),
        price = event.price,
        url = event.url,
        ts = event.detected_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Returns the events that pass the allow-list. An empty allow-list means
/// everything passes.
#[must_use]
pub fn filter_events<'a>(
    events: &'a [RestockEvent],
    allow_list: &HashSet<String>,
) -> Vec<&'a RestockEvent> {
    events
        .iter()
        .filter(|e| allow_list.is_empty() || allow_list.contains(&e.sku))
        .collect()
}

/// Sends one message per qualifying event, sequentially, and returns how
/// many were delivered.
///
/// Delivery failures are logged and do not stop the remaining events; a
/// run's persistence step proceeds regardless of how many sends succeeded.
pub async fn notify_events(
    notifier: &Notifier,
    chat_id: &str,
    allow_list: &HashSet<String>,
    events: &[RestockEvent],
) -> usize {
    let mut delivered = 0;
    for event in filter_events(events, allow_list) {
        let text = format_event(event);
        match notifier.send(chat_id, &text, &SendOptions::default()).await {
            Ok(()) => {
                info!(sku = %event.sku, "restock notification sent");
                delivered += 1;
            }
            Err(e) => {
                error!(sku = %event.sku, error = %e, "failed to deliver restock notification");
            }
        }
    }
    delivered
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
