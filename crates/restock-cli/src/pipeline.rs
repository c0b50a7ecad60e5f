//! The once-per-invocation pipeline: negotiate → fetch → diff → notify →
//! persist. Strictly sequential; the external scheduler guarantees runs do
//! not overlap, so there is no locking anywhere in the chain.

use anyhow::Context;
use tracing::{info, warn};

use restock_core::{detect_restocks, AppConfig};
use restock_notify::{notify_events, Notifier};
use restock_scraper::{fetch_snapshot, negotiate, StorefrontClient};

pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    // Cached cookies only skip the warm-up; a missing or stale cache means
    // negotiation starts cold, which is always correct.
    let seed_cookies =
        restock_store::load_cookie_cache(&config.cookie_jar_file, config.cookie_max_age_secs)
            .unwrap_or_default();
    let skip_warmup = !seed_cookies.is_empty();

    let client = StorefrontClient::new(
        &config.shop_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        &seed_cookies,
    )
    .context("building storefront client")?;

    let session = negotiate(&client, &config.store_id, skip_warmup)
        .await
        .context("negotiating storefront session")?;

    let current = fetch_snapshot(&client, &session, &config.store_id, config.page_size)
        .await
        .context("fetching catalog snapshot")?;

    // The previous snapshot is loaded only after the fetch fully succeeded;
    // on any failure above we bail out with the persisted state untouched.
    let previous = restock_store::load_snapshot(&config.state_file);
    let events = detect_restocks(&current, &previous);
    info!(
        products = current.len(),
        previous = previous.len(),
        restocks = events.len(),
        "snapshot diff complete"
    );

    let notifier = Notifier::new(&config.telegram_bot_token, config.request_timeout_secs)
        .context("building notifier")?;
    let delivered =
        notify_events(&notifier, &config.telegram_chat_id, &config.allow_list, &events).await;

    restock_store::save_snapshot(&config.state_file, &current)
        .context("persisting current snapshot")?;

    if !session.set_cookies.is_empty() {
        if let Err(e) =
            restock_store::save_cookie_cache(&config.cookie_jar_file, &session.set_cookies)
        {
            warn!(error = %e, "failed to refresh cookie cache; next run starts cold");
        }
    }

    info!(delivered, "run complete");
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
