// demos/storefront/src/main.rs

// Declare modules for the application
mod config;
mod seed;

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;

use bodega::ops::{accounts, catalog, orders};
use bodega::{Caller, Checkout, CheckoutRequest, LineItem, MockGateway, Role, Store};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront demo...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e);
    }
  };

  // Open the file-backed store (initializes the file on first run)
  let store = Arc::new(Store::open(&app_config.store_path)?);
  tracing::info!(path = %app_config.store_path, "Store opened.");

  // Seed the store if configured and still empty
  if app_config.seed {
    seed::seed_if_empty(&store)?;
  }

  // Wire the checkout orchestrator against the configured mock gateway
  let gateway = Arc::new(MockGateway::new(app_config.payment_failure_rate));
  let checkout = Checkout::new(store.clone(), gateway)
    .with_charge_timeout(Duration::from_millis(app_config.charge_timeout_ms));

  // An authenticated caller, as the (out-of-scope) session layer would
  // hand it over.
  let ana = Caller::new("ana", Role::User);
  let back_office = Caller::new("root", Role::Admin);

  // Browse the catalog and fill a small cart
  let hits = catalog::search_products(&store, None, Some("kitchen"))?;
  tracing::info!("Catalog has {} kitchen products.", hits.len());
  let items: Vec<LineItem> = hits
    .iter()
    .take(2)
    .map(|p| LineItem {
      product_id: p.id,
      quantity: 1,
    })
    .collect();

  // Place the order; with the default failure rate roughly one attempt
  // in ten is declined and rolled back.
  match checkout
    .place_order(
      &ana,
      CheckoutRequest {
        items,
        ship_address: "12 Canal St".to_string(),
      },
    )
    .await
  {
    Ok(order) => {
      tracing::info!(
        order_id = %order.id,
        total_cents = order.total_amount_cents,
        payment_id = %order.payment_id,
        "Order placed."
      );
    }
    Err(err) => {
      tracing::warn!(error = %err, "Checkout did not complete.");
    }
  }

  // Back office: every order ever placed by ana
  let placed = orders::orders_for_user(&store, &back_office, "ana")?;
  tracing::info!("ana has {} order(s) on file.", placed.len());

  let profiles = accounts::list_users(&store, &back_office)?;
  tracing::info!("{} registered user(s).", profiles.len());

  Ok(())
}
