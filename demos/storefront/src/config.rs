// demos/storefront/src/config.rs

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub store_path: String,
  pub payment_failure_rate: f64,
  pub charge_timeout_ms: u64,

  // Optional: for seeding the store on startup
  pub seed: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let store_path = env::var("STORE_PATH").unwrap_or_else(|_| "database.json".to_string());

    let payment_failure_rate = env::var("PAYMENT_FAILURE_RATE")
      .unwrap_or_else(|_| bodega::DEFAULT_FAILURE_RATE.to_string())
      .parse::<f64>()
      .context("Invalid PAYMENT_FAILURE_RATE")?;

    let charge_timeout_ms = env::var("CHARGE_TIMEOUT_MS")
      .unwrap_or_else(|_| "10000".to_string())
      .parse::<u64>()
      .context("Invalid CHARGE_TIMEOUT_MS")?;

    let seed = env::var("SEED")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .context("Invalid SEED value")?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      store_path,
      payment_failure_rate,
      charge_timeout_ms,
      seed,
    })
  }
}
