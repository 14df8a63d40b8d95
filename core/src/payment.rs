// bodega/src/payment.rs

//! The payment gateway seam and its mock implementation.
//!
//! Real deployments substitute an actual provider behind the same
//! contract; the mock exists so the orchestrator's rollback path is
//! exercised deterministically by tests (failure rate 0.0 or 1.0) and
//! probabilistically everywhere else.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PaymentReceipt {
  pub payment_id: String,
  pub amount_cents: u64,
}

#[derive(Debug, Clone)]
pub struct PaymentDecline {
  pub reason: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
  async fn charge(&self, amount_cents: u64) -> Result<PaymentReceipt, PaymentDecline>;
}

/// Simulated unreliable gateway: declines pseudo-randomly at the
/// configured rate, independent of amount.
pub struct MockGateway {
  failure_rate: f64,
  latency: Duration,
}

/// Failure probability used when none is configured.
pub const DEFAULT_FAILURE_RATE: f64 = 0.10;

impl MockGateway {
  pub fn new(failure_rate: f64) -> Self {
    Self {
      failure_rate: failure_rate.clamp(0.0, 1.0),
      latency: Duration::from_millis(50),
    }
  }

  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }
}

impl Default for MockGateway {
  fn default() -> Self {
    Self::new(DEFAULT_FAILURE_RATE)
  }
}

#[async_trait]
impl PaymentGateway for MockGateway {
  #[instrument(name = "mock_gateway::charge", skip(self), fields(amount_cents))]
  async fn charge(&self, amount_cents: u64) -> Result<PaymentReceipt, PaymentDecline> {
    tokio::time::sleep(self.latency).await; // Simulate network latency

    let declined = rand::thread_rng().gen_bool(self.failure_rate);
    if declined {
      info!(amount_cents, "mock charge DECLINED");
      return Err(PaymentDecline {
        reason: "card declined".to_string(),
      });
    }

    let payment_id = format!("pay_{}", Uuid::new_v4());
    info!(amount_cents, %payment_id, "mock charge succeeded");
    Ok(PaymentReceipt {
      payment_id,
      amount_cents,
    })
  }
}
