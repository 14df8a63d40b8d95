// bodega/src/checkout.rs

//! The checkout orchestrator: the one multi-step, multi-record workflow
//! in the system.
//!
//! A single attempt moves through Validating → Reserving → Charging →
//! Committing. Validation mutates nothing. Reservation failures release
//! every reservation already made in the attempt, as do charge declines
//! and timeouts. A persistence failure after a successful charge is the
//! one outcome that is not rolled back: stock was sold and payment
//! captured, so it surfaces as `CommitInconsistency` for manual
//! reconciliation instead.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::context::Caller;
use crate::error::{BodegaError, BodegaResult};
use crate::ledger::InventoryLedger;
use crate::models::{Order, OrderItem, OrderStatus, Product};
use crate::payment::{PaymentGateway, PaymentReceipt};
use crate::store::Store;

/// One requested line: which product, how many.
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
  pub product_id: Uuid,
  pub quantity: u32,
}

/// A raw checkout request as handed over by the routing layer. The
/// orchestrator performs its own field-level validation regardless of
/// upstream checks.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
  pub items: Vec<LineItem>,
  pub ship_address: String,
}

/// Orchestrates checkout attempts against one store instance.
pub struct Checkout {
  store: Arc<Store>,
  ledger: InventoryLedger,
  gateway: Arc<dyn PaymentGateway>,
  charge_timeout: Duration,
}

impl Checkout {
  pub fn new(store: Arc<Store>, gateway: Arc<dyn PaymentGateway>) -> Self {
    Self {
      ledger: InventoryLedger::new(store.clone()),
      store,
      gateway,
      charge_timeout: Duration::from_secs(10),
    }
  }

  /// Bounds the gateway call. The broader system is synchronous
  /// request/response, so an unresponsive gateway must not stall a
  /// checkout indefinitely; hitting the bound is treated as a decline.
  pub fn with_charge_timeout(mut self, charge_timeout: Duration) -> Self {
    self.charge_timeout = charge_timeout;
    self
  }

  /// Runs one checkout attempt to completion. On success the persisted
  /// order is returned; on failure no product's on-hand differs from
  /// its pre-checkout value (except after `CommitInconsistency`).
  #[instrument(
    name = "checkout::place_order",
    skip(self, request),
    fields(username = %caller.username, item_count = request.items.len())
  )]
  pub async fn place_order(&self, caller: &Caller, request: CheckoutRequest) -> BodegaResult<Order> {
    let items = self.validate(&request)?;
    let total_cents: u64 = items
      .iter()
      .map(|item| u64::from(item.price_cents) * u64::from(item.quantity))
      .sum();

    self.reserve_all(&items)?;

    let receipt = match self.charge(total_cents).await {
      Ok(receipt) => receipt,
      Err(err) => {
        warn!(error = %err, "charge failed, releasing reservations");
        self.release_items(&items);
        return Err(err);
      }
    };

    self.commit(caller, request.ship_address, items, total_cents, receipt)
  }

  /// Validating: every line is checked against the products read at this
  /// moment; nothing is reserved yet. The snapshot also fixes the unit
  /// price copied into the order.
  fn validate(&self, request: &CheckoutRequest) -> BodegaResult<Vec<OrderItem>> {
    if request.items.is_empty() {
      return Err(BodegaError::Validation("items must not be empty".to_string()));
    }
    if request.ship_address.trim().is_empty() {
      return Err(BodegaError::Validation("ship_address is required".to_string()));
    }

    let products = self.store.all::<Product>()?;
    let mut items = Vec::with_capacity(request.items.len());
    for line in &request.items {
      if line.quantity == 0 {
        return Err(BodegaError::InvalidQuantity {
          product_id: line.product_id,
          quantity: line.quantity,
        });
      }
      let product = products
        .iter()
        .find(|p| p.id == line.product_id)
        .ok_or(BodegaError::NotFound {
          entity: "product",
          key: line.product_id.to_string(),
        })?;
      if product.on_hand < line.quantity {
        return Err(BodegaError::InsufficientStock {
          product_id: product.id,
          available: product.on_hand,
          requested: line.quantity,
        });
      }
      items.push(OrderItem {
        product_id: line.product_id,
        quantity: line.quantity,
        price_cents: product.price_cents,
      });
    }
    Ok(items)
  }

  /// Reserving: each reservation re-checks availability atomically, so a
  /// quantity that changed since validation fails here. A failure part
  /// way through releases everything reserved earlier in this attempt.
  fn reserve_all(&self, items: &[OrderItem]) -> BodegaResult<()> {
    for (idx, item) in items.iter().enumerate() {
      match self.ledger.reserve(item.product_id, item.quantity) {
        Ok(on_hand) => {
          debug!(product_id = %item.product_id, quantity = item.quantity, on_hand, "reserved");
        }
        Err(err) => {
          warn!(product_id = %item.product_id, error = %err, "reservation failed, rolling back");
          self.release_items(&items[..idx]);
          return Err(err);
        }
      }
    }
    Ok(())
  }

  /// Charging: no store lock is held across this await.
  async fn charge(&self, total_cents: u64) -> BodegaResult<PaymentReceipt> {
    match tokio::time::timeout(self.charge_timeout, self.gateway.charge(total_cents)).await {
      Ok(Ok(receipt)) => Ok(receipt),
      Ok(Err(decline)) => Err(BodegaError::PaymentFailed {
        reason: decline.reason,
      }),
      Err(_elapsed) => Err(BodegaError::PaymentFailed {
        reason: format!("gateway did not respond within {:?}", self.charge_timeout),
      }),
    }
  }

  /// Committing: constructs and persists the order. Prices were fixed at
  /// validation time and are not re-read here.
  fn commit(
    &self,
    caller: &Caller,
    ship_address: String,
    items: Vec<OrderItem>,
    total_cents: u64,
    receipt: PaymentReceipt,
  ) -> BodegaResult<Order> {
    let order = Order {
      id: Uuid::new_v4(),
      username: caller.username.clone(),
      order_date: Utc::now(),
      ship_address,
      items,
      total_amount_cents: total_cents,
      payment_id: receipt.payment_id.clone(),
      status: OrderStatus::Confirmed,
    };

    if let Err(err) = self.store.add(order.clone()) {
      error!(
        payment_id = %receipt.payment_id,
        error = %err,
        "order persistence failed after successful charge"
      );
      return Err(BodegaError::CommitInconsistency {
        payment_id: receipt.payment_id,
        source: anyhow::Error::new(err),
      });
    }

    info!(order_id = %order.id, total_cents, "order placed");
    Ok(order)
  }

  /// Releases reservations made earlier in this attempt, most recent
  /// first. Best-effort per item: a failed release is logged and the
  /// remaining releases still run.
  fn release_items(&self, items: &[OrderItem]) {
    for item in items.iter().rev() {
      if let Err(err) = self.ledger.release(item.product_id, item.quantity) {
        error!(
          product_id = %item.product_id,
          quantity = item.quantity,
          error = %err,
          "release failed; on-hand requires manual correction"
        );
      }
    }
  }
}
