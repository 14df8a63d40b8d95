// bodega/src/ledger.rs

//! The inventory ledger: quantity check-and-decrement over the products
//! collection, with the matching increment used to undo a reservation.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{BodegaError, BodegaResult};
use crate::models::Product;
use crate::store::{Record, Store};

/// Enforces the non-negative stock invariant. Each call is one atomic
/// read-modify-write against the store, so the availability check always
/// runs against the latest persisted on-hand value, never against a
/// caller's earlier snapshot.
pub struct InventoryLedger {
  store: Arc<Store>,
}

impl InventoryLedger {
  pub fn new(store: Arc<Store>) -> Self {
    Self { store }
  }

  /// Decrements `quantity` from the product's on-hand and returns the
  /// new on-hand value. Fails with `InsufficientStock` if the current
  /// on-hand is lower than requested; nothing is persisted in that case.
  pub fn reserve(&self, product_id: Uuid, quantity: u32) -> BodegaResult<u32> {
    self.store.mutate(|doc| {
      let product = Product::rows_mut(doc)
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or(BodegaError::NotFound {
          entity: "product",
          key: product_id.to_string(),
        })?;
      if quantity > product.on_hand {
        return Err(BodegaError::InsufficientStock {
          product_id,
          available: product.on_hand,
          requested: quantity,
        });
      }
      product.on_hand -= quantity;
      debug!(%product_id, quantity, on_hand = product.on_hand, "stock reserved");
      Ok(product.on_hand)
    })
  }

  /// Increments the product's on-hand by `quantity`, undoing a prior
  /// reservation. Call at most once per reservation being undone.
  pub fn release(&self, product_id: Uuid, quantity: u32) -> BodegaResult<u32> {
    self.store.mutate(|doc| {
      let product = Product::rows_mut(doc)
        .iter_mut()
        .find(|p| p.id == product_id)
        .ok_or(BodegaError::NotFound {
          entity: "product",
          key: product_id.to_string(),
        })?;
      product.on_hand = product.on_hand.saturating_add(quantity);
      debug!(%product_id, quantity, on_hand = product.on_hand, "stock released");
      Ok(product.on_hand)
    })
  }
}
