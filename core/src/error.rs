// bodega/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BodegaError {
  #[error("{entity} not found: {key}")]
  NotFound { entity: &'static str, key: String },

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Invalid quantity {quantity} for product {product_id}")]
  InvalidQuantity { product_id: Uuid, quantity: u32 },

  #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
  InsufficientStock {
    product_id: Uuid,
    available: u32,
    requested: u32,
  },

  #[error("Payment failed: {reason}")]
  PaymentFailed { reason: String },

  #[error("Access denied: {0}")]
  Forbidden(String),

  #[error("Storage failure during {operation}. Source: {source}")]
  Storage {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },

  // Payment was captured but the order could not be persisted. Never folded
  // into PaymentFailed: operators must reconcile against payment_id by hand.
  #[error("Order persistence failed after successful charge '{payment_id}'; manual reconciliation required. Source: {source}")]
  CommitInconsistency {
    payment_id: String,
    #[source]
    source: AnyhowError,
  },
}

pub type BodegaResult<T, E = BodegaError> = std::result::Result<T, E>;
