// bodega/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Patch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Confirmed,
  Shipped,
  Delivered,
  Cancelled,
}

/// One ordered line. `price_cents` is the unit price snapshotted at
/// validation time; it never re-reads the live product afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
  pub product_id: Uuid,
  pub quantity: u32,
  pub price_cents: u32,
}

/// A placed order. Created only by checkout, with status `Confirmed`.
/// `id`, `username`, `order_date`, `items`, `total_amount_cents` and
/// `payment_id` are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub username: String,
  pub order_date: DateTime<Utc>,
  pub ship_address: String,
  pub items: Vec<OrderItem>,
  pub total_amount_cents: u64,
  pub payment_id: String,
  pub status: OrderStatus,
}

/// Admin mutation payload for an order. Only the fields that are mutable
/// after creation are patchable; line items and totals are snapshots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPatch {
  pub ship_address: Option<String>,
  pub status: Option<OrderStatus>,
}

impl Patch<Order> for OrderPatch {
  fn apply(&self, record: &mut Order) {
    if let Some(ship_address) = &self.ship_address {
      record.ship_address = ship_address.clone();
    }
    if let Some(status) = self.status {
      record.status = status;
    }
  }
}
