// bodega/src/models/product.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Patch;

/// A catalog product. Prices are integer cents; `on_hand` can never go
/// negative by construction, the ledger guards the decrement itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub category: String,
  pub price_cents: u32,
  pub on_hand: u32,
  #[serde(default)]
  pub description: String,
}

/// Admin mutation payload for a product. Present fields overwrite the
/// record field wholesale; absent fields are retained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
  pub name: Option<String>,
  pub category: Option<String>,
  pub price_cents: Option<u32>,
  pub on_hand: Option<u32>,
  pub description: Option<String>,
}

impl Patch<Product> for ProductPatch {
  fn apply(&self, record: &mut Product) {
    if let Some(name) = &self.name {
      record.name = name.clone();
    }
    if let Some(category) = &self.category {
      record.category = category.clone();
    }
    if let Some(price_cents) = self.price_cents {
      record.price_cents = price_cents;
    }
    if let Some(on_hand) = self.on_hand {
      record.on_hand = on_hand;
    }
    if let Some(description) = &self.description {
      record.description = description.clone();
    }
  }
}
