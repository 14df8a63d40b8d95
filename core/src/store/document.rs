// bodega/src/store/document.rs

//! The persisted document: one serialized value holding every collection.

use serde::{Deserialize, Serialize};

use crate::models::{Order, Product, User};
use crate::store::Record;

/// The whole dataset. Serialized as a single JSON document with one
/// named array per collection. Fields default to empty so a document
/// missing a collection still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
  #[serde(default)]
  pub products: Vec<Product>,
  #[serde(default)]
  pub users: Vec<User>,
  #[serde(default)]
  pub orders: Vec<Order>,
}

impl Record for Product {
  const COLLECTION: &'static str = "products";

  fn rows(doc: &Document) -> &Vec<Self> {
    &doc.products
  }

  fn rows_mut(doc: &mut Document) -> &mut Vec<Self> {
    &mut doc.products
  }
}

impl Record for User {
  const COLLECTION: &'static str = "users";

  fn rows(doc: &Document) -> &Vec<Self> {
    &doc.users
  }

  fn rows_mut(doc: &mut Document) -> &mut Vec<Self> {
    &mut doc.users
  }
}

impl Record for Order {
  const COLLECTION: &'static str = "orders";

  fn rows(doc: &Document) -> &Vec<Self> {
    &doc.orders
  }

  fn rows_mut(doc: &mut Document) -> &mut Vec<Self> {
    &mut doc.orders
  }
}
