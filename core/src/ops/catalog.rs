// bodega/src/ops/catalog.rs

//! Product catalog operations. Reads are open to any caller; mutations
//! require the admin role.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::context::Caller;
use crate::error::{BodegaError, BodegaResult};
use crate::models::{Product, ProductPatch};
use crate::store::Store;

/// Creation payload for a product. The identifier is generated here,
/// never accepted from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub category: String,
  pub price_cents: u32,
  pub on_hand: u32,
  #[serde(default)]
  pub description: Option<String>,
}

pub fn list_products(store: &Store) -> BodegaResult<Vec<Product>> {
  store.all::<Product>()
}

/// Case-insensitive substring search over name and/or category. Both
/// filters absent returns the full catalog.
pub fn search_products(
  store: &Store,
  name: Option<&str>,
  category: Option<&str>,
) -> BodegaResult<Vec<Product>> {
  let name = name.map(str::to_lowercase);
  let category = category.map(str::to_lowercase);
  store.find_all(|p: &Product| {
    let name_ok = name
      .as_deref()
      .map_or(true, |needle| p.name.to_lowercase().contains(needle));
    let category_ok = category
      .as_deref()
      .map_or(true, |needle| p.category.to_lowercase().contains(needle));
    name_ok && category_ok
  })
}

pub fn get_product(store: &Store, id: Uuid) -> BodegaResult<Product> {
  store
    .find(|p: &Product| p.id == id)?
    .ok_or(BodegaError::NotFound {
      entity: "product",
      key: id.to_string(),
    })
}

pub fn create_product(store: &Store, caller: &Caller, new: NewProduct) -> BodegaResult<Product> {
  caller.require_admin()?;
  if new.name.trim().is_empty() {
    return Err(BodegaError::Validation("product name is required".to_string()));
  }
  if new.category.trim().is_empty() {
    return Err(BodegaError::Validation("product category is required".to_string()));
  }

  let product = Product {
    id: Uuid::new_v4(),
    name: new.name,
    category: new.category,
    price_cents: new.price_cents,
    on_hand: new.on_hand,
    description: new.description.unwrap_or_default(),
  };
  store.add(product.clone())?;
  info!(product_id = %product.id, name = %product.name, "product created");
  Ok(product)
}

pub fn update_product(
  store: &Store,
  caller: &Caller,
  id: Uuid,
  patch: ProductPatch,
) -> BodegaResult<Product> {
  caller.require_admin()?;
  store
    .update_where(|p: &Product| p.id == id, &patch)?
    .ok_or(BodegaError::NotFound {
      entity: "product",
      key: id.to_string(),
    })
}

/// Deletes a product. Historical orders keep their snapshotted line
/// items; nothing cascades.
pub fn delete_product(store: &Store, caller: &Caller, id: Uuid) -> BodegaResult<Product> {
  caller.require_admin()?;
  store
    .remove_where(|p: &Product| p.id == id)?
    .ok_or(BodegaError::NotFound {
      entity: "product",
      key: id.to_string(),
    })
}
