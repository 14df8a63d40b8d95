// bodega/src/ops/orders.rs

//! Order read and admin-mutation operations. Orders are only ever
//! created by the checkout orchestrator, never through this module.

use tracing::info;
use uuid::Uuid;

use crate::context::Caller;
use crate::error::{BodegaError, BodegaResult};
use crate::models::{Order, OrderPatch};
use crate::store::Store;

pub fn list_orders(store: &Store, caller: &Caller) -> BodegaResult<Vec<Order>> {
  caller.require_admin()?;
  store.all::<Order>()
}

pub fn orders_for_user(store: &Store, caller: &Caller, username: &str) -> BodegaResult<Vec<Order>> {
  caller.require_self_or_admin(username)?;
  store.find_all(|o: &Order| o.username == username)
}

/// Fetches one order. Any authenticated caller may ask; only the owner
/// or an admin gets it back.
pub fn get_order(store: &Store, caller: &Caller, id: Uuid) -> BodegaResult<Order> {
  let order = store
    .find(|o: &Order| o.id == id)?
    .ok_or(BodegaError::NotFound {
      entity: "order",
      key: id.to_string(),
    })?;
  caller.require_self_or_admin(&order.username)?;
  Ok(order)
}

pub fn update_order(
  store: &Store,
  caller: &Caller,
  id: Uuid,
  patch: OrderPatch,
) -> BodegaResult<Order> {
  caller.require_admin()?;
  store
    .update_where(|o: &Order| o.id == id, &patch)?
    .ok_or(BodegaError::NotFound {
      entity: "order",
      key: id.to_string(),
    })
}

pub fn delete_order(store: &Store, caller: &Caller, id: Uuid) -> BodegaResult<Order> {
  caller.require_admin()?;
  let removed = store
    .remove_where(|o: &Order| o.id == id)?
    .ok_or(BodegaError::NotFound {
      entity: "order",
      key: id.to_string(),
    })?;
  info!(order_id = %removed.id, "order deleted");
  Ok(removed)
}
