// bodega/examples/rollback_on_decline.rs

use std::sync::Arc;

use bodega::{
  BodegaError, Caller, Checkout, CheckoutRequest, LineItem, MockGateway, Product, Role, Store,
};
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), BodegaError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Rollback On Decline Example ---");

  let store = Arc::new(Store::in_memory());
  let lamp = Product {
    id: Uuid::new_v4(),
    name: "Reading Lamp".to_string(),
    category: "Lighting".to_string(),
    price_cents: 4500,
    on_hand: 3,
    description: String::new(),
  };
  let lamp_id = lamp.id;
  store.add(lamp)?;

  // Failure rate 1.0: every charge is declined, so the reservations made
  // during this attempt must be released again.
  let checkout = Checkout::new(store.clone(), Arc::new(MockGateway::new(1.0)));

  let caller = Caller::new("ana", Role::User);
  let outcome = checkout
    .place_order(
      &caller,
      CheckoutRequest {
        items: vec![LineItem {
          product_id: lamp_id,
          quantity: 2,
        }],
        ship_address: "12 Canal St".to_string(),
      },
    )
    .await;

  match outcome {
    Err(BodegaError::PaymentFailed { reason }) => {
      info!("checkout failed as expected: {}", reason);
    }
    other => panic!("expected PaymentFailed, got {other:?}"),
  }

  // All-or-nothing: the decline left the shelf exactly as it was.
  let left = store.find(|p: &Product| p.id == lamp_id)?.unwrap().on_hand;
  assert_eq!(left, 3);
  info!("on-hand restored to {}", left);

  Ok(())
}
