// bodega/examples/checkout_flow.rs

use std::sync::Arc;

use bodega::{
  BodegaError, Caller, Checkout, CheckoutRequest, LineItem, MockGateway, Product, Role, Store,
};
use tracing::info;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), BodegaError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Checkout Flow Example ---");

  // 1. An in-memory store with a couple of products on the shelf.
  let store = Arc::new(Store::in_memory());
  let kettle = Product {
    id: Uuid::new_v4(),
    name: "Stovetop Kettle".to_string(),
    category: "Kitchen".to_string(),
    price_cents: 3200,
    on_hand: 5,
    description: "1.5l, enamel".to_string(),
  };
  let mug = Product {
    id: Uuid::new_v4(),
    name: "Diner Mug".to_string(),
    category: "Kitchen".to_string(),
    price_cents: 900,
    on_hand: 12,
    description: String::new(),
  };
  let (kettle_id, mug_id) = (kettle.id, mug.id);
  store.add(kettle)?;
  store.add(mug)?;

  // 2. A gateway that never declines, so this example always commits.
  let checkout = Checkout::new(store.clone(), Arc::new(MockGateway::new(0.0)));

  // 3. Place an order as a plain user.
  let caller = Caller::new("ana", Role::User);
  let order = checkout
    .place_order(
      &caller,
      CheckoutRequest {
        items: vec![
          LineItem {
            product_id: kettle_id,
            quantity: 1,
          },
          LineItem {
            product_id: mug_id,
            quantity: 4,
          },
        ],
        ship_address: "12 Canal St".to_string(),
      },
    )
    .await?;

  info!(order_id = %order.id, "order placed");
  info!("total: {} cents, payment: {}", order.total_amount_cents, order.payment_id);

  // 4. The decrements are durable in the store.
  let kettle_left = store.find(|p: &Product| p.id == kettle_id)?.unwrap().on_hand;
  let mugs_left = store.find(|p: &Product| p.id == mug_id)?.unwrap().on_hand;
  info!("remaining stock: kettle {}, mug {}", kettle_left, mugs_left);

  assert_eq!(order.total_amount_cents, 3200 + 4 * 900);
  assert_eq!(kettle_left, 4);
  assert_eq!(mugs_left, 8);

  Ok(())
}
