// demos/storefront/src/seed.rs

//! Demo data: a handful of products and one registered account.

use bodega::ops::accounts::{self, Registration};
use bodega::{Product, Store, User};
use uuid::Uuid;

pub fn seed_if_empty(store: &Store) -> anyhow::Result<()> {
  if !store.all::<Product>()?.is_empty() {
    tracing::info!("Store already has products; skipping seed.");
    return Ok(());
  }

  let shelf = [
    ("Stovetop Kettle", "Kitchen", 3200_u32, 5_u32, "1.5l, enamel"),
    ("Diner Mug", "Kitchen", 900, 24, "stoneware, 350ml"),
    ("Reading Lamp", "Lighting", 4500, 3, "warm white, dimmable"),
    ("Desk Fan", "Appliances", 2800, 8, ""),
  ];
  for (name, category, price_cents, on_hand, description) in shelf {
    store.add(Product {
      id: Uuid::new_v4(),
      name: name.to_string(),
      category: category.to_string(),
      price_cents,
      on_hand,
      description: description.to_string(),
    })?;
  }

  if store.find(|u: &User| u.username == "ana")?.is_none() {
    // The hash is opaque to the core; a real deployment's auth layer
    // produces it.
    accounts::register(
      store,
      Registration {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password_hash: "$argon2id$demo-only-hash".to_string(),
        first: "Ana".to_string(),
        last: "Duarte".to_string(),
        street_address: Some("12 Canal St".to_string()),
      },
    )?;
  }

  tracing::info!("Seeded demo catalog and account.");
  Ok(())
}
