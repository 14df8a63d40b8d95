// tests/ops_tests.rs
mod common;

use common::*;

use std::sync::Arc;

use bodega::ops::{accounts, catalog, orders};
use bodega::{
  BodegaError, Checkout, CheckoutRequest, LineItem, MockGateway, OrderPatch, OrderStatus,
  ProductPatch, Role, User, UserPatch,
};
use uuid::Uuid;

fn registration(username: &str, email: &str) -> accounts::Registration {
  accounts::Registration {
    username: username.to_string(),
    email: email.to_string(),
    password_hash: "$2b$10$opaque-hash".to_string(),
    first: "Ana".to_string(),
    last: "Duarte".to_string(),
    street_address: None,
  }
}

fn new_product(name: &str, category: &str) -> catalog::NewProduct {
  catalog::NewProduct {
    name: name.to_string(),
    category: category.to_string(),
    price_cents: 1500,
    on_hand: 10,
    description: Some("demo".to_string()),
  }
}

// --- accounts ---

#[test]
fn register_returns_credential_free_profile() {
  let store = shared_store();
  let profile = accounts::register(&store, registration("ana", "ana@example.com")).expect("register");

  assert_eq!(profile.username, "ana");
  assert_eq!(profile.role, Role::User);

  // The stored record keeps the opaque credential verbatim.
  let stored = store
    .find(|u: &User| u.username == "ana")
    .expect("find")
    .expect("stored");
  assert_eq!(stored.password_hash, "$2b$10$opaque-hash");
}

#[test]
fn register_rejects_duplicate_username_or_email() {
  let store = shared_store();
  accounts::register(&store, registration("ana", "ana@example.com")).expect("register");

  let err = accounts::register(&store, registration("ana", "other@example.com"))
    .expect_err("duplicate username");
  assert!(matches!(err, BodegaError::Validation(_)));

  let err = accounts::register(&store, registration("other", "ana@example.com"))
    .expect_err("duplicate email");
  assert!(matches!(err, BodegaError::Validation(_)));
}

#[test]
fn register_rejects_missing_required_fields() {
  let store = shared_store();
  let mut reg = registration("ana", "ana@example.com");
  reg.first = String::new();
  let err = accounts::register(&store, reg).expect_err("missing first");
  assert!(matches!(err, BodegaError::Validation(_)));
}

#[test]
fn listing_users_is_admin_only() {
  let store = shared_store();
  accounts::register(&store, registration("ana", "ana@example.com")).expect("register");

  let err = accounts::list_users(&store, &shopper("ana")).expect_err("not admin");
  assert!(matches!(err, BodegaError::Forbidden(_)));

  let profiles = accounts::list_users(&store, &admin()).expect("admin lists");
  assert_eq!(profiles.len(), 1);
}

#[test]
fn get_user_allows_self_and_admin_only() {
  let store = shared_store();
  accounts::register(&store, registration("ana", "ana@example.com")).expect("register");

  assert!(accounts::get_user(&store, &shopper("ana"), "ana").is_ok());
  assert!(accounts::get_user(&store, &admin(), "ana").is_ok());
  assert!(matches!(
    accounts::get_user(&store, &shopper("bea"), "ana").expect_err("stranger"),
    BodegaError::Forbidden(_)
  ));
}

#[test]
fn non_admin_role_escalation_is_dropped() {
  let store = shared_store();
  accounts::register(&store, registration("ana", "ana@example.com")).expect("register");

  let patch = UserPatch {
    role: Some(Role::Admin),
    street_address: Some("9 Mercado Way".to_string()),
    ..UserPatch::default()
  };
  let profile = accounts::update_user(&store, &shopper("ana"), "ana", patch).expect("update");
  // The address change lands, the role change does not.
  assert_eq!(profile.street_address, "9 Mercado Way");
  assert_eq!(profile.role, Role::User);

  let patch = UserPatch {
    role: Some(Role::Admin),
    ..UserPatch::default()
  };
  let profile = accounts::update_user(&store, &admin(), "ana", patch).expect("admin update");
  assert_eq!(profile.role, Role::Admin);
}

#[tokio::test]
async fn deleting_a_user_leaves_their_orders_intact() {
  let store = shared_store();
  accounts::register(&store, registration("ana", "ana@example.com")).expect("register");
  let p1 = seed_product(&store, "kettle", 1000, 5);

  let order = Checkout::new(store.clone(), Arc::new(MockGateway::new(0.0)))
    .place_order(
      &shopper("ana"),
      CheckoutRequest {
        items: vec![LineItem {
          product_id: p1,
          quantity: 1,
        }],
        ship_address: "12 Canal St".to_string(),
      },
    )
    .await
    .expect("checkout");

  accounts::delete_user(&store, &admin(), "ana").expect("delete user");

  let kept = orders::get_order(&store, &admin(), order.id).expect("order survives");
  assert_eq!(kept.username, "ana");
  assert_eq!(kept.total_amount_cents, order.total_amount_cents);
}

// --- catalog ---

#[test]
fn product_creation_is_admin_only_and_validated() {
  let store = shared_store();

  let err = catalog::create_product(&store, &shopper("ana"), new_product("kettle", "kitchen"))
    .expect_err("not admin");
  assert!(matches!(err, BodegaError::Forbidden(_)));

  let err = catalog::create_product(&store, &admin(), new_product("  ", "kitchen"))
    .expect_err("blank name");
  assert!(matches!(err, BodegaError::Validation(_)));

  let created = catalog::create_product(&store, &admin(), new_product("kettle", "kitchen"))
    .expect("create");
  assert_eq!(created.description, "demo");
  assert_eq!(catalog::list_products(&store).expect("list").len(), 1);
}

#[test]
fn search_matches_name_and_category_fragments_case_insensitively() {
  let store = shared_store();
  catalog::create_product(&store, &admin(), new_product("Stovetop Kettle", "Kitchen"))
    .expect("create");
  catalog::create_product(&store, &admin(), new_product("Reading Lamp", "Lighting"))
    .expect("create");

  let hits = catalog::search_products(&store, Some("kettle"), None).expect("search");
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Stovetop Kettle");

  let hits = catalog::search_products(&store, None, Some("light")).expect("search");
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Reading Lamp");

  let hits = catalog::search_products(&store, Some("lamp"), Some("kitchen")).expect("search");
  assert!(hits.is_empty());

  // No filters: the whole catalog.
  assert_eq!(catalog::search_products(&store, None, None).expect("search").len(), 2);
}

#[test]
fn product_update_and_delete_require_admin() {
  let store = shared_store();
  let created = catalog::create_product(&store, &admin(), new_product("kettle", "kitchen"))
    .expect("create");

  let patch = ProductPatch {
    price_cents: Some(1800),
    ..ProductPatch::default()
  };
  assert!(matches!(
    catalog::update_product(&store, &shopper("ana"), created.id, patch.clone())
      .expect_err("not admin"),
    BodegaError::Forbidden(_)
  ));
  let updated = catalog::update_product(&store, &admin(), created.id, patch).expect("update");
  assert_eq!(updated.price_cents, 1800);
  assert_eq!(updated.name, "kettle");

  let removed = catalog::delete_product(&store, &admin(), created.id).expect("delete");
  assert_eq!(removed.id, created.id);
  assert!(matches!(
    catalog::get_product(&store, created.id).expect_err("gone"),
    BodegaError::NotFound { .. }
  ));
}

#[test]
fn get_unknown_product_is_not_found() {
  let store = shared_store();
  assert!(matches!(
    catalog::get_product(&store, Uuid::new_v4()).expect_err("unknown"),
    BodegaError::NotFound { entity: "product", .. }
  ));
}

// --- orders ---

#[tokio::test]
async fn order_reads_enforce_ownership() {
  let store = shared_store();
  let p1 = seed_product(&store, "kettle", 1000, 5);
  let checkout = Checkout::new(store.clone(), Arc::new(MockGateway::new(0.0)));
  let order = checkout
    .place_order(
      &shopper("ana"),
      CheckoutRequest {
        items: vec![LineItem {
          product_id: p1,
          quantity: 1,
        }],
        ship_address: "12 Canal St".to_string(),
      },
    )
    .await
    .expect("checkout");

  assert!(orders::get_order(&store, &shopper("ana"), order.id).is_ok());
  assert!(orders::get_order(&store, &admin(), order.id).is_ok());
  assert!(matches!(
    orders::get_order(&store, &shopper("bea"), order.id).expect_err("stranger"),
    BodegaError::Forbidden(_)
  ));

  assert_eq!(
    orders::orders_for_user(&store, &shopper("ana"), "ana")
      .expect("own orders")
      .len(),
    1
  );
  assert!(matches!(
    orders::orders_for_user(&store, &shopper("bea"), "ana").expect_err("stranger"),
    BodegaError::Forbidden(_)
  ));

  assert!(matches!(
    orders::list_orders(&store, &shopper("ana")).expect_err("not admin"),
    BodegaError::Forbidden(_)
  ));
  assert_eq!(orders::list_orders(&store, &admin()).expect("admin").len(), 1);
}

#[tokio::test]
async fn admin_patches_and_deletes_orders() {
  let store = shared_store();
  let p1 = seed_product(&store, "kettle", 1000, 5);
  let checkout = Checkout::new(store.clone(), Arc::new(MockGateway::new(0.0)));
  let order = checkout
    .place_order(
      &shopper("ana"),
      CheckoutRequest {
        items: vec![LineItem {
          product_id: p1,
          quantity: 1,
        }],
        ship_address: "12 Canal St".to_string(),
      },
    )
    .await
    .expect("checkout");

  let patch = OrderPatch {
    status: Some(OrderStatus::Shipped),
    ..OrderPatch::default()
  };
  assert!(matches!(
    orders::update_order(&store, &shopper("ana"), order.id, patch.clone())
      .expect_err("not admin"),
    BodegaError::Forbidden(_)
  ));
  let updated = orders::update_order(&store, &admin(), order.id, patch).expect("update");
  assert_eq!(updated.status, OrderStatus::Shipped);
  // Snapshotted fields are untouched by the patch.
  assert_eq!(updated.total_amount_cents, order.total_amount_cents);

  let removed = orders::delete_order(&store, &admin(), order.id).expect("delete");
  assert_eq!(removed.id, order.id);
  assert!(matches!(
    orders::get_order(&store, &admin(), order.id).expect_err("gone"),
    BodegaError::NotFound { .. }
  ));
}
