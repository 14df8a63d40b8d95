// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bodega::{
  BodegaError, BodegaResult, Caller, Document, MemoryBackend, PaymentDecline, PaymentGateway,
  PaymentReceipt, Product, Role, Store, StoreBackend,
};
use tracing::Level;
use uuid::Uuid;

// --- Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Callers ---

pub fn admin() -> Caller {
  Caller::new("root", Role::Admin)
}

pub fn shopper(username: &str) -> Caller {
  Caller::new(username, Role::User)
}

// --- Fixtures ---

pub fn product(name: &str, category: &str, price_cents: u32, on_hand: u32) -> Product {
  Product {
    id: Uuid::new_v4(),
    name: name.to_string(),
    category: category.to_string(),
    price_cents,
    on_hand,
    description: String::new(),
  }
}

/// Seeds a product directly through the store and returns its id.
pub fn seed_product(store: &Store, name: &str, price_cents: u32, on_hand: u32) -> Uuid {
  let p = product(name, "misc", price_cents, on_hand);
  let id = p.id;
  store.add(p).expect("seed product");
  id
}

pub fn on_hand(store: &Store, id: Uuid) -> u32 {
  store
    .find(|p: &Product| p.id == id)
    .expect("read product")
    .expect("product exists")
    .on_hand
}

pub fn order_count(store: &Store) -> usize {
  store.all::<bodega::Order>().expect("read orders").len()
}

// --- Backend with a persist budget, for commit-failure paths ---

/// Delegates to a `MemoryBackend` until the persist budget is spent,
/// then fails every further persist. Loads always succeed.
pub struct CountdownBackend {
  inner: MemoryBackend,
  persists_left: AtomicUsize,
}

impl CountdownBackend {
  pub fn new(persists_left: usize) -> Self {
    Self {
      inner: MemoryBackend::default(),
      persists_left: AtomicUsize::new(persists_left),
    }
  }
}

impl StoreBackend for CountdownBackend {
  fn load(&self) -> BodegaResult<Document> {
    self.inner.load()
  }

  fn persist(&self, doc: &Document) -> BodegaResult<()> {
    let left = self.persists_left.load(Ordering::SeqCst);
    if left == 0 {
      return Err(BodegaError::Storage {
        operation: "write",
        source: anyhow::anyhow!("persist budget exhausted"),
      });
    }
    self.persists_left.store(left - 1, Ordering::SeqCst);
    self.inner.persist(doc)
  }
}

// --- Gateways for deterministic charge outcomes ---

/// Always approves, with a recognizable payment id.
pub struct ApprovingGateway;

#[async_trait]
impl PaymentGateway for ApprovingGateway {
  async fn charge(&self, amount_cents: u64) -> Result<PaymentReceipt, PaymentDecline> {
    Ok(PaymentReceipt {
      payment_id: format!("pay_test_{amount_cents}"),
      amount_cents,
    })
  }
}

/// Never answers; used to exercise the charge timeout bound.
pub struct HangingGateway;

#[async_trait]
impl PaymentGateway for HangingGateway {
  async fn charge(&self, _amount_cents: u64) -> Result<PaymentReceipt, PaymentDecline> {
    tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
    unreachable!("the orchestrator must time out first")
  }
}

pub fn shared_store() -> Arc<Store> {
  Arc::new(Store::in_memory())
}
