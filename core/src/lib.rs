// src/lib.rs

//! Bodega: a single-file, multi-entity record store with transactional checkout.
//!
//! Bodega keeps products, users and orders in one serialized document and
//! exposes:
//!  - Typed, predicate-driven CRUD over the named collections.
//!  - A per-instance mutual-exclusion contract: every mutation is one
//!    atomic read-modify-write cycle against the latest persisted state.
//!  - An inventory ledger enforcing the non-negative stock invariant.
//!  - A payment gateway seam with a configurable mock implementation.
//!  - A checkout orchestrator (validate → reserve → charge → commit)
//!    that is all-or-nothing: failures release every reservation made in
//!    the attempt.
//!
//! Routing, sessions and credential hashing live outside this crate; the
//! caller identity arrives as an explicit [`Caller`] value.

// Declare modules according to the planned structure
pub mod checkout;
pub mod context;
pub mod error;
pub mod ledger;
pub mod models;
pub mod ops;
pub mod payment;
pub mod store;

// --- Re-exports for the Public API ---

// Core types that users will interact with frequently
pub use crate::checkout::{Checkout, CheckoutRequest, LineItem};
pub use crate::context::Caller;
pub use crate::error::{BodegaError, BodegaResult};
pub use crate::ledger::InventoryLedger;
pub use crate::models::{
  Order, OrderItem, OrderPatch, OrderStatus, Product, ProductPatch, Role, User, UserPatch,
  UserProfile,
};
pub use crate::payment::{
  MockGateway, PaymentDecline, PaymentGateway, PaymentReceipt, DEFAULT_FAILURE_RATE,
};
pub use crate::store::{Document, FileBackend, MemoryBackend, Patch, Record, Store, StoreBackend};
