// bodega/src/models/mod.rs

//! Data structures for the records persisted in the store document.

// Declare child modules for each entity kind
pub mod order;
pub mod product;
pub mod user;

// Re-export the model structs for convenient access
pub use order::{Order, OrderItem, OrderPatch, OrderStatus};
pub use product::{Product, ProductPatch};
pub use user::{Role, User, UserPatch, UserProfile};
