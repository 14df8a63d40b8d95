// bodega/src/models/user.rs

use serde::{Deserialize, Serialize};

use crate::store::Patch;

/// Caller role. The core treats this as an opaque attribute handed in by
/// the (external) authorization layer; it only ever compares against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Admin,
}

/// A registered account. `username` is the unique, immutable key.
/// `password_hash` is an opaque credential produced outside the core;
/// it is stored verbatim and never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub username: String,
  pub email: String,
  pub password_hash: String,
  pub first: String,
  pub last: String,
  #[serde(default)]
  pub street_address: String,
  #[serde(default)]
  pub role: Role,
}

/// Credential-free view of a [`User`]. The only user shape the ops layer
/// hands back to callers.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
  pub username: String,
  pub email: String,
  pub first: String,
  pub last: String,
  pub street_address: String,
  pub role: Role,
}

impl From<User> for UserProfile {
  fn from(user: User) -> Self {
    Self {
      username: user.username,
      email: user.email,
      first: user.first,
      last: user.last,
      street_address: user.street_address,
      role: user.role,
    }
  }
}

/// Mutation payload for a user. `username` is not patchable (immutable
/// key); `role` changes are stripped upstream unless the caller is an
/// admin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
  pub email: Option<String>,
  pub password_hash: Option<String>,
  pub first: Option<String>,
  pub last: Option<String>,
  pub street_address: Option<String>,
  pub role: Option<Role>,
}

impl Patch<User> for UserPatch {
  fn apply(&self, record: &mut User) {
    if let Some(email) = &self.email {
      record.email = email.clone();
    }
    if let Some(password_hash) = &self.password_hash {
      record.password_hash = password_hash.clone();
    }
    if let Some(first) = &self.first {
      record.first = first.clone();
    }
    if let Some(last) = &self.last {
      record.last = last.clone();
    }
    if let Some(street_address) = &self.street_address {
      record.street_address = street_address.clone();
    }
    if let Some(role) = self.role {
      record.role = role;
    }
  }
}
