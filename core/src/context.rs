// bodega/src/context.rs

//! The caller identity threaded explicitly into every core call.
//!
//! Authentication happens outside the core; what arrives here is the
//! already-authenticated username plus role, never read from ambient
//! process-wide state.

use crate::error::{BodegaError, BodegaResult};
use crate::models::Role;

#[derive(Debug, Clone)]
pub struct Caller {
  pub username: String,
  pub role: Role,
}

impl Caller {
  pub fn new(username: impl Into<String>, role: Role) -> Self {
    Self {
      username: username.into(),
      role,
    }
  }

  pub fn is_admin(&self) -> bool {
    self.role == Role::Admin
  }

  /// Whether this caller may act on records owned by `username`:
  /// admins may act on anyone's, users only on their own.
  pub fn may_act_for(&self, username: &str) -> bool {
    self.is_admin() || self.username == username
  }

  pub fn require_admin(&self) -> BodegaResult<()> {
    if self.is_admin() {
      Ok(())
    } else {
      Err(BodegaError::Forbidden(format!(
        "'{}' does not have the admin role",
        self.username
      )))
    }
  }

  pub fn require_self_or_admin(&self, username: &str) -> BodegaResult<()> {
    if self.may_act_for(username) {
      Ok(())
    } else {
      Err(BodegaError::Forbidden(format!(
        "'{}' may not act for '{}'",
        self.username, username
      )))
    }
  }
}
