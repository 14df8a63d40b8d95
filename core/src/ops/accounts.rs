// bodega/src/ops/accounts.rs

//! Account operations. The credential arrives pre-hashed from the
//! (external) auth layer and is treated as an opaque string throughout.

use serde::Deserialize;
use tracing::info;

use crate::context::Caller;
use crate::error::{BodegaError, BodegaResult};
use crate::models::{Role, User, UserPatch, UserProfile};
use crate::store::Store;

/// Registration payload. Role is never accepted here; new accounts
/// always start as plain users.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
  pub username: String,
  pub email: String,
  pub password_hash: String,
  pub first: String,
  pub last: String,
  #[serde(default)]
  pub street_address: Option<String>,
}

pub fn register(store: &Store, registration: Registration) -> BodegaResult<UserProfile> {
  for (field, value) in [
    ("username", &registration.username),
    ("email", &registration.email),
    ("password_hash", &registration.password_hash),
    ("first", &registration.first),
    ("last", &registration.last),
  ] {
    if value.trim().is_empty() {
      return Err(BodegaError::Validation(format!("{field} is required")));
    }
  }

  let exists = store.find(|u: &User| {
    u.username == registration.username || u.email == registration.email
  })?;
  if exists.is_some() {
    return Err(BodegaError::Validation(
      "a user with that username or email already exists".to_string(),
    ));
  }

  let user = User {
    username: registration.username,
    email: registration.email,
    password_hash: registration.password_hash,
    first: registration.first,
    last: registration.last,
    street_address: registration.street_address.unwrap_or_default(),
    role: Role::User,
  };
  store.add(user.clone())?;
  info!(username = %user.username, "user registered");
  Ok(user.into())
}

pub fn list_users(store: &Store, caller: &Caller) -> BodegaResult<Vec<UserProfile>> {
  caller.require_admin()?;
  let users = store.all::<User>()?;
  Ok(users.into_iter().map(UserProfile::from).collect())
}

pub fn get_user(store: &Store, caller: &Caller, username: &str) -> BodegaResult<UserProfile> {
  caller.require_self_or_admin(username)?;
  store
    .find(|u: &User| u.username == username)?
    .map(UserProfile::from)
    .ok_or(BodegaError::NotFound {
      entity: "user",
      key: username.to_string(),
    })
}

/// Patches a user. Admin or self; a role change carried by a non-admin
/// caller's patch is dropped rather than rejected, matching the
/// permissive shape of admin payload handling elsewhere.
pub fn update_user(
  store: &Store,
  caller: &Caller,
  username: &str,
  mut patch: UserPatch,
) -> BodegaResult<UserProfile> {
  caller.require_self_or_admin(username)?;
  if !caller.is_admin() {
    patch.role = None;
  }
  store
    .update_where(|u: &User| u.username == username, &patch)?
    .map(UserProfile::from)
    .ok_or(BodegaError::NotFound {
      entity: "user",
      key: username.to_string(),
    })
}

/// Deletes a user. Orders previously placed by the username are left
/// untouched; they reference the user by value.
pub fn delete_user(store: &Store, caller: &Caller, username: &str) -> BodegaResult<UserProfile> {
  caller.require_admin()?;
  store
    .remove_where(|u: &User| u.username == username)?
    .map(UserProfile::from)
    .ok_or(BodegaError::NotFound {
      entity: "user",
      key: username.to_string(),
    })
}
