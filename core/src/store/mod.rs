// bodega/src/store/mod.rs

//! The collection store: whole-document persistence with typed,
//! predicate-driven CRUD over the named collections.

pub mod backend;
pub mod document;

pub use backend::{FileBackend, MemoryBackend, StoreBackend};
pub use document::Document;

use std::path::Path;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::BodegaResult;

/// A record kind stored in one of the document's collections. The trait
/// is the typed seam that replaces the dynamic collection names of a
/// stringly-keyed store: every implementor maps to exactly one
/// `Document` field, so an unknown collection cannot be addressed.
pub trait Record: Clone + Send + Sync + 'static {
  /// Collection name as it appears in the serialized document.
  const COLLECTION: &'static str;

  fn rows(doc: &Document) -> &Vec<Self>;
  fn rows_mut(doc: &mut Document) -> &mut Vec<Self>;
}

/// A partial update for a record kind. Present fields overwrite; absent
/// fields are retained. The merge is shallow by contract: a present
/// field replaces the record's field wholesale.
pub trait Patch<R> {
  fn apply(&self, record: &mut R);
}

/// Durable store over a [`StoreBackend`].
///
/// Every operation re-reads the full document from the backend and every
/// mutation writes it back, so operations always observe the latest
/// persisted state. All mutating operations serialize through the
/// per-instance write gate; reads share the read gate. Lock guards are
/// never held across `.await` points (the store API is synchronous).
pub struct Store {
  backend: Box<dyn StoreBackend>,
  gate: RwLock<()>,
}

impl Store {
  pub fn new(backend: impl StoreBackend) -> Self {
    Self {
      backend: Box::new(backend),
      gate: RwLock::new(()),
    }
  }

  /// Opens a file-backed store, initializing the backing file with empty
  /// collections if it does not exist yet.
  pub fn open(path: impl AsRef<Path>) -> BodegaResult<Self> {
    let store = Self::new(FileBackend::new(path.as_ref()));
    {
      // Force one-time initialization under the write gate so that no
      // two openers race the initial write.
      let _gate = store.gate.write();
      store.backend.load()?;
    }
    Ok(store)
  }

  /// An empty in-memory store honouring the same atomicity contract as
  /// the file-backed one. Intended for tests and embedding.
  pub fn in_memory() -> Self {
    Self::new(MemoryBackend::default())
  }

  /// Reads the full document as currently persisted.
  pub fn snapshot(&self) -> BodegaResult<Document> {
    let _gate = self.gate.read();
    self.backend.load()
  }

  /// All records of one kind, in insertion order.
  pub fn all<R: Record>(&self) -> BodegaResult<Vec<R>> {
    let _gate = self.gate.read();
    let doc = self.backend.load()?;
    Ok(R::rows(&doc).clone())
  }

  /// First record matching the predicate, or `None`.
  pub fn find<R, F>(&self, pred: F) -> BodegaResult<Option<R>>
  where
    R: Record,
    F: Fn(&R) -> bool,
  {
    let _gate = self.gate.read();
    let doc = self.backend.load()?;
    Ok(R::rows(&doc).iter().find(|r| pred(r)).cloned())
  }

  /// All records matching the predicate, order-preserving.
  pub fn find_all<R, F>(&self, pred: F) -> BodegaResult<Vec<R>>
  where
    R: Record,
    F: Fn(&R) -> bool,
  {
    let _gate = self.gate.read();
    let doc = self.backend.load()?;
    Ok(R::rows(&doc).iter().filter(|r| pred(r)).cloned().collect())
  }

  /// Appends a record to its collection and persists.
  pub fn add<R: Record>(&self, record: R) -> BodegaResult<()> {
    self.mutate(move |doc| {
      R::rows_mut(doc).push(record);
      Ok(())
    })
  }

  /// Applies `patch` to the first record matching the predicate and
  /// persists. Returns the updated record, or `None` (without touching
  /// the backend) if nothing matched.
  pub fn update_where<R, F, P>(&self, pred: F, patch: &P) -> BodegaResult<Option<R>>
  where
    R: Record,
    F: Fn(&R) -> bool,
    P: Patch<R>,
  {
    let _gate = self.gate.write();
    let mut doc = self.backend.load()?;
    let rows = R::rows_mut(&mut doc);
    let Some(idx) = rows.iter().position(|r| pred(r)) else {
      return Ok(None);
    };
    patch.apply(&mut rows[idx]);
    let updated = rows[idx].clone();
    self.backend.persist(&doc)?;
    debug!(collection = R::COLLECTION, "record updated");
    Ok(Some(updated))
  }

  /// Removes the first record matching the predicate and persists.
  /// Returns the removed record, or `None` (without touching the
  /// backend) if nothing matched.
  pub fn remove_where<R, F>(&self, pred: F) -> BodegaResult<Option<R>>
  where
    R: Record,
    F: Fn(&R) -> bool,
  {
    let _gate = self.gate.write();
    let mut doc = self.backend.load()?;
    let rows = R::rows_mut(&mut doc);
    let Some(idx) = rows.iter().position(|r| pred(r)) else {
      return Ok(None);
    };
    let removed = rows.remove(idx);
    self.backend.persist(&doc)?;
    debug!(collection = R::COLLECTION, "record removed");
    Ok(Some(removed))
  }

  /// The read-modify-write primitive every mutation goes through: loads
  /// the document, applies `f`, and persists, all under the write gate.
  ///
  /// Persistence happens only after `f` succeeds; an error from either
  /// `f` or the backend means no durable change occurred.
  pub fn mutate<T, F>(&self, f: F) -> BodegaResult<T>
  where
    F: FnOnce(&mut Document) -> BodegaResult<T>,
  {
    let _gate = self.gate.write();
    let mut doc = self.backend.load()?;
    let out = f(&mut doc)?;
    self.backend.persist(&doc)?;
    Ok(out)
  }
}
