// bodega/src/store/backend.rs

//! Backends for whole-document persistence.
//!
//! `FileBackend` keeps the document in one JSON file, written atomically
//! via a temporary file and rename so a failed write never leaves a
//! partially written document visible. `MemoryBackend` mimics the same
//! contract in memory (it still round-trips through JSON, so tests
//! exercise the serialization path too).

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;
use parking_lot::Mutex;
use tracing::info;

use crate::error::{BodegaError, BodegaResult};
use crate::store::Document;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Loads and persists the full document. Implementors do not serialize
/// access themselves; the owning [`Store`](crate::store::Store) holds
/// the mutual-exclusion gate around every load/persist cycle.
pub trait StoreBackend: Send + Sync + 'static {
  /// Reads the full document. If the backing storage does not exist
  /// yet, initializes it with empty collections, persists that initial
  /// state, and returns it. Existing but unreadable storage is an
  /// error; it is never overwritten.
  fn load(&self) -> BodegaResult<Document>;

  /// Writes the full document. After an error, the previously persisted
  /// document must still be intact.
  fn persist(&self, doc: &Document) -> BodegaResult<()>;
}

/// Single-file JSON backend.
pub struct FileBackend {
  path: PathBuf,
}

impl FileBackend {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl StoreBackend for FileBackend {
  fn load(&self) -> BodegaResult<Document> {
    if !self.path.exists() {
      let doc = Document::default();
      self.persist(&doc)?;
      info!(path = %self.path.display(), "store file initialized with empty collections");
      return Ok(doc);
    }
    let raw = fs::read_to_string(&self.path).map_err(|err| BodegaError::Storage {
      operation: "read",
      source: err.into(),
    })?;
    serde_json::from_str(&raw).map_err(|err| BodegaError::Storage {
      operation: "parse",
      source: err.into(),
    })
  }

  fn persist(&self, doc: &Document) -> BodegaResult<()> {
    let json = serde_json::to_string_pretty(doc).map_err(|err| BodegaError::Storage {
      operation: "serialize",
      source: err.into(),
    })?;

    let file_name = self
      .path
      .file_name()
      .and_then(|name| name.to_str())
      .ok_or_else(|| BodegaError::Storage {
        operation: "persist",
        source: anyhow!("store path '{}' has no file name", self.path.display()),
      })?;
    let dir = match self.path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    // Unique-enough temp name: pid + process-wide counter.
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_path = dir.join(format!(".{}.tmp.{}.{}", file_name, std::process::id(), counter));

    let write_result = (|| -> std::io::Result<()> {
      let mut file = File::create(&tmp_path)?;
      file.write_all(json.as_bytes())?;
      file.sync_all()
    })();
    if let Err(err) = write_result {
      drop(fs::remove_file(&tmp_path));
      return Err(BodegaError::Storage {
        operation: "write",
        source: err.into(),
      });
    }

    if let Err(err) = fs::rename(&tmp_path, &self.path) {
      drop(fs::remove_file(&tmp_path));
      return Err(BodegaError::Storage {
        operation: "rename",
        source: err.into(),
      });
    }
    Ok(())
  }
}

/// In-memory backend with file-like semantics: the document lives as a
/// serialized string, and an absent "file" is initialized on first load
/// exactly like the file-backed variant.
#[derive(Default)]
pub struct MemoryBackend {
  slot: Mutex<Option<String>>,
}

impl StoreBackend for MemoryBackend {
  fn load(&self) -> BodegaResult<Document> {
    let mut slot = self.slot.lock();
    match slot.as_ref() {
      Some(raw) => serde_json::from_str(raw).map_err(|err| BodegaError::Storage {
        operation: "parse",
        source: err.into(),
      }),
      None => {
        let doc = Document::default();
        let json = serde_json::to_string(&doc).map_err(|err| BodegaError::Storage {
          operation: "serialize",
          source: err.into(),
        })?;
        *slot = Some(json);
        Ok(doc)
      }
    }
  }

  fn persist(&self, doc: &Document) -> BodegaResult<()> {
    let json = serde_json::to_string(doc).map_err(|err| BodegaError::Storage {
      operation: "serialize",
      source: err.into(),
    })?;
    *self.slot.lock() = Some(json);
    Ok(())
  }
}
