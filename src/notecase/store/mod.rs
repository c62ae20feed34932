//! # Storage Layer
//!
//! Notes live in a plain key-value store. The whole collection is one JSON array
//! stored under a single namespaced key (see [`crate::config::NotecaseConfig::storage_key`]),
//! so every read returns the entire collection and every write replaces it.
//! There is no per-note storage granularity.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - All keys kept in one `storage.json` object in the data directory
//!   - Writes go to a temp file that is renamed over the original, so a failed
//!     write leaves the previous collection intact
//!
//! - [`memory::MemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── storage.json   # { "secureNotes": [ {note}, {note}, ... ] }
//! └── config.json    # NotecaseConfig
//! ```

use crate::error::Result;
use serde_json::Value;

pub mod fs;
pub mod memory;

/// Abstract interface for the persistent key-value store.
///
/// Values are opaque JSON documents. Implementations must make `set` a whole-value
/// replacement: after a failed `set` the previous value is still readable.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` when nothing was ever stored.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}
