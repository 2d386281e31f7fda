//! # Storage Layer
//!
//! A [`MappingStore`] lives in memory; a [`SnapshotStore`] is where its snapshots go.
//! Saving always writes the full set of mappings, never a delta.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one JSON file
//!   - flat object, `{"ABCDEF": "https://example.com", ...}`
//!   - written to a temp file next to the target, then renamed over it
//!   - a missing file is an empty store, a malformed one is an error
//!
//! - [`memory::InMemoryStore`]: keeps the serialized snapshot in memory
//!   - same encoding and validation as the file store
//!   - lets the API and shell be tested without touching the filesystem
//!
//! Neither implementation locks anything. Sharing a store between processes or
//! threads needs an exclusive-access wrapper around both the store and its backend.

use crate::error::Result;
use crate::mapping::MappingStore;

pub mod fs;
pub mod memory;

pub trait SnapshotStore {
    /// Read the last saved snapshot, or an empty store if none was ever saved.
    fn load(&self) -> Result<MappingStore>;

    /// Replace the saved snapshot with the full contents of `store`.
    fn save(&mut self, store: &MappingStore) -> Result<()>;
}
