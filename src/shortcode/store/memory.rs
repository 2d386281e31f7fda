use super::SnapshotStore;
use crate::error::{Result, ShortenError};
use crate::mapping::MappingStore;

const MEMORY_PATH: &str = "<memory>";

/// In-memory snapshot storage for testing and development.
/// Does NOT persist data past the life of the value.
///
/// The snapshot is kept in its serialized form so loads go through the same
/// decoding and validation as the file store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    snapshot: Option<String>,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from raw snapshot text, as if it had been read from a file.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Some(snapshot.into()),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for InMemoryStore {
    fn load(&self) -> Result<MappingStore> {
        match &self.snapshot {
            None => Ok(MappingStore::new()),
            Some(text) => {
                serde_json::from_str(text).map_err(|e| ShortenError::corrupt(MEMORY_PATH, e))
            }
        }
    }

    fn save(&mut self, store: &MappingStore) -> Result<()> {
        let text = serde_json::to_string(store)
            .map_err(|e| ShortenError::persistence(MEMORY_PATH, e.into()))?;
        self.snapshot = Some(text);
        self.saves += 1;
        Ok(())
    }
}

// --- Test Fixtures ---
