//! # API Facade
//!
//! The single entry point for UI clients (the CLI commands and the interactive shell).
//!
//! [`ShortenerApi`] owns a [`MappingStore`] and the [`SnapshotStore`] it was loaded from.
//! It takes care of the caller-side duties the store leaves out:
//! - URL syntax validation before anything is added
//! - turning "already shortened" and "unknown code" into ordinary results with messages
//! - deciding when a snapshot is written
//!
//! It never prints and never exits. Everything comes back as a [`CmdResult`].
//!
//! Generic over the backend: `ShortenerApi<FileStore>` in production,
//! `ShortenerApi<InMemoryStore>` in tests.

use crate::codegen::CodeGenerator;
use crate::error::{Result, ShortenError};
use crate::mapping::MappingStore;
use crate::model::{is_valid_code, Mapping};
use crate::store::SnapshotStore;
use crate::validate::validate_url;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Mappings the command produced or found.
    pub mappings: Vec<Mapping>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_mappings(mut self, mappings: Vec<Mapping>) -> Self {
        self.mappings = mappings;
        self
    }
}

pub struct ShortenerApi<S: SnapshotStore> {
    store: MappingStore,
    backend: S,
    dirty: bool,
}

impl<S: SnapshotStore> ShortenerApi<S> {
    /// Loads the current snapshot from `backend`.
    pub fn open(backend: S, generator: CodeGenerator) -> Result<Self> {
        let store = backend.load()?.with_generator(generator);
        Ok(Self {
            store,
            backend,
            dirty: false,
        })
    }

    /// Like [`open`](Self::open), but a corrupt snapshot is discarded and the API
    /// starts from an empty store. The returned flag tells whether that happened.
    pub fn open_or_reset(backend: S, generator: CodeGenerator) -> Result<(Self, bool)> {
        match backend.load() {
            Ok(store) => Ok((
                Self {
                    store: store.with_generator(generator),
                    backend,
                    dirty: false,
                },
                false,
            )),
            Err(ShortenError::CorruptState { .. }) => Ok((
                Self {
                    store: MappingStore::new().with_generator(generator),
                    backend,
                    dirty: true,
                },
                true,
            )),
            Err(e) => Err(e),
        }
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// True if there are changes not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn shorten(&mut self, url: &str) -> Result<CmdResult> {
        validate_url(url)?;

        let mut result = CmdResult::default();
        match self.store.add(url) {
            Ok(code) => {
                self.dirty = true;
                result.add_message(CmdMessage::success(format!("{}: {}", code, url)));
                result.mappings.push(Mapping::new(code, url));
            }
            Err(ShortenError::AlreadyExists { existing_code }) => {
                debug!(code = %existing_code, url, "URL already shortened");
                result.add_message(CmdMessage::info("URL is already shortened."));
                result.add_message(CmdMessage::info(format!(
                    "Here is the shortened URL: {}",
                    existing_code
                )));
                result.mappings.push(Mapping::new(existing_code, url));
            }
            Err(e) => return Err(e),
        }
        Ok(result)
    }

    /// Looks up `code`. An unknown code is reported through a message, not an error.
    pub fn resolve(&self, code: &str) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        let found = if is_valid_code(code) {
            self.store.lookup(code)
        } else {
            None
        };

        match found {
            Some(url) => result.mappings.push(Mapping::new(code, url)),
            None => {
                debug!(code, "no such code");
                result.add_message(CmdMessage::warning("No such shortened URL."));
            }
        }
        Ok(result)
    }

    pub fn list(&self) -> Result<CmdResult> {
        let mut result = CmdResult::default().with_mappings(self.store.list_all().cloned().collect());
        if result.mappings.is_empty() {
            result.add_message(CmdMessage::info("No mappings yet."));
        }
        Ok(result)
    }

    /// Writes a full snapshot. On failure the in-memory mappings stay as they are
    /// and remain marked unsaved.
    pub fn save(&mut self) -> Result<CmdResult> {
        self.backend.save(&self.store)?;
        self.dirty = false;

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!(
            "Saved {} mapping(s).",
            self.store.len()
        )));
        Ok(result)
    }

    /// Saves only if something changed since the last load or save.
    pub fn save_if_dirty(&mut self) -> Result<Option<CmdResult>> {
        if !self.dirty {
            return Ok(None);
        }
        self.save().map(Some)
    }
}
