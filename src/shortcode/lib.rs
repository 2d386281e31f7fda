//! # Shortcode Architecture
//!
//! Shortcode is a **single-user URL shortener library** with a small CLI on top. It maps
//! long URLs to six-letter codes and back, and keeps that mapping in one JSON file
//! between runs.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, shell.rs)                           │
//! │  - Parses arguments, runs the interactive menu, prints      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Validates URLs before they reach the store               │
//! │  - Turns store outcomes into CmdResult values with messages │
//! │  - Decides when snapshots are written                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Mapping Store (mapping.rs, codegen.rs)                     │
//! │  - code ↔ URL association, unique on both sides             │
//! │  - random code generation with a bounded retry budget       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SnapshotStore trait                                      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Codes
//!
//! A code is six characters from `A`..=`Z`. Codes are handed out once and never
//! reassigned; the same URL string always gets the same code back. URLs are compared
//! as exact strings, with no normalization of case, trailing slashes or whitespace.
//!
//! ## Persistence
//!
//! Nothing is written implicitly. The caller loads a store, mutates it through `add`,
//! and saves a full snapshot when it chooses to. A missing snapshot file is a normal
//! first run; a malformed one is reported as [`ShortenError::CorruptState`] and the
//! caller picks between aborting and starting over.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for UI clients
//! - [`mapping`]: The mapping store and its snapshot encoding
//! - [`codegen`]: Random code generation
//! - [`store`]: Snapshot storage abstraction and implementations
//! - [`model`]: Core data types and code shape rules
//! - [`validate`]: URL syntax checks
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codegen;
pub mod config;
pub mod error;
pub mod mapping;
pub mod model;
pub mod store;
pub mod validate;

pub use error::{Result, ShortenError};
pub use mapping::MappingStore;
