//! # Notecase Architecture
//!
//! Notecase is a small **local-first note box** for short text notes, code snippets and
//! images. The core is a UI-agnostic library: the bundled command-line client is one
//! way to drive it, a popup or a web front end would be another.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - The note store manager facade                            │
//! │  - Normalizes inputs (indexes → ids, config defaults)       │
//! │  - Serializes mutations through &mut self                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, ordering, export and merge logic             │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait, one JSON value per key              │
//! │  - FileStore (production), MemoryStore (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whole collection lives under a single key as an array of notes. Every
//! mutation is a full read → modify → write of that array.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through the `log` facade; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of the business logic against `MemoryStore`.
//! 2. **API** (`api.rs`): dispatch and end-to-end scenarios.
//! 3. **CLI** (`tests/`): the binary driven with `assert_cmd` against a temporary data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Note`, `NoteDraft`, `ExportEnvelope`)
//! - [`index`]: Ordering rule and display indexing (p1, 1 notation)
//! - [`preview`]: One-line previews and relative timestamps for listings
//! - [`config`]: Configuration management
//! - [`init`]: Data directory discovery and context setup
//! - [`logging`]: Logger bootstrap for binaries
//! - [`error`]: Error types
//! - `cli`: Argument parsing, prompts and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod logging;
pub mod model;
pub mod preview;
pub mod store;
