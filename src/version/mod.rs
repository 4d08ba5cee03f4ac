//! Versioning layer for cached data files
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Scheme    │────▶│  Filename   │────▶│    Cache    │
//! │ (ordering)  │     │ (encode/    │     │ (directory  │
//! │             │     │  decode)    │     │  scan)      │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`scheme`]: Date and semantic version parsing and ordering
//! - [`filename`]: `<stem>_v<version>.<extension>` naming convention
//! - [`cache`]: Per-source directory scanner (latest, find, prune)
//! - [`error`]: Error types for remote and cache operations

pub mod cache;
pub mod error;
pub mod filename;
pub mod scheme;
