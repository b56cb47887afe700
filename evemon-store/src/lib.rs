// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `EveMon` Store
//!
//! Local state for the `EveMon` fetch subsystem.
//!
//! This crate provides:
//!
//! - **CacheStore**: File-backed fallback copies of API documents
//! - **Config**: Application configuration with JSON persistence
//! - **Persistence**: Default paths and atomic file writes
//!
//! ## Usage
//!
//! ```ignore
//! use evemon_core::{CacheKey, Credentials, DocumentType};
//! use evemon_store::CacheStore;
//!
//! let store = CacheStore::new("/home/pilot/.config/evemon");
//! let creds = Credentials::new("1001", "vcode").with_character("2002");
//! let key = CacheKey::derive(DocumentType::CharacterSheet, &creds)?;
//!
//! store.write(&key, b"<eveapi/>")?;
//! let entry = store.read(&key)?.expect("entry was just written");
//! assert_eq!(entry.bytes, b"<eveapi/>");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod persistence;

pub use cache::{CacheStore, CachedEntry, EntryInfo, SHEETS_DIR};
pub use config::Config;
pub use error::{CacheError, StoreError};
pub use persistence::{default_cache_root, default_config_dir, default_config_path, write_atomic};
