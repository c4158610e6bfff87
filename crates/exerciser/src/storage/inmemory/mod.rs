//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of the `TableStore` trait
//! that keeps every table in a HashMap wrapped in `Arc<RwLock<_>>`. It backs
//! the `--backend memory` dry run and the exerciser's tests.

mod repository;

pub use repository::InMemoryStore;
