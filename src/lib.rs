//! ledgerstore - embedded document store over a key-value substrate
//!
//! ledgerstore mimics a document-database driver's contract (collections,
//! documents, query-by-equality, CRUD, aggregate stats) on top of a durable
//! string-keyed substrate, so application code written against it can later
//! be swapped onto a real database client without modification.
//!
//! # Quick Start
//!
//! ```
//! use ledgerstore::{DocumentStore, MemorySubstrate, Model, Query, StoreConfig};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> ledgerstore::Result<()> {
//! let store = Arc::new(DocumentStore::new(
//!     Arc::new(MemorySubstrate::new()),
//!     StoreConfig::default(),
//! ));
//! store.connect();
//!
//! let transactions = Model::new(store, "transactions");
//! let mut tx = serde_json::Map::new();
//! tx.insert("type".into(), json!("expense"));
//! tx.insert("amount".into(), json!(12));
//! transactions.create(tx)?;
//!
//! let found = transactions.find_one(&Query::field("type", json!("expense")))?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Three layers, each its own crate:
//!
//! - `ledgerstore-core`: [`Document`], [`Query`], [`Error`]
//! - `ledgerstore-storage`: the [`Substrate`] trait plus [`MemorySubstrate`]
//!   and [`FileSubstrate`]
//! - `ledgerstore-engine`: [`DocumentStore`], the CRUD engine
//!
//! This crate adds the per-collection [`Model`] facade and re-exports the
//! public surface.

pub mod model;

pub use ledgerstore_core::{
    now_millis, Document, Error, Fields, Query, Result, FIELD_CREATED_AT, FIELD_ID,
    FIELD_UPDATED_AT,
};
pub use ledgerstore_engine::{
    generate_id, CollectionStats, DeleteResult, DocumentStore, StoreConfig,
};
pub use ledgerstore_storage::{FileSubstrate, MemorySubstrate, Substrate};
pub use model::Model;
