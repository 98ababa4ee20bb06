//! Document store engine
//!
//! Durable CRUD over named collections of schema-less documents, persisted
//! through a [`Substrate`](ledgerstore_storage::Substrate). Each collection
//! maps to exactly one substrate entry holding the JSON array of its
//! documents; every mutation is one full read-modify-write cycle.

pub mod config;
pub mod id;
pub mod store;

pub use config::StoreConfig;
pub use id::generate_id;
pub use store::{CollectionStats, DeleteResult, DocumentStore};
