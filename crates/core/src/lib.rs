//! Core types for the ledgerstore document store
//!
//! This crate defines the data model shared by every layer:
//! - [`Document`]: one stored record, a field-value mapping plus the
//!   engine-managed `_id`, `createdAt` and `updatedAt` fields
//! - [`Query`]: an equality-match filter over document fields
//! - [`Error`] / [`Result`]: the error taxonomy for the whole workspace
//!
//! No I/O happens here; persistence lives in `ledgerstore-storage` and the
//! CRUD semantics in `ledgerstore-engine`.

pub mod document;
pub mod error;
pub mod query;

pub use document::{
    now_millis, validate_patch, Document, Fields, FIELD_CREATED_AT, FIELD_ID, FIELD_UPDATED_AT,
};
pub use error::{Error, Result};
pub use query::Query;
