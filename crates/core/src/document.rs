//! Document model
//!
//! A document is a schema-less field-value mapping. The engine injects and
//! maintains three reserved fields:
//!
//! - `_id`: unique identifier, assigned at creation if the caller did not
//!   supply one, never reassigned afterwards
//! - `createdAt`: millis since epoch, set once at creation
//! - `updatedAt`: millis since epoch, refreshed on every successful mutation
//!
//! Field values are opaque `serde_json::Value`s; the engine only ever looks
//! at them for equality during query matching. The wrapper is
//! `#[serde(transparent)]`, so a persisted collection is exactly the JSON
//! array of its documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::SystemTime;

use crate::error::{Error, Result};

/// Reserved field: document identifier
pub const FIELD_ID: &str = "_id";
/// Reserved field: creation timestamp (millis since epoch)
pub const FIELD_CREATED_AT: &str = "createdAt";
/// Reserved field: last-modification timestamp (millis since epoch)
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Raw field-value mapping of a document
pub type Fields = Map<String, Value>;

/// Current wall-clock time in millis since the Unix epoch
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

/// One stored record: a field-value mapping plus engine-managed fields
///
/// # Example
///
/// ```
/// use ledgerstore_core::Document;
/// use serde_json::json;
///
/// let mut fields = serde_json::Map::new();
/// fields.insert("amount".into(), json!(12));
/// let doc = Document::shape(fields, "abc123".into(), 1_700_000_000_000);
/// assert_eq!(doc.id(), Some("abc123"));
/// assert_eq!(doc.created_at(), doc.updated_at());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Fields);

impl Document {
    /// Wrap raw fields without touching them
    ///
    /// Used when loading already-shaped documents back from the substrate.
    pub fn from_fields(fields: Fields) -> Self {
        Document(fields)
    }

    /// Shape a new document out of caller-supplied fields
    ///
    /// Injects `generated_id` as `_id` unless the caller supplied one, and
    /// stamps both `createdAt` and `updatedAt` with `now`. The caller's own
    /// fields are otherwise carried over untouched.
    pub fn shape(mut fields: Fields, generated_id: String, now: i64) -> Self {
        fields
            .entry(FIELD_ID.to_string())
            .or_insert_with(|| Value::String(generated_id));
        fields.insert(FIELD_CREATED_AT.to_string(), Value::from(now));
        fields.insert(FIELD_UPDATED_AT.to_string(), Value::from(now));
        Document(fields)
    }

    /// Document identifier, if present
    ///
    /// Every engine-shaped document has one; a `None` here means the stored
    /// payload was produced by something else.
    pub fn id(&self) -> Option<&str> {
        self.0.get(FIELD_ID).and_then(Value::as_str)
    }

    /// Creation timestamp in millis, if present
    pub fn created_at(&self) -> Option<i64> {
        self.0.get(FIELD_CREATED_AT).and_then(Value::as_i64)
    }

    /// Last-modification timestamp in millis, if present
    pub fn updated_at(&self) -> Option<i64> {
        self.0.get(FIELD_UPDATED_AT).and_then(Value::as_i64)
    }

    /// Look up a single field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Borrow the underlying field mapping
    pub fn fields(&self) -> &Fields {
        &self.0
    }

    /// Consume the document, yielding its field mapping
    pub fn into_fields(self) -> Fields {
        self.0
    }

    /// Merge a patch into this document and refresh `updatedAt`
    ///
    /// Patch fields override document fields; document fields absent from
    /// the patch are preserved. Callers must validate the patch first via
    /// [`validate_patch`] so that `_id` and `createdAt` stay immutable.
    pub fn apply_patch(&mut self, patch: &Fields, now: i64) {
        for (field, value) in patch {
            self.0.insert(field.clone(), value.clone());
        }
        self.0.insert(FIELD_UPDATED_AT.to_string(), Value::from(now));
    }

    /// Deserialize the document into a caller-supplied type
    ///
    /// Typed view for the facade layer; the engine itself stays schema-less.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }
}

/// Reject patches that try to rewrite engine-managed fields
///
/// `_id` is never reassigned after creation and `createdAt` is set exactly
/// once, so a patch naming either is a caller error rather than something
/// to silently drop.
pub fn validate_patch(patch: &Fields) -> Result<()> {
    for field in [FIELD_ID, FIELD_CREATED_AT] {
        if patch.contains_key(field) {
            return Err(Error::Validation(format!(
                "patch may not modify reserved field {field:?}"
            )));
        }
    }
    Ok(())
}
