//! Equality-match queries
//!
//! A query is an explicit ordered list of `(field, expected)` pairs. A
//! document matches when every pair is present in the document with an equal
//! value; the empty query matches everything. This is the single matching
//! code path shared by find, update, delete and count.
//!
//! Expected values are restricted to JSON scalars (null, bool, number,
//! string). Querying by a nested object or array is rejected by
//! [`Query::validate`]: strict scalar equality is well-defined, while
//! structural comparison of nested values is deliberately out of scope for
//! this store.

use serde_json::Value;

use crate::document::Document;
use crate::error::{Error, Result};

/// An equality filter over document fields
///
/// # Example
///
/// ```
/// use ledgerstore_core::Query;
/// use serde_json::json;
///
/// let all = Query::all();
/// assert!(all.is_empty());
///
/// let q = Query::field("type", json!("expense")).and("amount", json!(12));
/// assert_eq!(q.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query(Vec<(String, Value)>);

impl Query {
    /// The empty query; matches every document
    pub fn all() -> Self {
        Query(Vec::new())
    }

    /// Single-field equality query
    pub fn field(field: impl Into<String>, expected: impl Into<Value>) -> Self {
        Query(vec![(field.into(), expected.into())])
    }

    /// Add another field constraint
    pub fn and(mut self, field: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.0.push((field.into(), expected.into()));
        self
    }

    /// True when no constraints are present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of field constraints
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the constraint pairs
    pub fn pairs(&self) -> &[(String, Value)] {
        &self.0
    }

    /// Reject non-scalar expected values
    pub fn validate(&self) -> Result<()> {
        for (field, expected) in &self.0 {
            if expected.is_object() || expected.is_array() {
                return Err(Error::Validation(format!(
                    "query value for field {field:?} must be a JSON scalar"
                )));
            }
        }
        Ok(())
    }

    /// Superset match: every queried field must exist with an equal value
    pub fn matches(&self, doc: &Document) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

impl<F: Into<String>, V: Into<Value>> FromIterator<(F, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        Query(
            iter.into_iter()
                .map(|(f, v)| (f.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Fields;
    use proptest::prelude::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, Value)]) -> Document {
        let fields: Fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Document::from_fields(fields)
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(Query::all().matches(&doc(&[])));
        assert!(Query::all().matches(&doc(&[("a", json!(1))])));
    }

    #[test]
    fn test_single_field_match() {
        let d = doc(&[("type", json!("expense")), ("amount", json!(12))]);
        assert!(Query::field("type", json!("expense")).matches(&d));
        assert!(!Query::field("type", json!("income")).matches(&d));
    }

    #[test]
    fn test_missing_field_does_not_match() {
        let d = doc(&[("amount", json!(12))]);
        assert!(!Query::field("type", json!("expense")).matches(&d));
    }

    #[test]
    fn test_all_pairs_must_match() {
        let d = doc(&[("type", json!("expense")), ("amount", json!(12))]);
        let q = Query::field("type", json!("expense")).and("amount", json!(13));
        assert!(!q.matches(&d));
    }

    #[test]
    fn test_no_type_coercion() {
        let d = doc(&[("amount", json!(12))]);
        assert!(!Query::field("amount", json!("12")).matches(&d));
        let d = doc(&[("flag", json!(true))]);
        assert!(!Query::field("flag", json!(1)).matches(&d));
    }

    #[test]
    fn test_null_is_a_matchable_scalar() {
        let d = doc(&[("closed", json!(null))]);
        assert!(Query::field("closed", json!(null)).matches(&d));
    }

    #[test]
    fn test_validate_rejects_nested_values() {
        assert!(Query::field("a", json!({"x": 1})).validate().is_err());
        assert!(Query::field("a", json!([1, 2])).validate().is_err());
        assert!(Query::field("a", json!("scalar")).validate().is_ok());
        assert!(Query::all().validate().is_ok());
    }

    fn scalar_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(json!(null)),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ]
    }

    proptest! {
        /// Any query drawn from a document's own fields matches that document.
        #[test]
        fn prop_query_from_own_fields_matches(
            entries in proptest::collection::btree_map("[a-z]{1,6}", scalar_value(), 0..6),
            take in 0usize..6,
        ) {
            let d = Document::from_fields(
                entries.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            );
            let q: Query = entries.iter().take(take).map(|(k, v)| (k.clone(), v.clone())).collect();
            prop_assert!(q.validate().is_ok());
            prop_assert!(q.matches(&d));
        }
    }
}
