//! Engine configuration

/// Configuration for a [`DocumentStore`](crate::DocumentStore)
///
/// The namespace prefixes every substrate key (`<namespace>_<collection>`),
/// so two stores with different namespaces can share one substrate without
/// colliding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key prefix for all collections owned by this store
    pub namespace: String,
}

impl StoreConfig {
    /// Config with an explicit namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        StoreConfig {
            namespace: namespace.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new("ledger")
    }
}
