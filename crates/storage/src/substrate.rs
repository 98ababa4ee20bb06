//! The substrate trait consumed by the document store engine

use ledgerstore_core::Result;

/// Durable string-keyed, string-valued store
///
/// The engine is the sole owner of the keys it writes; nothing else should
/// read or modify them. Implementations must make the most recent `set`
/// visible to the next `get` on the same key.
pub trait Substrate: Send + Sync {
    /// Read the value stored under `key`, or `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` entirely; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently present, in no particular order
    fn keys(&self) -> Result<Vec<String>>;
}
