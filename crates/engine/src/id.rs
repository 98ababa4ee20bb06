//! Document id generation

use rand::distributions::Alphanumeric;
use rand::Rng;

use ledgerstore_core::now_millis;

const RANDOM_LEN: usize = 8;

/// Generate a collision-resistant document id
///
/// Hex millisecond timestamp followed by a random alphanumeric tail.
/// Uniqueness is best-effort, not cryptographically guaranteed; ids sort
/// roughly by creation time.
pub fn generate_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{:x}{suffix}", now_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_shape() {
        let id = generate_id();
        assert!(id.len() > RANDOM_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
