//! Identifier generation for sets and segments.

use uuid::Uuid;

/// Generate a fresh identifier.
///
/// Random v4 UUIDs stay unique for calls made within the same millisecond.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rapid_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_is_not_empty() {
        assert!(!generate_id().is_empty());
    }
}
