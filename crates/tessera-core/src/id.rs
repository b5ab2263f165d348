//! Record identifier generation.
//!
//! Identifiers are opaque lowercase strings: a short entity prefix followed
//! by a random suffix (`stf3f2c…`, `atten91b4…`). Caller-supplied
//! identifiers are normalized to the same lowercase form before use.

use uuid::Uuid;

/// Generates a new record identifier with the given entity prefix.
#[must_use]
pub fn generate(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

/// Normalizes a caller-supplied identifier.
#[must_use]
pub fn normalize(id: &str) -> String {
    id.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_carries_prefix() {
        let id = generate("stf");
        assert!(id.starts_with("stf"));
        assert!(id.len() > "stf".len());
    }

    #[test]
    fn test_generate_is_unique() {
        let a = generate("leav");
        let b = generate("leav");
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_is_lowercase() {
        let id = generate("atten");
        assert_eq!(id, id.to_lowercase());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  STF001 "), "stf001");
        assert_eq!(normalize("proj-Alpha"), "proj-alpha");
    }
}
