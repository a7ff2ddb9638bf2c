//! Identifier utilities
//!
//! Pathway ids are opaque strings. New ids are UUIDv4 in hyphenated form;
//! ids loaded from older snapshots (e.g. millisecond timestamps) are kept
//! verbatim and never reinterpreted.

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Generate a new opaque record identifier
pub fn generate_id() -> String {
    generate().hyphenated().to_string()
}

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_is_parseable_uuid() {
        let id = generate_id();
        assert_eq!(id.len(), 36);
        assert!(parse(&id).is_ok());
    }

    #[test]
    fn test_generate_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_parse_rejects_legacy_timestamp_id() {
        assert!(parse("1718034567890").is_err());
    }
}
