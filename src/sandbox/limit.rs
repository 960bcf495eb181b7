//! Best-effort row bounding for learner queries
//!
//! Applied on the execute path only; EXPLAIN output is inherently bounded.
//! No attempt is made to detect whether an existing LIMIT sits outside the
//! outermost statement or exceeds the cap; the executor clamps the decoded
//! result to the cap either way.

/// Appends ` LIMIT <cap>` unless the uppercased query already contains
/// `LIMIT` anywhere. A single trailing `;` (and surrounding whitespace)
/// is stripped before appending.
pub fn apply_limit(query: &str, cap: usize) -> String {
    if query.to_ascii_uppercase().contains("LIMIT") {
        return query.to_string();
    }
    let mut trimmed = query.trim();
    if let Some(stripped) = trimmed.strip_suffix(';') {
        trimmed = stripped.trim_end();
    }
    format!("{} LIMIT {}", trimmed, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_limit() {
        assert_eq!(
            apply_limit("SELECT * FROM orders", 1000),
            "SELECT * FROM orders LIMIT 1000"
        );
    }

    #[test]
    fn test_strips_trailing_semicolon() {
        assert_eq!(
            apply_limit("SELECT * FROM t;", 1000),
            "SELECT * FROM t LIMIT 1000"
        );
        assert_eq!(
            apply_limit("SELECT * FROM t ;  \n", 1000),
            "SELECT * FROM t LIMIT 1000"
        );
    }

    #[test]
    fn test_existing_limit_unchanged() {
        let q = "SELECT * FROM t LIMIT 5";
        assert_eq!(apply_limit(q, 1000), q);
    }

    #[test]
    fn test_lowercase_limit_unchanged() {
        let q = "select * from t limit 5";
        assert_eq!(apply_limit(q, 1000), q);
    }

    #[test]
    fn test_idempotent_after_first_application() {
        let once = apply_limit("SELECT * FROM t", 1000);
        assert_eq!(apply_limit(&once, 1000), once);
    }
}
