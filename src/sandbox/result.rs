//! Result type for learner query execution

use serde::Serialize;
use serde_json::Value;

/// A decoded result row, keyed by column name
pub type ResultRow = serde_json::Map<String, Value>;

/// Result of executing a learner query
///
/// Columns are derived from the first returned row's metadata; an empty
/// result set carries an empty column list. `truncated` is true iff the
/// row count equals the configured cap, signaling the result may have
/// been cut off by the injected LIMIT.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Column names in result order
    pub columns: Vec<String>,
    /// Rows as column-to-value mappings
    pub rows: Vec<ResultRow>,
    /// Number of rows returned (never exceeds the cap)
    pub row_count: usize,
    /// Whether the result hit the row cap
    #[serde(rename = "limited")]
    pub truncated: bool,
}

impl ExecutionResult {
    /// Creates an empty result
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            row_count: 0,
            truncated: false,
        }
    }

    /// Returns true if no rows were returned
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_result() {
        let result = ExecutionResult::empty();
        assert!(result.is_empty());
        assert!(result.columns.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn test_wire_shape_uses_camel_case() {
        let mut row = ResultRow::new();
        row.insert("id".to_string(), json!(1));
        let result = ExecutionResult {
            columns: vec!["id".to_string()],
            rows: vec![row],
            row_count: 1,
            truncated: true,
        };
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["rowCount"], json!(1));
        assert_eq!(v["limited"], json!(true));
        assert_eq!(v["rows"][0]["id"], json!(1));
    }
}
