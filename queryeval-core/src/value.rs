use serde::{Deserialize, Serialize};

/// A single cell value after normalization (spec §4.7).
///
/// Normalization happens once, in the Executor, immediately after a row
/// is read off the wire; nothing downstream ever sees a raw driver type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NormalizedValue {
    Null,
    Integer(i64),
    Number(f64),
    Text(String),
    /// ISO-8601, truncated to second precision — see spec §4.7's note on
    /// why sub-second noise is discarded before comparison.
    Timestamp(String),
    Bool(bool),
    Bytes(Vec<u8>),
}

/// A normalized, ordered result (spec §3's `ResultSet`).
///
/// Invariant: every row in `rows` has the same length as `columns`, and
/// values appear in column order. The Executor maintains this; nothing
/// downstream re-checks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<NormalizedValue>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<NormalizedValue>>) -> Self {
        ResultSet { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_reflects_rows() {
        let rs = ResultSet::new(
            vec!["id".into()],
            vec![
                vec![NormalizedValue::Integer(1)],
                vec![NormalizedValue::Integer(2)],
            ],
        );
        assert_eq!(rs.row_count(), 2);
        assert_eq!(rs.column_count(), 1);
    }

    #[test]
    fn normalized_values_compare_by_variant_and_payload() {
        assert_eq!(NormalizedValue::Null, NormalizedValue::Null);
        assert_ne!(NormalizedValue::Integer(1), NormalizedValue::Number(1.0));
        assert_eq!(
            NormalizedValue::Text("a".into()),
            NormalizedValue::Text("a".into())
        );
    }
}
