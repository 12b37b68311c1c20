use serde::{Deserialize, Serialize};

/// A foreign key's referenced column (spec §4.9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub is_nullable: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<ForeignKeyRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

/// The full metadata snapshot returned by `Introspector::inspect`
/// (spec §4.9). `queryeval-db` is the only crate that builds one of
/// these from a live connection; this type is just the shape.
///
/// `inspect` never throws to its caller: on any failure it returns an
/// empty `tables` list with `error` set instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub tables: Vec<TableSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SchemaSnapshot {
    pub fn empty() -> Self {
        SchemaSnapshot {
            tables: Vec::new(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        SchemaSnapshot {
            tables: Vec::new(),
            error: Some(message.into()),
        }
    }
}
