//! Storage-agnostic domain types and configuration for the evaluation
//! pipeline. No async I/O lives here; connections are made by
//! `queryeval-db`, evaluation logic by `queryeval-eval`.

pub mod config;
pub mod connection;
pub mod error;
pub mod question;
pub mod schema;
pub mod value;
pub mod verdict;

pub use config::Config;
pub use connection::{ConnectionSpec, TargetSelector};
pub use error::CoreError;
pub use question::{Question, QuestionId};
pub use schema::{ColumnSchema, ForeignKeyRef, SchemaSnapshot, TableSchema};
pub use value::{NormalizedValue, ResultSet};
pub use verdict::{EvaluationVerdict, ExecutionMetadata, ValidationVerdict};
