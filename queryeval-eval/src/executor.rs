use std::time::{Duration, Instant};

use queryeval_core::{Config, NormalizedValue, ResultSet, TargetSelector};
use queryeval_db::{connect, Router};
use tiberius::ColumnType;
use tracing::{error, warn};

use crate::governor::Governor;
use crate::normalizer::{normalize_date, normalize_string, normalize_timestamp, round_decimal};
use crate::rewriter::rewrite;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Result of one `Executor::execute` call (spec §4.6): at most one of
/// `result`/`error_message` is set, and `duration_ms` is always measured
/// regardless of outcome.
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub result: Option<ResultSet>,
    pub error_message: Option<String>,
    pub duration_ms: f64,
}

/// Connects, rewrites, executes, and normalizes a single query (spec
/// §4.6). Composes a `Governor` (for the concurrency permit) and either
/// a `Router` or an explicit `ConnectionSpec`, never both, per call.
pub struct Executor<'a> {
    governor: &'a Governor,
    router: &'a Router,
    config: &'a Config,
}

impl<'a> Executor<'a> {
    pub fn new(governor: &'a Governor, router: &'a Router, config: &'a Config) -> Self {
        Executor {
            governor,
            router,
            config,
        }
    }

    pub async fn execute(&self, sql: &str, user_id: &str, target: &TargetSelector) -> ExecutionOutcome {
        let _permit = self.governor.acquire_permit().await;
        let start = Instant::now();

        let mut conn = match self.open_connection(target).await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(user_id, error = %e, "failed to open connection");
                return ExecutionOutcome {
                    result: None,
                    error_message: Some(classify_error(&e.to_string())),
                    duration_ms: elapsed_ms(start),
                };
            }
        };

        let rewritten = rewrite(sql, self.config.max_result_rows);
        let timeout = Duration::from_secs(self.config.query_timeout_seconds);

        let outcome = match tokio::time::timeout(timeout, run_query(&mut conn, &rewritten, self.config)).await {
            Ok(Ok(result)) => ExecutionOutcome {
                result: Some(result),
                error_message: None,
                duration_ms: elapsed_ms(start),
            },
            Ok(Err(e)) => {
                error!(user_id, error = %e, "query execution failed");
                ExecutionOutcome {
                    result: None,
                    error_message: Some(classify_error(&e.to_string())),
                    duration_ms: elapsed_ms(start),
                }
            }
            Err(_) => ExecutionOutcome {
                result: None,
                error_message: Some(
                    "Query execution timed out. Limit your query's complexity or check for missing joins."
                        .to_string(),
                ),
                duration_ms: elapsed_ms(start),
            },
        };

        outcome
    }

    async fn open_connection(&self, target: &TargetSelector) -> Result<queryeval_db::Connection, queryeval_db::DbError> {
        match target {
            TargetSelector::UseRouter { force_primary } => {
                self.router.acquire(*force_primary).await.map(|(conn, _)| conn)
            }
            TargetSelector::UseExplicit { spec } => connect(&spec.connection_string, CONNECT_TIMEOUT).await,
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Classifies a raw driver error message into a user-safe string (spec
/// §4.6). Raw driver errors must never leak verbatim for the first
/// three classes.
fn classify_error(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("timeout") {
        "Query execution timed out. Limit your query's complexity or check for missing joins.".to_string()
    } else if lower.contains("invalid object name") || lower.contains("does not exist") {
        "Table or column not found. Check the Explorer tab to see available tables and columns.".to_string()
    } else if lower.contains("syntax error") {
        "SQL Syntax Error. Check your SELECT statement and ORDER BY clause.".to_string()
    } else {
        let truncated: String = raw.chars().take(100).collect();
        format!("Database Error: {truncated}")
    }
}

async fn run_query(
    conn: &mut queryeval_db::Connection,
    sql: &str,
    config: &Config,
) -> Result<ResultSet, queryeval_db::DbError> {
    let mut stream = conn.simple_query(sql).await?;

    let columns: Vec<String> = stream
        .columns()
        .await?
        .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
        .unwrap_or_default();
    let columns = if config.case_insensitive_columns {
        columns.into_iter().map(|c| c.to_lowercase()).collect()
    } else {
        columns
    };

    let mut rows = stream.into_first_result().await?;
    rows.truncate(config.max_result_rows as usize);

    let normalized_rows = rows
        .iter()
        .map(|row| row_to_values(row, config))
        .collect();

    Ok(ResultSet::new(columns, normalized_rows))
}

fn row_to_values(row: &tiberius::Row, config: &Config) -> Vec<NormalizedValue> {
    (0..row.columns().len())
        .map(|idx| column_to_value(row, idx, config))
        .collect()
}

fn column_to_value(row: &tiberius::Row, idx: usize, config: &Config) -> NormalizedValue {
    match row.columns()[idx].column_type() {
        ColumnType::Bit | ColumnType::Bitn => row
            .get::<bool, _>(idx)
            .map(NormalizedValue::Bool)
            .unwrap_or(NormalizedValue::Null),
        ColumnType::Int1 | ColumnType::Int2 | ColumnType::Int4 | ColumnType::Intn => row
            .get::<i32, _>(idx)
            .map(|v| NormalizedValue::Integer(v as i64))
            .unwrap_or(NormalizedValue::Null),
        ColumnType::Int8 => row
            .get::<i64, _>(idx)
            .map(NormalizedValue::Integer)
            .unwrap_or(NormalizedValue::Null),
        ColumnType::Float4 => row
            .get::<f32, _>(idx)
            .map(|v| NormalizedValue::Number(round_decimal(v as f64, config.decimal_precision)))
            .unwrap_or(NormalizedValue::Null),
        ColumnType::Float8 | ColumnType::Floatn => row
            .get::<f64, _>(idx)
            .map(|v| NormalizedValue::Number(round_decimal(v, config.decimal_precision)))
            .unwrap_or(NormalizedValue::Null),
        ColumnType::Decimaln | ColumnType::Numericn => row
            .get::<tiberius::numeric::Numeric, _>(idx)
            .map(|v| {
                let as_f64 = v.value() as f64 / 10f64.powi(v.scale() as i32);
                NormalizedValue::Number(round_decimal(as_f64, config.decimal_precision))
            })
            .unwrap_or(NormalizedValue::Null),
        ColumnType::Datetime | ColumnType::Datetime2 | ColumnType::Datetimen | ColumnType::Datetime4 => row
            .get::<chrono::NaiveDateTime, _>(idx)
            .map(|dt| NormalizedValue::Timestamp(normalize_timestamp(dt)))
            .unwrap_or(NormalizedValue::Null),
        // tiberius decodes SQL Server's DATE to NaiveDate, not NaiveDateTime;
        // reading it as the latter always came back None and normalized a
        // present DATE value to Null.
        ColumnType::Daten => row
            .get::<chrono::NaiveDate, _>(idx)
            .map(|d| NormalizedValue::Timestamp(normalize_date(d)))
            .unwrap_or(NormalizedValue::Null),
        _ => row
            .get::<&str, _>(idx)
            .map(|s| NormalizedValue::Text(normalize_string(s, config.strip_strings)))
            .unwrap_or(NormalizedValue::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_timeout_messages() {
        assert!(classify_error("Connection Timeout Expired").contains("timed out"));
    }

    #[test]
    fn classifies_missing_object_messages() {
        assert!(classify_error("Invalid object name 'dbo.foo'.").contains("not found"));
    }

    #[test]
    fn classifies_syntax_errors() {
        assert!(classify_error("Incorrect Syntax Error near 'SELECT'").contains("Syntax Error"));
    }

    #[test]
    fn truncates_unrecognized_errors_to_100_chars() {
        let raw = "x".repeat(200);
        let classified = classify_error(&raw);
        assert!(classified.starts_with("Database Error: "));
        assert_eq!(classified.len(), "Database Error: ".len() + 100);
    }
}
