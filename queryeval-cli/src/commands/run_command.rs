use std::time::Duration;

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};
use queryeval_core::{Config, ConnectionSpec, NormalizedValue, TargetSelector};
use queryeval_db::Router;
use queryeval_eval::{Executor, Governor};

/// Runs a single ad-hoc `SELECT` against `conn` and prints the result as
/// a table. Goes through the same Governor/Router/Executor pipeline as
/// the HTTP surface — just with a single-shot, single-target Router —
/// so what a curator sees here is exactly what the evaluator would see.
pub async fn execute(conn: &str, sql: &str, config: &Config) -> Result<()> {
    let governor = Governor::new(1, u32::MAX as usize);
    let router = Router::new(
        ConnectionSpec::new("qbctl", conn),
        Vec::new(),
        Duration::from_secs(config.health_cooldown_seconds),
    );
    let executor = Executor::new(&governor, &router, config);

    let outcome = executor.execute(sql, "qbctl", &TargetSelector::router()).await;

    match outcome.result {
        Some(result) => {
            print_table(&result.columns, &result.rows);
            println!("\n{} row(s) in {:.1}ms", result.row_count(), outcome.duration_ms);
        }
        None => {
            anyhow::bail!(outcome.error_message.unwrap_or_else(|| "query failed".to_string()));
        }
    }

    Ok(())
}

fn print_table(columns: &[String], rows: &[Vec<NormalizedValue>]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(columns);
    for row in rows {
        table.add_row(row.iter().map(format_value));
    }
    println!("{table}");
}

fn format_value(value: &NormalizedValue) -> String {
    match value {
        NormalizedValue::Null => "NULL".to_string(),
        NormalizedValue::Integer(v) => v.to_string(),
        NormalizedValue::Number(v) => v.to_string(),
        NormalizedValue::Text(v) => v.clone(),
        NormalizedValue::Timestamp(v) => v.clone(),
        NormalizedValue::Bool(v) => v.to_string(),
        NormalizedValue::Bytes(v) => format!("<{} bytes>", v.len()),
    }
}
