use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use queryeval_core::{Config, ConnectionSpec, Question, TargetSelector};
use queryeval_db::Router;
use queryeval_eval::{Executor, Governor, Orchestrator};

/// Runs a participant query against a solution query through the full
/// evaluation pipeline (validate, execute both, compare) without going
/// through the HTTP surface — for a curator checking a solution query
/// before it's wired into a real question.
pub async fn execute(
    conn: &str,
    solution_path: &Path,
    participant_path: &Path,
    user_id: &str,
    config: &Config,
) -> Result<()> {
    let solution_sql = fs::read_to_string(solution_path)
        .with_context(|| format!("reading solution query from {}", solution_path.display()))?;
    let participant_sql = fs::read_to_string(participant_path)
        .with_context(|| format!("reading participant query from {}", participant_path.display()))?;

    let governor = Governor::new(1, u32::MAX as usize);
    let router = Router::new(
        ConnectionSpec::new("qbctl", conn),
        Vec::new(),
        Duration::from_secs(config.health_cooldown_seconds),
    );
    let executor = Executor::new(&governor, &router, config);
    let orchestrator = Orchestrator::new(&governor, &executor);

    let question = Question::new("adhoc", solution_sql);
    let verdict = orchestrator
        .evaluate(user_id, &question, &participant_sql, &TargetSelector::router())
        .await;

    println!("{}", serde_json::to_string_pretty(&verdict)?);

    Ok(())
}
