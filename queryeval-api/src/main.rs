//! QueryEval API — thin HTTP surface over the evaluation pipeline.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use queryeval_api::{app, AppState, AttemptId, Catalog};
use queryeval_core::{Config, ConnectionSpec, EvaluationVerdict, Question, QuestionId, TargetSelector};
use queryeval_db::Router as DbRouter;
use queryeval_eval::Governor;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Stands in for the real catalog (question/assessment/assignment CRUD,
/// auth, persistence) until that out-of-scope system is wired in.
/// Every method errors; this binary is runnable for manual exploration
/// of `/health` and for load-testing the HTTP layer itself, not for
/// serving real submissions.
struct UnimplementedCatalog;

#[async_trait]
impl Catalog for UnimplementedCatalog {
    async fn question(&self, _id: &QuestionId) -> Result<Question> {
        anyhow::bail!("no catalog is configured; this binary ships the HTTP surface only")
    }

    async fn database_target(&self, _question_id: &QuestionId) -> Result<TargetSelector> {
        anyhow::bail!("no catalog is configured; this binary ships the HTTP surface only")
    }

    async fn record_answer(
        &self,
        _attempt: &AttemptId,
        _question: &QuestionId,
        _verdict: &EvaluationVerdict,
    ) -> Result<()> {
        anyhow::bail!("no catalog is configured; this binary ships the HTTP surface only")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting QueryEval API");

    let config = Config::from_env()?;
    let auth_token = env::var("API_AUTH_TOKEN").ok();
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let primary = ConnectionSpec::new("primary", config.primary_conn.clone());
    let replicas = config
        .replica_conns
        .iter()
        .enumerate()
        .map(|(i, conn)| ConnectionSpec::new(format!("replica-{i}"), conn.clone()))
        .collect();
    let router = DbRouter::new(
        primary,
        replicas,
        Duration::from_secs(config.health_cooldown_seconds),
    );

    let governor = Governor::new(
        config.max_concurrent_query_runs as usize,
        config.run_rate_limit as usize,
    );

    let state = AppState {
        catalog: Arc::new(UnimplementedCatalog),
        governor: Arc::new(governor),
        router: Arc::new(router),
        config: Arc::new(config),
        auth_token,
    };

    let app = app(state);

    info!("Listening on http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
