use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use queryeval_core::{NormalizedValue, SchemaSnapshot, TargetSelector};
use queryeval_db::connect;
use queryeval_eval::{Executor, Orchestrator};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;
use crate::ApiResponse;

const EXPLICIT_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    status: String,
    service: String,
    version: String,
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthCheck {
        status: "ok".to_string(),
        service: "queryeval-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub user_id: String,
    pub question_id: String,
    pub attempt_id: Option<String>,
    pub participant_sql: String,
}

/// Runs a participant's submission through the full evaluation pipeline
/// (spec §4.10) and, when a catalog is wired up, records the resulting
/// verdict against the attempt.
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    let question = match state.catalog.question(&req.question_id).await {
        Ok(q) => q,
        Err(e) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("Unknown question: {e}"))),
            )
                .into_response();
        }
    };

    let target = match state.catalog.database_target(&req.question_id).await {
        Ok(t) => t,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("No database target: {e}"))),
            )
                .into_response();
        }
    };

    let executor = Executor::new(&state.governor, &state.router, &state.config);
    let orchestrator = Orchestrator::new(&state.governor, &executor);

    let verdict = orchestrator
        .evaluate(&req.user_id, &question, &req.participant_sql, &target)
        .await;

    info!(
        user_id = %req.user_id,
        question_id = %req.question_id,
        correct = verdict.is_correct(),
        "submission evaluated"
    );

    if let Some(attempt_id) = &req.attempt_id {
        if let Err(e) = state
            .catalog
            .record_answer(attempt_id, &req.question_id, &verdict)
            .await
        {
            tracing::warn!(error = %e, "failed to record answer");
        }
    }

    Json(verdict).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SandboxRunRequest {
    pub user_id: String,
    pub question_id: String,
    pub sql: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum SandboxRunResponse {
    #[serde(rename = "OK")]
    Ok {
        columns: Vec<String>,
        rows: Vec<Vec<NormalizedValue>>,
        execution_time_ms: f64,
    },
    #[serde(rename = "ERROR")]
    Error { message: String },
}

/// Executes an arbitrary participant `SELECT` through the same
/// Validator/Rewriter/Executor pipeline, but with nothing to compare
/// against — no verdict, just a results grid (supplemented from the
/// prototype's `AttemptViewSet.run_query`).
pub async fn sandbox_run(
    State(state): State<AppState>,
    Json(req): Json<SandboxRunRequest>,
) -> impl IntoResponse {
    if let queryeval_core::ValidationVerdict::Rejected { reason } =
        queryeval_eval::validate(&req.sql, false)
    {
        return Json(SandboxRunResponse::Error { message: reason });
    }

    let target = match state.catalog.database_target(&req.question_id).await {
        Ok(t) => t,
        Err(e) => {
            return Json(SandboxRunResponse::Error {
                message: format!("No database target: {e}"),
            });
        }
    };

    let executor = Executor::new(&state.governor, &state.router, &state.config);
    let outcome = executor.execute(&req.sql, &req.user_id, &target).await;

    match outcome.result {
        Some(result) => Json(SandboxRunResponse::Ok {
            columns: result.columns,
            rows: result.rows,
            execution_time_ms: outcome.duration_ms,
        }),
        None => Json(SandboxRunResponse::Error {
            message: outcome.error_message.unwrap_or_else(|| "Query execution failed.".to_string()),
        }),
    }
}

/// Extracts schema metadata for the question's target database (spec
/// §4.9), always forcing the primary connection the way the prototype's
/// `inspect_schema` does, to avoid reporting a stale replica's schema.
pub async fn schema(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> impl IntoResponse {
    let target = match state.catalog.database_target(&question_id).await {
        Ok(t) => t,
        Err(e) => return Json(SchemaSnapshot::failed(e.to_string())),
    };

    let mut conn = match target {
        TargetSelector::UseRouter { .. } => match state.router.acquire(true).await {
            Ok((conn, _)) => conn,
            Err(e) => return Json(SchemaSnapshot::failed(e.to_string())),
        },
        TargetSelector::UseExplicit { spec } => {
            match connect(&spec.connection_string, EXPLICIT_CONNECT_TIMEOUT).await {
                Ok(conn) => conn,
                Err(e) => return Json(SchemaSnapshot::failed(e.to_string())),
            }
        }
    };

    Json(queryeval_db::inspect(&mut conn).await)
}
