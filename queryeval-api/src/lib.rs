//! Thin HTTP surface over the evaluation pipeline. Auth, catalog CRUD,
//! bulk assignment, and the UI are out of scope — reached here only
//! through the `Catalog` trait this crate depends on but does not
//! implement.

pub mod catalog;
pub mod handlers;
pub mod scoring;
pub mod state;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use catalog::{AttemptId, Catalog};
pub use state::AppState;

use crate::handlers::{health_check, sandbox_run, schema, submit};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        ApiResponse {
            ok: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            ok: false,
            message: message.into(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/submit", post(submit))
        .route("/sandbox/run", post(sandbox_run))
        .route("/schema/:question_id", get(schema))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse>)> {
    if let Some(ref expected_token) = state.auth_token {
        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let authenticated = match auth_header {
            Some(auth_str) if auth_str.starts_with("Bearer ") => &auth_str[7..] == expected_token,
            _ => false,
        };

        if !authenticated {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Unauthorized: Invalid or missing token")),
            ));
        }
    }

    Ok(next.run(req).await)
}
