use axum::{extract::State, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::services::reminder::{PassSummary, SharedPassSummary};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    /// Outcome of the most recent reminder pass, absent until the first
    /// pass has run.
    pub last_reminder_pass: Option<PassSummary>,
}

#[derive(Clone)]
pub struct AppState {
    pub start_time: DateTime<Utc>,
    pub last_pass: SharedPassSummary,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(last_pass: SharedPassSummary) -> Self {
        let state = AppState {
            start_time: Utc::now(),
            last_pass,
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        last_reminder_pass: state.last_pass.read().await.clone(),
    })
}

async fn liveness_check() -> Json<&'static str> {
    // If this endpoint responds, the process is alive.
    Json("alive")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::utils::datetime::now_local;

    fn test_service(last_pass: Option<PassSummary>) -> HealthService {
        HealthService::new(Arc::new(RwLock::new(last_pass)))
    }

    #[tokio::test]
    async fn test_health_endpoint_without_pass() {
        let server = TestServer::new(test_service(None).router).expect("test server");

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let health: HealthResponse = response.json();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert!(health.last_reminder_pass.is_none());
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_last_pass() {
        let summary = PassSummary {
            finished_at: now_local(),
            owner_configured: true,
            tables_scanned: 7,
            tables_failed: 1,
            rows_skipped: 2,
            cells_updated: 5,
            notifications_sent: 3,
        };
        let server = TestServer::new(test_service(Some(summary)).router).expect("test server");

        let health: HealthResponse = server.get("/health").await.json();
        let pass = health.last_reminder_pass.expect("pass summary");
        assert_eq!(pass.tables_scanned, 7);
        assert_eq!(pass.notifications_sent, 3);
        assert!(pass.owner_configured);
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let server = TestServer::new(test_service(None).router).expect("test server");

        let response = server.get("/health/live").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let alive: String = response.json();
        assert_eq!(alive, "alive");
    }
}
