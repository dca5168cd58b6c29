pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::applications::handlers as applications;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route("/api/v1/jobs/categories", get(jobs::handle_get_categories))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/apply", post(applications::handle_apply))
        .route(
            "/api/v1/jobs/:id/applications",
            get(jobs::handle_job_applications),
        )
        .route(
            "/api/v1/jobs/company/:company_id",
            get(jobs::handle_company_jobs),
        )
        // Applications API
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            put(applications::handle_update_status),
        )
        .route(
            "/api/v1/applications/:id/withdraw",
            put(applications::handle_withdraw),
        )
        .route(
            "/api/v1/applications/:id/notes",
            post(applications::handle_add_note),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bytes::Bytes;
    use tower::ServiceExt;

    use super::*;
    use crate::analyzer::{AnalyzerError, ResumeAnalysis, ResumeAnalyzer};
    use crate::config::Config;
    use crate::screening::ContainmentMatcher;

    struct NoopAnalyzer;

    #[async_trait]
    impl ResumeAnalyzer for NoopAnalyzer {
        async fn analyze(
            &self,
            _filename: &str,
            _content_type: &str,
            _data: Bytes,
        ) -> Result<ResumeAnalysis, AnalyzerError> {
            Ok(ResumeAnalysis::default())
        }
    }

    // Lazy pool: no connection is made until a handler touches the DB,
    // so routing-level tests run without PostgreSQL.
    fn test_state() -> AppState {
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/talentsift_test")
            .unwrap();
        AppState {
            db,
            config: Config {
                database_url: "postgres://localhost/talentsift_test".to_string(),
                ai_service_url: "http://localhost:8000/analyze/".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            analyzer: Arc::new(NoopAnalyzer),
            skill_matcher: Arc::new(ContainmentMatcher),
        }
    }

    #[tokio::test]
    async fn test_health_route_responds_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
