use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use talent_match::workflows::recruitment::{
    recruitment_router, RecruitmentRepository, RecruitmentService,
};

pub(crate) fn with_recruitment_routes<R>(service: Arc<RecruitmentService<R>>) -> axum::Router
where
    R: RecruitmentRepository + 'static,
{
    recruitment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_seed;
    use crate::infra::InMemoryRecruitmentRepository;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use talent_match::config::RankingSettings;
    use talent_match::workflows::recruitment::ScoringEngine;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let today = chrono::Utc::now().date_naive();
        let repository = Arc::new(InMemoryRecruitmentRepository::seeded(sample_seed(today)));
        let service = Arc::new(RecruitmentService::new(
            repository,
            ScoringEngine::default(),
            RankingSettings::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_recruitment_routes(service).layer(Extension(state))
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(
                Request::get(uri)
                    .header("x-actor-role", "recruiter")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn health_and_metrics_respond() {
        assert_eq!(status_of(app(true), "/health").await, StatusCode::OK);
        assert_eq!(status_of(app(true), "/metrics").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        assert_eq!(status_of(app(true), "/ready").await, StatusCode::OK);
        assert_eq!(
            status_of(app(false), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn recruitment_routes_are_mounted() {
        assert_eq!(
            status_of(app(true), "/api/v1/jobs/job-platform/rankings").await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(app(true), "/api/v1/jobs/job-unknown/rankings").await,
            StatusCode::NOT_FOUND
        );
    }
}
