use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, JobId};
use super::repository::{RecruitmentRepository, RepositoryError};
use super::service::{RecruitmentService, RecruitmentServiceError};
use crate::access::{can_manage_role, hierarchy_level, Role};

/// Header carrying the caller's role, set by the upstream session layer.
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Router builder exposing ranking, scoring, and access endpoints.
pub fn recruitment_router<R>(service: Arc<RecruitmentService<R>>) -> Router
where
    R: RecruitmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs/:job_id/rankings",
            get(rankings_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/finalists",
            get(finalists_handler::<R>),
        )
        .route(
            "/api/v1/jobs/:job_id/auto-scores",
            post(refresh_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/manual-score",
            put(manual_score_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/assign",
            post(assign_handler::<R>),
        )
        .route("/api/v1/roles/:role/access", get(access_handler::<R>))
        .route(
            "/api/v1/roles/:acting/can-manage/:target",
            get(can_manage_handler),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankingQuery {
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FinalistQuery {
    pub(crate) count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ManualScoreRequest {
    pub(crate) score: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignRequest {
    pub(crate) recruiter: String,
}

fn error_body(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

/// Resolve the acting role or produce the rejection response.
fn actor_role(headers: &HeaderMap) -> Result<Role, Response> {
    let raw = headers
        .get(ACTOR_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            error_body(
                StatusCode::UNAUTHORIZED,
                format!("missing {ACTOR_ROLE_HEADER} header"),
            )
        })?;
    raw.parse::<Role>()
        .map_err(|err| error_body(StatusCode::UNAUTHORIZED, err.to_string()))
}

fn service_error(error: RecruitmentServiceError) -> Response {
    let status = match &error {
        RecruitmentServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        RecruitmentServiceError::Forbidden { .. } => StatusCode::FORBIDDEN,
        RecruitmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RecruitmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_body(status, error.to_string())
}

pub(crate) async fn rankings_handler<R>(
    State(service): State<Arc<RecruitmentService<R>>>,
    Path(job_id): Path<String>,
    Query(query): Query<RankingQuery>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
{
    let actor = match actor_role(&headers) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let job_id = JobId(job_id);
    match service.rankings(actor, &job_id, query.limit) {
        Ok(rankings) => (
            StatusCode::OK,
            axum::Json(json!({ "jobId": job_id, "rankings": rankings })),
        )
            .into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn finalists_handler<R>(
    State(service): State<Arc<RecruitmentService<R>>>,
    Path(job_id): Path<String>,
    Query(query): Query<FinalistQuery>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
{
    let actor = match actor_role(&headers) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let job_id = JobId(job_id);
    match service.finalists(actor, &job_id, query.count) {
        Ok(finalists) => (
            StatusCode::OK,
            axum::Json(json!({ "jobId": job_id, "finalists": finalists })),
        )
            .into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn refresh_handler<R>(
    State(service): State<Arc<RecruitmentService<R>>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: RecruitmentRepository + 'static,
{
    let actor = match actor_role(&headers) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let job_id = JobId(job_id);
    match service.refresh_auto_scores(actor, &job_id) {
        Ok(updated) => (
            StatusCode::OK,
            axum::Json(json!({ "jobId": job_id, "updated": updated })),
        )
            .into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn manual_score_handler<R>(
    State(service): State<Arc<RecruitmentService<R>>>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<ManualScoreRequest>,
) -> Response
where
    R: RecruitmentRepository + 'static,
{
    let actor = match actor_role(&headers) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let id = ApplicationId(application_id);
    match service.record_manual_score(actor, &id, request.score) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn assign_handler<R>(
    State(service): State<Arc<RecruitmentService<R>>>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<AssignRequest>,
) -> Response
where
    R: RecruitmentRepository + 'static,
{
    let actor = match actor_role(&headers) {
        Ok(role) => role,
        Err(response) => return response,
    };
    let id = ApplicationId(application_id);
    match service.assign(actor, &id, &request.recruiter) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn access_handler<R>(
    State(service): State<Arc<RecruitmentService<R>>>,
    Path(role): Path<String>,
) -> Response
where
    R: RecruitmentRepository + 'static,
{
    match role.parse::<Role>() {
        Ok(role) => (StatusCode::OK, axum::Json(service.access_summary(role))).into_response(),
        Err(err) => error_body(StatusCode::NOT_FOUND, err.to_string()),
    }
}

pub(crate) async fn can_manage_handler(Path((acting, target)): Path<(String, String)>) -> Response {
    let payload = json!({
        "acting": acting,
        "actingLevel": hierarchy_level(&acting),
        "target": target,
        "targetLevel": hierarchy_level(&target),
        "allowed": can_manage_role(&acting, &target),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
