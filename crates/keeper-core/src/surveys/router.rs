use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{SurveyId, UserId};
use super::repository::DirectoryRepository;
use super::service::{
    EvaluationService, EvaluationServiceError, EvaluationTargetKind, ResponseSubmission,
};

/// Router builder exposing the evaluation core over HTTP. Authentication is
/// owned by the surrounding deployment; the acting user arrives as a query
/// parameter resolved against the directory.
pub fn evaluation_router<R>(service: Arc<EvaluationService<R>>) -> Router
where
    R: DirectoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/surveys", get(list_surveys_handler::<R>))
        .route("/api/v1/surveys/:survey_id", get(get_survey_handler::<R>))
        .route("/api/v1/results", get(results_overview_handler::<R>))
        .route(
            "/api/v1/results/:employee_id",
            get(employee_results_handler::<R>),
        )
        .route("/api/v1/completion", get(completion_handler::<R>))
        .route(
            "/api/v1/evaluation-targets",
            get(evaluation_targets_handler::<R>),
        )
        .route("/api/v1/responses", post(submit_response_handler::<R>))
        .route(
            "/api/v1/responses/:survey_id/:employee_id",
            get(response_detail_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActingUserQuery {
    pub(crate) user_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TargetsQuery {
    pub(crate) user_id: String,
    pub(crate) kind: EvaluationTargetKind,
}

fn error_response(error: EvaluationServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (error.status_code(), axum::Json(payload)).into_response()
}

pub(crate) async fn list_surveys_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Query(query): Query<ActingUserQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.list_visible_surveys(&UserId(query.user_id)) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_survey_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(survey_id): Path<String>,
    Query(query): Query<ActingUserQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.get_survey(&SurveyId(survey_id), &UserId(query.user_id)) {
        Ok(survey) => (StatusCode::OK, axum::Json(survey)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn results_overview_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Query(query): Query<ActingUserQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.results_overview(&UserId(query.user_id)) {
        Ok(summaries) => (StatusCode::OK, axum::Json(summaries)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employee_results_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path(employee_id): Path<String>,
    Query(query): Query<ActingUserQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.employee_results(&UserId(query.user_id), &UserId(employee_id)) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn completion_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Query(query): Query<ActingUserQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.completion_for(&UserId(query.user_id)) {
        Ok(rows) => (StatusCode::OK, axum::Json(rows)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_targets_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Query(query): Query<TargetsQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.list_evaluation_targets(&UserId(query.user_id), query.kind) {
        Ok(targets) => (StatusCode::OK, axum::Json(targets)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_response_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    axum::Json(submission): axum::Json<ResponseSubmission>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.submit_response(submission) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn response_detail_handler<R>(
    State(service): State<Arc<EvaluationService<R>>>,
    Path((survey_id, employee_id)): Path<(String, String)>,
    Query(query): Query<ActingUserQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.response_detail(
        &SurveyId(survey_id),
        &UserId(employee_id),
        &UserId(query.user_id),
    ) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error) => error_response(error),
    }
}
