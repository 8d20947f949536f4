use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, error};

use super::domain::ApplicationId;
use super::messages;
use super::query::ListQuery;
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::{AdmissionService, AdmissionServiceError};

/// Router builder exposing the application collection, item, and statistics endpoints.
pub fn admissions_router<R>(service: Arc<AdmissionService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            get(list_handler::<R>).post(submit_handler::<R>),
        )
        .route("/api/applications/stats", get(stats_handler::<R>))
        .route(
            "/api/applications/:id",
            get(get_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

/// Endpoint an error came from; picks the generic failure message and the log label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    List,
    Submit,
    Fetch,
    Update,
    Delete,
    Stats,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Operation::List => "list_applications",
            Operation::Submit => "submit_application",
            Operation::Fetch => "fetch_application",
            Operation::Update => "update_application",
            Operation::Delete => "delete_application",
            Operation::Stats => "application_stats",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::List | Operation::Fetch => messages::LOAD_FAILED,
            Operation::Submit => messages::SUBMIT_FAILED,
            Operation::Update => messages::UPDATE_FAILED,
            Operation::Delete => messages::DELETE_FAILED,
            Operation::Stats => messages::STATS_FAILED,
        }
    }
}

pub(crate) fn error_response(operation: Operation, err: AdmissionServiceError) -> Response {
    match err {
        AdmissionServiceError::Validation(errors) => {
            let payload = json!({
                "error": messages::INVALID_INPUT,
                "details": errors.violations(),
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        AdmissionServiceError::MalformedBody(_) => {
            let payload = json!({ "error": messages::INVALID_INPUT });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        AdmissionServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": messages::DUPLICATE_PHONE });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        AdmissionServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": messages::NOT_FOUND });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        other => {
            error!(operation = operation.label(), error = %other, "admissions request failed");
            let payload = json!({ "error": operation.failure_message() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

/// Extractor rejections (bad percent-encoding, unreadable bodies) answer with the same
/// JSON shape as every other client error.
fn rejection_response(operation: Operation, rejection: impl std::fmt::Display) -> Response {
    debug!(operation = operation.label(), %rejection, "request rejected before handling");
    let payload = json!({ "error": messages::INVALID_INPUT });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn parse_body(body: &Bytes) -> Result<Value, AdmissionServiceError> {
    Ok(serde_json::from_slice(body)?)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let query = match query {
        Ok(Query(pairs)) => ListQuery::from_pairs(pairs),
        Err(rejection) => return rejection_response(Operation::List, rejection),
    };
    match service.list(&query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => error_response(Operation::List, err),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(Operation::Submit, rejection),
    };
    match parse_body(&body).and_then(|payload| service.submit(&payload)) {
        Ok(application) => {
            let payload = json!({
                "message": messages::SUBMITTED,
                "application": application.summary(),
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(err) => error_response(Operation::Submit, err),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = match id {
        Ok(Path(id)) => ApplicationId(id),
        Err(rejection) => return rejection_response(Operation::Fetch, rejection),
    };
    match service.get(&id) {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => error_response(Operation::Fetch, err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let (id, body) = match (id, body) {
        (Ok(Path(id)), Ok(body)) => (ApplicationId(id), body),
        (Err(rejection), _) => return rejection_response(Operation::Update, rejection),
        (_, Err(rejection)) => return rejection_response(Operation::Update, rejection),
    };
    match parse_body(&body).and_then(|payload| service.update_status(&id, &payload)) {
        Ok(application) => {
            let payload = json!({
                "message": messages::STATUS_UPDATED,
                "application": application,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(Operation::Update, err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = match id {
        Ok(Path(id)) => ApplicationId(id),
        Err(rejection) => return rejection_response(Operation::Delete, rejection),
    };
    match service.delete(&id) {
        Ok(_) => {
            let payload = json!({ "message": messages::DELETED });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(Operation::Delete, err),
    }
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<AdmissionService<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => error_response(Operation::Stats, err),
    }
}
