use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::admissions::messages;
use crate::admissions::router::{error_response, stats_handler, Operation};
use crate::admissions::{
    admissions_router, AdmissionService, AdmissionServiceError, RepositoryError,
    ValidationErrors,
};

fn router() -> axum::Router {
    let (service, _) = build_service();
    admissions_router(Arc::new(service))
}

#[tokio::test]
async fn stats_route_is_not_shadowed_by_item_route() {
    let response = router()
        .oneshot(empty_request("GET", "/api/applications/stats"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(4));
    assert_eq!(payload["approvalRate"], json!(50));
    assert_eq!(payload["statusBreakdown"]["APPROVED"], json!(2));
    assert_eq!(
        payload["generationBreakdown"],
        json!([{ "generation": 2, "count": 3 }, { "generation": 3, "count": 1 }])
    );
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/applications")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .expect("request");

    let response = router().oneshot(request).await.expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": messages::INVALID_INPUT }));
}

#[tokio::test]
async fn repeated_query_keys_use_the_first_value() {
    let response = router()
        .oneshot(empty_request(
            "GET",
            "/api/applications?status=APPROVED&status=ALL",
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let statuses: Vec<&Value> = payload["applications"]
        .as_array()
        .expect("applications array")
        .iter()
        .map(|application| &application["status"])
        .collect();
    assert_eq!(statuses, vec![&json!("APPROVED"), &json!("APPROVED")]);
    assert_eq!(payload["pagination"]["total"], json!(2));
}

#[tokio::test]
async fn undecodable_path_id_answers_with_json_error() {
    for method in ["GET", "DELETE"] {
        let response = router()
            .oneshot(empty_request(method, "/api/applications/%FF"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
        let payload = read_json_body(response).await;
        assert_eq!(payload, json!({ "error": messages::INVALID_INPUT }));
    }
}

#[tokio::test]
async fn patch_with_empty_body_is_rejected() {
    let response = router()
        .oneshot(empty_request("PATCH", "/api/applications/4"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_missing_application_returns_not_found() {
    let response = router()
        .oneshot(empty_request("DELETE", "/api/applications/404"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": messages::NOT_FOUND }));
}

#[tokio::test]
async fn stats_handler_hides_internal_errors() {
    let service = Arc::new(AdmissionService::new(Arc::new(UnavailableRepository)));
    let response = stats_handler(State(service)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": messages::STATS_FAILED }));
}

#[tokio::test]
async fn internal_errors_use_the_operation_message() {
    let cases = [
        (Operation::List, messages::LOAD_FAILED),
        (Operation::Fetch, messages::LOAD_FAILED),
        (Operation::Submit, messages::SUBMIT_FAILED),
        (Operation::Update, messages::UPDATE_FAILED),
        (Operation::Delete, messages::DELETE_FAILED),
        (Operation::Stats, messages::STATS_FAILED),
    ];

    for (operation, message) in cases {
        let response = error_response(
            operation,
            AdmissionServiceError::Repository(RepositoryError::Unavailable(
                "disk full".to_string(),
            )),
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = read_json_body(response).await;
        assert_eq!(payload["error"], json!(message));
        assert!(!payload.to_string().contains("disk full"));
    }
}

#[tokio::test]
async fn validation_errors_carry_details() {
    let response = error_response(
        Operation::Submit,
        AdmissionServiceError::Validation(ValidationErrors(vec![
            crate::admissions::FieldViolation::new("phone", messages::PHONE_FORMAT),
        ])),
    );

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({
            "error": messages::INVALID_INPUT,
            "details": [{ "field": "phone", "message": messages::PHONE_FORMAT }],
        })
    );
}

#[tokio::test]
async fn submit_route_returns_summary() {
    let response = router()
        .oneshot(json_request(
            "POST",
            "/api/applications",
            &payload("010-6060-0606", 7),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], json!(messages::SUBMITTED));
    let application = payload["application"].as_object().expect("summary object");
    let mut keys: Vec<&str> = application.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["generation", "id", "name", "status"]);
    assert_eq!(application["status"], json!("PENDING"));
    assert_eq!(application["generation"], json!(7));
}
