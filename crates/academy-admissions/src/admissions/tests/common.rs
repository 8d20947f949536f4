use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use crate::admissions::domain::{
    Application, ApplicationId, ApplicationStatus, GolfParticipation, TaxInvoice,
};
use crate::admissions::query::ApplicationFilter;
use crate::admissions::repository::{ApplicationRepository, RepositoryError};
use crate::admissions::{AdmissionService, InMemoryApplicationRepository};

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 14, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn payload(phone: &str, generation: u16) -> Value {
    json!({
        "name": "최유진",
        "phone": phone,
        "birthDate": "1979-04-12",
        "gender": "여",
        "companyPosition": "(주)그린에너지 / 전략기획실장",
        "address": "서울특별시 강남구 테헤란로 152",
        "interests": ["미래기술 (AI, 챗GPT)", "리더십"],
        "golf": "Yes",
        "referrer": "김민수",
        "taxInvoice": "발행",
        "generation": generation,
    })
}

pub(super) fn application(
    id: &str,
    phone: &str,
    generation: u16,
    status: ApplicationStatus,
    submitted_at: DateTime<Utc>,
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        name: format!("지원자 {id}"),
        phone: phone.to_string(),
        birth_date: None,
        gender: None,
        company_position: "(주)테크스타트업 / 마케팅팀장".to_string(),
        address: None,
        interests: vec!["경제, 경영, 산업 전반".to_string()],
        golf: GolfParticipation::No,
        referrer: None,
        tax_invoice: TaxInvoice::DoNotIssue,
        generation,
        status,
        admin_notes: None,
        reviewer: None,
        submitted_at,
        reviewed_at: None,
    }
}

/// Newest first, matching what repeated submissions would produce.
pub(super) fn seeded_records() -> Vec<Application> {
    let base = submitted_at();
    vec![
        application(
            "4",
            "010-4444-0004",
            3,
            ApplicationStatus::Pending,
            base,
        ),
        application(
            "3",
            "010-3333-0003",
            2,
            ApplicationStatus::Approved,
            base - Duration::days(20),
        ),
        application(
            "2",
            "010-2222-0002",
            2,
            ApplicationStatus::Reviewing,
            base - Duration::days(40),
        ),
        application(
            "1",
            "010-1111-0001",
            2,
            ApplicationStatus::Approved,
            base - Duration::days(41),
        ),
    ]
}

pub(super) fn build_service() -> (
    AdmissionService<InMemoryApplicationRepository>,
    Arc<InMemoryApplicationRepository>,
) {
    let repository = Arc::new(InMemoryApplicationRepository::with_records(
        seeded_records(),
    ));
    let service = AdmissionService::new(repository.clone());
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _id: &ApplicationId,
        _change: &mut dyn FnMut(&mut Application),
    ) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &ApplicationId) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
        .expect("request")
}

pub(super) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
