use academy_admissions::admissions::{
    Application, ApplicationId, ApplicationStatus, GolfParticipation,
    InMemoryApplicationRepository, TaxInvoice,
};
use chrono::{DateTime, Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Open the application store, optionally preloaded with the demonstration records.
pub(crate) fn open_store(seed_demo: bool, now: DateTime<Utc>) -> InMemoryApplicationRepository {
    if seed_demo {
        let records = demo_applications(now);
        info!(records = records.len(), "application store opened with demo records");
        InMemoryApplicationRepository::with_records(records)
    } else {
        info!("application store opened");
        InMemoryApplicationRepository::open()
    }
}

/// Two second-generation applicants, newest first.
pub(crate) fn demo_applications(now: DateTime<Utc>) -> Vec<Application> {
    vec![
        Application {
            id: ApplicationId("1".to_string()),
            name: "김민수".to_string(),
            phone: "010-1234-5678".to_string(),
            birth_date: None,
            gender: None,
            company_position: "(주)테크스타트업 / 마케팅팀장".to_string(),
            address: None,
            interests: vec!["경제, 경영, 산업 전반".to_string()],
            golf: GolfParticipation::Yes,
            referrer: None,
            tax_invoice: TaxInvoice::Issue,
            generation: 2,
            status: ApplicationStatus::Approved,
            admin_notes: None,
            reviewer: None,
            submitted_at: now,
            reviewed_at: None,
        },
        Application {
            id: ApplicationId("2".to_string()),
            name: "이지영".to_string(),
            phone: "010-2345-6789".to_string(),
            birth_date: None,
            gender: None,
            company_position: "(주)IT기업 / 프로덕트 매니저".to_string(),
            address: None,
            interests: vec![
                "미래기술 (AI, 챗GPT)".to_string(),
                "경제, 경영, 산업 전반".to_string(),
            ],
            golf: GolfParticipation::No,
            referrer: None,
            tax_invoice: TaxInvoice::DoNotIssue,
            generation: 2,
            status: ApplicationStatus::Reviewing,
            admin_notes: None,
            reviewer: None,
            submitted_at: now - Duration::days(1),
            reviewed_at: None,
        },
    ]
}
