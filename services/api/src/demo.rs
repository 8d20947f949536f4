use crate::infra::open_store;
use academy_admissions::admissions::{
    AdmissionService, AdmissionServiceError, Application, ApplicationPage, ApplicationRepository,
    ApplicationStats, ApplicationSummary, ListQuery, RepositoryError,
};
use academy_admissions::error::AppError;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Generation the walkthrough applicant applies to
    #[arg(long, default_value_t = 3)]
    pub(crate) generation: u16,
    /// Print compact JSON instead of pretty-printed output
    #[arg(long)]
    pub(crate) compact: bool,
}

/// Everything the walkthrough produced, in the order it happened.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DemoReport {
    pub(crate) submitted: ApplicationSummary,
    pub(crate) duplicate_rejected: bool,
    pub(crate) reviewed: Application,
    pub(crate) listing: ApplicationPage,
    pub(crate) stats: ApplicationStats,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(open_store(true, Utc::now()));
    let service = AdmissionService::new(store.clone());

    let report = build_demo_report(&service, args.generation);
    store.close();
    let report = report?;

    let rendered = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn build_demo_report<R>(
    service: &AdmissionService<R>,
    generation: u16,
) -> Result<DemoReport, AppError>
where
    R: ApplicationRepository + 'static,
{
    let payload = json!({
        "name": "박서준",
        "phone": "010-5555-0101",
        "gender": "남",
        "companyPosition": "(주)한빛물산 / 대표이사",
        "interests": ["리더십", "미래기술 (AI, 챗GPT)"],
        "golf": "Yes",
        "referrer": "김민수",
        "taxInvoice": "발행",
        "generation": generation,
    });

    let submitted = service.submit(&payload)?;

    let duplicate_rejected = match service.submit(&payload) {
        Err(AdmissionServiceError::Repository(RepositoryError::Conflict)) => true,
        Err(other) => return Err(other.into()),
        Ok(_) => false,
    };

    let reviewed = service.update_status(
        &submitted.id,
        &json!({
            "status": "REVIEWING",
            "adminNotes": "서류 검토 중",
            "reviewedBy": "demo-admin",
        }),
    )?;

    let listing = service.list(&ListQuery::default())?;
    let stats = service.stats()?;

    Ok(DemoReport {
        submitted: submitted.summary(),
        duplicate_rejected,
        reviewed,
        listing,
        stats,
    })
}
