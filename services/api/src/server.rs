use crate::cli::ServeArgs;
use crate::infra::{open_store, AppState};
use crate::routes::with_admission_routes;
use academy_admissions::admissions::AdmissionService;
use academy_admissions::config::AppConfig;
use academy_admissions::error::AppError;
use academy_admissions::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if args.seed_demo {
        config.store.seed_demo = true;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(open_store(config.store.seed_demo, Utc::now()));
    let admission_service = Arc::new(AdmissionService::new(store.clone()));

    let app = with_admission_routes(admission_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions api ready");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    readiness_flag.store(false, Ordering::Release);
    store.close();
    info!("admissions api stopped");

    served?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "unable to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
