use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssignmentLedger, InMemoryMemberDirectory};
use crate::routes::with_roster_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use duty_roster::config::AppConfig;
use duty_roster::error::AppError;
use duty_roster::telemetry;
use duty_roster::workflows::roster::RosterService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryMemberDirectory::default());
    let ledger = Arc::new(InMemoryAssignmentLedger::default());
    let roster_service = Arc::new(RosterService::new(
        directory.clone(),
        ledger,
        config.scheduling.clone(),
    ));

    let app = with_roster_routes(roster_service)
        .layer(Extension(app_state))
        .layer(Extension(directory))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "duty roster service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
