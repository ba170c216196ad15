use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryContractRepository};
use crate::routes::with_trust_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use myjanji::config::AppConfig;
use myjanji::contracts::{TrustModel, TrustService};
use myjanji::error::AppError;
use myjanji::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = InMemoryContractRepository::default();
    if let Some(path) = config.ledger.contracts_csv.as_deref() {
        repository.seed_from_path(path)?;
    }
    let contracts = repository.len();
    let service = Arc::new(TrustService::new(
        Arc::new(repository),
        TrustModel::standard(),
    ));

    let app = with_trust_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, contracts, "trust service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
