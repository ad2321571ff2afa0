use crate::cli::ServeArgs;
use crate::infra::{build_desk, AppState};
use crate::routes::with_desk_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use insurance_desk::config::AppConfig;
use insurance_desk::error::AppError;
use insurance_desk::records::{AuditCategory, AuditStatus};
use insurance_desk::telemetry;
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
    if let Some(seed) = args.variant_seed.take() {
        config.affiliate.variant_seed = Some(seed);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let desk = build_desk(&config.affiliate).into_shared();

    let app = with_desk_routes(desk.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    desk.lock().expect("desk mutex poisoned").record_event(
        "System Initialized",
        AuditCategory::System,
        format!("Operations desk listening on {addr}"),
        AuditStatus::Info,
    );
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        seeded_variants = config.affiliate.variant_seed.is_some(),
        "insurance operations desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
