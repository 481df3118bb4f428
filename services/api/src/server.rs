use crate::cli::ServeArgs;
use crate::infra::{build_analyzer, AppState, SessionRegistry};
use crate::routes::with_clarity_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clarity::config::AppConfig;
use clarity::error::AppError;
use clarity::telemetry;
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

    let analyzer = build_analyzer(&config)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        analyzer: Arc::new(analyzer),
        sessions: Arc::new(SessionRegistry::new(&config.sessions)),
    };

    let app = with_clarity_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        feedback_url = %config.remote.feedback_url,
        prediction_url = %config.remote.prediction_url,
        max_sessions = config.sessions.max_sessions,
        "pay comparison service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
