use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use logz_quiz::config::AppConfig;
use logz_quiz::error::AppError;
use logz_quiz::report::{ConfiguredMailer, ReportDispatcher};
use logz_quiz::telemetry;
use std::sync::atomic::Ordering;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let mailer = Arc::new(ConfiguredMailer::from_config(&config.mail)?);
    if let ConfiguredMailer::Unconfigured(reason) = mailer.as_ref() {
        warn!(%reason, "mail transport not configured; report sends will fail");
    }
    let dispatcher = Arc::new(ReportDispatcher::new(
        mailer,
        config.mail.internal_recipients.clone(),
    ));

    let app = with_report_routes(dispatcher)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        internal_recipients = config.mail.internal_recipients.len(),
        "diagnostic report service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
