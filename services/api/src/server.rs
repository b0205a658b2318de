use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCompanyHistory, InMemoryOtpStore};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobzoid::auth::{LogMailSender, OtpService};
use jobzoid::config::AppConfig;
use jobzoid::error::AppError;
use jobzoid::risk::{ConstantAuthenticity, RiskEngine, ScoringWeights};
use jobzoid::telemetry;
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

    let otp_store = Arc::new(InMemoryOtpStore::default());
    let mail = Arc::new(LogMailSender);
    let otp_service = Arc::new(OtpService::new(
        otp_store,
        mail,
        config.auth.otp_ttl_secs,
    ));

    let engine = Arc::new(RiskEngine::new(
        Arc::new(ConstantAuthenticity::default()),
        Arc::new(InMemoryCompanyHistory::seeded()),
        ScoringWeights::default(),
    ));

    let app = app_router(otp_service, engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "applicant risk scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
