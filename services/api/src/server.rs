use crate::cli::ServeArgs;
use crate::infra::{load_policy, AppState};
use crate::routes::with_payout_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use incentive_engine::config::AppConfig;
use incentive_engine::error::AppError;
use incentive_engine::payouts::{GroqNarrator, PayoutService};
use incentive_engine::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let policy = load_policy(None, &config.policy)?;
    if config.narrative.api_key.is_none() {
        warn!("GROQ_API_KEY not set; audits will use the fallback narrative");
    }
    let narrator = Arc::new(GroqNarrator::new(config.narrative.clone()));
    let payout_service = Arc::new(PayoutService::new(policy, narrator));

    let app = with_payout_routes(payout_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "incentive payout service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
