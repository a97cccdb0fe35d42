use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryContactStore, InMemoryInquiryStore, InMemorySubscriberStore};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use goklyn::config::AppConfig;
use goklyn::error::AppError;
use goklyn::submissions::contact::ContactService;
use goklyn::submissions::inquiry::InquiryService;
use goklyn::submissions::newsletter::NewsletterService;
use goklyn::telemetry;
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
        environment: config.environment.label(),
    };

    let contacts = Arc::new(ContactService::new(Arc::new(
        InMemoryContactStore::default(),
    )));
    let inquiries = Arc::new(InquiryService::new(Arc::new(
        InMemoryInquiryStore::default(),
    )));
    let newsletter = Arc::new(NewsletterService::new(Arc::new(
        InMemorySubscriberStore::default(),
    )));

    let app = app_router(contacts, inquiries, newsletter)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(environment = config.environment.label(), %addr, "submission api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
