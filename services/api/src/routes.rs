use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{SecondsFormat, Utc};
use goklyn::submissions::contact::{contact_router, ContactRepository, ContactService};
use goklyn::submissions::envelope;
use goklyn::submissions::inquiry::{inquiry_router, InquiryRepository, InquiryService};
use goklyn::submissions::newsletter::{newsletter_router, NewsletterService, SubscriberRepository};
use serde_json::json;

use crate::infra::AppState;

/// Full application surface: the three submission routers plus the
/// operational endpoints and the JSON 404 fallback.
pub(crate) fn app_router<C, I, N>(
    contacts: Arc<ContactService<C>>,
    inquiries: Arc<InquiryService<I>>,
    newsletter: Arc<NewsletterService<N>>,
) -> Router
where
    C: ContactRepository + 'static,
    I: InquiryRepository + 'static,
    N: SubscriberRepository + 'static,
{
    Router::new()
        .merge(contact_router(contacts))
        .merge(inquiry_router(inquiries))
        .merge(newsletter_router(newsletter))
        .route("/", get(index))
        .route("/api/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(unknown_route)
}

pub(crate) async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "name": "GOKLYN Technologies API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Quantum Computing & AI Solutions",
        "endpoints": {
            "health": "/api/health",
            "contact": "/api/contact",
            "inquiry": "/api/inquiry",
            "newsletter": "/api/newsletter",
        },
    }))
}

pub(crate) async fn healthcheck(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": "GOKLYN API Server is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "environment": state.environment,
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn unknown_route() -> Response {
    envelope::not_found("Route not found")
}
