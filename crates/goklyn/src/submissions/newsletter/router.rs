use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::submissions::envelope::{submission_error, PageRequest};
use crate::submissions::ClientMeta;

use super::domain::{SubscribeRequest, UnsubscribeRequest};
use super::repository::SubscriberRepository;
use super::service::{NewsletterService, SubscribeOutcome};

const DEFAULT_PAGE_SIZE: u32 = 50;

/// Router exposing the newsletter endpoints. The subscriber listing assumes
/// an upstream authorization middleware has already run.
pub fn newsletter_router<S>(service: Arc<NewsletterService<S>>) -> Router
where
    S: SubscriberRepository + 'static,
{
    Router::new()
        .route("/api/newsletter/subscribe", post(subscribe_handler::<S>))
        .route("/api/newsletter/unsubscribe", post(unsubscribe_handler::<S>))
        .route("/api/newsletter/subscribers", get(list_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubscriberListQuery {
    active: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

pub(crate) async fn subscribe_handler<S>(
    State(service): State<Arc<NewsletterService<S>>>,
    headers: HeaderMap,
    Json(request): Json<SubscribeRequest>,
) -> Response
where
    S: SubscriberRepository + 'static,
{
    let meta = ClientMeta::from_headers(&headers);
    match service.subscribe(request, meta) {
        Ok(SubscribeOutcome::Subscribed(_)) => (
            StatusCode::CREATED,
            Json(json!({
                "status": "success",
                "message": "Thank you for subscribing! You will receive our latest updates on quantum computing and AI innovations.",
            })),
        )
            .into_response(),
        Ok(SubscribeOutcome::Reactivated(_)) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Welcome back! Your subscription has been reactivated.",
            })),
        )
            .into_response(),
        Err(error) => submission_error(error, "Failed to subscribe. Please try again later."),
    }
}

pub(crate) async fn unsubscribe_handler<S>(
    State(service): State<Arc<NewsletterService<S>>>,
    Json(request): Json<UnsubscribeRequest>,
) -> Response
where
    S: SubscriberRepository + 'static,
{
    match service.unsubscribe(request) {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "You have been successfully unsubscribed. We're sorry to see you go!",
            })),
        )
            .into_response(),
        Err(error) => submission_error(error, "Failed to unsubscribe. Please try again later."),
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<NewsletterService<S>>>,
    Query(query): Query<SubscriberListQuery>,
) -> Response
where
    S: SubscriberRepository + 'static,
{
    // Mirrors the query contract: only the literal "true" selects actives.
    let active = query.active.as_deref().map(|raw| raw == "true");
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);

    match service.list(active, page) {
        Ok(listing) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {
                    "subscribers": listing.subscribers,
                    "stats": listing.stats,
                    "pagination": listing.pagination,
                },
            })),
        )
            .into_response(),
        Err(error) => submission_error(error, "Failed to retrieve subscribers"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submissions::testing::{post_json, read_json_body, MemorySubscriberStore};
    use tower::ServiceExt;

    fn router() -> Router {
        newsletter_router(Arc::new(NewsletterService::new(Arc::new(
            MemorySubscriberStore::default(),
        ))))
    }

    #[tokio::test]
    async fn subscribe_lifecycle_round_trip() {
        let router = router();
        let subscribe = json!({ "email": "a@b.com" });

        // First subscribe creates.
        let response = router
            .clone()
            .oneshot(post_json("/api/newsletter/subscribe", &subscribe))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);

        // Repeat while active conflicts.
        let response = router
            .clone()
            .oneshot(post_json("/api/newsletter/subscribe", &subscribe))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json_body(response).await;
        assert_eq!(body["message"], "This email is already subscribed to our newsletter.");

        // Unsubscribe deactivates.
        let response = router
            .clone()
            .oneshot(post_json("/api/newsletter/unsubscribe", &subscribe))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        // Subscribing again reactivates with the welcome-back copy.
        let response = router
            .clone()
            .oneshot(post_json("/api/newsletter/subscribe", &subscribe))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(
            body["message"],
            "Welcome back! Your subscription has been reactivated."
        );
    }

    #[tokio::test]
    async fn unsubscribe_errors_map_to_the_envelope() {
        let router = router();

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/newsletter/unsubscribe",
                &json!({ "email": "ghost@example.com" }),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json_body(response).await;
        assert_eq!(body["message"], "Email not found in our subscription list.");

        let response = router
            .oneshot(post_json("/api/newsletter/unsubscribe", &json!({})))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json_body(response).await;
        assert_eq!(body["message"], "Email is required");
    }

    #[tokio::test]
    async fn listing_reports_stats_and_hides_metadata() {
        let router = router();
        for email in ["a@b.com", "c@d.com"] {
            let response = router
                .clone()
                .oneshot(post_json(
                    "/api/newsletter/subscribe",
                    &json!({ "email": email }),
                ))
                .await
                .expect("route executes");
            assert_eq!(response.status(), StatusCode::CREATED);
        }
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/newsletter/unsubscribe",
                &json!({ "email": "a@b.com" }),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                axum::http::Request::get("/api/newsletter/subscribers")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["data"]["stats"]["total"], 2);
        assert_eq!(body["data"]["stats"]["active"], 1);
        assert_eq!(body["data"]["stats"]["inactive"], 1);
        assert!(body["data"]["subscribers"][0].get("ipAddress").is_none());
        assert!(body["data"]["subscribers"][0].get("userAgent").is_none());
    }
}
