use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::submissions::envelope::{submission_error, PageRequest};
use crate::submissions::ClientMeta;

use super::domain::InquiryRequest;
use super::repository::InquiryRepository;
use super::service::{reference_number, InquiryService};

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Router exposing the inquiry endpoints. List and update assume an upstream
/// authorization middleware has already run.
pub fn inquiry_router<S>(service: Arc<InquiryService<S>>) -> Router
where
    S: InquiryRepository + 'static,
{
    Router::new()
        .route(
            "/api/inquiry",
            post(submit_handler::<S>).get(list_handler::<S>),
        )
        .route("/api/inquiry/:id", patch(update_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InquiryListQuery {
    status: Option<String>,
    priority: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InquiryUpdateBody {
    status: Option<String>,
    priority: Option<String>,
    note: Option<String>,
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<InquiryService<S>>>,
    headers: HeaderMap,
    Json(request): Json<InquiryRequest>,
) -> Response
where
    S: InquiryRepository + 'static,
{
    let meta = ClientMeta::from_headers(&headers);
    match service.submit(request, meta) {
        Ok(record) => {
            let reference = reference_number(&record.id);
            (
                StatusCode::CREATED,
                Json(json!({
                    "status": "success",
                    "message": "Thank you for your inquiry! Our team will review your project and get back to you within 24-48 hours.",
                    "data": {
                        "id": record.id,
                        "referenceNumber": reference,
                    },
                })),
            )
                .into_response()
        }
        Err(error) => {
            submission_error(error, "Failed to submit inquiry. Please try again later.")
        }
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<InquiryService<S>>>,
    Query(query): Query<InquiryListQuery>,
) -> Response
where
    S: InquiryRepository + 'static,
{
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);
    match service.list(query.status.as_deref(), query.priority.as_deref(), page) {
        Ok((inquiries, pagination)) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {
                    "inquiries": inquiries,
                    "pagination": pagination,
                },
            })),
        )
            .into_response(),
        Err(error) => submission_error(error, "Failed to retrieve inquiries"),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<InquiryService<S>>>,
    Path(id): Path<String>,
    Json(body): Json<InquiryUpdateBody>,
) -> Response
where
    S: InquiryRepository + 'static,
{
    match service.update(
        &id,
        body.status.as_deref(),
        body.priority.as_deref(),
        body.note.as_deref(),
    ) {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": record,
            })),
        )
            .into_response(),
        Err(error) => submission_error(error, "Failed to update inquiry"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submissions::testing::{post_json, read_json_body, MemoryInquiryStore};
    use tower::ServiceExt;

    fn router() -> Router {
        inquiry_router(Arc::new(InquiryService::new(Arc::new(
            MemoryInquiryStore::default(),
        ))))
    }

    fn payload() -> serde_json::Value {
        json!({
            "fullName": "Margaret Hamilton",
            "email": "margaret@example.com",
            "serviceInterests": ["consulting"],
            "projectDescription": "We need a fault-tolerant flight software review.",
            "budget": "500k+",
            "timeline": "urgent",
        })
    }

    #[tokio::test]
    async fn submit_returns_reference_number() {
        let response = router()
            .oneshot(post_json("/api/inquiry", &payload()))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json_body(response).await;
        let id = body["data"]["id"].as_str().expect("id echoed");
        let reference = body["data"]["referenceNumber"].as_str().expect("reference");
        assert_eq!(
            reference,
            format!("GOK-{}", id[id.len() - 8..].to_uppercase())
        );
    }

    #[tokio::test]
    async fn submit_rejects_missing_interests() {
        let mut bad = payload();
        bad["serviceInterests"] = json!([]);

        let response = router()
            .oneshot(post_json("/api/inquiry", &bad))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json_body(response).await;
        assert_eq!(body["errors"][0]["field"], "serviceInterests");
    }

    #[tokio::test]
    async fn list_filters_by_priority() {
        let router = router();
        router
            .clone()
            .oneshot(post_json("/api/inquiry", &payload()))
            .await
            .expect("submit executes");

        let response = router
            .oneshot(
                axum::http::Request::get("/api/inquiry?priority=high&status=pending")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("list executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["data"]["inquiries"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["data"]["inquiries"][0]["priority"], "high");
    }

    #[tokio::test]
    async fn update_unknown_inquiry_is_not_found() {
        let response = router()
            .oneshot(
                axum::http::Request::patch("/api/inquiry/ffffffffffffffffffffffff")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&json!({ "status": "reviewing" })).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json_body(response).await;
        assert_eq!(body["message"], "Inquiry not found");
    }
}
