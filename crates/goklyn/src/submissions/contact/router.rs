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

use super::domain::ContactRequest;
use super::repository::ContactRepository;
use super::service::ContactService;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Router exposing the contact endpoints. The list and status-update routes
/// assume an upstream authorization middleware has already run.
pub fn contact_router<S>(service: Arc<ContactService<S>>) -> Router
where
    S: ContactRepository + 'static,
{
    Router::new()
        .route(
            "/api/contact",
            post(submit_handler::<S>).get(list_handler::<S>),
        )
        .route("/api/contact/:id/status", patch(update_status_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContactListQuery {
    status: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusUpdateBody {
    status: Option<String>,
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ContactService<S>>>,
    headers: HeaderMap,
    Json(request): Json<ContactRequest>,
) -> Response
where
    S: ContactRepository + 'static,
{
    let meta = ClientMeta::from_headers(&headers);
    match service.submit(request, meta) {
        Ok(record) => (
            StatusCode::CREATED,
            Json(json!({
                "status": "success",
                "message": "Thank you for contacting us! We will get back to you soon.",
                "data": {
                    "id": record.id,
                    "name": record.name,
                    "email": record.email,
                },
            })),
        )
            .into_response(),
        Err(error) => submission_error(
            error,
            "Failed to submit contact form. Please try again later.",
        ),
    }
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<ContactService<S>>>,
    Query(query): Query<ContactListQuery>,
) -> Response
where
    S: ContactRepository + 'static,
{
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);
    match service.list(query.status.as_deref(), page) {
        Ok((contacts, pagination)) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": {
                    "contacts": contacts,
                    "pagination": pagination,
                },
            })),
        )
            .into_response(),
        Err(error) => submission_error(error, "Failed to retrieve contacts"),
    }
}

pub(crate) async fn update_status_handler<S>(
    State(service): State<Arc<ContactService<S>>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateBody>,
) -> Response
where
    S: ContactRepository + 'static,
{
    match service.update_status(&id, body.status.as_deref().unwrap_or_default()) {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "data": record,
            })),
        )
            .into_response(),
        Err(error) => submission_error(error, "Failed to update contact status"),
    }
}
