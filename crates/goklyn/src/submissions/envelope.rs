//! Response envelope shared by every endpoint: `status: success|error`, a
//! human-readable `message` on errors, field-level `errors[]` on validation
//! failures, and the `{current, pages, total}` pagination block on listings.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::SubmissionError;

/// One failing field in a validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Normalized page/limit pair parsed from query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).max(1),
        }
    }

    /// Number of records preceding this page.
    pub fn skip(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

/// Pagination block attached to every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: u32,
    pub pages: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(request: &PageRequest, total: u64) -> Self {
        Self {
            current: request.page,
            pages: total.div_ceil(request.limit as u64) as u32,
            total,
        }
    }
}

pub fn validation_failed(errors: Vec<FieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": "error",
            "message": "Validation failed",
            "errors": errors,
        })),
    )
        .into_response()
}

pub fn bad_request(message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, message)
}

pub fn not_found(message: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, message)
}

pub fn internal_error(message: &str) -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "status": "error",
            "message": message,
        })),
    )
        .into_response()
}

/// Map a service failure onto the envelope. `failure_message` is the generic
/// text for persistence failures; the underlying detail stays in the logs.
pub fn submission_error(error: SubmissionError, failure_message: &str) -> Response {
    match error {
        SubmissionError::Validation(errors) => validation_failed(errors),
        SubmissionError::Invalid(message) | SubmissionError::Conflict(message) => {
            bad_request(message)
        }
        SubmissionError::NotFound(message) => not_found(message),
        SubmissionError::Repository(source) => {
            tracing::error!(error = %source, "persistence failure");
            internal_error(failure_message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_pages_up() {
        let request = PageRequest::new(Some(2), Some(20), 20);
        let pagination = Pagination::new(&request, 45);
        assert_eq!(pagination.current, 2);
        assert_eq!(pagination.pages, 3);
        assert_eq!(pagination.total, 45);
    }

    #[test]
    fn pagination_handles_empty_sets() {
        let request = PageRequest::new(None, None, 20);
        let pagination = Pagination::new(&request, 0);
        assert_eq!(pagination.pages, 0);
        assert_eq!(pagination.total, 0);
    }

    #[test]
    fn page_request_clamps_zero_values() {
        let request = PageRequest::new(Some(0), Some(0), 20);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 1);
        assert_eq!(request.skip(), 0);
    }

    #[test]
    fn skip_accounts_for_prior_pages() {
        let request = PageRequest::new(Some(3), Some(10), 20);
        assert_eq!(request.skip(), 20);
    }
}
