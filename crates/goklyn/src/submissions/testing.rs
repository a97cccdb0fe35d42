//! In-memory repositories and request helpers shared by the module tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use super::contact::domain::{ContactRecord, ContactStatus};
use super::contact::repository::ContactRepository;
use super::envelope::PageRequest;
use super::inquiry::domain::{InquiryRecord, InquiryStatus, Priority};
use super::inquiry::repository::{InquiryChange, InquiryRepository};
use super::newsletter::domain::SubscriberRecord;
use super::newsletter::repository::SubscriberRepository;
use super::{RecordId, RepositoryError};

fn page_of<T: Clone>(records: impl Iterator<Item = T>, page: &PageRequest) -> Vec<T> {
    records.skip(page.skip()).take(page.limit as usize).collect()
}

#[derive(Default, Clone)]
pub(crate) struct MemoryContactStore {
    records: Arc<Mutex<Vec<ContactRecord>>>,
}

impl MemoryContactStore {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl ContactRepository for MemoryContactStore {
    fn insert(&self, record: ContactRecord) -> Result<ContactRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn list(
        &self,
        status: Option<ContactStatus>,
        page: &PageRequest,
    ) -> Result<Vec<ContactRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        // Insertion order is creation order; reverse for newest-first.
        Ok(page_of(
            guard
                .iter()
                .rev()
                .filter(|record| status.is_none_or(|wanted| record.status == wanted))
                .cloned(),
            page,
        ))
    }

    fn count(&self, status: Option<ContactStatus>) -> Result<u64, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| status.is_none_or(|wanted| record.status == wanted))
            .count() as u64)
    }

    fn set_status(
        &self,
        id: &RecordId,
        status: ContactStatus,
    ) -> Result<Option<ContactRecord>, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        match guard.iter_mut().find(|record| &record.id == id) {
            Some(record) => {
                record.status = status;
                record.updated_at = Utc::now();
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryInquiryStore {
    records: Arc<Mutex<Vec<InquiryRecord>>>,
}

impl InquiryRepository for MemoryInquiryStore {
    fn insert(&self, record: InquiryRecord) -> Result<InquiryRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn list(
        &self,
        status: Option<InquiryStatus>,
        priority: Option<Priority>,
        page: &PageRequest,
    ) -> Result<Vec<InquiryRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(page_of(
            guard
                .iter()
                .rev()
                .filter(|record| {
                    status.is_none_or(|wanted| record.status == wanted)
                        && priority.is_none_or(|wanted| record.priority == wanted)
                })
                .cloned(),
            page,
        ))
    }

    fn count(
        &self,
        status: Option<InquiryStatus>,
        priority: Option<Priority>,
    ) -> Result<u64, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| {
                status.is_none_or(|wanted| record.status == wanted)
                    && priority.is_none_or(|wanted| record.priority == wanted)
            })
            .count() as u64)
    }

    fn apply(
        &self,
        id: &RecordId,
        change: InquiryChange,
    ) -> Result<Option<InquiryRecord>, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        match guard.iter_mut().find(|record| &record.id == id) {
            Some(record) => {
                if let Some(status) = change.status {
                    record.status = status;
                }
                if let Some(priority) = change.priority {
                    record.priority = priority;
                }
                if let Some(note) = change.note {
                    record.notes.push(note);
                }
                record.updated_at = Utc::now();
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemorySubscriberStore {
    records: Arc<Mutex<Vec<SubscriberRecord>>>,
}

impl MemorySubscriberStore {
    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl SubscriberRepository for MemorySubscriberStore {
    fn insert(&self, record: SubscriberRecord) -> Result<SubscriberRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.iter().any(|existing| existing.email == record.email) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<SubscriberRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| record.email == email).cloned())
    }

    fn update(&self, record: SubscriberRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn list(
        &self,
        active: Option<bool>,
        page: &PageRequest,
    ) -> Result<Vec<SubscriberRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(page_of(
            guard
                .iter()
                .rev()
                .filter(|record| active.is_none_or(|wanted| record.is_active == wanted))
                .cloned(),
            page,
        ))
    }

    fn count(&self, active: Option<bool>) -> Result<u64, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| active.is_none_or(|wanted| record.is_active == wanted))
            .count() as u64)
    }
}

pub(crate) fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("payload serializes")))
        .expect("request builds")
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
