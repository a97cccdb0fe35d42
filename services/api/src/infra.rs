use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use goklyn::submissions::contact::{ContactRecord, ContactRepository, ContactStatus};
use goklyn::submissions::envelope::PageRequest;
use goklyn::submissions::inquiry::{InquiryChange, InquiryRecord, InquiryRepository, InquiryStatus, Priority};
use goklyn::submissions::newsletter::{SubscriberRecord, SubscriberRepository};
use goklyn::submissions::{RecordId, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) environment: &'static str,
}

fn page_of<T: Clone>(records: impl Iterator<Item = T>, page: &PageRequest) -> Vec<T> {
    records.skip(page.skip()).take(page.limit as usize).collect()
}

/// Vec-backed contact store. Insertion order is creation order, so listings
/// iterate in reverse for newest-first.
#[derive(Default, Clone)]
pub(crate) struct InMemoryContactStore {
    records: Arc<Mutex<Vec<ContactRecord>>>,
}

impl ContactRepository for InMemoryContactStore {
    fn insert(&self, record: ContactRecord) -> Result<ContactRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn list(
        &self,
        status: Option<ContactStatus>,
        page: &PageRequest,
    ) -> Result<Vec<ContactRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
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
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
pub(crate) struct InMemoryInquiryStore {
    records: Arc<Mutex<Vec<InquiryRecord>>>,
}

impl InquiryRepository for InMemoryInquiryStore {
    fn insert(&self, record: InquiryRecord) -> Result<InquiryRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn list(
        &self,
        status: Option<InquiryStatus>,
        priority: Option<Priority>,
        page: &PageRequest,
    ) -> Result<Vec<InquiryRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
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
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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

/// Vec-backed subscriber store. Enforces the unique-email constraint the
/// subscription state machine relies on.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubscriberStore {
    records: Arc<Mutex<Vec<SubscriberRecord>>>,
}

impl SubscriberRepository for InMemorySubscriberStore {
    fn insert(&self, record: SubscriberRecord) -> Result<SubscriberRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.email == record.email) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<SubscriberRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| record.email == email).cloned())
    }

    fn update(&self, record: SubscriberRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| active.is_none_or(|wanted| record.is_active == wanted))
            .count() as u64)
    }
}
