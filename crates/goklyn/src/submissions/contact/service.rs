use std::sync::Arc;

use chrono::Utc;

use crate::submissions::envelope::{PageRequest, Pagination};
use crate::submissions::{next_record_id, ClientMeta, RecordId, SubmissionError};

use super::domain::{ContactRecord, ContactRequest, ContactStatus};
use super::repository::ContactRepository;

/// Orchestrates validate → persist for public submissions and the
/// administrative list/update operations.
pub struct ContactService<S> {
    store: Arc<S>,
}

impl<S> ContactService<S>
where
    S: ContactRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a new submission. Status is always `new` on creation; clients
    /// cannot set it.
    pub fn submit(
        &self,
        request: ContactRequest,
        meta: ClientMeta,
    ) -> Result<ContactRecord, SubmissionError> {
        let form = request.validate().map_err(SubmissionError::Validation)?;

        let now = Utc::now();
        let record = ContactRecord {
            id: next_record_id(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            company: form.company,
            subject: form.subject,
            message: form.message,
            status: ContactStatus::New,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            created_at: now,
            updated_at: now,
        };

        Ok(self.store.insert(record)?)
    }

    pub fn list(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<ContactRecord>, Pagination), SubmissionError> {
        let filter = match status {
            None => None,
            Some(raw) => match ContactStatus::parse(raw) {
                Some(parsed) => Some(parsed),
                // Unknown status values match no records.
                None => return Ok((Vec::new(), Pagination::new(&page, 0))),
            },
        };

        let records = self.store.list(filter, &page)?;
        let total = self.store.count(filter)?;
        Ok((records, Pagination::new(&page, total)))
    }

    pub fn update_status(&self, id: &str, status: &str) -> Result<ContactRecord, SubmissionError> {
        let status =
            ContactStatus::parse(status).ok_or(SubmissionError::Invalid("Invalid status value"))?;

        self.store
            .set_status(&RecordId(id.to_string()), status)?
            .ok_or(SubmissionError::NotFound("Contact not found"))
    }
}
