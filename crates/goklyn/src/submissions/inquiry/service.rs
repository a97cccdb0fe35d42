use std::sync::Arc;

use chrono::Utc;

use crate::submissions::envelope::{PageRequest, Pagination};
use crate::submissions::{next_record_id, ClientMeta, RecordId, SubmissionError};

use super::domain::{
    Budget, InquiryNote, InquiryRecord, InquiryRequest, InquiryStatus, Priority, Timeline,
};
use super::repository::{InquiryChange, InquiryRepository};

/// Reference codes handed back to submitters, e.g. `GOK-00ABCDEF`.
const REFERENCE_PREFIX: &str = "GOK-";

/// Notes are stamped with a fixed administrative actor.
// TODO: thread the authenticated admin identity through once the auth
// middleware in front of these routes supplies one.
const ADMIN_ACTOR: &str = "admin";

/// Human-readable reference code: fixed prefix plus the last eight characters
/// of the record identifier, upper-cased.
pub fn reference_number(id: &RecordId) -> String {
    let raw = id.0.as_str();
    let tail = &raw[raw.len().saturating_sub(8)..];
    format!("{REFERENCE_PREFIX}{}", tail.to_uppercase())
}

/// Large budgets outrank urgent timelines; the ordering of these two checks
/// is load-bearing for how the sales team triages.
fn derive_priority(budget: Budget, timeline: Timeline) -> Priority {
    if matches!(budget, Budget::From100kTo500k | Budget::Over500k) {
        Priority::High
    } else if timeline == Timeline::Urgent {
        Priority::Urgent
    } else {
        Priority::Medium
    }
}

pub struct InquiryService<S> {
    store: Arc<S>,
}

impl<S> InquiryService<S>
where
    S: InquiryRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate, derive priority, and persist a new inquiry.
    pub fn submit(
        &self,
        request: InquiryRequest,
        meta: ClientMeta,
    ) -> Result<InquiryRecord, SubmissionError> {
        let form = request.validate().map_err(SubmissionError::Validation)?;

        let priority = derive_priority(form.budget, form.timeline);
        let now = Utc::now();
        let record = InquiryRecord {
            id: next_record_id(),
            full_name: form.full_name,
            email: form.email,
            phone: form.phone,
            company: form.company,
            company_size: form.company_size,
            service_interests: form.service_interests,
            project_description: form.project_description,
            budget: form.budget,
            timeline: form.timeline,
            how_did_you_hear: form.how_did_you_hear,
            status: InquiryStatus::Pending,
            priority,
            notes: Vec::new(),
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
        priority: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<InquiryRecord>, Pagination), SubmissionError> {
        let status_filter = match status {
            None => None,
            Some(raw) => match InquiryStatus::parse(raw) {
                Some(parsed) => Some(parsed),
                // Unknown filter values match no records.
                None => return Ok((Vec::new(), Pagination::new(&page, 0))),
            },
        };
        let priority_filter = match priority {
            None => None,
            Some(raw) => match Priority::parse(raw) {
                Some(parsed) => Some(parsed),
                None => return Ok((Vec::new(), Pagination::new(&page, 0))),
            },
        };

        let records = self.store.list(status_filter, priority_filter, &page)?;
        let total = self.store.count(status_filter, priority_filter)?;
        Ok((records, Pagination::new(&page, total)))
    }

    /// Apply any subset of status overwrite, priority overwrite, and note
    /// append to an existing inquiry.
    pub fn update(
        &self,
        id: &str,
        status: Option<&str>,
        priority: Option<&str>,
        note: Option<&str>,
    ) -> Result<InquiryRecord, SubmissionError> {
        let mut change = InquiryChange::default();

        if let Some(raw) = status {
            change.status = Some(
                InquiryStatus::parse(raw).ok_or(SubmissionError::Invalid("Invalid status value"))?,
            );
        }
        if let Some(raw) = priority {
            change.priority = Some(
                Priority::parse(raw).ok_or(SubmissionError::Invalid("Invalid priority value"))?,
            );
        }
        if let Some(content) = note.map(str::trim).filter(|value| !value.is_empty()) {
            change.note = Some(InquiryNote {
                content: content.to_string(),
                added_by: ADMIN_ACTOR.to_string(),
                added_at: Utc::now(),
            });
        }

        self.store
            .apply(&RecordId(id.to_string()), change)?
            .ok_or(SubmissionError::NotFound("Inquiry not found"))
    }
}
