use std::sync::Arc;

use chrono::Utc;

use crate::submissions::envelope::{PageRequest, Pagination};
use crate::submissions::validate::normalize_email;
use crate::submissions::{next_record_id, ClientMeta, RepositoryError, SubmissionError};

use super::domain::{
    SubscribeRequest, SubscriberRecord, SubscriberSource, SubscriberStats, SubscriberView,
    UnsubscribeRequest,
};
use super::repository::SubscriberRepository;

const ALREADY_SUBSCRIBED: &str = "This email is already subscribed to our newsletter.";
const DEFAULT_UNSUBSCRIBE_REASON: &str = "No reason provided";

/// Distinguishes a first-time subscription from an in-place reactivation so
/// the router can answer 201 vs. 200 with the right copy.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    Subscribed(SubscriberRecord),
    Reactivated(SubscriberRecord),
}

/// Administrative listing page with derived aggregate counts.
#[derive(Debug, Clone)]
pub struct SubscriberListing {
    pub subscribers: Vec<SubscriberView>,
    pub stats: SubscriberStats,
    pub pagination: Pagination,
}

pub struct NewsletterService<S> {
    store: Arc<S>,
}

impl<S> NewsletterService<S>
where
    S: SubscriberRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Per-email state machine: no record → create; inactive → reactivate the
    /// existing record in place; active → conflict, nothing mutates.
    pub fn subscribe(
        &self,
        request: SubscribeRequest,
        meta: ClientMeta,
    ) -> Result<SubscribeOutcome, SubmissionError> {
        let form = request.validate().map_err(SubmissionError::Validation)?;

        if let Some(mut existing) = self.store.find_by_email(&form.email)? {
            if existing.is_active {
                return Err(SubmissionError::Conflict(ALREADY_SUBSCRIBED));
            }

            existing.is_active = true;
            existing.unsubscribed_at = None;
            existing.unsubscribe_reason = None;
            existing.interests = form.interests;
            if let Some(name) = form.name {
                existing.name = Some(name);
            }
            existing.updated_at = Utc::now();

            self.store.update(existing.clone())?;
            return Ok(SubscribeOutcome::Reactivated(existing));
        }

        let now = Utc::now();
        let record = SubscriberRecord {
            id: next_record_id(),
            email: form.email,
            name: form.name,
            interests: form.interests,
            is_active: true,
            confirmed_at: None,
            unsubscribed_at: None,
            unsubscribe_reason: None,
            source: SubscriberSource::Website,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            created_at: now,
            updated_at: now,
        };

        // The store's unique email constraint arbitrates concurrent
        // first-time subscriptions; the loser surfaces as a conflict.
        match self.store.insert(record) {
            Ok(stored) => Ok(SubscribeOutcome::Subscribed(stored)),
            Err(RepositoryError::Conflict) => Err(SubmissionError::Conflict(ALREADY_SUBSCRIBED)),
            Err(other) => Err(other.into()),
        }
    }

    /// active → inactive with reason and timestamp. The record survives;
    /// duplicate unsubscribes and unknown emails are rejected.
    pub fn unsubscribe(
        &self,
        request: UnsubscribeRequest,
    ) -> Result<SubscriberRecord, SubmissionError> {
        let email = normalize_email(&request.email);
        if email.is_empty() {
            return Err(SubmissionError::Invalid("Email is required"));
        }

        let mut subscriber = self
            .store
            .find_by_email(&email)?
            .ok_or(SubmissionError::NotFound(
                "Email not found in our subscription list.",
            ))?;

        if !subscriber.is_active {
            return Err(SubmissionError::Conflict("This email is already unsubscribed."));
        }

        let now = Utc::now();
        subscriber.is_active = false;
        subscriber.unsubscribed_at = Some(now);
        subscriber.unsubscribe_reason = Some(
            request
                .reason
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_UNSUBSCRIBE_REASON)
                .to_string(),
        );
        subscriber.updated_at = now;

        self.store.update(subscriber.clone())?;
        Ok(subscriber)
    }

    pub fn list(
        &self,
        active: Option<bool>,
        page: PageRequest,
    ) -> Result<SubscriberListing, SubmissionError> {
        let subscribers = self
            .store
            .list(active, &page)?
            .iter()
            .map(SubscriberRecord::listing_view)
            .collect();

        let total = self.store.count(active)?;
        let active_count = self.store.count(Some(true))?;

        Ok(SubscriberListing {
            subscribers,
            stats: SubscriberStats {
                total,
                active: active_count,
                inactive: total.saturating_sub(active_count),
            },
            pagination: Pagination::new(&page, total),
        })
    }
}
