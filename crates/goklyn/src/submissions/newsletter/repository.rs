use crate::submissions::envelope::PageRequest;
use crate::submissions::RepositoryError;

use super::domain::SubscriberRecord;

/// Storage abstraction for newsletter subscribers.
///
/// The store is the sole arbiter of email uniqueness: `insert` must fail with
/// [`RepositoryError::Conflict`] when a record already carries the email, so
/// two concurrent first-time subscriptions cannot both succeed. No
/// application-level locking exists above this trait.
pub trait SubscriberRepository: Send + Sync {
    fn insert(&self, record: SubscriberRecord) -> Result<SubscriberRecord, RepositoryError>;

    fn find_by_email(&self, email: &str) -> Result<Option<SubscriberRecord>, RepositoryError>;

    /// Replace the record with the same id.
    fn update(&self, record: SubscriberRecord) -> Result<(), RepositoryError>;

    fn list(
        &self,
        active: Option<bool>,
        page: &PageRequest,
    ) -> Result<Vec<SubscriberRecord>, RepositoryError>;

    fn count(&self, active: Option<bool>) -> Result<u64, RepositoryError>;
}
