use crate::submissions::envelope::PageRequest;
use crate::submissions::{RecordId, RepositoryError};

use super::domain::{ContactRecord, ContactStatus};

/// Storage abstraction for contact submissions. Implementations must return
/// listings newest-first and refresh `updated_at` on mutation.
pub trait ContactRepository: Send + Sync {
    fn insert(&self, record: ContactRecord) -> Result<ContactRecord, RepositoryError>;

    fn list(
        &self,
        status: Option<ContactStatus>,
        page: &PageRequest,
    ) -> Result<Vec<ContactRecord>, RepositoryError>;

    fn count(&self, status: Option<ContactStatus>) -> Result<u64, RepositoryError>;

    /// Overwrite the status of the matching record, last write wins. `None`
    /// when no record carries the identifier.
    fn set_status(
        &self,
        id: &RecordId,
        status: ContactStatus,
    ) -> Result<Option<ContactRecord>, RepositoryError>;
}
