use crate::submissions::envelope::PageRequest;
use crate::submissions::{RecordId, RepositoryError};

use super::domain::{InquiryNote, InquiryRecord, InquiryStatus, Priority};

/// Partial administrative update. Status and priority overwrite last-write-
/// wins; a note is appended, never edited or removed.
#[derive(Debug, Clone, Default)]
pub struct InquiryChange {
    pub status: Option<InquiryStatus>,
    pub priority: Option<Priority>,
    pub note: Option<InquiryNote>,
}

impl InquiryChange {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.note.is_none()
    }
}

/// Storage abstraction for inquiries. Implementations must return listings
/// newest-first and refresh `updated_at` when applying a change.
pub trait InquiryRepository: Send + Sync {
    fn insert(&self, record: InquiryRecord) -> Result<InquiryRecord, RepositoryError>;

    /// Status and priority filters combine with logical AND.
    fn list(
        &self,
        status: Option<InquiryStatus>,
        priority: Option<Priority>,
        page: &PageRequest,
    ) -> Result<Vec<InquiryRecord>, RepositoryError>;

    fn count(
        &self,
        status: Option<InquiryStatus>,
        priority: Option<Priority>,
    ) -> Result<u64, RepositoryError>;

    /// Apply the change to the matching record; `None` when the identifier is
    /// unknown.
    fn apply(
        &self,
        id: &RecordId,
        change: InquiryChange,
    ) -> Result<Option<InquiryRecord>, RepositoryError>;
}
