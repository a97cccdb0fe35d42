//! Service inquiries: project-request intake with priority derivation, plus
//! administrative listing, status/priority updates, and append-only notes.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Budget, CompanySize, HowDidYouHear, InquiryNote, InquiryRecord, InquiryRequest, InquiryStatus,
    NewInquiry, Priority, ServiceInterest, Timeline,
};
pub use repository::{InquiryChange, InquiryRepository};
pub use router::inquiry_router;
pub use service::{reference_number, InquiryService};
