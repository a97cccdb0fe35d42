//! Contact-form submissions: public intake plus administrative listing and
//! status updates.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{ContactRecord, ContactRequest, ContactStatus, ContactSubject, NewContact};
pub use repository::ContactRepository;
pub use router::contact_router;
pub use service::ContactService;
