//! Newsletter subscriptions: subscribe/unsubscribe state machine keyed by a
//! unique email address, plus the administrative subscriber listing.
//!
//! Subscribe is the one operation here that mutates pre-existing state under
//! a "create" verb: posting an email that previously unsubscribed reactivates
//! the original record in place rather than creating a new one. That is the
//! only path back to active and is relied on by the frontend copy
//! ("Welcome back!").

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    NewsletterInterest, SubscribeRequest, SubscriberRecord, SubscriberSource, SubscriberStats,
    SubscriberView, UnsubscribeRequest,
};
pub use repository::SubscriberRepository;
pub use router::newsletter_router;
pub use service::{NewsletterService, SubscribeOutcome};
