//! Form-submission backend for the GOKLYN marketing site.
//!
//! The [`submissions`] module holds the three public intake pipelines
//! (contact messages, service inquiries, newsletter subscriptions) along with
//! the shared validation and response-envelope plumbing. Configuration and
//! telemetry live alongside so the API binary only has to wire repositories
//! and serve.

pub mod config;
pub mod error;
pub mod submissions;
pub mod telemetry;
