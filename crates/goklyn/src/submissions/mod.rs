//! The three public intake pipelines and their shared plumbing.
//!
//! Each resource follows the same shape: a `domain` module with the record
//! types and the authoritative field vocabularies, a `repository` trait the
//! binary implements against its store, a `service` orchestrating
//! validate → derive → persist, and an axum `router` translating service
//! results into the response envelope.

pub mod contact;
pub mod envelope;
pub mod inquiry;
pub mod newsletter;
pub(crate) mod validate;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::atomic::{AtomicU64, Ordering};

use axum::http::{header, HeaderMap};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use envelope::FieldError;

/// Declares a closed string vocabulary as an enum with a single authoritative
/// label set. `label`/`parse` drive both serde and request validation, so the
/// allowed values cannot drift between the two layers.
macro_rules! str_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                $name::parse(&raw)
                    .ok_or_else(|| ::serde::de::Error::unknown_variant(&raw, &[$($label),+]))
            }
        }
    };
}

pub(crate) use str_enum;

/// Identifier assigned to every persisted submission record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

static RECORD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Mint a 24-character hex identifier from the creation time and a process
/// sequence, matching the shape of the persisted document ids.
pub(crate) fn next_record_id() -> RecordId {
    let seq = RECORD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let secs = Utc::now().timestamp().max(0) as u64;
    RecordId(format!("{secs:08x}{seq:016x}"))
}

/// Network origin and client header captured as opaque metadata on
/// submissions. Never validated, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip_address = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self {
            ip_address,
            user_agent,
        }
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Failures raised by the submission services, translated into the response
/// envelope by the routers.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Malformed input; enumerates every failing field, not just the first.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// Single out-of-range value on an administrative update.
    #[error("{0}")]
    Invalid(&'static str),
    /// Operation is not legal given the record's current state.
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
