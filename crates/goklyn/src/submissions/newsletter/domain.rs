use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::submissions::envelope::FieldError;
use crate::submissions::str_enum;
use crate::submissions::validate::{
    is_valid_email, length_within, normalize_email, ValidationReport,
};
use crate::submissions::RecordId;

str_enum! {
    /// Topics a subscriber can opt into.
    pub enum NewsletterInterest {
        QuantumComputing => "quantum-computing",
        ArtificialIntelligence => "artificial-intelligence",
        Cybersecurity => "cybersecurity",
        TechnologyTrends => "technology-trends",
        CompanyUpdates => "company-updates",
        Events => "events",
        All => "all",
    }
}

str_enum! {
    /// Where the subscription was collected.
    pub enum SubscriberSource {
        Website => "website",
        LandingPage => "landing-page",
        Event => "event",
        Partner => "partner",
        Other => "other",
    }
}

impl Default for SubscriberSource {
    fn default() -> Self {
        Self::Website
    }
}

/// Persisted subscriber. Exactly one record exists per email address for the
/// lifetime of the system; unsubscribing deactivates, never deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberRecord {
    pub id: RecordId,
    pub email: String,
    pub name: Option<String>,
    pub interests: Vec<NewsletterInterest>,
    pub is_active: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub unsubscribe_reason: Option<String>,
    pub source: SubscriberSource,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriberRecord {
    /// Listing projection. Network metadata is deliberately excluded here,
    /// unlike the contact and inquiry listings which expose it.
    pub fn listing_view(&self) -> SubscriberView {
        SubscriberView {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            interests: self.interests.clone(),
            is_active: self.is_active,
            confirmed_at: self.confirmed_at,
            unsubscribed_at: self.unsubscribed_at,
            unsubscribe_reason: self.unsubscribe_reason.clone(),
            source: self.source,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Subscriber as exposed by the administrative listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberView {
    pub id: RecordId,
    pub email: String,
    pub name: Option<String>,
    pub interests: Vec<NewsletterInterest>,
    pub is_active: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub unsubscribe_reason: Option<String>,
    pub source: SubscriberSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate counts derived fresh at query time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberStats {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
}

/// Raw subscribe payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

/// Raw unsubscribe payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Validated subscribe form.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub email: String,
    pub name: Option<String>,
    pub interests: Vec<NewsletterInterest>,
}

impl SubscribeRequest {
    pub fn validate(self) -> Result<NewSubscription, Vec<FieldError>> {
        let mut report = ValidationReport::new();

        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            report.reject("email", "Please provide a valid email address");
        }

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if let Some(value) = name.as_deref() {
            if !length_within(value, 0, 100) {
                report.reject("name", "Name cannot exceed 100 characters");
            }
        }

        let mut interests = Vec::new();
        match &self.interests {
            // Absent or empty interests fall back to the catch-all topic.
            None => interests.push(NewsletterInterest::All),
            Some(raw) if raw.is_empty() => interests.push(NewsletterInterest::All),
            Some(raw) => {
                for value in raw {
                    match NewsletterInterest::parse(value.trim()) {
                        Some(interest) => interests.push(interest),
                        None => report.reject("interests", "Please select valid interests"),
                    }
                }
            }
        }

        report.finish()?;

        Ok(NewSubscription {
            email,
            name,
            interests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interests_default_to_all() {
        let form = SubscribeRequest {
            email: "a@b.com".to_string(),
            name: None,
            interests: None,
        }
        .validate()
        .expect("valid request");
        assert_eq!(form.interests, vec![NewsletterInterest::All]);

        let form = SubscribeRequest {
            email: "a@b.com".to_string(),
            name: None,
            interests: Some(Vec::new()),
        }
        .validate()
        .expect("valid request");
        assert_eq!(form.interests, vec![NewsletterInterest::All]);
    }

    #[test]
    fn unknown_interests_are_rejected() {
        let errors = SubscribeRequest {
            email: "a@b.com".to_string(),
            name: None,
            interests: Some(vec!["gossip".to_string()]),
        }
        .validate()
        .expect_err("interest is unknown");
        assert_eq!(errors[0].field, "interests");
    }

    #[test]
    fn oversized_name_is_rejected() {
        let errors = SubscribeRequest {
            email: "a@b.com".to_string(),
            name: Some("x".repeat(101)),
            interests: None,
        }
        .validate()
        .expect_err("name too long");
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn listing_view_omits_network_metadata() {
        let now = Utc::now();
        let record = SubscriberRecord {
            id: RecordId("64f1a2b3c4d5e6f7089a0bcd".to_string()),
            email: "a@b.com".to_string(),
            name: None,
            interests: vec![NewsletterInterest::All],
            is_active: true,
            confirmed_at: None,
            unsubscribed_at: None,
            unsubscribe_reason: None,
            source: SubscriberSource::Website,
            ip_address: Some("203.0.113.9".to_string()),
            user_agent: Some("probe/1.0".to_string()),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(record.listing_view()).expect("serializes");
        assert!(value.get("ipAddress").is_none());
        assert!(value.get("userAgent").is_none());
        assert_eq!(value["email"], "a@b.com");
    }
}
