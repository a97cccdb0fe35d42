use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::submissions::envelope::FieldError;
use crate::submissions::str_enum;
use crate::submissions::validate::{
    is_valid_email, is_valid_phone, length_within, normalize_email, ValidationReport,
};

str_enum! {
    /// Categories a visitor can file a message under.
    pub enum ContactSubject {
        General => "general",
        Partnership => "partnership",
        Careers => "careers",
        Support => "support",
        QuantumComputing => "quantum-computing",
        AiMl => "ai-ml",
        Cybersecurity => "cybersecurity",
        WebDevelopment => "web-development",
        Other => "other",
    }
}

str_enum! {
    /// Administrative lifecycle of a contact message. Only ever advanced by an
    /// explicit status update, never automatically.
    pub enum ContactStatus {
        New => "new",
        Read => "read",
        Responded => "responded",
        Archived => "archived",
    }
}

impl Default for ContactStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Persisted contact submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: crate::submissions::RecordId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
    pub status: ContactStatus,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw inbound payload. Fields stay untyped strings so validation can report
/// every problem at once instead of failing on the first malformed value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Validated submission, ready to persist.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(self) -> Result<NewContact, Vec<FieldError>> {
        let mut report = ValidationReport::new();

        let name = self.name.trim().to_string();
        if !length_within(&name, 2, 100) {
            report.reject("name", "Name must be between 2 and 100 characters");
        }

        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            report.reject("email", "Please provide a valid email address");
        }

        let subject = self.subject.trim();
        let subject = match ContactSubject::parse(subject) {
            Some(parsed) => parsed,
            None => {
                report.reject("subject", "Please select a valid subject");
                ContactSubject::Other
            }
        };

        let message = self.message.trim().to_string();
        if !length_within(&message, 10, 5000) {
            report.reject("message", "Message must be between 10 and 5000 characters");
        }

        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if let Some(value) = phone.as_deref() {
            if !is_valid_phone(value) {
                report.reject("phone", "Please provide a valid phone number");
            }
        }

        let company = self
            .company
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        if let Some(value) = company.as_deref() {
            if !length_within(value, 0, 200) {
                report.reject("company", "Company name cannot exceed 200 characters");
            }
        }

        report.finish()?;

        Ok(NewContact {
            name,
            email,
            phone,
            company,
            subject,
            message,
        })
    }
}
