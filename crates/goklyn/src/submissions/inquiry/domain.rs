use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::submissions::envelope::FieldError;
use crate::submissions::str_enum;
use crate::submissions::validate::{
    is_valid_email, length_within, normalize_email, ValidationReport,
};
use crate::submissions::RecordId;

str_enum! {
    /// Headcount buckets for the inquiring company.
    pub enum CompanySize {
        OneToTen => "1-10",
        ElevenToFifty => "11-50",
        FiftyOneToTwoHundred => "51-200",
        TwoHundredOneToFiveHundred => "201-500",
        OverFiveHundred => "500+",
    }
}

impl Default for CompanySize {
    fn default() -> Self {
        Self::OneToTen
    }
}

str_enum! {
    /// Services an inquiry can express interest in.
    pub enum ServiceInterest {
        QuantumComputing => "quantum-computing",
        ArtificialIntelligence => "artificial-intelligence",
        MachineLearning => "machine-learning",
        Cybersecurity => "cybersecurity",
        WebDevelopment => "web-development",
        MobileDevelopment => "mobile-development",
        CloudSolutions => "cloud-solutions",
        DataAnalytics => "data-analytics",
        Blockchain => "blockchain",
        IotSolutions => "iot-solutions",
        Consulting => "consulting",
        Other => "other",
    }
}

str_enum! {
    /// Declared budget range. Drives priority derivation at creation.
    pub enum Budget {
        Under10k => "under-10k",
        From10kTo50k => "10k-50k",
        From50kTo100k => "50k-100k",
        From100kTo500k => "100k-500k",
        Over500k => "500k+",
        ToBeDiscussed => "to-be-discussed",
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::ToBeDiscussed
    }
}

str_enum! {
    pub enum Timeline {
        Urgent => "urgent",
        OneToThreeMonths => "1-3-months",
        ThreeToSixMonths => "3-6-months",
        SixToTwelveMonths => "6-12-months",
        Ongoing => "ongoing",
        Flexible => "flexible",
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::Flexible
    }
}

str_enum! {
    pub enum HowDidYouHear {
        Google => "google",
        Linkedin => "linkedin",
        Referral => "referral",
        SocialMedia => "social-media",
        Conference => "conference",
        Other => "other",
    }
}

impl Default for HowDidYouHear {
    fn default() -> Self {
        Self::Other
    }
}

str_enum! {
    /// Administrative lifecycle of an inquiry.
    pub enum InquiryStatus {
        Pending => "pending",
        Reviewing => "reviewing",
        Contacted => "contacted",
        InProgress => "in-progress",
        Completed => "completed",
        Declined => "declined",
    }
}

impl Default for InquiryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

str_enum! {
    /// Derived at creation from budget and timeline; thereafter only mutable
    /// by explicit administrative update.
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Append-only administrative annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryNote {
    pub content: String,
    pub added_by: String,
    pub added_at: DateTime<Utc>,
}

/// Persisted service inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRecord {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub company_size: CompanySize,
    pub service_interests: Vec<ServiceInterest>,
    pub project_description: String,
    pub budget: Budget,
    pub timeline: Timeline,
    pub how_did_you_hear: HowDidYouHear,
    pub status: InquiryStatus,
    pub priority: Priority,
    pub notes: Vec<InquiryNote>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw inbound payload; untyped so validation can report every failing field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub service_interests: Vec<String>,
    #[serde(default)]
    pub project_description: String,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub how_did_you_hear: Option<String>,
}

/// Validated inquiry, ready for priority derivation and persistence.
#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub company_size: CompanySize,
    pub service_interests: Vec<ServiceInterest>,
    pub project_description: String,
    pub budget: Budget,
    pub timeline: Timeline,
    pub how_did_you_hear: HowDidYouHear,
}

fn parse_optional_enum<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    report: &mut ValidationReport,
    field: &str,
    message: &str,
) -> T
where
    T: Default,
{
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => T::default(),
        Some(value) => match parse(value) {
            Some(parsed) => parsed,
            None => {
                report.reject(field, message);
                T::default()
            }
        },
    }
}

impl InquiryRequest {
    pub fn validate(self) -> Result<NewInquiry, Vec<FieldError>> {
        let mut report = ValidationReport::new();

        let full_name = self.full_name.trim().to_string();
        if !length_within(&full_name, 2, 150) {
            report.reject(
                "fullName",
                "Full name must be between 2 and 150 characters",
            );
        }

        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            report.reject("email", "Please provide a valid email address");
        }

        let project_description = self.project_description.trim().to_string();
        if !length_within(&project_description, 20, 10000) {
            report.reject(
                "projectDescription",
                "Project description must be between 20 and 10000 characters",
            );
        }

        let mut service_interests = Vec::with_capacity(self.service_interests.len());
        if self.service_interests.is_empty() {
            report.reject("serviceInterests", "Please select at least one service");
        }
        for raw in &self.service_interests {
            match ServiceInterest::parse(raw.trim()) {
                Some(interest) => service_interests.push(interest),
                None => report.reject("serviceInterests", "Please select a valid service"),
            }
        }

        let budget = parse_optional_enum(
            self.budget.as_deref(),
            Budget::parse,
            &mut report,
            "budget",
            "Please select a valid budget range",
        );
        let timeline = parse_optional_enum(
            self.timeline.as_deref(),
            Timeline::parse,
            &mut report,
            "timeline",
            "Please select a valid timeline",
        );
        let company_size = parse_optional_enum(
            self.company_size.as_deref(),
            CompanySize::parse,
            &mut report,
            "companySize",
            "Please select a valid company size",
        );
        let how_did_you_hear = parse_optional_enum(
            self.how_did_you_hear.as_deref(),
            HowDidYouHear::parse,
            &mut report,
            "howDidYouHear",
            "Please select a valid referral source",
        );

        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let company = self
            .company
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        report.finish()?;

        Ok(NewInquiry {
            full_name,
            email,
            phone,
            company,
            company_size,
            service_interests,
            project_description,
            budget,
            timeline,
            how_did_you_hear,
        })
    }
}
