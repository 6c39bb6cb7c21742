//! Per-Step Validation Rules
//!
//! Pure predicates over the session entities. Each validator returns the
//! complete list of violations for its step; an empty list means the step
//! may advance. Nothing here touches the UI: the wizard converts the
//! result into its field-to-message error map.

use crate::report::types::{IncidentReport, ReporterProfile};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use url::Url;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// Narrative length bounds, in characters, inclusive
pub const WHAT_HAPPENED_MIN: usize = 50;
pub const WHAT_HAPPENED_MAX: usize = 600;

/// Every field a validator can flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    ReporterType,
    FullName,
    Country,
    Email,
    Phone,
    IncidentType,
    IsOngoing,
    WhatHappened,
    IncidentTime,
    PlatformUrl,
    Consent,
    Evidence,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReporterType => "reporterType",
            Self::FullName => "fullName",
            Self::Country => "country",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::IncidentType => "incidentType",
            Self::IsOngoing => "isOngoing",
            Self::WhatHappened => "whatHappened",
            Self::IncidentTime => "incidentTime",
            Self::PlatformUrl => "platformUrl",
            Self::Consent => "consent",
            Self::Evidence => "evidence",
        }
    }
}

/// One failed rule: which field, and the message shown under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub message: &'static str,
}

impl Violation {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Collapse violations into the display map used by the wizard
pub fn error_map(violations: Vec<Violation>) -> BTreeMap<Field, String> {
    violations
        .into_iter()
        .map(|v| (v.field, v.message.to_string()))
        .collect()
}

/// Step 1 rules.
///
/// Contact fields are only checked when the reporter has not chosen
/// anonymity; the type-specific fields (organization, relationship, ...)
/// are never validated.
pub fn validate_reporter(profile: &ReporterProfile) -> Vec<Violation> {
    let mut violations = Vec::new();

    if profile.reporter_type.is_none() {
        violations.push(Violation::new(
            Field::ReporterType,
            "Please select a reporter type",
        ));
    }

    if !profile.is_anonymous {
        let required: [(Field, &str, &'static str); 4] = [
            (
                Field::FullName,
                profile.full_name.as_str(),
                "Full name is required",
            ),
            (Field::Email, profile.email.as_str(), "Email is required"),
            (
                Field::Phone,
                profile.phone.as_str(),
                "Phone number is required",
            ),
            (
                Field::Country,
                profile.country.as_str(),
                "Country is required",
            ),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                violations.push(Violation::new(field, message));
            }
        }

        let email = profile.email.trim();
        if !email.is_empty() && !EMAIL_RE.is_match(email) {
            violations.push(Violation::new(
                Field::Email,
                "Please enter a valid email address",
            ));
        }
    }

    violations
}

/// Step 2 rules.
///
/// The incident time accepts an RFC 3339 datetime with offset, falling
/// back to any non-empty string, so only an empty value is rejected.
/// An empty platform URL is treated as absent.
pub fn validate_incident(report: &IncidentReport) -> Vec<Violation> {
    let mut violations = Vec::new();

    if report.incident_type.is_none() {
        violations.push(Violation::new(
            Field::IncidentType,
            "Please select an incident type",
        ));
    }

    if report.is_ongoing.is_none() {
        violations.push(Violation::new(
            Field::IsOngoing,
            "Please indicate if the incident is ongoing",
        ));
    }

    let narrative_len = report.what_happened.chars().count();
    if narrative_len < WHAT_HAPPENED_MIN {
        violations.push(Violation::new(
            Field::WhatHappened,
            "Please provide at least 50 characters describing the incident",
        ));
    } else if narrative_len > WHAT_HAPPENED_MAX {
        violations.push(Violation::new(
            Field::WhatHappened,
            "Description must not exceed 600 characters",
        ));
    }

    let time = report.incident_time.trim();
    let time_ok = chrono::DateTime::parse_from_rfc3339(time).is_ok() || !time.is_empty();
    if !time_ok {
        violations.push(Violation::new(
            Field::IncidentTime,
            "Please select when the incident occurred",
        ));
    }

    let platform_url = report.platform_url.trim();
    if !platform_url.is_empty() && Url::parse(platform_url).is_err() {
        violations.push(Violation::new(
            Field::PlatformUrl,
            "Please enter a valid URL",
        ));
    }

    if !report.consent {
        violations.push(Violation::new(Field::Consent, "You must consent to proceed"));
    }

    violations
}
