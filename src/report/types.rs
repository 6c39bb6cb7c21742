//! Report Domain Types
//!
//! Typed session model for one incident report: who is reporting,
//! what happened, and the evidence attached. Everything here is
//! transient in-memory state for a single wizard session.

use crate::error::ReportError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Who is filing the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReporterType {
    Individual,
    Business,
    ParentGuardian,
    Other,
}

impl ReporterType {
    pub const ALL: [ReporterType; 4] = [
        Self::Individual,
        Self::Business,
        Self::ParentGuardian,
        Self::Other,
    ];

    /// Stable identifier used in the submission payload
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Business => "business",
            Self::ParentGuardian => "parent-guardian",
            Self::Other => "other",
        }
    }

    /// Label shown on the selection buttons
    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Business => "Business",
            Self::ParentGuardian => "Parent-Guardian",
            Self::Other => "Other",
        }
    }
}

/// Category of the incident being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncidentType {
    Phishing,
    AccountCompromise,
    FraudScam,
    MalwareRansomware,
    HarassmentStalking,
    DataBreach,
    Ddos,
    CryptoScam,
    Other,
}

impl IncidentType {
    pub const ALL: [IncidentType; 9] = [
        Self::Phishing,
        Self::AccountCompromise,
        Self::FraudScam,
        Self::MalwareRansomware,
        Self::HarassmentStalking,
        Self::DataBreach,
        Self::Ddos,
        Self::CryptoScam,
        Self::Other,
    ];

    /// Stable identifier used in the submission payload
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Phishing => "phishing",
            Self::AccountCompromise => "account-compromise",
            Self::FraudScam => "fraud-scam",
            Self::MalwareRansomware => "malware-ransomware",
            Self::HarassmentStalking => "harassment-stalking",
            Self::DataBreach => "data-breach",
            Self::Ddos => "ddos",
            Self::CryptoScam => "crypto-scam",
            Self::Other => "other",
        }
    }

    /// Label shown in the selection menu
    pub fn label(&self) -> &'static str {
        match self {
            Self::Phishing => "Phishing",
            Self::AccountCompromise => "Account Compromise",
            Self::FraudScam => "Fraud or Scam",
            Self::MalwareRansomware => "Malware or Ransomware",
            Self::HarassmentStalking => "Harassment or Stalking",
            Self::DataBreach => "Data Breach",
            Self::Ddos => "DDoS",
            Self::CryptoScam => "Crypto Scam",
            Self::Other => "Other",
        }
    }
}

impl FromStr for IncidentType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == s)
            .ok_or_else(|| ReportError::UnknownIncidentType(s.to_string()))
    }
}

/// Whether the incident is still in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ongoing {
    Yes,
    No,
}

impl Ongoing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// Step 1 state: reporter classification and contact details.
///
/// Contact fields stay present (possibly non-empty) even while
/// `is_anonymous` is set, so disabling anonymity restores whatever
/// the user had already typed. Type-specific fields are kept when
/// the reporter type changes for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterProfile {
    pub reporter_type: Option<ReporterType>,
    pub is_anonymous: bool,
    pub full_name: String,
    pub country: String,
    pub email: String,
    pub phone: String,
    // Business
    pub organization: String,
    pub role: String,
    // Parent-Guardian
    pub relationship: String,
    pub victim_age: String,
    // Other
    pub reporter_role: String,
    pub additional_info: String,
}

/// Step 2 state: incident classification, narrative and evidence
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    pub incident_type: Option<IncidentType>,
    pub is_ongoing: Option<Ongoing>,
    pub what_happened: String,
    /// RFC 3339 with offset preferred; any non-empty string accepted
    pub incident_time: String,
    pub platform: String,
    pub platform_url: String,
    pub consent: bool,
    pub evidence_files: Vec<EvidenceFile>,
}

/// Extensions suggested by the evidence picker. Advisory only: a file
/// outside this list still attaches.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf", "eml", "log", "txt"];

/// A file reference attached as evidence. Only name and size are read;
/// contents are never opened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceFile {
    pub name: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl EvidenceFile {
    /// Stat `path` and capture its name and size
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let meta = std::fs::metadata(path).map_err(|source| ReportError::Evidence {
            path: path.to_path_buf(),
            source,
        })?;
        if !meta.is_file() {
            return Err(ReportError::Evidence {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size_bytes: meta.len(),
            path: path.to_path_buf(),
        })
    }
}

/// The full wizard session: one reporter profile plus one incident
/// report. Owned exclusively by the wizard controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSession {
    #[serde(flatten)]
    pub reporter: ReporterProfile,
    #[serde(flatten)]
    pub incident: IncidentReport,
}

/// Title-case a hyphen-separated slug word by word,
/// e.g. `data-breach` -> `Data Breach`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
