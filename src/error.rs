//! Error Types
//!
//! Recoverable system errors only. Field validation failures are data
//! (see `report::validation`), never errors, and never cross the step
//! boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Evidence picker could not stat the selected file
    #[error("could not read evidence file {path}: {source}")]
    Evidence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CLI was given an incident type slug outside the closed set
    #[error(
        "unknown incident type '{0}' (expected one of: phishing, account-compromise, \
         fraud-scam, malware-ransomware, harassment-stalking, data-breach, ddos, \
         crypto-scam, other)"
    )]
    UnknownIncidentType(String),
}
