//! Report Domain
//!
//! The typed session model, per-step validation rules, safety guidance,
//! case reference derivation and the simulated submission sink.

pub mod case_ref;
pub mod safety_tips;
pub mod submit;
pub mod types;
pub mod validation;

pub use types::{
    EvidenceFile, IncidentReport, IncidentType, Ongoing, ReportSession, ReporterProfile,
    ReporterType,
};
pub use validation::{Field, Violation, validate_incident, validate_reporter};
