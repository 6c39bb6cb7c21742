//! Submission Sink
//!
//! There is no backend yet: a successful submission emits one structured
//! log record with the serialized session, standing in for a future
//! network call. Fire-and-forget, nothing awaited, no retry.

use crate::report::types::ReportSession;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionRecord<'a> {
    case_ref: &'a str,
    #[serde(flatten)]
    session: &'a ReportSession,
}

/// Serialize the session and log it as the submission payload
pub fn log_submission(session: &ReportSession, case_ref: &str) {
    match serde_json::to_string(&SubmissionRecord { case_ref, session }) {
        Ok(payload) => {
            tracing::info!(target: "increport::submit", %payload, "incident report submitted");
        }
        Err(e) => {
            tracing::error!("failed to serialize submission payload: {e}");
        }
    }
}

/// The download affordance is a stub: log intent only
pub fn log_download_requested(case_ref: &str) {
    tracing::info!(%case_ref, "report download requested (PDF generation not implemented)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::{IncidentType, Ongoing, ReporterType};

    #[test]
    fn test_submission_record_shape() {
        let mut session = ReportSession::default();
        session.reporter.reporter_type = Some(ReporterType::Individual);
        session.incident.incident_type = Some(IncidentType::DataBreach);
        session.incident.is_ongoing = Some(Ongoing::Yes);

        let record = SubmissionRecord {
            case_ref: "INC-2026-000123",
            session: &session,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["caseRef"], "INC-2026-000123");
        assert_eq!(value["reporterType"], "individual");
        assert_eq!(value["incidentType"], "data-breach");
        assert_eq!(value["isOngoing"], "yes");
    }

    #[test]
    fn test_log_submission_does_not_panic_on_default_session() {
        log_submission(&ReportSession::default(), "INC-2026-999999");
    }
}
