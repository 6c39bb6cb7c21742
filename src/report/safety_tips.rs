//! Immediate Safety Tips
//!
//! Static guidance shown while an incident is still ongoing, keyed by
//! incident type. The lookup is exhaustive over the closed enum, so a
//! new incident type cannot silently produce an empty panel.

use crate::report::types::IncidentType;

/// Tips for an ongoing incident of the given type
pub fn tips_for(incident_type: IncidentType) -> &'static [&'static str] {
    match incident_type {
        IncidentType::Phishing => &[
            "Do not click any links or download attachments from the suspicious message",
            "Change passwords on all accounts using a secure device",
            "Enable two-factor authentication (2FA) on all accounts",
            "Take screenshots of the phishing attempt",
            "Report the phishing email to your email provider",
            "Check your accounts for unauthorized activity",
        ],
        IncidentType::AccountCompromise => &[
            "Immediately change passwords on the compromised account",
            "Enable two-factor authentication (2FA) if not already active",
            "Review recent account activity and transactions",
            "Revoke access to third-party apps connected to your account",
            "Contact the service provider to report the compromise",
            "Alert your contacts if the account was used to send messages",
        ],
        IncidentType::FraudScam => &[
            "Stop all communication with the suspected scammer",
            "Do not send any money or provide additional information",
            "Contact your bank immediately if you shared financial details",
            "Document all communications and transactions",
            "Change passwords if you shared login credentials",
            "Report the scam to your local authorities",
        ],
        IncidentType::MalwareRansomware => &[
            "Disconnect your device from the internet and network immediately",
            "Do NOT pay the ransom - it does not guarantee file recovery",
            "Power off the infected device to prevent further encryption",
            "Contact IT support or a cybersecurity professional",
            "Isolate backup drives to prevent infection spread",
            "Take photos of any ransom messages displayed",
        ],
        IncidentType::HarassmentStalking => &[
            "Ensure your physical safety - move to a safe location if needed",
            "Block the harasser on all platforms",
            "Do not engage or respond to the harasser",
            "Document all incidents with screenshots and timestamps",
            "Review and strengthen your privacy settings on all accounts",
            "Contact local law enforcement if you feel threatened",
        ],
        IncidentType::DataBreach => &[
            "Change passwords for the affected service immediately",
            "Enable two-factor authentication on all accounts",
            "Monitor your financial accounts for suspicious activity",
            "Consider placing a fraud alert on your credit reports",
            "Watch for phishing attempts using your leaked data",
            "Document what data was potentially compromised",
        ],
        IncidentType::Ddos => &[
            "Contact your hosting provider or IT team immediately",
            "Enable DDoS protection services if available",
            "Document the attack timeline and traffic patterns",
            "Do not attempt to handle the attack alone",
            "Backup critical data if not already done",
            "Consider switching to DDoS-resistant infrastructure",
        ],
        IncidentType::CryptoScam => &[
            "Stop all transactions immediately",
            "Do not send any more cryptocurrency",
            "Contact the exchange or wallet provider",
            "Document wallet addresses and transaction IDs",
            "Report to cryptocurrency fraud authorities",
            "Alert others in the crypto community about the scam",
        ],
        IncidentType::Other => &[
            "Disconnect your device from the internet if compromised",
            "Change your passwords on a different, secure device",
            "Enable two-factor authentication (2FA) on all accounts",
            "Contact your bank if financial information is involved",
            "Document everything - take screenshots and keep records",
            "Do not delete anything - preserve evidence",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_incident_type_has_tips() {
        for incident_type in IncidentType::ALL {
            let tips = tips_for(incident_type);
            assert!(
                !tips.is_empty(),
                "no tips for {}",
                incident_type.slug()
            );
            assert!(tips.iter().all(|tip| !tip.is_empty()));
        }
    }

    #[test]
    fn test_tips_are_short_imperative_lists() {
        for incident_type in IncidentType::ALL {
            let tips = tips_for(incident_type);
            assert!((5..=6).contains(&tips.len()), "{}", incident_type.slug());
        }
    }
}
