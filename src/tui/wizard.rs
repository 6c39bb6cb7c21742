//! Incident Report Wizard
//!
//! The three-step wizard state machine: Reporter Details, Incident
//! Details, Confirmation. Owns the whole session, the per-step error
//! map and the focus state; validation gates every forward transition.
//! Rendering lives in `wizard_render`.

use crate::config::FormConfig;
use crate::report::types::{
    EvidenceFile, IncidentType, Ongoing, ReportSession, ReporterType,
};
use crate::report::validation::{self, Field, WHAT_HAPPENED_MAX};
use crate::report::{case_ref, submit};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::BTreeMap;
use std::path::Path;

/// Current step in the report wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ReporterDetails,
    IncidentDetails,
    Confirmation,
}

impl WizardStep {
    /// Step number (1-based)
    pub fn number(&self) -> usize {
        match self {
            Self::ReporterDetails => 1,
            Self::IncidentDetails => 2,
            Self::Confirmation => 3,
        }
    }

    /// Total number of steps
    pub fn total() -> usize {
        3
    }

    /// Step title
    pub fn title(&self) -> &'static str {
        match self {
            Self::ReporterDetails => "Reporter Details",
            Self::IncidentDetails => "Incident Details",
            Self::Confirmation => "Report Submitted Successfully",
        }
    }

    /// Step subtitle
    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::ReporterDetails => "Tell us about yourself so we can follow up on your report",
            Self::IncidentDetails => "Please provide detailed information about the incident",
            Self::Confirmation => "Your cybercrime incident has been recorded",
        }
    }
}

/// Focusable fields on step 1. The visible list is dynamic: contact
/// fields appear once a reporter type is chosen and anonymity is off,
/// and the type-specific panel follows the selected reporter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step1Field {
    ReporterType,
    Anonymous,
    FullName,
    Country,
    Email,
    Phone,
    Organization,
    Role,
    Relationship,
    VictimAge,
    ReporterRole,
    AdditionalInfo,
}

/// Focusable fields on step 2, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step2Field {
    IncidentType,
    Ongoing,
    WhatHappened,
    IncidentTime,
    Platform,
    PlatformUrl,
    Consent,
    Evidence,
}

pub const STEP2_FIELDS: [Step2Field; 8] = [
    Step2Field::IncidentType,
    Step2Field::Ongoing,
    Step2Field::WhatHappened,
    Step2Field::IncidentTime,
    Step2Field::Platform,
    Step2Field::PlatformUrl,
    Step2Field::Consent,
    Step2Field::Evidence,
];

/// What the app should do after a key was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Nothing special
    None,
    /// Hand control back to the hosting menu
    ReturnToHost,
    /// Write the given text to the system clipboard
    CopyToClipboard(String),
}

/// Which characters a text field accepts
#[derive(Debug, Clone, Copy)]
enum TextFilter {
    Any,
    Digits,
    Narrative,
}

/// Apply a key to a text value. Returns true when the value changed.
fn apply_text_key(value: &mut String, code: KeyCode, filter: TextFilter) -> bool {
    match code {
        KeyCode::Char(c) => {
            let accepted = match filter {
                TextFilter::Any => true,
                TextFilter::Digits => c.is_ascii_digit(),
                TextFilter::Narrative => value.chars().count() < WHAT_HAPPENED_MAX,
            };
            if accepted {
                value.push(c);
            }
            accepted
        }
        KeyCode::Backspace => value.pop().is_some(),
        _ => false,
    }
}

/// Main wizard state
pub struct ReportWizard {
    pub step: WizardStep,
    pub session: ReportSession,

    /// Per-step validation errors, cleared field-by-field as the user edits
    pub errors: BTreeMap<Field, String>,

    /// Step 1: contact panel hidden until a reporter type is picked
    pub show_form: bool,
    pub step1_focus: usize,

    pub step2_focus: usize,
    /// Path being typed into the evidence picker
    pub evidence_input: String,

    /// Set once per successful submission
    pub case_ref: Option<String>,

    /// Session template restored by a full reset (config pre-fills included)
    initial: ReportSession,
    /// Whether a hosting menu exists to return to
    has_host_menu: bool,
}

impl ReportWizard {
    pub fn new(has_host_menu: bool) -> Self {
        let session = ReportSession::default();
        Self {
            step: WizardStep::ReporterDetails,
            initial: session.clone(),
            session,
            errors: BTreeMap::new(),
            show_form: false,
            step1_focus: 0,
            step2_focus: 0,
            evidence_input: String::new(),
            case_ref: None,
            has_host_menu,
        }
    }

    /// Apply configured pre-fills to the fresh session and to the reset
    /// template, so "submit another" restores them too
    pub fn with_form_defaults(mut self, form: &FormConfig) -> Self {
        if let Some(country) = &form.default_country
            && self.session.reporter.country.is_empty()
        {
            self.session.reporter.country = country.clone();
            self.initial.reporter.country = country.clone();
        }
        self
    }

    /// Visible step-1 fields for the current session state
    pub fn step1_fields(&self) -> Vec<Step1Field> {
        let mut fields = vec![Step1Field::ReporterType, Step1Field::Anonymous];
        if !self.session.reporter.is_anonymous && self.show_form {
            fields.extend([
                Step1Field::FullName,
                Step1Field::Country,
                Step1Field::Email,
                Step1Field::Phone,
            ]);
            match self.session.reporter.reporter_type {
                Some(ReporterType::Business) => {
                    fields.extend([Step1Field::Organization, Step1Field::Role]);
                }
                Some(ReporterType::ParentGuardian) => {
                    fields.extend([Step1Field::Relationship, Step1Field::VictimAge]);
                }
                Some(ReporterType::Other) => {
                    fields.extend([Step1Field::ReporterRole, Step1Field::AdditionalInfo]);
                }
                _ => {}
            }
        }
        fields
    }

    /// Currently focused step-1 field
    pub fn step1_focused(&self) -> Step1Field {
        let fields = self.step1_fields();
        fields[self.step1_focus.min(fields.len() - 1)]
    }

    /// Currently focused step-2 field
    pub fn step2_focused(&self) -> Step2Field {
        STEP2_FIELDS[self.step2_focus.min(STEP2_FIELDS.len() - 1)]
    }

    /// Whether the safety-tips panel is active
    pub fn show_safety_tips(&self) -> bool {
        self.session.incident.is_ongoing == Some(Ongoing::Yes)
            && self.session.incident.incident_type.is_some()
    }

    /// Handle a key event for the current step
    pub fn handle_key(&mut self, event: KeyEvent) -> WizardAction {
        // Global: Escape leaves the current step
        if event.code == KeyCode::Esc {
            return match self.step {
                WizardStep::ReporterDetails => self.back_to_menu(),
                WizardStep::IncidentDetails => {
                    self.back_to_reporter_details();
                    WizardAction::None
                }
                WizardStep::Confirmation => self.return_home(),
            };
        }

        match self.step {
            WizardStep::ReporterDetails => self.handle_step1_key(event),
            WizardStep::IncidentDetails => self.handle_step2_key(event),
            WizardStep::Confirmation => self.handle_step3_key(event),
        }
    }

    /// Insert pasted text into the focused text field
    pub fn handle_paste(&mut self, text: &str) {
        for c in text.chars() {
            match self.step {
                WizardStep::ReporterDetails => {
                    let focused = self.step1_focused();
                    self.edit_step1_text(focused, KeyCode::Char(c));
                }
                WizardStep::IncidentDetails => {
                    let focused = self.step2_focused();
                    self.edit_step2_text(focused, KeyCode::Char(c));
                }
                WizardStep::Confirmation => {}
            }
        }
    }

    // --- Step 1 ---

    fn handle_step1_key(&mut self, event: KeyEvent) -> WizardAction {
        match self.step1_focused() {
            Step1Field::ReporterType => match event.code {
                KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                    self.cycle_reporter_type(-1);
                }
                KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                    self.cycle_reporter_type(1);
                }
                KeyCode::Char(c @ '1'..='4') => {
                    let index = (c as usize) - ('1' as usize);
                    self.select_reporter_type(ReporterType::ALL[index]);
                }
                KeyCode::Tab => self.step1_focus_next(),
                KeyCode::BackTab => self.step1_focus_prev(),
                KeyCode::Enter => self.try_continue(),
                _ => {}
            },
            Step1Field::Anonymous => match event.code {
                KeyCode::Char(' ') => self.toggle_anonymous(),
                KeyCode::Tab => self.step1_focus_next(),
                KeyCode::BackTab => self.step1_focus_prev(),
                KeyCode::Enter => self.try_continue(),
                _ => {}
            },
            field => match event.code {
                KeyCode::Tab => self.step1_focus_next(),
                KeyCode::BackTab => self.step1_focus_prev(),
                KeyCode::Enter => self.try_continue(),
                code => self.edit_step1_text(field, code),
            },
        }
        WizardAction::None
    }

    fn step1_focus_next(&mut self) {
        let len = self.step1_fields().len();
        self.step1_focus = (self.step1_focus + 1) % len;
    }

    fn step1_focus_prev(&mut self) {
        let len = self.step1_fields().len();
        self.step1_focus = (self.step1_focus + len - 1) % len;
    }

    fn cycle_reporter_type(&mut self, delta: isize) {
        let all = ReporterType::ALL;
        let next = match self.session.reporter.reporter_type {
            None => 0,
            Some(current) => {
                let index = all.iter().position(|t| *t == current).unwrap_or(0) as isize;
                (index + delta).rem_euclid(all.len() as isize) as usize
            }
        };
        self.select_reporter_type(all[next]);
    }

    /// Selecting a reporter type reveals the contact panel and clears
    /// the whole error map, not just the changed field
    fn select_reporter_type(&mut self, reporter_type: ReporterType) {
        self.session.reporter.reporter_type = Some(reporter_type);
        self.show_form = true;
        self.errors.clear();
    }

    /// Hides the contact panel without touching already-entered data,
    /// so disabling anonymity restores what the user typed
    fn toggle_anonymous(&mut self) {
        self.session.reporter.is_anonymous = !self.session.reporter.is_anonymous;
        let len = self.step1_fields().len();
        self.step1_focus = self.step1_focus.min(len - 1);
    }

    fn edit_step1_text(&mut self, field: Step1Field, code: KeyCode) {
        let reporter = &mut self.session.reporter;
        let (value, error_field, filter) = match field {
            Step1Field::FullName => (&mut reporter.full_name, Some(Field::FullName), TextFilter::Any),
            Step1Field::Country => (&mut reporter.country, Some(Field::Country), TextFilter::Any),
            Step1Field::Email => (&mut reporter.email, Some(Field::Email), TextFilter::Any),
            Step1Field::Phone => (&mut reporter.phone, Some(Field::Phone), TextFilter::Any),
            Step1Field::Organization => (&mut reporter.organization, None, TextFilter::Any),
            Step1Field::Role => (&mut reporter.role, None, TextFilter::Any),
            Step1Field::Relationship => (&mut reporter.relationship, None, TextFilter::Any),
            Step1Field::VictimAge => (&mut reporter.victim_age, None, TextFilter::Digits),
            Step1Field::ReporterRole => (&mut reporter.reporter_role, None, TextFilter::Any),
            Step1Field::AdditionalInfo => (&mut reporter.additional_info, None, TextFilter::Any),
            Step1Field::ReporterType | Step1Field::Anonymous => return,
        };
        if apply_text_key(value, code, filter)
            && let Some(field) = error_field
        {
            self.errors.remove(&field);
        }
    }

    /// Continue to step 2, or surface the violations and stay
    fn try_continue(&mut self) {
        let violations = validation::validate_reporter(&self.session.reporter);
        if violations.is_empty() {
            self.errors.clear();
            self.step = WizardStep::IncidentDetails;
            self.step2_focus = 0;
        } else {
            self.errors = validation::error_map(violations);
        }
    }

    /// Step-1 back action: delegate to the hosting menu when there is
    /// one, otherwise reset just the classification flags
    fn back_to_menu(&mut self) -> WizardAction {
        if self.has_host_menu {
            return WizardAction::ReturnToHost;
        }
        self.session.reporter.reporter_type = None;
        self.session.reporter.is_anonymous = false;
        self.show_form = false;
        self.step1_focus = 0;
        WizardAction::None
    }

    // --- Step 2 ---

    fn handle_step2_key(&mut self, event: KeyEvent) -> WizardAction {
        match self.step2_focused() {
            Step2Field::IncidentType => match event.code {
                KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                    self.cycle_incident_type(-1);
                }
                KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                    self.cycle_incident_type(1);
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let index = (c as usize) - ('1' as usize);
                    self.select_incident_type(IncidentType::ALL[index]);
                }
                KeyCode::Tab => self.step2_focus_next(),
                KeyCode::BackTab => self.step2_focus_prev(),
                KeyCode::Enter => self.try_submit(),
                _ => {}
            },
            Step2Field::Ongoing => match event.code {
                KeyCode::Char('y') => self.select_ongoing(Ongoing::Yes),
                KeyCode::Char('n') => self.select_ongoing(Ongoing::No),
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    let next = match self.session.incident.is_ongoing {
                        Some(Ongoing::Yes) => Ongoing::No,
                        _ => Ongoing::Yes,
                    };
                    self.select_ongoing(next);
                }
                KeyCode::Tab => self.step2_focus_next(),
                KeyCode::BackTab => self.step2_focus_prev(),
                KeyCode::Enter => self.try_submit(),
                _ => {}
            },
            Step2Field::Consent => match event.code {
                KeyCode::Char(' ') => {
                    self.session.incident.consent = !self.session.incident.consent;
                    self.errors.remove(&Field::Consent);
                }
                KeyCode::Tab => self.step2_focus_next(),
                KeyCode::BackTab => self.step2_focus_prev(),
                KeyCode::Enter => self.try_submit(),
                _ => {}
            },
            Step2Field::Evidence => match event.code {
                KeyCode::Tab => self.step2_focus_next(),
                KeyCode::BackTab => self.step2_focus_prev(),
                KeyCode::Enter => {
                    if self.evidence_input.trim().is_empty() {
                        self.try_submit();
                    } else {
                        self.attach_evidence();
                    }
                }
                KeyCode::Delete => self.remove_last_evidence(),
                code => self.edit_step2_text(Step2Field::Evidence, code),
            },
            field => match event.code {
                KeyCode::Tab => self.step2_focus_next(),
                KeyCode::BackTab => self.step2_focus_prev(),
                KeyCode::Enter => self.try_submit(),
                code => self.edit_step2_text(field, code),
            },
        }
        WizardAction::None
    }

    fn step2_focus_next(&mut self) {
        self.step2_focus = (self.step2_focus + 1) % STEP2_FIELDS.len();
    }

    fn step2_focus_prev(&mut self) {
        self.step2_focus = (self.step2_focus + STEP2_FIELDS.len() - 1) % STEP2_FIELDS.len();
    }

    fn cycle_incident_type(&mut self, delta: isize) {
        let all = IncidentType::ALL;
        let next = match self.session.incident.incident_type {
            None => 0,
            Some(current) => {
                let index = all.iter().position(|t| *t == current).unwrap_or(0) as isize;
                (index + delta).rem_euclid(all.len() as isize) as usize
            }
        };
        self.select_incident_type(all[next]);
    }

    fn select_incident_type(&mut self, incident_type: IncidentType) {
        self.session.incident.incident_type = Some(incident_type);
        self.errors.remove(&Field::IncidentType);
    }

    fn select_ongoing(&mut self, ongoing: Ongoing) {
        self.session.incident.is_ongoing = Some(ongoing);
        self.errors.remove(&Field::IsOngoing);
    }

    fn edit_step2_text(&mut self, field: Step2Field, code: KeyCode) {
        let incident = &mut self.session.incident;
        let (value, error_field, filter) = match field {
            Step2Field::WhatHappened => (
                &mut incident.what_happened,
                Some(Field::WhatHappened),
                TextFilter::Narrative,
            ),
            Step2Field::IncidentTime => (
                &mut incident.incident_time,
                Some(Field::IncidentTime),
                TextFilter::Any,
            ),
            Step2Field::Platform => (&mut incident.platform, None, TextFilter::Any),
            Step2Field::PlatformUrl => (
                &mut incident.platform_url,
                Some(Field::PlatformUrl),
                TextFilter::Any,
            ),
            Step2Field::Evidence => (
                &mut self.evidence_input,
                Some(Field::Evidence),
                TextFilter::Any,
            ),
            Step2Field::IncidentType | Step2Field::Ongoing | Step2Field::Consent => return,
        };
        if apply_text_key(value, code, filter)
            && let Some(field) = error_field
        {
            self.errors.remove(&field);
        }
    }

    /// Stat the typed path and attach it; failures land on the evidence
    /// field like any other violation
    fn attach_evidence(&mut self) {
        let raw = self.evidence_input.trim().to_string();
        match EvidenceFile::from_path(Path::new(&raw)) {
            Ok(file) => {
                self.session.incident.evidence_files.push(file);
                self.evidence_input.clear();
                self.errors.remove(&Field::Evidence);
            }
            Err(e) => {
                self.errors.insert(Field::Evidence, e.to_string());
            }
        }
    }

    fn remove_last_evidence(&mut self) {
        self.session.incident.evidence_files.pop();
    }

    /// Submit the report, or surface the violations and stay. On success
    /// the session is logged to the submission sink and a case reference
    /// is generated for the confirmation screen.
    fn try_submit(&mut self) {
        let violations = validation::validate_incident(&self.session.incident);
        if violations.is_empty() {
            self.errors.clear();
            let reference = case_ref::generate();
            submit::log_submission(&self.session, &reference);
            self.case_ref = Some(reference);
            self.step = WizardStep::Confirmation;
        } else {
            self.errors = validation::error_map(violations);
        }
    }

    /// Unconditional back transition, data preserved
    fn back_to_reporter_details(&mut self) {
        self.errors.clear();
        self.step = WizardStep::ReporterDetails;
        self.step1_focus = 0;
    }

    // --- Step 3 ---

    fn handle_step3_key(&mut self, event: KeyEvent) -> WizardAction {
        match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') => {
                WizardAction::CopyToClipboard(self.case_ref.clone().unwrap_or_default())
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(reference) = &self.case_ref {
                    submit::log_download_requested(reference);
                }
                WizardAction::None
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.submit_another();
                WizardAction::None
            }
            KeyCode::Enter | KeyCode::Char('h') | KeyCode::Char('H') => self.return_home(),
            _ => WizardAction::None,
        }
    }

    /// Full reset: every field back to its initial value, step 1
    fn submit_another(&mut self) {
        self.session = self.initial.clone();
        self.errors.clear();
        self.show_form = false;
        self.step1_focus = 0;
        self.step2_focus = 0;
        self.evidence_input.clear();
        self.case_ref = None;
        self.step = WizardStep::ReporterDetails;
    }

    /// Return-home action: delegate to the hosting menu when there is
    /// one, otherwise behave exactly like submit-another
    fn return_home(&mut self) -> WizardAction {
        if self.has_host_menu {
            return WizardAction::ReturnToHost;
        }
        self.submit_another();
        WizardAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_str(wizard: &mut ReportWizard, text: &str) {
        for c in text.chars() {
            wizard.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn fill_valid_step1(wizard: &mut ReportWizard) {
        wizard.handle_key(key(KeyCode::Char('1'))); // Individual
        wizard.handle_key(key(KeyCode::Tab)); // -> Anonymous
        wizard.handle_key(key(KeyCode::Tab)); // -> FullName
        type_str(wizard, "Jordan Doe");
        wizard.handle_key(key(KeyCode::Tab)); // -> Country
        type_str(wizard, "Qatar");
        wizard.handle_key(key(KeyCode::Tab)); // -> Email
        type_str(wizard, "jordan@example.com");
        wizard.handle_key(key(KeyCode::Tab)); // -> Phone
        type_str(wizard, "+974 123456789");
    }

    fn fill_valid_step2(wizard: &mut ReportWizard) {
        assert_eq!(wizard.step, WizardStep::IncidentDetails);
        wizard.handle_key(key(KeyCode::Char('1'))); // Phishing
        wizard.handle_key(key(KeyCode::Tab)); // -> Ongoing
        wizard.handle_key(key(KeyCode::Char('n')));
        wizard.handle_key(key(KeyCode::Tab)); // -> WhatHappened
        type_str(
            wizard,
            "I received an email pretending to be my bank and entered my password on a fake site.",
        );
        wizard.handle_key(key(KeyCode::Tab)); // -> IncidentTime
        type_str(wizard, "2026-08-06T14:30:00+03:00");
        // Platform and URL stay optional; jump to consent
        wizard.handle_key(key(KeyCode::Tab)); // -> Platform
        wizard.handle_key(key(KeyCode::Tab)); // -> PlatformUrl
        wizard.handle_key(key(KeyCode::Tab)); // -> Consent
        wizard.handle_key(key(KeyCode::Char(' ')));
    }

    #[test]
    fn test_wizard_creation() {
        let wizard = ReportWizard::new(false);
        assert_eq!(wizard.step, WizardStep::ReporterDetails);
        assert!(!wizard.show_form);
        assert!(wizard.errors.is_empty());
        assert!(wizard.case_ref.is_none());
        assert_eq!(wizard.session, ReportSession::default());
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(WizardStep::ReporterDetails.number(), 1);
        assert_eq!(WizardStep::IncidentDetails.number(), 2);
        assert_eq!(WizardStep::Confirmation.number(), 3);
        assert_eq!(WizardStep::total(), 3);
    }

    #[test]
    fn test_continue_with_empty_step1_populates_errors() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, WizardStep::ReporterDetails);
        assert!(wizard.errors.contains_key(&Field::ReporterType));
        assert!(wizard.errors.contains_key(&Field::FullName));
    }

    #[test]
    fn test_selecting_reporter_type_reveals_form_and_clears_all_errors() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Enter)); // populate errors
        assert!(!wizard.errors.is_empty());

        wizard.handle_key(key(KeyCode::Char('2'))); // Business
        assert!(wizard.show_form);
        assert_eq!(
            wizard.session.reporter.reporter_type,
            Some(ReporterType::Business)
        );
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn test_conditional_panel_follows_reporter_type() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Char('2'))); // Business
        assert!(wizard.step1_fields().contains(&Step1Field::Organization));

        wizard.handle_key(key(KeyCode::Char('3'))); // Parent-Guardian
        let fields = wizard.step1_fields();
        assert!(fields.contains(&Step1Field::Relationship));
        assert!(!fields.contains(&Step1Field::Organization));
    }

    #[test]
    fn test_switching_reporter_type_keeps_conditional_data() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Char('2'))); // Business
        wizard.session.reporter.organization = "Acme Corp".to_string();

        wizard.handle_key(key(KeyCode::Char('1'))); // Individual
        assert_eq!(wizard.session.reporter.organization, "Acme Corp");
    }

    #[test]
    fn test_anonymous_hides_contact_fields_but_keeps_data() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        assert!(wizard.step1_fields().contains(&Step1Field::Email));

        // Move focus back to the anonymity toggle and flip it
        wizard.step1_focus = 1;
        wizard.handle_key(key(KeyCode::Char(' ')));
        assert!(wizard.session.reporter.is_anonymous);
        assert_eq!(
            wizard.step1_fields(),
            vec![Step1Field::ReporterType, Step1Field::Anonymous]
        );
        assert_eq!(wizard.session.reporter.email, "jordan@example.com");

        // Disabling anonymity restores the typed values
        wizard.handle_key(key(KeyCode::Char(' ')));
        assert!(wizard.step1_fields().contains(&Step1Field::Email));
        assert_eq!(wizard.session.reporter.email, "jordan@example.com");
    }

    #[test]
    fn test_anonymous_step1_advances_without_contact_info() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Char('1')));
        wizard.step1_focus = 1;
        wizard.handle_key(key(KeyCode::Char(' '))); // anonymous on
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, WizardStep::IncidentDetails);
    }

    #[test]
    fn test_valid_step1_advances() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, WizardStep::IncidentDetails);
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn test_editing_a_field_clears_only_its_error() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Char('1')));
        wizard.handle_key(key(KeyCode::Enter)); // contact fields empty -> errors
        assert!(wizard.errors.contains_key(&Field::FullName));
        assert!(wizard.errors.contains_key(&Field::Email));

        // Focus FullName and type one character
        wizard.step1_focus = 2;
        assert_eq!(wizard.step1_focused(), Step1Field::FullName);
        wizard.handle_key(key(KeyCode::Char('J')));

        assert!(!wizard.errors.contains_key(&Field::FullName));
        assert!(wizard.errors.contains_key(&Field::Email));
    }

    #[test]
    fn test_error_cleared_even_when_new_value_invalid() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        // Break the email, attempt continue, then edit it again
        wizard.step1_focus = 4;
        assert_eq!(wizard.step1_focused(), Step1Field::Email);
        wizard.session.reporter.email = "not-an-email".to_string();
        wizard.handle_key(key(KeyCode::Enter));
        assert!(wizard.errors.contains_key(&Field::Email));

        // One more bogus character: still invalid, error cleared anyway
        wizard.handle_key(key(KeyCode::Char('x')));
        assert!(!wizard.errors.contains_key(&Field::Email));
    }

    #[test]
    fn test_back_from_step2_preserves_step1_data() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, WizardStep::IncidentDetails);

        wizard.handle_key(key(KeyCode::Esc));
        assert_eq!(wizard.step, WizardStep::ReporterDetails);
        assert_eq!(wizard.session.reporter.full_name, "Jordan Doe");

        // Continue again with unchanged data: straight back to step 2
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, WizardStep::IncidentDetails);
        assert_eq!(wizard.session.reporter.full_name, "Jordan Doe");
    }

    #[test]
    fn test_submit_with_invalid_step2_stays_with_errors() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));

        wizard.handle_key(key(KeyCode::Enter)); // submit empty step 2
        assert_eq!(wizard.step, WizardStep::IncidentDetails);
        assert!(wizard.errors.contains_key(&Field::IncidentType));
        assert!(wizard.errors.contains_key(&Field::Consent));
        assert!(wizard.case_ref.is_none());
    }

    #[test]
    fn test_full_flow_reaches_confirmation_with_case_ref() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));

        assert_eq!(wizard.step, WizardStep::Confirmation);
        let reference = wizard.case_ref.clone().unwrap();
        let pattern = regex::Regex::new(r"^INC-\d{4}-\d{6}$").unwrap();
        assert!(pattern.is_match(&reference), "bad reference: {reference}");
        let year = chrono::Datelike::year(&chrono::Local::now()).to_string();
        assert_eq!(&reference[4..8], year.as_str());
    }

    #[test]
    fn test_case_ref_stable_across_confirmation_keys() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));

        let before = wizard.case_ref.clone();
        wizard.handle_key(key(KeyCode::Char('d')));
        assert_eq!(wizard.case_ref, before);
    }

    #[test]
    fn test_copy_returns_clipboard_action() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));

        let reference = wizard.case_ref.clone().unwrap();
        let action = wizard.handle_key(key(KeyCode::Char('c')));
        assert_eq!(action, WizardAction::CopyToClipboard(reference));
    }

    #[test]
    fn test_submit_another_resets_to_initial_session() {
        let mut wizard = ReportWizard::new(false);
        let initial = wizard.session.clone();
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, WizardStep::Confirmation);

        wizard.handle_key(key(KeyCode::Char('n')));
        assert_eq!(wizard.step, WizardStep::ReporterDetails);
        assert_eq!(wizard.session, initial);
        assert!(!wizard.show_form);
        assert!(wizard.case_ref.is_none());
        assert!(wizard.errors.is_empty());
    }

    #[test]
    fn test_return_home_without_host_resets_like_submit_another() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));

        let action = wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(action, WizardAction::None);
        assert_eq!(wizard.step, WizardStep::ReporterDetails);
        assert_eq!(wizard.session, ReportSession::default());
    }

    #[test]
    fn test_return_home_with_host_delegates() {
        let mut wizard = ReportWizard::new(true);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));

        let action = wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(action, WizardAction::ReturnToHost);
    }

    #[test]
    fn test_step1_escape_with_host_delegates() {
        let mut wizard = ReportWizard::new(true);
        let action = wizard.handle_key(key(KeyCode::Esc));
        assert_eq!(action, WizardAction::ReturnToHost);
    }

    #[test]
    fn test_step1_escape_without_host_resets_flags_only() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        let action = wizard.handle_key(key(KeyCode::Esc));
        assert_eq!(action, WizardAction::None);
        assert!(wizard.session.reporter.reporter_type.is_none());
        assert!(!wizard.session.reporter.is_anonymous);
        assert!(!wizard.show_form);
        // Typed contact data is not part of the local reset
        assert_eq!(wizard.session.reporter.full_name, "Jordan Doe");
    }

    #[test]
    fn test_ongoing_yes_with_type_activates_safety_tips() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));

        assert!(!wizard.show_safety_tips());
        wizard.handle_key(key(KeyCode::Char('1'))); // Phishing
        wizard.handle_key(key(KeyCode::Tab));
        wizard.handle_key(key(KeyCode::Char('y')));
        assert!(wizard.show_safety_tips());

        wizard.handle_key(key(KeyCode::Char('n')));
        assert!(!wizard.show_safety_tips());
    }

    #[test]
    fn test_narrative_capped_at_max_length() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        wizard.step2_focus = 2;
        assert_eq!(wizard.step2_focused(), Step2Field::WhatHappened);

        wizard.session.incident.what_happened = "a".repeat(WHAT_HAPPENED_MAX);
        wizard.handle_key(key(KeyCode::Char('z')));
        assert_eq!(
            wizard.session.incident.what_happened.chars().count(),
            WHAT_HAPPENED_MAX
        );
    }

    #[test]
    fn test_victim_age_accepts_digits_only() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Char('3'))); // Parent-Guardian
        let fields = wizard.step1_fields();
        wizard.step1_focus = fields
            .iter()
            .position(|f| *f == Step1Field::VictimAge)
            .unwrap();

        type_str(&mut wizard, "1a4");
        assert_eq!(wizard.session.reporter.victim_age, "14");
    }

    #[test]
    fn test_evidence_attach_and_remove() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evidence.log");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"suspicious traffic").unwrap();

        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        wizard.step2_focus = 7;
        assert_eq!(wizard.step2_focused(), Step2Field::Evidence);

        type_str(&mut wizard, &path.display().to_string());
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.session.incident.evidence_files.len(), 1);
        assert_eq!(wizard.session.incident.evidence_files[0].name, "evidence.log");
        assert!(wizard.evidence_input.is_empty());

        wizard.handle_key(key(KeyCode::Delete));
        assert!(wizard.session.incident.evidence_files.is_empty());
    }

    #[test]
    fn test_evidence_attach_failure_surfaces_field_error() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        wizard.step2_focus = 7;

        type_str(&mut wizard, "/no/such/file.png");
        wizard.handle_key(key(KeyCode::Enter));
        assert!(wizard.session.incident.evidence_files.is_empty());
        assert!(wizard.errors.contains_key(&Field::Evidence));

        // Typing again clears the attach error
        wizard.handle_key(key(KeyCode::Backspace));
        assert!(!wizard.errors.contains_key(&Field::Evidence));
    }

    #[test]
    fn test_submission_allowed_without_evidence() {
        let mut wizard = ReportWizard::new(false);
        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        assert!(wizard.session.incident.evidence_files.is_empty());
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(wizard.step, WizardStep::Confirmation);
    }

    #[test]
    fn test_form_defaults_prefill_country_and_survive_reset() {
        let form = crate::config::FormConfig {
            default_country: Some("Norway".to_string()),
        };
        let mut wizard = ReportWizard::new(false).with_form_defaults(&form);
        assert_eq!(wizard.session.reporter.country, "Norway");

        fill_valid_step1(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        fill_valid_step2(&mut wizard);
        wizard.handle_key(key(KeyCode::Enter));
        wizard.handle_key(key(KeyCode::Char('n')));
        assert_eq!(wizard.session.reporter.country, "Norway");
    }

    #[test]
    fn test_paste_goes_into_focused_field() {
        let mut wizard = ReportWizard::new(false);
        wizard.handle_key(key(KeyCode::Char('1')));
        wizard.step1_focus = 2;
        assert_eq!(wizard.step1_focused(), Step1Field::FullName);

        wizard.handle_paste("Jordan Doe");
        assert_eq!(wizard.session.reporter.full_name, "Jordan Doe");
    }

    #[test]
    fn test_tab_cycles_through_visible_fields() {
        let mut wizard = ReportWizard::new(false);
        // Only two fields visible before a reporter type is chosen
        assert_eq!(wizard.step1_fields().len(), 2);
        wizard.handle_key(key(KeyCode::Tab));
        assert_eq!(wizard.step1_focused(), Step1Field::Anonymous);
        wizard.handle_key(key(KeyCode::Tab));
        assert_eq!(wizard.step1_focused(), Step1Field::ReporterType);
    }
}
