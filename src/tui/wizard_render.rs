//! Wizard Rendering
//!
//! Render functions for each step of the report wizard. All lines are
//! built from owned strings so the widget tree borrows nothing from the
//! wizard state.

use super::wizard::{ReportWizard, Step1Field, Step2Field, WizardStep};
use crate::report::safety_tips;
use crate::report::types::{
    ACCEPTED_EXTENSIONS, Ongoing, ReporterProfile, ReporterType, title_case_slug,
};
use crate::report::validation::Field;
use crate::utils::{ellipsize, tail_cols};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const ACCENT_BLUE: Color = Color::Rgb(70, 130, 180);
const ALERT_RED: Color = Color::Rgb(220, 80, 80);
const OK_GREEN: Color = Color::Rgb(80, 180, 120);
const WARN_YELLOW: Color = Color::Rgb(218, 165, 32);

/// Columns available for a field value before windowing kicks in
const VALUE_COLS: usize = 42;

/// Render the entire wizard
pub fn render_wizard(f: &mut Frame, wizard: &ReportWizard) {
    let area = f.area();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(36.min(area.height.saturating_sub(2))),
            Constraint::Min(0),
        ])
        .split(area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(72.min(area.width.saturating_sub(2))),
            Constraint::Min(0),
        ])
        .split(v_chunks[1]);

    let wizard_area = h_chunks[1];

    let mut lines: Vec<Line<'static>> = Vec::new();

    // Header
    let step = wizard.step;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        progress_dots(&step),
        Style::default().fg(ACCENT_BLUE),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        step.title().to_string(),
        Style::default()
            .fg(if step == WizardStep::Confirmation {
                OK_GREEN
            } else {
                ACCENT_BLUE
            })
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        step.subtitle().to_string(),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    match step {
        WizardStep::ReporterDetails => render_reporter_details(&mut lines, wizard),
        WizardStep::IncidentDetails => render_incident_details(&mut lines, wizard),
        WizardStep::Confirmation => render_confirmation(&mut lines, wizard),
    }

    // Navigation footer
    lines.push(Line::from(""));
    lines.push(footer_line(&step));

    let title = format!(
        " Incident Report ({}/{}) ",
        step.number(),
        WizardStep::total()
    );
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT_BLUE))
                .title(Span::styled(
                    title,
                    Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, wizard_area);
}

/// Progress dots (filled for reached steps, hollow for remaining)
fn progress_dots(step: &WizardStep) -> String {
    let current = step.number();
    (1..=WizardStep::total())
        .map(|i| if i <= current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn footer_line(step: &WizardStep) -> Line<'static> {
    let hint = |key: &str, label: &str, color: Color| {
        vec![
            Span::styled(
                format!(" [{key}] "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{label} "), Style::default().fg(Color::White)),
        ]
    };

    let mut spans = Vec::new();
    match step {
        WizardStep::ReporterDetails => {
            spans.extend(hint("Esc", "Menu", ALERT_RED));
            spans.extend(hint("Tab", "Next Field", ACCENT_BLUE));
            spans.extend(hint("Enter", "Continue to Step 2", WARN_YELLOW));
        }
        WizardStep::IncidentDetails => {
            spans.extend(hint("Esc", "Back to Step 1", ALERT_RED));
            spans.extend(hint("Tab", "Next Field", ACCENT_BLUE));
            spans.extend(hint("Enter", "Submit Report", WARN_YELLOW));
        }
        WizardStep::Confirmation => {
            spans.extend(hint("C", "Copy", ACCENT_BLUE));
            spans.extend(hint("D", "Download", ACCENT_BLUE));
            spans.extend(hint("N", "Submit Another", WARN_YELLOW));
            spans.extend(hint("Enter", "Return Home", OK_GREEN));
        }
    }
    Line::from(spans)
}

/// One labelled input line with focus styling and value windowing
fn push_text_field(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let (display, dimmed) = if value.is_empty() {
        (placeholder.to_string(), true)
    } else {
        (tail_cols(value, VALUE_COLS).to_string(), false)
    };
    let cursor = if focused { "_" } else { "" };
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {label}: "),
            Style::default().fg(if focused { ACCENT_BLUE } else { Color::DarkGray }),
        ),
        Span::styled(
            format!("{display}{cursor}"),
            Style::default().fg(if dimmed || !focused {
                Color::DarkGray
            } else {
                Color::White
            }),
        ),
    ]));
}

fn push_error(lines: &mut Vec<Line<'static>>, wizard: &ReportWizard, field: Field) {
    if let Some(message) = wizard.errors.get(&field) {
        lines.push(Line::from(Span::styled(
            format!("    ! {message}"),
            Style::default().fg(ALERT_RED),
        )));
    }
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {title}"),
        Style::default().fg(WARN_YELLOW).add_modifier(Modifier::BOLD),
    )));
}

// --- Step 1 ---

fn render_reporter_details(lines: &mut Vec<Line<'static>>, wizard: &ReportWizard) {
    let reporter = &wizard.session.reporter;
    let type_focused = wizard.step1_focused() == Step1Field::ReporterType;

    lines.push(Line::from(Span::styled(
        "  Choose reporter type",
        Style::default().fg(if type_focused { ACCENT_BLUE } else { Color::DarkGray }),
    )));
    for reporter_type in ReporterType::ALL {
        let selected = reporter.reporter_type == Some(reporter_type);
        let prefix = if selected && type_focused { " > " } else { "   " };
        let marker = if selected { "[*]" } else { "[ ]" };
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(WARN_YELLOW)),
            Span::styled(
                marker,
                Style::default().fg(if selected { WARN_YELLOW } else { Color::DarkGray }),
            ),
            Span::styled(
                format!(" {}", reporter_type.label()),
                Style::default()
                    .fg(if selected { Color::White } else { Color::DarkGray })
                    .add_modifier(if selected { Modifier::BOLD } else { Modifier::empty() }),
            ),
        ]));
    }
    push_error(lines, wizard, Field::ReporterType);
    lines.push(Line::from(""));

    // Anonymity toggle
    let anon_focused = wizard.step1_focused() == Step1Field::Anonymous;
    let marker = if reporter.is_anonymous { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        Span::styled(
            if anon_focused { " > " } else { "   " },
            Style::default().fg(WARN_YELLOW),
        ),
        Span::styled(
            format!("{marker} Anonymity: \"I prefer to stay anonymous\""),
            Style::default().fg(if anon_focused { Color::White } else { Color::DarkGray }),
        ),
    ]));

    if reporter.is_anonymous {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  ! Warning: Choosing anonymity limits our ability to follow up",
            Style::default().fg(WARN_YELLOW),
        )));
        lines.push(Line::from(Span::styled(
            "    on your report and provide updates.",
            Style::default().fg(WARN_YELLOW),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Anonymous reporting selected",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        return;
    }

    if !wizard.show_form {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Select a reporter type to continue",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        return;
    }

    push_section(lines, "Reporter Information");
    let focused = wizard.step1_focused();
    push_text_field(
        lines,
        "Full Name *",
        &reporter.full_name,
        "Enter your full name",
        focused == Step1Field::FullName,
    );
    push_error(lines, wizard, Field::FullName);
    push_text_field(
        lines,
        "Country *",
        &reporter.country,
        "Enter your country",
        focused == Step1Field::Country,
    );
    push_error(lines, wizard, Field::Country);
    push_text_field(
        lines,
        "Email Address *",
        &reporter.email,
        "your.email@example.com",
        focused == Step1Field::Email,
    );
    push_error(lines, wizard, Field::Email);
    push_text_field(
        lines,
        "Phone Number *",
        &reporter.phone,
        "+974 123456789",
        focused == Step1Field::Phone,
    );
    push_error(lines, wizard, Field::Phone);

    match reporter.reporter_type {
        Some(ReporterType::Business) => {
            push_section(lines, "Business Information");
            push_text_field(
                lines,
                "Organization",
                &reporter.organization,
                "Company name",
                focused == Step1Field::Organization,
            );
            push_text_field(
                lines,
                "Role/Title",
                &reporter.role,
                "Your position/title",
                focused == Step1Field::Role,
            );
        }
        Some(ReporterType::ParentGuardian) => {
            push_section(lines, "Guardian Information");
            push_text_field(
                lines,
                "Relationship to Victim",
                &reporter.relationship,
                "e.g., Parent, Guardian, Legal Representative",
                focused == Step1Field::Relationship,
            );
            push_text_field(
                lines,
                "Victim's Age",
                &reporter.victim_age,
                "Age (if applicable)",
                focused == Step1Field::VictimAge,
            );
        }
        Some(ReporterType::Other) => {
            push_section(lines, "Additional Information");
            push_text_field(
                lines,
                "Your Role/Relationship",
                &reporter.reporter_role,
                "Describe your role or relationship to the incident",
                focused == Step1Field::ReporterRole,
            );
            push_text_field(
                lines,
                "Additional Context",
                &reporter.additional_info,
                "Any additional information that might be relevant",
                focused == Step1Field::AdditionalInfo,
            );
        }
        _ => {}
    }
}

// --- Step 2 ---

fn render_incident_details(lines: &mut Vec<Line<'static>>, wizard: &ReportWizard) {
    let incident = &wizard.session.incident;
    let focused = wizard.step2_focused();

    // Incident type: compact selector cycled with arrow keys
    let type_focused = focused == Step2Field::IncidentType;
    let type_label = incident
        .incident_type
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| "Select incident type".to_string());
    lines.push(Line::from(vec![
        Span::styled(
            "  Incident Type *: ",
            Style::default().fg(if type_focused { ACCENT_BLUE } else { Color::DarkGray }),
        ),
        Span::styled(
            format!("‹ {type_label} ›"),
            Style::default()
                .fg(if incident.incident_type.is_some() {
                    Color::White
                } else {
                    Color::DarkGray
                })
                .add_modifier(if type_focused { Modifier::BOLD } else { Modifier::empty() }),
        ),
    ]));
    push_error(lines, wizard, Field::IncidentType);

    // Ongoing radio
    let ongoing_focused = focused == Step2Field::Ongoing;
    let yes = incident.is_ongoing == Some(Ongoing::Yes);
    let no = incident.is_ongoing == Some(Ongoing::No);
    lines.push(Line::from(vec![
        Span::styled(
            "  Is it ongoing right now? *  ",
            Style::default().fg(if ongoing_focused { ACCENT_BLUE } else { Color::DarkGray }),
        ),
        Span::styled(
            format!("{} Yes   ", if yes { "(•)" } else { "( )" }),
            Style::default().fg(if yes { Color::White } else { Color::DarkGray }),
        ),
        Span::styled(
            format!("{} No", if no { "(•)" } else { "( )" }),
            Style::default().fg(if no { Color::White } else { Color::DarkGray }),
        ),
    ]));
    push_error(lines, wizard, Field::IsOngoing);

    // Safety banner for ongoing incidents
    if wizard.show_safety_tips()
        && let Some(incident_type) = incident.incident_type
    {
        lines.push(Line::from(Span::styled(
            "  Immediate Safety Tips",
            Style::default().fg(ALERT_RED).add_modifier(Modifier::BOLD),
        )));
        for tip in safety_tips::tips_for(incident_type) {
            lines.push(Line::from(Span::styled(
                format!("    • {tip}"),
                Style::default().fg(ALERT_RED),
            )));
        }
    }
    lines.push(Line::from(""));

    // Narrative
    push_text_field(
        lines,
        "What happened? *",
        &incident.what_happened,
        "Describe the incident in detail (50-600 characters)",
        focused == Step2Field::WhatHappened,
    );
    lines.push(Line::from(Span::styled(
        format!("    {}/600 characters", incident.what_happened.chars().count()),
        Style::default().fg(Color::DarkGray),
    )));
    push_error(lines, wizard, Field::WhatHappened);

    // Time
    push_text_field(
        lines,
        "When did it start? *",
        &incident.incident_time,
        "2026-08-06T14:30:00+03:00",
        focused == Step2Field::IncidentTime,
    );
    if !wizard.errors.contains_key(&Field::IncidentTime) {
        lines.push(Line::from(Span::styled(
            "    Select date and time when the incident occurred",
            Style::default().fg(Color::DarkGray),
        )));
    }
    push_error(lines, wizard, Field::IncidentTime);

    // Location
    push_text_field(
        lines,
        "Platform",
        &incident.platform,
        "Platform/Site/App name",
        focused == Step2Field::Platform,
    );
    push_text_field(
        lines,
        "URL",
        &incident.platform_url,
        "URL (if applicable)",
        focused == Step2Field::PlatformUrl,
    );
    push_error(lines, wizard, Field::PlatformUrl);

    // Consent
    let consent_focused = focused == Step2Field::Consent;
    let marker = if incident.consent { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        Span::styled(
            if consent_focused { " > " } else { "   " },
            Style::default().fg(WARN_YELLOW),
        ),
        Span::styled(
            format!(
                "{marker} * I consent to you storing and processing this information \
                 for investigation purposes"
            ),
            Style::default().fg(if consent_focused { Color::White } else { Color::DarkGray }),
        ),
    ]));
    push_error(lines, wizard, Field::Consent);

    // Evidence
    lines.push(Line::from(""));
    push_text_field(
        lines,
        "Evidence (Optional)",
        &wizard.evidence_input,
        "Path to a screenshot, PDF, email (.eml) or log",
        focused == Step2Field::Evidence,
    );
    lines.push(Line::from(Span::styled(
        format!(
            "    Accepted: {} (Enter attaches, Del removes last)",
            ACCEPTED_EXTENSIONS.join(", ")
        ),
        Style::default().fg(Color::DarkGray),
    )));
    push_error(lines, wizard, Field::Evidence);
    for file in &incident.evidence_files {
        lines.push(Line::from(vec![
            Span::styled("    ✔ ", Style::default().fg(OK_GREEN)),
            Span::styled(
                ellipsize(&file.name, 40),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("  {}", format_size_kb(file.size_bytes)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
}

// --- Step 3 ---

fn render_confirmation(lines: &mut Vec<Line<'static>>, wizard: &ReportWizard) {
    let session = &wizard.session;
    let incident = &session.incident;

    lines.push(Line::from(Span::styled(
        "  Case Reference Number",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {}", wizard.case_ref.as_deref().unwrap_or("-")),
            Style::default().fg(WARN_YELLOW).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  [Active]", Style::default().fg(OK_GREEN)),
    ]));
    lines.push(Line::from(Span::styled(
        "  Save this reference number to track your report or share with authorities",
        Style::default().fg(Color::DarkGray),
    )));

    push_section(lines, "Report Summary");
    summary_row(lines, "Reporter Type", reporter_label(&session.reporter));
    let incident_label = incident
        .incident_type
        .map(|t| title_case_slug(t.slug()))
        .unwrap_or_else(|| "Not specified".to_string());
    let ongoing_badge = match incident.is_ongoing {
        Some(Ongoing::Yes) => " [Ongoing]",
        _ => " [Resolved]",
    };
    lines.push(Line::from(vec![
        Span::styled("  Incident Type: ", Style::default().fg(Color::DarkGray)),
        Span::styled(incident_label, Style::default().fg(Color::White)),
        Span::styled(
            ongoing_badge,
            Style::default().fg(if incident.is_ongoing == Some(Ongoing::Yes) {
                ALERT_RED
            } else {
                Color::DarkGray
            }),
        ),
    ]));
    summary_row(
        lines,
        "Incident Date & Time",
        format_incident_time(&incident.incident_time),
    );
    if !incident.platform.trim().is_empty() {
        summary_row(lines, "Platform", incident.platform.clone());
    }
    summary_row(lines, "Description", ellipsize(&incident.what_happened, 100));
    if !incident.evidence_files.is_empty() {
        summary_row(
            lines,
            "Evidence Attached",
            format!("{} file(s)", incident.evidence_files.len()),
        );
    }

    push_section(lines, "What happens next?");
    let follow_up = if session.reporter.is_anonymous {
        "Updates will be posted to your case reference number (check anonymously)"
    } else {
        "We may contact you for additional information or updates"
    };
    let steps = [
        "Your report will be reviewed by our cybercrime team within 24-48 hours",
        follow_up,
        "Share your Case ID with law enforcement or financial institutions if needed",
        "Download your report summary for your records",
    ];
    for (i, text) in steps.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(ACCENT_BLUE)),
            Span::styled((*text).to_string(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Download Report Summary (PDF document with all details)",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));
}

fn summary_row(lines: &mut Vec<Line<'static>>, label: &str, value: String) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ]));
}

/// Summary label for the reporter: anonymity wins over the underlying type
fn reporter_label(reporter: &ReporterProfile) -> String {
    if reporter.is_anonymous {
        return "Anonymous".to_string();
    }
    reporter
        .reporter_type
        .map(|t| title_case_slug(t.slug()))
        .unwrap_or_else(|| "Not specified".to_string())
}

/// Human-readable timestamp: RFC 3339 values are reformatted, fallback
/// strings shown verbatim
fn format_incident_time(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Not specified".to_string();
    }
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%B %-d, %Y, %-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn format_size_kb(size_bytes: u64) -> String {
    format!("{:.1} KB", size_bytes as f64 / 1024.0)
}
