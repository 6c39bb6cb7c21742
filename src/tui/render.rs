//! App-Level Rendering
//!
//! Dispatches to the landing menu or the wizard renderer.

use super::app::{App, AppMode, MENU_ITEMS};
use super::wizard_render;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const ACCENT_BLUE: Color = Color::Rgb(70, 130, 180);
const OK_GREEN: Color = Color::Rgb(80, 180, 120);

/// Render the whole frame for the current app mode
pub fn render(f: &mut Frame, app: &App) {
    match app.mode {
        AppMode::Menu => render_menu(f, app),
        AppMode::Wizard => {
            if let Some(wizard) = &app.wizard {
                wizard_render::render_wizard(f, wizard);
            }
        }
    }
}

fn render_menu(f: &mut Frame, app: &App) {
    let area = f.area();

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(14.min(area.height.saturating_sub(2))),
            Constraint::Min(0),
        ])
        .split(area);
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(56.min(area.width.saturating_sub(2))),
            Constraint::Min(0),
        ])
        .split(v_chunks[1]);

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Report New Incident",
            Style::default().fg(OK_GREEN).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Found a security incident? Report it immediately",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "to our security team.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let selected = i == app.menu_selected;
        lines.push(Line::from(vec![
            Span::styled(
                if selected { " > " } else { "   " },
                Style::default().fg(ACCENT_BLUE),
            ),
            Span::styled(
                (*item).to_string(),
                Style::default()
                    .fg(if selected { Color::White } else { Color::DarkGray })
                    .add_modifier(if selected { Modifier::BOLD } else { Modifier::empty() }),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " [Enter] ",
            Style::default().fg(OK_GREEN).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Select  ", Style::default().fg(Color::White)),
        Span::styled(
            "[q] ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled("Quit", Style::default().fg(Color::White)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT_BLUE))
                .title(Span::styled(
                    " Incident Reporting ",
                    Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, h_chunks[1]);
}
