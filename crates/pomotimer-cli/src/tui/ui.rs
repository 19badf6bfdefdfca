//! UI rendering for the TUI.

use pomotimer_core::{SessionType, SettingField, TimerState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::tui::app::{App, HELP};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Clock
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Controls
            Constraint::Min(6),    // Settings
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_clock(frame, app, chunks[0]);
    render_progress(frame, app, chunks[1]);
    render_controls(frame, app, chunks[2]);
    render_settings(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn session_color(session_type: SessionType) -> Color {
    match session_type {
        SessionType::Work => Color::Red,
        SessionType::ShortBreak => Color::Green,
        SessionType::LongBreak => Color::Blue,
    }
}

fn render_clock(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let engine = &app.engine;
    let color = session_color(engine.session_type());
    let lines = vec![
        Line::from(Span::styled(
            engine.session_type().label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            engine.display(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Completed work sessions: {}", engine.work_sessions_completed()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let clock = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" pomotimer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(clock, area);
}

fn render_progress(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let engine = &app.engine;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(session_color(engine.session_type())))
        .ratio(engine.progress().clamp(0.0, 1.0));
    frame.render_widget(gauge, area);
}

fn render_controls(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let toggle = match app.engine.state() {
        TimerState::Running => "[space] Pause",
        TimerState::Paused => "[space] Resume",
        TimerState::Idle => "[space] Pause/Resume",
    };
    let start_style = if app.engine.is_running() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let controls = Line::from(vec![
        Span::styled("[s] Start", start_style),
        Span::raw("   "),
        Span::raw(toggle),
        Span::raw("   "),
        Span::raw("[r] Reset"),
        Span::raw("   "),
        Span::raw("[n] Skip"),
    ]);
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_settings(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let editable = app.engine.settings_editable();
    let settings = app.engine.settings();

    let lines: Vec<Line<'_>> = SettingField::ALL
        .iter()
        .map(|&field| {
            let (min, max) = field.bounds();
            let selected = field == app.selected;
            let value = match (&app.input, selected) {
                (Some(input), true) => format!("{input}_"),
                _ => settings.get(field).to_string(),
            };
            let marker = if selected { "> " } else { "  " };
            let style = match (editable, selected) {
                (false, _) => Style::default().fg(Color::DarkGray),
                (true, true) => Style::default().add_modifier(Modifier::BOLD),
                (true, false) => Style::default(),
            };
            Line::from(vec![
                Span::styled(format!("{marker}{:<22}", field.label()), style),
                Span::styled(format!("{value:>5}"), style),
                Span::styled(
                    format!("  ({min}-{max})"),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let title = if editable {
        " Settings "
    } else {
        " Settings (locked while running) "
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if editable {
                Color::White
            } else {
                Color::DarkGray
            })),
    );
    frame.render_widget(widget, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
