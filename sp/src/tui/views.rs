//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI
//! from App but never modifies it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::trace;

use super::app::{App, Field};
use crate::form::FormState;
use crate::plan::Level;
use crate::render;

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const FOCUS: Color = Color::Rgb(255, 215, 0); // Gold
    pub const PENDING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const COMPLETE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const FAILED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(app: &App, frame: &mut Frame) {
    trace!(?app.focus, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Form
            Constraint::Min(0),    // Plan
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_form(app, frame, chunks[1]);
    render_plan(app, frame, chunks[2]);
    render_footer(app.controller().state(), frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " Skill Plan ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled("AI-generated daily study plans", Style::default().fg(colors::DIM)),
    ]);
    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors::DIM));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn field_label(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::KEYBIND)
    };
    Span::styled(format!("{:<8}", label), style)
}

fn render_form(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.controller().state();
    let locked = state.is_locked();
    let disabled = Style::default().fg(colors::DIM);

    // Skill
    let mut skill = vec![field_label("Skill", app.focus == Field::Skill)];
    if state.skill.is_empty() {
        skill.push(Span::styled("e.g. Python, Guitar, Public Speaking", disabled));
    } else {
        skill.push(Span::raw(state.skill.clone()));
    }
    if app.focus == Field::Skill {
        skill.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }

    // Days
    let days_text = match &app.days_buffer {
        Some(buffer) if app.focus == Field::Days => format!("{}_", buffer),
        _ => state.days.to_string(),
    };
    let mut days = vec![
        field_label("Days", app.focus == Field::Days),
        Span::styled(days_text, if locked { disabled } else { Style::default() }),
    ];
    if state.is_recommending {
        days.push(Span::styled("  recommending...", Style::default().fg(colors::PENDING)));
    } else if !locked {
        days.push(Span::styled("  AI recommended, adjust with +/-", disabled));
    }

    // Level
    let mut level = vec![field_label("Level", app.focus == Field::Level)];
    for (idx, option) in Level::ALL.iter().enumerate() {
        if idx > 0 {
            level.push(Span::raw("  "));
        }
        let style = match (locked, *option == state.level) {
            (true, _) => disabled,
            (false, true) => Style::default().fg(colors::COMPLETE).add_modifier(Modifier::BOLD),
            (false, false) => Style::default(),
        };
        let marker = if *option == state.level { "(*) " } else { "( ) " };
        level.push(Span::styled(format!("{}{}", marker, option), style));
    }

    // Submit
    let submit_text = if state.is_loading {
        "[ Generating Plan... ]"
    } else {
        "[ Generate Plan ]"
    };
    let submit_style = match (state.can_submit(), app.focus == Field::Submit) {
        (false, _) => disabled,
        (true, true) => Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD | Modifier::REVERSED),
        (true, false) => Style::default().fg(colors::FOCUS),
    };
    let submit = Line::from(vec![Span::raw(" ".repeat(8)), Span::styled(submit_text, submit_style)]);

    let lines = vec![Line::from(skill), Line::from(days), Line::from(level), submit];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Create Your Plan ")
        .border_style(Style::default().fg(colors::DIM));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_plan(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.controller().state();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Your Learning Plan ")
        .border_style(Style::default().fg(colors::DIM));

    let lines: Vec<Line> = if state.is_loading {
        vec![Line::from(Span::styled(
            format!("Generating a {}-day plan for {}...", state.days, state.skill.trim()),
            Style::default().fg(colors::PENDING),
        ))]
    } else if let Some(error) = &state.error {
        vec![Line::from(Span::styled(error.clone(), Style::default().fg(colors::FAILED)))]
    } else if let Some(plan) = state.plan.as_ref().filter(|p| !p.is_empty()) {
        render::plan_text(plan)
    } else if state.plan.is_some() {
        vec![Line::from(Span::styled(
            "The model returned no days. Try again.",
            Style::default().fg(colors::PENDING),
        ))]
    } else {
        welcome_lines()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn welcome_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Your plan will appear here",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Enter a skill; the day count is recommended once you stop typing.",
            Style::default().fg(colors::DIM),
        )),
    ]
}

fn render_footer(state: &FormState, frame: &mut Frame, area: Rect) {
    let keybinds = if state.is_locked() {
        vec![("[type]", "Skill"), ("[Esc]", "Quit")]
    } else {
        vec![
            ("[Tab]", "Next"),
            ("[+/-]", "Days"),
            ("[Enter]", "Generate"),
            ("[PgUp/PgDn]", "Scroll"),
            ("[Esc]", "Quit"),
        ]
    };

    let mut spans = Vec::new();
    for (key, action) in keybinds {
        spans.push(Span::styled(format!(" {} ", key), Style::default().fg(colors::KEYBIND)));
        spans.push(Span::styled(format!("{} ", action), Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
