//! Plan rendering
//!
//! Pure functions of a [`Plan`]: one card per day, in array order.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::plan::{DayPlan, Plan};

/// Plain text, one card per day separated by a blank line
pub fn plan_lines(plan: &Plan) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, day) in plan.days().iter().enumerate() {
        if idx > 0 {
            lines.push(String::new());
        }
        lines.extend(day_lines(day));
    }
    lines
}

fn day_lines(day: &DayPlan) -> Vec<String> {
    let mut lines = vec![format!("Day {}: {}", day.day, day.goal)];
    lines.push("  Key concepts:".to_string());
    lines.extend(day.concepts.iter().map(|c| format!("    - {}", c)));
    lines.push(format!("  Task: {}", day.task));
    lines
}

/// Styled lines for the terminal view
pub fn plan_text(plan: &Plan) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (idx, day) in plan.days().iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.extend(day_card(day));
    }
    lines
}

fn day_card(day: &DayPlan) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("Day {} ", day.day),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(day.goal.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ])];

    lines.push(Line::from(Span::styled(
        "  Key concepts",
        Style::default().fg(Color::Cyan),
    )));
    for concept in &day.concepts {
        lines.push(Line::from(vec![
            Span::styled("    • ", Style::default().fg(Color::DarkGray)),
            Span::raw(concept.clone()),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("  Task ", Style::default().fg(Color::Green)),
        Span::raw(day.task.clone()),
    ]));
    lines
}
