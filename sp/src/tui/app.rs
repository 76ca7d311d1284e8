//! TUI application - key handling
//!
//! The App owns the form controller and which field has focus. It does not
//! do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::time::Instant;

use crate::form::FormController;

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Skill,
    Days,
    Level,
    Submit,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Self::Skill => Self::Days,
            Self::Days => Self::Level,
            Self::Level => Self::Submit,
            Self::Submit => Self::Skill,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Skill => Self::Submit,
            Self::Days => Self::Skill,
            Self::Level => Self::Days,
            Self::Submit => Self::Level,
        }
    }
}

/// TUI application
pub struct App {
    controller: FormController,
    /// Focused field
    pub focus: Field,
    /// Plan scroll offset in lines
    pub scroll: u16,
    /// Typed digits for the days field, applied on leaving it
    pub days_buffer: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: FormController) -> Self {
        Self {
            controller,
            focus: Field::default(),
            scroll: 0,
            days_buffer: None,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return true;
            }
            (KeyCode::Tab, _) => self.move_focus(self.focus.next()),
            (KeyCode::BackTab, _) => self.move_focus(self.focus.prev()),
            (KeyCode::PageDown, _) => self.scroll = self.scroll.saturating_add(5),
            (KeyCode::PageUp, _) => self.scroll = self.scroll.saturating_sub(5),
            (KeyCode::Enter, _) => self.submit(),
            _ => match self.focus {
                Field::Skill => self.handle_skill_key(key, now),
                Field::Days => self.handle_days_key(key),
                Field::Level => self.handle_level_key(key),
                Field::Submit => {}
            },
        }
        false
    }

    /// Insert pasted text into the focused field
    pub fn handle_paste(&mut self, text: &str, now: Instant) {
        if self.focus == Field::Skill {
            // Line breaks and tabs become spaces so words stay apart
            let single_line: String = text
                .chars()
                .map(|c| if c.is_whitespace() { ' ' } else { c })
                .filter(|c| !c.is_control())
                .collect();
            let skill = format!("{}{}", self.controller.state().skill, single_line);
            self.controller.set_skill(skill, now);
        }
    }

    fn submit(&mut self) {
        self.commit_days_buffer();
        if self.controller.submit() {
            self.scroll = 0;
        }
    }

    fn move_focus(&mut self, target: Field) {
        self.commit_days_buffer();
        // Locked fields are skipped until a skill is entered
        let locked = self.controller.state().is_locked();
        self.focus = if locked && matches!(target, Field::Days | Field::Level) {
            match target {
                t if t == self.focus.next() => Field::Submit,
                _ => Field::Skill,
            }
        } else {
            target
        };
    }

    fn handle_skill_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.controller.push_skill_char(c, now);
            }
            KeyCode::Backspace => self.controller.pop_skill_char(now),
            KeyCode::Down => self.move_focus(Field::Days),
            _ => {}
        }
    }

    fn handle_days_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('+') => {
                self.commit_days_buffer();
                self.controller.increment_days();
            }
            KeyCode::Down | KeyCode::Char('-') => {
                self.commit_days_buffer();
                self.controller.decrement_days();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let buffer = self.days_buffer.get_or_insert_with(String::new);
                if buffer.len() < 2 {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.days_buffer.as_mut() {
                    buffer.pop();
                }
            }
            _ => {}
        }
    }

    fn handle_level_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => self.controller.prev_level(),
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char(' ') => {
                self.controller.next_level()
            }
            _ => {}
        }
    }

    /// Apply typed digits to the days field, clamped by the form
    fn commit_days_buffer(&mut self) {
        if let Some(buffer) = self.days_buffer.take()
            && let Ok(days) = buffer.parse::<u32>()
        {
            self.controller.set_days(days);
        }
    }
}
