//! Form state
//!
//! Plain data plus the transitions the form allows. No I/O here.

use crate::gateway::GatewayError;
use crate::plan::{DEFAULT_DAYS, Level, Plan};

/// Smallest day count the form accepts
pub const FORM_DAYS_MIN: u32 = 1;

/// Largest day count the form accepts
///
/// Wider than the recommendation range so the user can override it.
pub const FORM_DAYS_MAX: u32 = 30;

/// Inputs for one plan generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub skill: String,
    pub level: Level,
    pub days: u32,
}

/// Everything the form shows
#[derive(Debug, Clone)]
pub struct FormState {
    pub skill: String,
    pub level: Level,
    pub days: u32,
    /// A plan generation is in flight
    pub is_loading: bool,
    /// A day-count recommendation is in flight
    pub is_recommending: bool,
    /// Last generated plan
    pub plan: Option<Plan>,
    /// Last generation failure, as shown to the user
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            skill: String::new(),
            level: Level::default(),
            days: DEFAULT_DAYS,
            is_loading: false,
            is_recommending: false,
            plan: None,
            error: None,
        }
    }

    /// No skill entered yet: days and level are disabled
    pub fn is_locked(&self) -> bool {
        self.skill.trim().is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_locked() && !self.is_loading
    }

    pub fn set_days(&mut self, days: u32) {
        self.days = days.clamp(FORM_DAYS_MIN, FORM_DAYS_MAX);
    }

    pub fn increment_days(&mut self) {
        self.set_days(self.days.saturating_add(1));
    }

    pub fn decrement_days(&mut self) {
        self.set_days(self.days.saturating_sub(1));
    }

    /// Write a recommended day count into the form
    pub fn apply_recommendation(&mut self, days: u32) {
        self.set_days(days);
        self.is_recommending = false;
    }

    /// Start a generation if the form allows it
    ///
    /// Clears the previous plan and error.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if !self.can_submit() {
            return None;
        }

        self.is_loading = true;
        self.error = None;
        self.plan = None;

        Some(SubmitRequest {
            skill: self.skill.clone(),
            level: self.level,
            days: self.days,
        })
    }

    /// Record the outcome of a generation
    pub fn finish_submit(&mut self, result: Result<Plan, GatewayError>) {
        match result {
            Ok(plan) => self.plan = Some(plan),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.is_loading = false;
    }
}
