//! Plan domain types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DEFAULT_DAYS, RECOMMENDED_DAYS_MAX, RECOMMENDED_DAYS_MIN};

/// One day of a study plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day number, 1-based
    pub day: u32,
    /// Objective for the day
    pub goal: String,
    /// Two or three core topics
    pub concepts: Vec<String>,
    /// A small concrete exercise
    pub task: String,
}

/// An ordered sequence of day plans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan(pub Vec<DayPlan>);

impl Plan {
    pub fn new(days: Vec<DayPlan>) -> Self {
        Self(days)
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sort ascending by day number; equal days keep their relative order
    pub fn sort_by_day(&mut self) {
        debug!(len = self.0.len(), "sort_by_day: called");
        self.0.sort_by_key(|d| d.day);
    }

    /// Report where the plan deviates from what was asked for
    ///
    /// Assumes the plan is already sorted. The model is only asked to follow
    /// these rules, so deviations are reported rather than rejected.
    pub fn issues(&self, requested_days: u32) -> Vec<String> {
        let mut issues = Vec::new();

        if self.0.len() != requested_days as usize {
            issues.push(format!("expected {} days, got {}", requested_days, self.0.len()));
        }

        for (idx, entry) in self.0.iter().enumerate() {
            let expected = idx as u32 + 1;
            if entry.day != expected {
                issues.push(format!("position {} has day {}, expected {}", idx + 1, entry.day, expected));
            }
            if entry.goal.trim().is_empty() {
                issues.push(format!("day {} has an empty goal", entry.day));
            }
            if entry.task.trim().is_empty() {
                issues.push(format!("day {} has an empty task", entry.day));
            }
            if !(2..=3).contains(&entry.concepts.len()) {
                issues.push(format!("day {} has {} concepts", entry.day, entry.concepts.len()));
            }
        }

        issues
    }
}

/// Learner's current level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Next level in selector order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Self::Beginner => Self::Intermediate,
            Self::Intermediate => Self::Advanced,
            Self::Advanced => Self::Beginner,
        }
    }

    /// Previous level in selector order, wrapping around
    pub fn prev(self) -> Self {
        match self {
            Self::Beginner => Self::Advanced,
            Self::Intermediate => Self::Beginner,
            Self::Advanced => Self::Intermediate,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!(
                "Unknown level: {}. Use: beginner, intermediate, or advanced",
                s
            )),
        }
    }
}

/// Turn the model's raw `days` value into a usable recommendation
///
/// Zero and missing both mean "no answer" and fall back to the default before
/// clamping, so `0` yields 5 rather than 3.
pub fn clamp_recommendation(raw: Option<i64>) -> u32 {
    let days = match raw {
        Some(n) if n != 0 => n,
        _ => DEFAULT_DAYS as i64,
    };
    days.clamp(RECOMMENDED_DAYS_MIN as i64, RECOMMENDED_DAYS_MAX as i64) as u32
}
