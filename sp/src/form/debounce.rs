//! Debounced recommendation trigger
//!
//! Pure state machine: the caller passes the current time in and acts on the
//! tickets it hands out. Every skill edit replaces the pending timer; only the
//! last edit of a burst produces a fetch. Each fetch carries a sequence number
//! and only the newest one may write its result back.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Where the trigger is in its cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// Nothing scheduled, nothing in flight
    #[default]
    Idle,
    /// Waiting for the quiet period to pass
    Pending { deadline: Instant, skill: String },
    /// Recommendation `seq` is in flight
    Fetching { seq: u64 },
}

/// A recommendation the caller should fetch now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendTicket {
    pub seq: u64,
    pub skill: String,
}

/// Debounce state machine for skill edits
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    state: DebounceState,
    latest_seq: u64,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            state: DebounceState::Idle,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.state, DebounceState::Fetching { .. })
    }

    /// Sequence number of the most recently issued ticket (0 before any)
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Record a skill edit, replacing any pending timer
    ///
    /// An in-flight fetch is left running but its result will be discarded.
    pub fn skill_changed(&mut self, skill: impl Into<String>, now: Instant) {
        let skill = skill.into();
        debug!(%skill, "skill_changed: restarting timer");
        self.state = DebounceState::Pending {
            deadline: now + self.quiet,
            skill,
        };
    }

    /// When the pending timer fires, if one is set
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Pending { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// Fire the timer if it is due
    ///
    /// A blank skill returns to idle without fetching.
    pub fn poll(&mut self, now: Instant) -> Option<RecommendTicket> {
        let due = matches!(&self.state, DebounceState::Pending { deadline, .. } if now >= *deadline);
        if !due {
            return None;
        }

        let DebounceState::Pending { skill, .. } = std::mem::take(&mut self.state) else {
            return None;
        };

        if skill.trim().is_empty() {
            debug!("poll: blank skill, nothing to fetch");
            return None;
        }

        self.latest_seq += 1;
        let seq = self.latest_seq;
        debug!(seq, %skill, "poll: issuing recommendation");
        self.state = DebounceState::Fetching { seq };
        Some(RecommendTicket { seq, skill })
    }

    /// Report that fetch `seq` finished
    ///
    /// Returns true when the result should be applied: `seq` is the latest
    /// issued ticket and no edit has happened since it was issued.
    pub fn complete(&mut self, seq: u64) -> bool {
        match self.state {
            DebounceState::Fetching { seq: current } if current == seq && seq == self.latest_seq => {
                debug!(seq, "complete: applying");
                self.state = DebounceState::Idle;
                true
            }
            _ => {
                debug!(seq, latest = self.latest_seq, "complete: stale, discarding");
                false
            }
        }
    }
}
