//! Countdown engine implementation.
//!
//! The engine is a wall-clock-based state machine. It owns no timers: the
//! caller passes the current time into `tick()` once per second and into
//! `clear_completed()` when the celebration window may have ended.
//!
//! ## State Transitions
//!
//! ```text
//! Counting -> JustCompleted -> Counting (next day's cycle)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(target, clock.now());
//! // Every second:
//! if let Some(event) = engine.tick(clock.now()) {
//!     // notify
//! }
//! ```

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::history::{CompletionRecord, History};
use super::remaining::{compute_remaining, next_occurrence, RemainingDuration};
use super::target::TargetTime;
use crate::events::Event;

/// How long the "just completed" flag stays up after a completion.
pub const DEFAULT_CELEBRATION_SECS: i64 = 10;

/// Upper bound for the completion window; the next cycle is a day away.
pub const MAX_CELEBRATION_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownState {
    Counting,
    /// Remaining time reached zero; transient until the flag is cleared.
    JustCompleted,
}

/// Core countdown engine.
///
/// Remaining time is recomputed from absolute wall-clock time on every
/// tick, never decremented, so missed ticks correct themselves.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    target: TargetTime,
    remaining: RemainingDuration,
    history: History,
    /// Deadline of the "just completed" flag; `Some` while the flag is set.
    completed_until: Option<NaiveDateTime>,
    /// Target instant whose completion was already recorded.
    last_completed: Option<NaiveDateTime>,
    celebration: Duration,
}

impl CountdownEngine {
    /// Create an engine counting towards `target`, starting in `Counting`.
    pub fn new(target: TargetTime, now: NaiveDateTime) -> Self {
        Self {
            target,
            remaining: compute_remaining(now, target),
            history: History::new(),
            completed_until: None,
            last_completed: None,
            celebration: Duration::seconds(DEFAULT_CELEBRATION_SECS),
        }
    }

    /// Override how long the completion flag stays set.
    ///
    /// Clamped to `0..=MAX_CELEBRATION_SECS` seconds.
    pub fn with_celebration(mut self, celebration: Duration) -> Self {
        self.celebration = celebration.clamp(
            Duration::zero(),
            Duration::seconds(MAX_CELEBRATION_SECS),
        );
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn target(&self) -> TargetTime {
        self.target
    }

    pub fn remaining(&self) -> RemainingDuration {
        self.remaining
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn celebration(&self) -> Duration {
        self.celebration
    }

    pub fn is_just_completed(&self) -> bool {
        self.completed_until.is_some()
    }

    /// When the completion flag will clear, if it is set.
    pub fn completion_deadline(&self) -> Option<NaiveDateTime> {
        self.completed_until
    }

    pub fn state(&self) -> CountdownState {
        if self.is_just_completed() {
            CountdownState::JustCompleted
        } else {
            CountdownState::Counting
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: NaiveDateTime) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            target: self.target,
            remaining: self.remaining,
            history_len: self.history.len(),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Call once per second. Returns `Some(Event::Completed)` on the zero
    /// crossing.
    ///
    /// A given target instant completes at most once, even if several ticks
    /// land inside its final second.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Event> {
        self.remaining = compute_remaining(now, self.target);
        if !self.remaining.is_zero() {
            return None;
        }

        let occurrence = next_occurrence(now, self.target);
        if self.last_completed == Some(occurrence) {
            return None;
        }
        self.last_completed = Some(occurrence);
        // A newer completion supersedes any pending clear.
        self.completed_until = Some(
            now.checked_add_signed(self.celebration)
                .unwrap_or(NaiveDateTime::MAX),
        );

        let record = CompletionRecord::at(now);
        tracing::info!(target_time = %self.target, date = %record.date, time = %record.time, "countdown completed");
        self.history.push(record.clone());
        Some(Event::Completed { record, at: now })
    }

    /// Replace the target. Takes effect on the next tick.
    pub fn set_target(&mut self, target: TargetTime) -> Option<Event> {
        if target == self.target {
            return None;
        }
        let from = self.target;
        self.target = target;
        tracing::info!(%from, to = %target, "target changed");
        Some(Event::TargetChanged { from, to: target })
    }

    /// Drop the completion flag once its deadline has passed.
    ///
    /// Independent of `tick()`; a no-op before the deadline.
    pub fn clear_completed(&mut self, now: NaiveDateTime) -> Option<Event> {
        match self.completed_until {
            Some(deadline) if now >= deadline => {
                self.completed_until = None;
                tracing::debug!("completion flag cleared");
                Some(Event::CompletionCleared { at: now })
            }
            _ => None,
        }
    }
}
