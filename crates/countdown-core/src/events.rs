use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::countdown::{CompletionRecord, CountdownState, RemainingDuration, TargetTime};

/// Every state change in the countdown produces an Event.
/// Front-ends render them; notification sinks react to them.
///
/// Timestamps are local wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Remaining time was recomputed.
    Tick {
        remaining: RemainingDuration,
        at: NaiveDateTime,
    },
    /// The countdown hit zero and a history record was appended.
    Completed {
        record: CompletionRecord,
        at: NaiveDateTime,
    },
    /// The "just completed" display window ended.
    CompletionCleared { at: NaiveDateTime },
    /// The user picked a new target; applies from the next tick.
    TargetChanged { from: TargetTime, to: TargetTime },
    StateSnapshot {
        state: CountdownState,
        target: TargetTime,
        remaining: RemainingDuration,
        history_len: usize,
        at: NaiveDateTime,
    },
}

impl Event {
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::Completed { .. })
    }
}
