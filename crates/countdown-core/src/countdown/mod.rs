mod engine;
mod history;
mod remaining;
mod target;

pub use engine::{CountdownEngine, CountdownState, DEFAULT_CELEBRATION_SECS, MAX_CELEBRATION_SECS};
pub use history::{CompletionRecord, History};
pub use remaining::{compute_remaining, next_occurrence, RemainingDuration};
pub use target::TargetTime;
