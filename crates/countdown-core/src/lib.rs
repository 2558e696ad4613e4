//! # Countdown Core Library
//!
//! Counts down to a daily target time of day. When the countdown reaches
//! zero it records the completion in a session-local history and emits an
//! event that notification sinks turn into an overlay and a sound cue.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: A wall-clock-based state machine that requires the
//!   caller to invoke `tick()` once per second
//! - **Runner**: tokio service that owns the engine and its timers
//! - **Notifications**: sink trait separating effects from state transitions
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: Core countdown state machine
//! - [`CountdownRunner`]: Timer-driven service around the engine
//! - [`Clock`]: Wall-clock source
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod countdown;
pub mod error;
pub mod events;
pub mod notify;
pub mod runner;
pub mod storage;

pub use clock::{parse_wall_clock, Clock, ManualClock, MonotonicClock, SystemClock};
pub use countdown::{
    compute_remaining, next_occurrence, CompletionRecord, CountdownEngine, CountdownState,
    History, RemainingDuration, TargetTime,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use notify::{NotificationSink, NullSink, RecordingSink};
pub use runner::{CountdownHandle, CountdownRunner};
pub use storage::Config;
