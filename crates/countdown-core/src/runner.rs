//! Timer-driven countdown service.
//!
//! Owns a [`CountdownEngine`] and drives it from a recurring tick timer and
//! a one-shot timer that clears the completion flag. All engine mutations
//! happen on the runner task; other tasks talk to it through a
//! [`CountdownHandle`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::clock::Clock;
use crate::countdown::{CountdownEngine, TargetTime};
use crate::events::Event;
use crate::notify::NotificationSink;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Completion is only seen by a tick inside the target's final second, so
/// ticks must never be further apart than this.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(1);
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    SetTarget(TargetTime),
    Shutdown,
}

/// Cloneable control handle for a running countdown.
///
/// Dropping every handle stops the runner as well.
#[derive(Debug, Clone)]
pub struct CountdownHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl CountdownHandle {
    /// Returns `false` if the runner has already stopped.
    pub fn set_target(&self, target: TargetTime) -> bool {
        self.tx.send(Command::SetTarget(target)).is_ok()
    }

    pub fn shutdown(&self) -> bool {
        self.tx.send(Command::Shutdown).is_ok()
    }
}

pub struct CountdownRunner<C, S> {
    engine: CountdownEngine,
    clock: C,
    sink: S,
    tick_interval: Duration,
    rx: mpsc::UnboundedReceiver<Command>,
}

impl<C: Clock, S: NotificationSink> CountdownRunner<C, S> {
    pub fn new(engine: CountdownEngine, clock: C, sink: S) -> (Self, CountdownHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            engine,
            clock,
            sink,
            tick_interval: DEFAULT_TICK_INTERVAL,
            rx,
        };
        (runner, CountdownHandle { tx })
    }

    /// Tick faster than once per second. Clamped to `MAX_TICK_INTERVAL`.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Tick until shut down, then hand the engine back so the caller can
    /// read the session's history.
    pub async fn run(self) -> CountdownEngine {
        let Self {
            mut engine,
            clock,
            sink,
            tick_interval,
            mut rx,
        } = self;

        let celebration = engine
            .celebration()
            .to_std()
            .unwrap_or(Duration::from_secs(10));

        let mut ticker = tokio::time::interval(tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let clear = tokio::time::sleep(celebration);
        tokio::pin!(clear);
        let mut clear_armed = false;

        tracing::debug!(target_time = %engine.target(), ?tick_interval, "countdown runner started");
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = clock.now();
                    let completed = engine.tick(now);
                    tracing::debug!(remaining = %engine.remaining(), "tick");
                    sink.notify(&Event::Tick { remaining: engine.remaining(), at: now });
                    if let Some(event) = completed {
                        sink.notify(&event);
                        // Supersedes any pending clear.
                        clear.as_mut().reset(Instant::now() + celebration);
                        clear_armed = true;
                    }
                }
                () = &mut clear, if clear_armed => {
                    let now = clock.now();
                    match engine.clear_completed(now) {
                        Some(event) => {
                            sink.notify(&event);
                            clear_armed = false;
                        }
                        None => match engine.completion_deadline() {
                            // Wall clock lags the timer; wait out the difference.
                            Some(deadline) => {
                                let left = (deadline - now).to_std().unwrap_or(Duration::ZERO);
                                clear.as_mut().reset(Instant::now() + left.max(Duration::from_millis(10)));
                            }
                            None => clear_armed = false,
                        },
                    }
                }
                command = rx.recv() => match command {
                    Some(Command::SetTarget(target)) => {
                        if let Some(event) = engine.set_target(target) {
                            sink.notify(&event);
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                },
            }
        }
        tracing::debug!(completions = engine.history().len(), "countdown runner stopped");
        engine
    }
}
