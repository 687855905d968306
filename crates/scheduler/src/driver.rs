//! Paces a session's active sort and forwards its progress.
//!
//! The driver holds no algorithm state of its own. Each [`SortDriver::tick`]
//! resumes the session's sort once and publishes what happened on the
//! optional [`EventBus`]; [`SortDriver::run`] repeats that on a timer,
//! and [`SortDriver::run_paced`] lets the timer be changed mid-sort.

use std::time::Duration;

use events::{Event, EventBus};
use sortviz_core::StepEvent;
use tokio::sync::watch;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::session::{Advance, SortSession, SortSummary};

/// What a single [`SortDriver::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The sort performed one mutation.
    Step(StepEvent),
    /// The sort finished on this tick. Never repeated for the same sort.
    Completed(SortSummary),
    /// No sort was active; nothing happened.
    Idle,
}

/// How a paced [`SortDriver::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(SortSummary),
    Cancelled(SortSummary),
    /// There was no sort to run.
    Idle,
}

#[derive(Debug, Clone)]
pub struct SortDriver {
    interval: Duration,
    event_bus: Option<EventBus>,
}

impl SortDriver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            event_bus: None,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.interval())
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes effect on the next [`run`](Self::run); a run in progress is
    /// re-paced through [`run_paced`](Self::run_paced) instead.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Starts a sort with the session's selected algorithm, cancelling the
    /// one already running.
    pub fn begin(&mut self, session: &mut SortSession) -> Uuid {
        let (sort_id, replaced) = session.start_sort();
        if let Some(replaced) = replaced {
            info!(
                session_id = %session.id(),
                sort_id = %replaced.sort_id,
                steps = replaced.steps,
                "Replacing running sort"
            );
            self.publish_cancelled(session.id(), replaced);
        }

        info!(
            session_id = %session.id(),
            sort_id = %sort_id,
            algorithm = %session.algorithm(),
            size = session.buffer().len(),
            "Sort started"
        );
        self.publish(Event::SortStarted {
            session_id: session.id(),
            sort_id,
            algorithm: session.algorithm().as_str().to_string(),
            size: session.buffer().len(),
        });
        sort_id
    }

    /// Resumes the active sort once. Safe to call at any time.
    pub fn tick(&mut self, session: &mut SortSession) -> TickOutcome {
        match session.advance() {
            Advance::Step {
                sort_id,
                step,
                event,
            } => {
                trace!(sort_id = %sort_id, step, changed = ?event.changed, "Step");
                self.publish(Event::Step {
                    session_id: session.id(),
                    sort_id,
                    step,
                    changed: event.changed.iter().copied().map(Into::into).collect(),
                    active: event.active.clone(),
                });
                TickOutcome::Step(event)
            }
            Advance::Finished(summary) => {
                info!(
                    session_id = %session.id(),
                    sort_id = %summary.sort_id,
                    algorithm = %summary.algorithm,
                    steps = summary.steps,
                    "Sort completed"
                );
                self.publish(Event::SortCompleted {
                    session_id: session.id(),
                    sort_id: summary.sort_id,
                    steps: summary.steps,
                });
                TickOutcome::Completed(summary)
            }
            Advance::Idle => TickOutcome::Idle,
        }
    }

    /// Drops the active sort without signalling completion.
    pub fn cancel(&mut self, session: &mut SortSession) -> Option<SortSummary> {
        let cancelled = session.cancel_sort()?;
        info!(
            session_id = %session.id(),
            sort_id = %cancelled.sort_id,
            steps = cancelled.steps,
            "Sort cancelled"
        );
        self.publish_cancelled(session.id(), cancelled);
        Some(cancelled)
    }

    /// Cancels any active sort and gives the session a fresh buffer.
    pub fn reset(&mut self, session: &mut SortSession) {
        if let Some(cancelled) = session.reset_buffer() {
            self.publish_cancelled(session.id(), cancelled);
        }
        self.announce_buffer(session);
    }

    /// Publishes the session's current buffer so renderers can draw it
    /// before the first step.
    pub fn announce_buffer(&self, session: &SortSession) {
        debug!(session_id = %session.id(), size = session.buffer().len(), "Announcing buffer");
        self.publish(Event::BufferReset {
            session_id: session.id(),
            values: session.buffer().as_slice().to_vec(),
        });
    }

    /// Ticks the active sort every [`interval`](Self::interval) until it
    /// completes or `shutdown` turns `true`, which cancels it.
    ///
    /// The first tick happens immediately.
    pub async fn run(
        &mut self,
        session: &mut SortSession,
        shutdown: watch::Receiver<bool>,
    ) -> RunOutcome {
        let (_pace, pace_rx) = watch::channel(self.interval);
        self.run_paced(session, shutdown, pace_rx).await
    }

    /// Like [`run`](Self::run), but the delay between ticks follows `pace`.
    ///
    /// A new delay counts from the previous tick, so speeding up can make
    /// the next tick due at once. When the `pace` sender is dropped the
    /// last delay stays in force.
    pub async fn run_paced(
        &mut self,
        session: &mut SortSession,
        mut shutdown: watch::Receiver<bool>,
        mut pace: watch::Receiver<Duration>,
    ) -> RunOutcome {
        if !session.is_running() {
            return RunOutcome::Idle;
        }

        self.interval = *pace.borrow_and_update();
        let mut last_tick = Instant::now();
        let mut ticker = ticker_at(last_tick, self.interval);
        let mut shutdown_open = true;
        let mut pace_open = true;

        loop {
            if *shutdown.borrow_and_update() {
                return self.stop(session);
            }

            tokio::select! {
                _ = ticker.tick() => {
                    last_tick = Instant::now();
                    match self.tick(session) {
                        TickOutcome::Step(_) => {}
                        TickOutcome::Completed(summary) => return RunOutcome::Completed(summary),
                        TickOutcome::Idle => return RunOutcome::Idle,
                    }
                }
                changed = shutdown.changed(), if shutdown_open => {
                    // A dropped sender can no longer cancel us.
                    if changed.is_err() {
                        shutdown_open = false;
                    }
                }
                changed = pace.changed(), if pace_open => {
                    if changed.is_err() {
                        pace_open = false;
                    } else {
                        self.interval = *pace.borrow_and_update();
                        debug!(
                            session_id = %session.id(),
                            interval_ms = self.interval.as_millis() as u64,
                            "Interval changed"
                        );
                        let next = (last_tick + self.interval).max(Instant::now());
                        ticker = ticker_at(next, self.interval);
                    }
                }
            }
        }
    }

    fn stop(&mut self, session: &mut SortSession) -> RunOutcome {
        match self.cancel(session) {
            Some(summary) => RunOutcome::Cancelled(summary),
            None => RunOutcome::Idle,
        }
    }

    fn publish_cancelled(&self, session_id: Uuid, summary: SortSummary) {
        self.publish(Event::SortCancelled {
            session_id,
            sort_id: summary.sort_id,
            steps: summary.steps,
        });
    }

    fn publish(&self, event: Event) {
        if let Some(ref bus) = self.event_bus {
            bus.publish(event);
        }
    }
}

fn ticker_at(start: Instant, interval: Duration) -> Interval {
    // tokio intervals reject a zero period.
    let period = interval.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
