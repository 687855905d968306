//! Broadcast bus carrying session events to renderers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use uuid::Uuid;

use crate::types::{Event, EventEnvelope};

/// Slots kept per subscriber before the oldest events are overwritten.
const DEFAULT_CAPACITY: usize = 4096;

/// Fan-out of session events to any number of subscribers
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
    published: Arc<AtomicU64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wraps `event` in a fresh envelope and sends it to every subscriber.
    ///
    /// Returns how many subscribers got it. Without subscribers the event
    /// is dropped.
    pub fn publish(&self, event: Event) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Raw receiver for everything published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Receiver that follows the most recently started sort.
    pub fn subscription(&self) -> Subscription {
        Subscription {
            rx: self.sender.subscribe(),
            current_sort: None,
            missed: 0,
        }
    }

    /// Events published so far, received or not.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.sender.receiver_count())
            .field("published", &self.published())
            .finish()
    }
}

/// A bus subscriber that only reports the sort it currently follows.
///
/// Every `sort.started` switches the subscription to the new sort; events
/// still tagged with an earlier sort are skipped after that. Events lost
/// because the reader fell behind are counted in [`missed`](Self::missed).
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<EventEnvelope>,
    current_sort: Option<Uuid>,
    missed: u64,
}

impl Subscription {
    /// Waits for the next event; `None` once every bus handle is gone.
    pub async fn recv(&mut self) -> Option<EventEnvelope> {
        loop {
            match self.rx.recv().await {
                Ok(envelope) => {
                    if self.accept(&envelope.event) {
                        return Some(envelope);
                    }
                }
                Err(RecvError::Lagged(skipped)) => self.missed += skipped,
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// The next queued event, without waiting.
    pub fn try_recv(&mut self) -> Option<EventEnvelope> {
        loop {
            match self.rx.try_recv() {
                Ok(envelope) => {
                    if self.accept(&envelope.event) {
                        return Some(envelope);
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => self.missed += skipped,
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    pub fn current_sort(&self) -> Option<Uuid> {
        self.current_sort
    }

    /// Events overwritten before this subscription could read them.
    pub fn missed(&self) -> u64 {
        self.missed
    }

    fn accept(&mut self, event: &Event) -> bool {
        if let Event::SortStarted { sort_id, .. } = event {
            self.current_sort = Some(*sort_id);
            return true;
        }
        match (event.sort_id(), self.current_sort) {
            (Some(id), Some(current)) => id == current,
            _ => true,
        }
    }
}
