//! A value buffer bound to one selected algorithm.
//!
//! The session owns the buffer and at most one running step sequence.
//! Starting a sort, resetting the buffer or resizing it all discard the
//! running sequence first; a discarded sequence is never resumed again.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sortviz_core::{sequence_for, Algorithm, SortStatus, StepEvent, StepSequence, ValueBuffer};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::Result;

/// Identity and progress of one sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSummary {
    pub sort_id: Uuid,
    pub algorithm: Algorithm,
    /// Step events emitted so far
    pub steps: u64,
}

/// Result of resuming the active sort once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Step {
        sort_id: Uuid,
        step: u64,
        event: StepEvent,
    },
    /// The sequence just ran out. Reported once per sort.
    Finished(SortSummary),
    /// Nothing is running.
    Idle,
}

struct ActiveSort {
    id: Uuid,
    sequence: Box<dyn StepSequence>,
    steps: u64,
}

impl ActiveSort {
    fn summary(&self) -> SortSummary {
        SortSummary {
            sort_id: self.id,
            algorithm: self.sequence.algorithm(),
            steps: self.steps,
        }
    }
}

pub struct SortSession {
    id: Uuid,
    config: SessionConfig,
    buffer: ValueBuffer,
    rng: StdRng,
    active: Option<ActiveSort>,
    status: SortStatus,
}

impl SortSession {
    /// Validates `config` and shuffles the first buffer.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = rng_for(&config);
        let buffer = ValueBuffer::shuffled(config.size, config.display_height, &mut rng);

        let session = Self {
            id: Uuid::new_v4(),
            config,
            buffer,
            rng,
            active: None,
            status: SortStatus::Idle,
        };
        info!(
            session_id = %session.id,
            size = session.config.size,
            algorithm = %session.config.algorithm,
            "Session created"
        );
        Ok(session)
    }

    /// Session over a caller-supplied buffer. The configured size is
    /// replaced by the buffer length; empty buffers are allowed.
    pub fn with_values(config: SessionConfig, values: impl Into<Vec<u32>>) -> Result<Self> {
        config.validate_pacing()?;

        let buffer = ValueBuffer::from_values(values);
        let config = SessionConfig {
            size: buffer.len(),
            ..config
        };
        let rng = rng_for(&config);

        Ok(Self {
            id: Uuid::new_v4(),
            config,
            buffer,
            rng,
            active: None,
            status: SortStatus::Idle,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ValueBuffer {
        &self.buffer
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    pub fn status(&self) -> SortStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_sort(&self) -> Option<SortSummary> {
        self.active.as_ref().map(ActiveSort::summary)
    }

    pub fn active_sort_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Steps the running sort has emitted; `None` when nothing runs.
    pub fn steps_taken(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.steps)
    }

    /// Algorithm for the next sort. A running sort keeps its own.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.config.algorithm = algorithm;
    }

    pub fn select_algorithm_by_name(&mut self, name: &str) -> Result<()> {
        self.select_algorithm(name.parse()?);
        Ok(())
    }

    /// Replaces the buffer with a new permutation of the configured size.
    ///
    /// Returns the sort that was discarded, if any.
    pub fn reset_buffer(&mut self) -> Option<SortSummary> {
        let cancelled = self.cancel_sort();
        self.buffer =
            ValueBuffer::shuffled(self.config.size, self.config.display_height, &mut self.rng);
        self.status = SortStatus::Idle;
        debug!(session_id = %self.id, size = self.config.size, "Buffer reset");
        cancelled
    }

    /// Changes the buffer size and resets the buffer.
    pub fn resize(&mut self, size: usize) -> Result<Option<SortSummary>> {
        self.config.clone().with_size(size).validate()?;
        self.config.size = size;
        Ok(self.reset_buffer())
    }

    /// Discards any running sort and starts a new one with the selected
    /// algorithm. Returns the new sort id and the discarded sort.
    pub fn start_sort(&mut self) -> (Uuid, Option<SortSummary>) {
        let replaced = self.cancel_sort();
        let sort = ActiveSort {
            id: Uuid::new_v4(),
            sequence: sequence_for(self.config.algorithm, self.buffer.len()),
            steps: 0,
        };
        let sort_id = sort.id;
        self.active = Some(sort);
        self.status = SortStatus::Running;
        (sort_id, replaced)
    }

    /// Drops the running sort without completing it.
    pub fn cancel_sort(&mut self) -> Option<SortSummary> {
        let active = self.active.take()?;
        self.status = SortStatus::Cancelled;
        Some(active.summary())
    }

    /// Resumes the running sort once.
    pub fn advance(&mut self) -> Advance {
        let Some(active) = self.active.as_mut() else {
            return Advance::Idle;
        };

        match active.sequence.resume(&mut self.buffer) {
            Some(event) => {
                active.steps += 1;
                Advance::Step {
                    sort_id: active.id,
                    step: active.steps,
                    event,
                }
            }
            None => {
                let summary = active.summary();
                self.active = None;
                self.status = SortStatus::Completed;
                Advance::Finished(summary)
            }
        }
    }
}

fn rng_for(config: &SessionConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

impl std::fmt::Debug for SortSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortSession")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("status", &self.status)
            .field("active_sort", &self.active_sort())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(size: usize) -> SortSession {
        SortSession::new(SessionConfig::default().with_size(size).with_seed(11)).unwrap()
    }

    #[test]
    fn test_session_creation() {
        let session = seeded(20);

        assert_eq!(session.buffer().len(), 20);
        assert_eq!(session.status(), SortStatus::Idle);
        assert!(!session.is_running());
        assert!(session.active_sort_id().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(SortSession::new(SessionConfig::default().with_size(0)).is_err());
        assert!(SortSession::new(SessionConfig::default().with_interval_ms(0)).is_err());
        assert!(SortSession::with_values(SessionConfig::default().with_interval_ms(0), vec![1]).is_err());
    }

    #[test]
    fn test_with_values_allows_empty_buffer() {
        let session = SortSession::with_values(SessionConfig::default(), Vec::new()).unwrap();
        assert!(session.buffer().is_empty());
        assert_eq!(session.config().size, 0);
    }

    #[test]
    fn test_same_seed_same_buffer() {
        assert_eq!(seeded(40).buffer(), seeded(40).buffer());
    }

    #[test]
    fn test_advance_until_finished() {
        let mut session =
            SortSession::with_values(SessionConfig::default(), vec![3, 1, 2]).unwrap();
        let (sort_id, replaced) = session.start_sort();
        assert!(replaced.is_none());
        assert_eq!(session.status(), SortStatus::Running);

        let mut steps = 0;
        loop {
            match session.advance() {
                Advance::Step { sort_id: id, step, .. } => {
                    steps += 1;
                    assert_eq!(id, sort_id);
                    assert_eq!(step, steps);
                }
                Advance::Finished(summary) => {
                    assert_eq!(summary.sort_id, sort_id);
                    assert_eq!(summary.steps, steps);
                    break;
                }
                Advance::Idle => panic!("went idle before finishing"),
            }
        }

        assert!(session.buffer().is_sorted());
        assert_eq!(session.status(), SortStatus::Completed);
        assert_eq!(session.advance(), Advance::Idle);
    }

    #[test]
    fn test_advance_without_sort_is_idle() {
        let mut session = seeded(10);
        let before = session.buffer().clone();
        assert_eq!(session.advance(), Advance::Idle);
        assert_eq!(session.buffer(), &before);
    }

    #[test]
    fn test_start_replaces_running_sort() {
        let mut session = seeded(10);
        let (first, _) = session.start_sort();
        session.advance();

        assert_eq!(session.steps_taken(), Some(1));

        let (second, replaced) = session.start_sort();
        assert_ne!(first, second);
        let replaced = replaced.unwrap();
        assert_eq!(replaced.sort_id, first);
        assert_eq!(replaced.steps, 1);
        assert_eq!(session.active_sort_id(), Some(second));
        assert_eq!(session.steps_taken(), Some(0));

        session.cancel_sort();
        assert_eq!(session.steps_taken(), None);
    }

    #[test]
    fn test_running_sort_keeps_its_algorithm() {
        let mut session = seeded(10);
        session.select_algorithm(Algorithm::Heap);
        session.start_sort();
        session.select_algorithm(Algorithm::Merge);

        assert_eq!(session.active_sort().unwrap().algorithm, Algorithm::Heap);
        assert_eq!(session.algorithm(), Algorithm::Merge);
    }

    #[test]
    fn test_select_algorithm_by_name() {
        let mut session = seeded(10);
        session.select_algorithm_by_name("Quick Sort").unwrap();
        assert_eq!(session.algorithm(), Algorithm::Quick);
        assert!(session.select_algorithm_by_name("bogo").is_err());
    }

    #[test]
    fn test_reset_cancels_and_reshuffles() {
        let mut session = seeded(30);
        let (sort_id, _) = session.start_sort();

        let cancelled = session.reset_buffer().unwrap();
        assert_eq!(cancelled.sort_id, sort_id);
        assert!(!session.is_running());
        assert_eq!(session.status(), SortStatus::Idle);
        assert_eq!(session.buffer().len(), 30);
    }

    #[test]
    fn test_resize() {
        let mut session = seeded(30);
        assert!(session.resize(0).is_err());
        assert_eq!(session.buffer().len(), 30);

        session.resize(12).unwrap();
        assert_eq!(session.buffer().len(), 12);
        assert_eq!(session.config().size, 12);
    }
}
