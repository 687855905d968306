//! Resumable sorting algorithms.
//!
//! Every algorithm is a hand-written state machine. Recursive algorithms
//! keep an explicit stack of pending sub-ranges and always work on the top
//! of it, so events come out depth-first with the left sub-range finished
//! before the right one starts, exactly as nested generator delegation
//! would produce them.

mod heap;
mod insertion;
mod merge;
mod quick;

pub use heap::HeapSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::QuickSort;

use crate::domain::{Algorithm, StepEvent, ValueBuffer};
use crate::error::{CoreError, Result};

/// A sort that advances one primitive mutation per [`resume`](Self::resume).
pub trait StepSequence: Send {
    fn algorithm(&self) -> Algorithm;

    /// Buffer length this sequence was created for.
    fn len(&self) -> usize;

    /// Performs the next mutation and describes it.
    ///
    /// Returns `None` once the sort is finished; from then on the buffer is
    /// left untouched. Panics if `buffer` no longer has [`len`](Self::len)
    /// elements.
    fn resume(&mut self, buffer: &mut ValueBuffer) -> Option<StepEvent>;

    fn is_done(&self) -> bool;

    fn check_buffer(&self, buffer: &ValueBuffer) -> Result<()> {
        if buffer.len() == self.len() {
            Ok(())
        } else {
            Err(CoreError::LengthMismatch {
                expected: self.len(),
                actual: buffer.len(),
            })
        }
    }
}

/// Fresh sequence for `algorithm` over a buffer of `len` elements.
pub fn sequence_for(algorithm: Algorithm, len: usize) -> Box<dyn StepSequence> {
    match algorithm {
        Algorithm::Insertion => Box::new(InsertionSort::new(len)),
        Algorithm::Merge => Box::new(MergeSort::new(len)),
        Algorithm::Quick => Box::new(QuickSort::new(len)),
        Algorithm::Heap => Box::new(HeapSort::new(len)),
    }
}

/// Runs `sequence` to exhaustion, collecting every event.
pub fn drain(sequence: &mut dyn StepSequence, buffer: &mut ValueBuffer) -> Vec<StepEvent> {
    std::iter::from_fn(|| sequence.resume(buffer)).collect()
}

fn assert_len(sequence: &dyn StepSequence, buffer: &ValueBuffer) {
    if let Err(e) = sequence.check_buffer(buffer) {
        panic!("{e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_matches_algorithm() {
        for alg in Algorithm::ALL {
            let seq = sequence_for(alg, 4);
            assert_eq!(seq.algorithm(), alg);
            assert_eq!(seq.len(), 4);
            assert!(!seq.is_done());
        }
    }

    #[test]
    fn test_check_buffer_reports_mismatch() {
        let seq = sequence_for(Algorithm::Merge, 3);
        let err = seq
            .check_buffer(&ValueBuffer::from_values(vec![1, 2]))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    #[should_panic(expected = "Buffer length changed mid-sort")]
    fn test_resume_panics_on_resized_buffer() {
        let mut seq = sequence_for(Algorithm::Quick, 5);
        let mut buffer = ValueBuffer::from_values(vec![2, 1]);
        seq.resume(&mut buffer);
    }

    #[test]
    fn test_drain_stops_at_exhaustion() {
        let mut buffer = ValueBuffer::from_values(vec![2, 1]);
        let mut seq = sequence_for(Algorithm::Insertion, buffer.len());
        let events = drain(seq.as_mut(), &mut buffer);

        assert_eq!(events.len(), 2);
        assert!(seq.is_done());
        assert!(drain(seq.as_mut(), &mut buffer).is_empty());
    }
}
