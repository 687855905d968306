use super::{assert_len, StepSequence};
use crate::domain::{Algorithm, StepEvent, ValueBuffer};

/// Sift-down of `root` within the first `size` slots.
///
/// The recursive heapify only ever recurses as its last action, so the
/// pending-call stack never holds more than one frame and collapses into
/// this cursor.
#[derive(Debug, Clone, Copy)]
struct SiftDown {
    size: usize,
    root: usize,
}

impl SiftDown {
    fn step(&mut self, buffer: &mut ValueBuffer) -> Option<StepEvent> {
        let root = self.root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        let mut largest = root;
        if left < self.size && buffer.get(left) > buffer.get(largest) {
            largest = left;
        }
        if right < self.size && buffer.get(right) > buffer.get(largest) {
            largest = right;
        }
        if largest == root {
            return None;
        }

        buffer.swap(root, largest);
        self.root = largest;
        Some(StepEvent::swap(buffer, root, largest))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Heapify parents from `next` down to 0; `None` once the heap is built.
    Build { next: Option<usize> },
    /// Move the max to `end`, then restore the heap over `[0, end)`.
    Extract { end: usize },
    Done,
}

/// In-place heap sort over a max-heap.
#[derive(Debug, Clone)]
pub struct HeapSort {
    len: usize,
    phase: Phase,
    sift: Option<SiftDown>,
}

impl HeapSort {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            phase: Phase::Build {
                next: (len / 2).checked_sub(1),
            },
            sift: None,
        }
    }
}

impl StepSequence for HeapSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Heap
    }

    fn len(&self) -> usize {
        self.len
    }

    fn resume(&mut self, buffer: &mut ValueBuffer) -> Option<StepEvent> {
        if self.is_done() {
            return None;
        }
        assert_len(self, buffer);

        loop {
            if let Some(sift) = self.sift.as_mut() {
                if let Some(event) = sift.step(buffer) {
                    return Some(event);
                }
                self.sift = None;
            }

            match self.phase {
                Phase::Build { next: Some(root) } => {
                    self.sift = Some(SiftDown {
                        size: self.len,
                        root,
                    });
                    self.phase = Phase::Build {
                        next: root.checked_sub(1),
                    };
                }
                Phase::Build { next: None } => {
                    self.phase = Phase::Extract {
                        end: self.len.saturating_sub(1),
                    };
                }
                Phase::Extract { end: 0 } => {
                    self.phase = Phase::Done;
                }
                Phase::Extract { end } => {
                    buffer.swap(0, end);
                    self.sift = Some(SiftDown { size: end, root: 0 });
                    self.phase = Phase::Extract { end: end - 1 };
                    return Some(StepEvent::swap(buffer, 0, end));
                }
                Phase::Done => return None,
            }
        }
    }

    fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::drain;

    fn run(values: Vec<u32>) -> (ValueBuffer, Vec<StepEvent>) {
        let mut buffer = ValueBuffer::from_values(values);
        let mut seq = HeapSort::new(buffer.len());
        let events = drain(&mut seq, &mut buffer);
        (buffer, events)
    }

    #[test]
    fn test_sorts() {
        let (buffer, _) = run(vec![9, 4, 7, 1, 8, 2, 2, 6]);
        assert_eq!(buffer.as_slice(), &[1, 2, 2, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn test_no_events_for_trivial_inputs() {
        for values in [vec![], vec![1]] {
            let mut buffer = ValueBuffer::from_values(values);
            let mut seq = HeapSort::new(buffer.len());
            assert!(seq.resume(&mut buffer).is_none());
            assert!(seq.is_done());
        }
    }

    #[test]
    fn test_build_then_extract_order() {
        // [1, 3, 2]: heapify root 0 swaps 0<->1, giving [3, 1, 2].
        // Extract swaps 0<->2 -> [2, 1, 3]; sift over [0,2) finds 2 > 1, no swap.
        // Extract swaps 0<->1 -> [1, 2, 3].
        let (buffer, events) = run(vec![1, 3, 2]);
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);
        let changed: Vec<_> = events.iter().map(|e| e.changed.clone()).collect();
        assert_eq!(
            changed,
            vec![
                vec![(0, 3), (1, 1)],
                vec![(0, 2), (2, 3)],
                vec![(0, 1), (1, 2)],
            ]
        );
    }

    #[test]
    fn test_sift_recurses_into_child() {
        // Root 0 sinks two levels during the build phase.
        let (_, events) = run(vec![1, 5, 4, 3, 2, 0, 0]);
        assert_eq!(events[0].changed, vec![(0, 5), (1, 1)]);
        assert_eq!(events[1].changed, vec![(1, 3), (3, 1)]);
    }

    #[test]
    fn test_pair_emits_single_extract_swap() {
        let (buffer, events) = run(vec![2, 1]);
        assert_eq!(buffer.as_slice(), &[1, 2]);
        assert_eq!(events.len(), 1);
    }
}
