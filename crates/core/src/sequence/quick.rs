use super::{assert_len, StepSequence};
use crate::domain::{Algorithm, StepEvent, ValueBuffer};

/// Lomuto partition of `[low, high]` around the value at `high`.
#[derive(Debug, Clone)]
struct Partition {
    low: usize,
    high: usize,
    pivot: u32,
    i: usize,
    j: usize,
}

enum PartitionStep {
    Swapped(StepEvent),
    /// Pivot moved to `boundary`, its final position.
    Placed { event: StepEvent, boundary: usize },
}

impl Partition {
    fn new(buffer: &ValueBuffer, low: usize, high: usize) -> Self {
        Self {
            low,
            high,
            pivot: buffer.get(high),
            i: low,
            j: low,
        }
    }

    fn step(&mut self, buffer: &mut ValueBuffer) -> PartitionStep {
        while self.j < self.high {
            let j = self.j;
            self.j += 1;
            if buffer.get(j) <= self.pivot {
                // i == j still counts as a step.
                let i = self.i;
                buffer.swap(i, j);
                self.i += 1;
                return PartitionStep::Swapped(StepEvent::swap(buffer, i, j));
            }
        }

        buffer.swap(self.i, self.high);
        PartitionStep::Placed {
            event: StepEvent::swap(buffer, self.i, self.high),
            boundary: self.i,
        }
    }
}

#[derive(Debug, Clone)]
enum Task {
    Sort { low: usize, high: usize },
    Partitioning(Partition),
}

/// Quick sort with Lomuto partitioning. Every qualifying comparison in the
/// scan emits an event, plus one for the pivot placement, so a partition of
/// `m` elements always yields between 1 and `m` events.
#[derive(Debug, Clone)]
pub struct QuickSort {
    len: usize,
    stack: Vec<Task>,
    done: bool,
}

impl QuickSort {
    pub fn new(len: usize) -> Self {
        let mut stack = Vec::new();
        if len > 0 {
            stack.push(Task::Sort {
                low: 0,
                high: len - 1,
            });
        }
        Self {
            len,
            stack,
            done: false,
        }
    }
}

impl StepSequence for QuickSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Quick
    }

    fn len(&self) -> usize {
        self.len
    }

    fn resume(&mut self, buffer: &mut ValueBuffer) -> Option<StepEvent> {
        if self.done {
            return None;
        }
        assert_len(self, buffer);

        while let Some(task) = self.stack.pop() {
            match task {
                Task::Sort { low, high } => {
                    if low < high {
                        self.stack
                            .push(Task::Partitioning(Partition::new(buffer, low, high)));
                    }
                }
                Task::Partitioning(mut partition) => match partition.step(buffer) {
                    PartitionStep::Swapped(event) => {
                        self.stack.push(Task::Partitioning(partition));
                        return Some(event);
                    }
                    PartitionStep::Placed { event, boundary } => {
                        let (low, high) = (partition.low, partition.high);
                        self.stack.push(Task::Sort {
                            low: boundary + 1,
                            high,
                        });
                        if boundary > low {
                            self.stack.push(Task::Sort {
                                low,
                                high: boundary - 1,
                            });
                        }
                        return Some(event);
                    }
                },
            }
        }

        self.done = true;
        None
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::drain;

    fn run(values: Vec<u32>) -> (ValueBuffer, Vec<StepEvent>) {
        let mut buffer = ValueBuffer::from_values(values);
        let mut seq = QuickSort::new(buffer.len());
        let events = drain(&mut seq, &mut buffer);
        (buffer, events)
    }

    #[test]
    fn test_sorted_input_keeps_self_swaps() {
        let (buffer, events) = run(vec![1, 2, 3, 4, 5]);
        assert!(buffer.is_sorted());

        // Partitions of 5, 4, 3 and 2 elements, each emitting one event
        // per element.
        assert_eq!(events.len(), 5 + 4 + 3 + 2);
        let top: Vec<_> = events[..5].iter().map(|e| e.changed.clone()).collect();
        assert_eq!(
            top,
            vec![
                vec![(0, 1)],
                vec![(1, 2)],
                vec![(2, 3)],
                vec![(3, 4)],
                vec![(4, 5)],
            ]
        );
    }

    #[test]
    fn test_pivot_placement_reports_both_slots() {
        let (buffer, events) = run(vec![3, 1, 2]);
        assert_eq!(buffer.as_slice(), &[1, 2, 3]);

        // 1 <= 2 swaps slots 0 and 1, then pivot 2 moves to slot 1.
        assert_eq!(events[0].changed, vec![(0, 1), (1, 3)]);
        assert_eq!(events[1].changed, vec![(1, 2), (2, 3)]);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_left_range_sorted_before_right() {
        let (_, events) = run(vec![4, 5, 3, 1, 2]);
        // pivot 2: 1 qualifies (swap 0<->3), then placement at index 1
        assert_eq!(events[0].changed, vec![(0, 1), (3, 4)]);
        assert_eq!(events[1].changed, vec![(1, 2), (4, 5)]);
        // left range [0,0] is trivial, so the next event belongs to [2,4]
        assert!(events[2..].iter().all(|e| e.changed.iter().all(|(i, _)| *i >= 2)));
    }

    #[test]
    fn test_duplicates() {
        let (buffer, _) = run(vec![3, 3, 1, 3, 1]);
        assert_eq!(buffer.as_slice(), &[1, 1, 3, 3, 3]);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(run(vec![]).1.is_empty());
        assert!(run(vec![1]).1.is_empty());
    }
}
