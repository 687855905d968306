use super::{assert_len, StepSequence};
use crate::domain::{Algorithm, StepEvent, ValueBuffer};

/// Write-back of two sorted halves captured when the merge begins.
#[derive(Debug, Clone)]
struct MergeRun {
    left_part: Vec<u32>,
    right_part: Vec<u32>,
    i: usize,
    j: usize,
    k: usize,
}

impl MergeRun {
    fn new(buffer: &ValueBuffer, left: usize, mid: usize, right: usize) -> Self {
        let values = buffer.as_slice();
        Self {
            left_part: values[left..=mid].to_vec(),
            right_part: values[mid + 1..=right].to_vec(),
            i: 0,
            j: 0,
            k: left,
        }
    }

    fn step(&mut self, buffer: &mut ValueBuffer) -> Option<StepEvent> {
        let left = self.left_part.get(self.i).copied();
        let right = self.right_part.get(self.j).copied();

        // Ties go to the left half.
        let value = match (left, right) {
            (Some(l), Some(r)) if l <= r => {
                self.i += 1;
                l
            }
            (_, Some(r)) => {
                self.j += 1;
                r
            }
            (Some(l), None) => {
                self.i += 1;
                l
            }
            (None, None) => return None,
        };

        let k = self.k;
        buffer.set(k, value);
        self.k += 1;
        Some(StepEvent::write(buffer, k))
    }
}

#[derive(Debug, Clone)]
enum Task {
    Sort { left: usize, right: usize },
    /// Both halves are sorted; snapshot them and start writing back.
    Merge { left: usize, mid: usize, right: usize },
    Writing(MergeRun),
}

/// Top-down merge sort. One event per element written back by a merge.
#[derive(Debug, Clone)]
pub struct MergeSort {
    len: usize,
    stack: Vec<Task>,
    done: bool,
}

impl MergeSort {
    pub fn new(len: usize) -> Self {
        let mut stack = Vec::new();
        if len > 0 {
            stack.push(Task::Sort {
                left: 0,
                right: len - 1,
            });
        }
        Self {
            len,
            stack,
            done: false,
        }
    }
}

impl StepSequence for MergeSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Merge
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
                Task::Sort { left, right } => {
                    if left < right {
                        let mid = (left + right) / 2;
                        // Pushed in reverse so the left half runs first.
                        self.stack.push(Task::Merge { left, mid, right });
                        self.stack.push(Task::Sort {
                            left: mid + 1,
                            right,
                        });
                        self.stack.push(Task::Sort { left, right: mid });
                    }
                }
                Task::Merge { left, mid, right } => {
                    self.stack
                        .push(Task::Writing(MergeRun::new(buffer, left, mid, right)));
                }
                Task::Writing(mut run) => {
                    if let Some(event) = run.step(buffer) {
                        self.stack.push(Task::Writing(run));
                        return Some(event);
                    }
                }
            }
        }

        self.done = true;
        None
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
