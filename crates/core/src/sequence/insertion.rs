use super::{assert_len, StepSequence};
use crate::domain::{Algorithm, StepEvent, ValueBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Pick up the value at `i` and start inserting it.
    Select { i: usize },
    /// `hole` is the slot that will receive either the left neighbour or
    /// `current`.
    Shift { i: usize, hole: usize, current: u32 },
    Done,
}

/// Insertion sort. One event per shifted element and one per placement,
/// so an already sorted buffer of `n` elements yields `n - 1` events.
#[derive(Debug, Clone)]
pub struct InsertionSort {
    len: usize,
    state: State,
}

impl InsertionSort {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: State::Select { i: 1 },
        }
    }
}

impl StepSequence for InsertionSort {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Insertion
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
            match self.state {
                State::Select { i } if i >= self.len => {
                    self.state = State::Done;
                }
                State::Select { i } => {
                    self.state = State::Shift {
                        i,
                        hole: i,
                        current: buffer.get(i),
                    };
                }
                State::Shift { i, hole, current } => {
                    if hole > 0 && buffer.get(hole - 1) > current {
                        buffer.set(hole, buffer.get(hole - 1));
                        self.state = State::Shift {
                            i,
                            hole: hole - 1,
                            current,
                        };
                    } else {
                        buffer.set(hole, current);
                        self.state = State::Select { i: i + 1 };
                    }
                    return Some(StepEvent::write(buffer, hole));
                }
                State::Done => return None,
            }
        }
    }

    fn is_done(&self) -> bool {
        self.state == State::Done
    }
}
