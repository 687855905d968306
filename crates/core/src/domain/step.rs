use serde::{Deserialize, Serialize};

use super::ValueBuffer;

/// What a single resumption of a step sequence changed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepEvent {
    /// `(index, new value)` for every slot written by this step
    pub changed: Vec<(usize, u32)>,
    /// Indices to highlight while this step is on screen
    pub active: Vec<usize>,
}

impl StepEvent {
    /// Event for an overwrite of `index`; reads the value already stored.
    pub fn write(buffer: &ValueBuffer, index: usize) -> Self {
        Self {
            changed: vec![(index, buffer.get(index))],
            active: vec![index],
        }
    }

    /// Event for a swap of `a` and `b` that has already been applied.
    pub fn swap(buffer: &ValueBuffer, a: usize, b: usize) -> Self {
        if a == b {
            return Self::write(buffer, a);
        }
        Self {
            changed: vec![(a, buffer.get(a)), (b, buffer.get(b))],
            active: vec![a, b],
        }
    }

    pub fn touches(&self, index: usize) -> bool {
        self.changed.iter().any(|(i, _)| *i == index)
    }
}
