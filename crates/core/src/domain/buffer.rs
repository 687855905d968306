use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The array being sorted.
///
/// Length is fixed once built; the algorithms only overwrite or swap
/// existing slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueBuffer {
    values: Vec<u32>,
}

impl ValueBuffer {
    pub fn from_values(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Shuffled permutation of `1..=size`, each value scaled so the largest
    /// one lands close to `display_height`.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, display_height: u32, rng: &mut R) -> Self {
        let scale = Self::scale_factor(size, display_height);
        let mut data: Vec<u32> = (1..=size as u32).collect();
        data.shuffle(rng);
        for value in &mut data {
            *value *= scale;
        }
        Self { values: data }
    }

    /// Integer scale applied by [`shuffled`](Self::shuffled); never below 1.
    pub fn scale_factor(size: usize, display_height: u32) -> u32 {
        if size == 0 {
            return 1;
        }
        u32::try_from(size)
            .ok()
            .map(|size| display_height / size)
            .unwrap_or(0)
            .max(1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> u32 {
        self.values[index]
    }

    pub fn set(&mut self, index: usize, value: u32) {
        self.values[index] = value;
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.values
    }
}
