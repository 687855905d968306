//! Stepwise sorting engine.
//!
//! Each algorithm is exposed as a [`StepSequence`]: a resumable state
//! machine that performs one primitive mutation of a [`ValueBuffer`] per
//! call to [`StepSequence::resume`] and reports what it touched as a
//! [`StepEvent`].

pub mod domain;
pub mod error;
pub mod sequence;

pub use domain::*;
pub use error::{CoreError, Result};
pub use sequence::{drain, sequence_for, StepSequence};
