use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Buffer length changed mid-sort: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
