use thiserror::Error;

/// Error type for momentum_nn
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Operand dimensions are incompatible for the requested operation.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A matrix or vector is structurally degenerate (zero rows, zero columns or ragged rows).
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A flat weight vector disagrees with the topology-derived weight count.
    #[error("weight length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// An access reached past the end of a container.
    #[error("out of bounds: needed {needed}, available {available}")]
    OutOfBounds { needed: usize, available: usize },

    /// The operation requires state that has not been produced yet.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A learning rate or momentum coefficient outside its valid range.
    #[error("invalid hyperparameter {name}: {value}")]
    InvalidHyperparameter { name: &'static str, value: f64 },

    /// The training thread panicked or its channel closed.
    #[error("training thread failed")]
    ThreadErr,
}

pub type Result<T> = std::result::Result<T, Error>;
