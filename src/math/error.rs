// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Geometric calculation failed: {operation}")]
    GeometricFailure { operation: String },

    #[error("Non-finite coordinate at vertex {index}")]
    NonFiniteCoordinate { index: usize },
}

pub type MathResult<T> = Result<T, MathError>;
