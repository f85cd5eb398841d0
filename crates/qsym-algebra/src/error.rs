//! Error types for the algebra crate.

use thiserror::Error;

/// Errors that can occur in scalar and matrix arithmetic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlgebraError {
    /// Matrix operands have incompatible shapes.
    #[error("Shape mismatch in {operation}: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// The operation that was attempted.
        operation: &'static str,
        /// Shape (rows, cols) of the left operand.
        left: (usize, usize),
        /// Shape (rows, cols) of the right operand.
        right: (usize, usize),
    },

    /// A rectangular block reaches outside the matrix.
    #[error("Block at ({row}, {col}) of size {rows}x{cols} exceeds matrix shape {shape:?}")]
    BlockOutOfBounds {
        /// First row of the block.
        row: usize,
        /// First column of the block.
        col: usize,
        /// Number of rows in the block.
        rows: usize,
        /// Number of columns in the block.
        cols: usize,
        /// Shape of the matrix being sliced.
        shape: (usize, usize),
    },

    /// Division by an exact zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// A coefficient still contains free symbols where a number is required.
    #[error("Expression '{0}' is not numeric")]
    NonNumeric(String),
}

/// Result type for algebra operations.
pub type AlgebraResult<T> = Result<T, AlgebraError>;
