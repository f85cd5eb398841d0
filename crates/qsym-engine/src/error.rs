//! Error types for the engine crate.

use qsym_algebra::AlgebraError;
use qsym_ir::IrError;
use thiserror::Error;

/// Errors produced while applying, representing or converting circuits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// A bare operator was represented without a register size.
    #[error("Hilbert space too small: a register size is required to represent '{0}'")]
    RegisterSizeRequired(String),

    /// The circuit does not have the shape the operation expects.
    #[error("Malformed circuit: {0}")]
    MalformedCircuit(String),

    /// The input to a conversion is not a superposition of states.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A vector whose shape is not `(2^n, 1)` with `n >= 1`.
    #[error("Invalid dimension: expected a column vector of length 2^n (n >= 1), got shape {rows}x{cols}")]
    InvalidDimension {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// IR construction or validation failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// Matrix arithmetic failed.
    #[error("Algebra error: {0}")]
    Algebra(#[from] AlgebraError),
}

impl EngineError {
    /// Whether this error reports a register that is missing or too small
    /// for the gates in a circuit.
    pub fn is_hilbert_space_too_small(&self) -> bool {
        matches!(
            self,
            EngineError::RegisterSizeRequired(_)
                | EngineError::Ir(IrError::HilbertSpaceTooSmall { .. })
        )
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
