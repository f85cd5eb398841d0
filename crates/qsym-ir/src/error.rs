//! Error types for the IR crate.

use qsym_algebra::AlgebraError;
use thiserror::Error;

/// Errors that can occur when building qubit states, gates and circuits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IrError {
    /// A qubit bit value other than 0 or 1.
    #[error("Invalid qubit value {value} at position {position}: values must be 0 or 1")]
    InvalidValue {
        /// Position in the bit sequence (printed order).
        position: usize,
        /// The offending value.
        value: u8,
    },

    /// Qubit index beyond the register.
    #[error("Qubit index {index} out of range for a {dimension}-qubit state")]
    IndexOutOfRange {
        /// The requested index.
        index: u32,
        /// Number of qubits in the state.
        dimension: usize,
    },

    /// A gate names the same qubit twice.
    #[error("Gate '{gate}' has duplicate target {target}: control and target qubits must differ")]
    DuplicateTarget {
        /// Name of the gate.
        gate: String,
        /// The repeated index.
        target: u32,
    },

    /// Wrong number of target indices for the gate's matrix.
    #[error("Gate '{gate}' applies to {expected} qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate: String,
        /// Number of qubits the matrix acts on.
        expected: usize,
        /// Number of indices supplied.
        got: usize,
    },

    /// Matrix is not square with a power-of-two side.
    #[error("Matrix for '{name}' has shape {shape:?}; expected a square matrix with power-of-two side")]
    InvalidMatrix {
        /// What the matrix was meant to be.
        name: String,
        /// The actual shape.
        shape: (usize, usize),
    },

    /// Register is too small for a gate's highest target.
    #[error(
        "Hilbert space too small: gate '{gate}' touches qubit {minimum_dimension} but the register has {register_size} qubits"
    )]
    HilbertSpaceTooSmall {
        /// Name of the gate.
        gate: String,
        /// Highest target index of the gate.
        minimum_dimension: u32,
        /// Size of the register it was placed in.
        register_size: usize,
    },

    /// Unknown basis name.
    #[error("Unknown basis '{0}': expected one of Z, X, Y")]
    UnknownBasis(String),

    /// The operation is not available.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Underlying algebra failure.
    #[error("Algebra error: {0}")]
    Algebra(#[from] AlgebraError),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
