//! Error types for the circuit expression parser.

use qsym_ir::IrError;
use thiserror::Error;

/// Errors that can occur while parsing circuit expressions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error.
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at position {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Unknown gate.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Qubit index that is not a small non-negative integer.
    #[error("Invalid qubit index: {0}")]
    InvalidQubit(String),

    /// Exponent that is not a non-negative integer constant.
    #[error("Invalid exponent: {0}")]
    InvalidExponent(String),

    /// Operand outside what the expression language can represent exactly.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// A parsed state or gate was rejected by the IR.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
