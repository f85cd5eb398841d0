//! QSYM Circuit Engine
//!
//! This crate evaluates the circuit expressions built with `qsym-ir`.
//!
//! # Overview
//!
//! - [`apply_gates`] runs a product of gates on the qubit state to its
//!   right and returns the resulting superposition
//! - [`represent`] turns a circuit into a full Hilbert-space matrix or state
//!   vector, using either exact symbolic or floating-point matrices
//! - [`gate_sort`] and [`gate_simp`] rewrite gate sequences
//! - [`matrix_to_qbits`] and [`qbits_to_matrix`] convert between amplitude
//!   vectors and superpositions
//!
//! # Architecture
//!
//! ```text
//! Circuit ──expand──┬── apply_gates ──────► Circuit (superposition)
//!                   ├── represent ─────────► Representation
//!                   │     └── represent_gate::<B: LinearAlgebra>
//!                   └── gate_sort / gate_simp ► Circuit
//! ```
//!
//! # Example: Bell State
//!
//! ```rust
//! use qsym_engine::{RepresentOptions, apply_gates, represent};
//! use qsym_ir::{Basis, Circuit, Gate};
//!
//! let state: Circuit = "|00>".parse::<qsym_ir::QubitState>().unwrap().into();
//! let circuit = Gate::cnot(1, 0).unwrap() * Gate::h(1) * state;
//!
//! let result = apply_gates(&circuit, Basis::Z).unwrap();
//! assert_eq!(result.to_string(), "sqrt(2)/2*|00> + sqrt(2)/2*|11>");
//!
//! let vector = represent(&circuit, &RepresentOptions::new()).unwrap();
//! assert_eq!(vector.shape(), (4, 1));
//! ```

pub mod apply;
pub mod convert;
pub mod error;
pub mod hilbert;
pub mod represent;
pub mod simplify;

pub use apply::apply_gates;
pub use convert::{matrix_to_qbits, qbits_to_matrix};
pub use error::{EngineError, EngineResult};
pub use hilbert::{
    Backend, LinearAlgebra, Numeric, Representation, Symbolic, approx_eq, gate_matrix,
    represent_gate,
};
pub use represent::{RepresentOptions, represent, represent_with};
pub use simplify::{gate_simp, gate_sort};
