//! QSYM Circuit Expressions
//!
//! This crate provides the symbolic objects the engine works on: qubit
//! register states, quantum gates placed on qubits, and circuit expressions
//! that combine them algebraically.
//!
//! # Core Components
//!
//! - **States**: [`QubitState`] is a definite basis state `|b_{n-1} … b_0⟩`,
//!   indexed from the rightmost bit
//! - **Bases**: [`Basis`] selects Z, X or Y representation and carries the
//!   change-of-basis transforms
//! - **Gates**: [`StandardGate`] for the built-in set and [`CustomGate`] for any
//!   other unitary, placed on qubits by [`Gate`]
//! - **Circuits**: [`Circuit`] expression tree of scalars, states, gates,
//!   powers, sums and products, always kept in normal form
//!
//! # Example: Bell State Expression
//!
//! ```rust
//! use qsym_ir::{Circuit, Gate, QubitState};
//!
//! let state: QubitState = "|00>".parse().unwrap();
//!
//! // Gates act right to left: H on qubit 1 first, then CNOT.
//! let circuit = Gate::cnot(1, 0).unwrap() * Gate::h(1) * state;
//!
//! assert_eq!(circuit.to_string(), "CNOT(1,0)*H(1)*|00>");
//! assert_eq!(circuit.factors().len(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S` | 1 | Phase gate, diag(1, i) |
//! | `T` | 1 | diag(1, exp(iπ/4)) |
//! | `CNOT`, `CZ` | 2 | Controlled-X and Controlled-Z |
//! | `CPHASE` | 2 | Controlled phase, diag(1, 1, 1, i) |
//! | `SWAP` | 2 | SWAP gate |
//! | `TOFFOLI` | 3 | Doubly controlled X |

pub mod basis;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

pub use basis::Basis;
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use qubit::{QubitState, qubits_for_length};
