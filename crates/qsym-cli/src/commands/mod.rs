//! CLI command implementations.

pub mod apply;
pub mod common;
pub mod represent;
pub mod simplify;
pub mod to_qubits;
pub mod to_vector;
pub mod version;
