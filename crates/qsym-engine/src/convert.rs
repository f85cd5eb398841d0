//! Conversion between amplitude vectors and superpositions of states.

use num_traits::Zero;
use qsym_algebra::Matrix;
use qsym_ir::{Basis, Circuit, QubitState, qubits_for_length};

use crate::error::{EngineError, EngineResult};

/// Turn a Z-basis column vector into a sum of `amplitude·|bits>` terms.
///
/// The vector must have `2^n` rows for some `n >= 1`. Zero amplitudes are
/// dropped, so an all-zero vector gives the zero circuit.
pub fn matrix_to_qbits(vector: &Matrix) -> EngineResult<Circuit> {
    let (rows, cols) = vector.shape();
    let n = match qubits_for_length(rows) {
        Some(n) if n >= 1 && cols == 1 => n,
        _ => return Err(EngineError::InvalidDimension { rows, cols }),
    };
    Ok(Circuit::sum(
        vector
            .entries()
            .enumerate()
            .filter(|(_, amplitude)| !amplitude.is_zero())
            .map(|(i, amplitude)| {
                Circuit::product([
                    Circuit::Scalar(amplitude.clone()),
                    QubitState::from_index(i, n).into(),
                ])
            }),
    ))
}

/// Turn a superposition of states into its Z-basis column vector.
///
/// Accepts a state, `scalar·state`, or a sum of those.
pub fn qbits_to_matrix(circuit: &Circuit) -> EngineResult<Matrix> {
    let expanded = circuit.expand();
    let mut total: Option<Matrix> = None;
    for term in expanded.terms() {
        let vector = term_vector(term)?;
        total = Some(match total {
            None => vector,
            Some(acc) => acc.try_add(&vector)?,
        });
    }
    total.ok_or_else(|| EngineError::MalformedInput("empty superposition".into()))
}

fn term_vector(term: &Circuit) -> EngineResult<Matrix> {
    let (coefficient, rest) = term.split_coefficient();
    match rest {
        Circuit::Qubit(q) => Ok(q.represent(Basis::Z)?.scale(&coefficient)),
        other => Err(EngineError::MalformedInput(format!(
            "expected a scalar multiple of a qubit state, got '{other}'"
        ))),
    }
}
