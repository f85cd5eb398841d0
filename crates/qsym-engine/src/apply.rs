//! Evaluating gate products on qubit states.

use num_traits::{One, Zero};
use qsym_algebra::Coefficient;
use qsym_ir::{Basis, Circuit, Gate, IrError, QubitState};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::error::{EngineError, EngineResult};

/// A superposition under construction: basis state to amplitude.
type Superposition = BTreeMap<QubitState, Coefficient>;

/// Apply every gate in `circuit` to the qubit state on its right.
///
/// The circuit is expanded first, so sums of states and sums of operators
/// are handled term by term. Within each product the gates act right to
/// left; scalar factors are collected into the result's amplitudes. A bare
/// state and the zero scalar come back unchanged.
///
/// In the X basis states are read as X-basis labels and each gate acts
/// through its X-basis matrix.
///
/// # Errors
///
/// - [`EngineError::MalformedCircuit`] when a product has no state, the
///   state is not the rightmost factor, or a factor is neither a scalar nor
///   a gate (power)
/// - [`IrError::HilbertSpaceTooSmall`] when a gate reaches past the state
/// - [`IrError::NotImplemented`] when a gate meets the Y basis
#[instrument(skip_all, fields(basis = %basis))]
pub fn apply_gates(circuit: &Circuit, basis: Basis) -> EngineResult<Circuit> {
    let expanded = circuit.expand();
    let terms = expanded
        .terms()
        .iter()
        .map(|term| apply_term(term, basis))
        .collect::<EngineResult<Vec<_>>>()?;
    let result = Circuit::sum(terms);
    debug!(terms = result.terms().len(), "gates applied");
    Ok(result)
}

fn apply_term(term: &Circuit, basis: Basis) -> EngineResult<Circuit> {
    match term {
        Circuit::Scalar(c) if c.is_zero() => return Ok(term.clone()),
        Circuit::Qubit(_) => return Ok(term.clone()),
        _ => {}
    }

    let Some((Circuit::Qubit(state), operators)) = term.factors().split_last() else {
        return Err(EngineError::MalformedCircuit(format!(
            "'{term}' has no qubit state as its rightmost factor"
        )));
    };

    let mut coefficient = Coefficient::one();
    let mut superposition = Superposition::from([(state.clone(), Coefficient::one())]);
    for factor in operators.iter().rev() {
        match factor {
            Circuit::Scalar(c) => coefficient = &coefficient * c,
            Circuit::Qubit(q) => {
                return Err(EngineError::MalformedCircuit(format!(
                    "state {q} in '{term}' is not the rightmost factor"
                )));
            }
            other => {
                let Some((gate, exp)) = other.gate_base() else {
                    return Err(EngineError::MalformedCircuit(format!(
                        "factor '{other}' in '{term}' is neither a scalar nor a gate"
                    )));
                };
                for _ in 0..exp {
                    superposition = apply_gate(gate, basis, &superposition)?;
                }
            }
        }
    }

    Ok(Circuit::sum(superposition.into_iter().map(|(q, amplitude)| {
        Circuit::product([Circuit::Scalar(&amplitude * &coefficient), q.into()])
    })))
}

/// Apply one gate to every state of a superposition.
///
/// For each state the target bits, first target most significant, select a
/// column of the gate matrix; every non-zero row of that column contributes
/// `entry × state-with-targets-set-to-row` to the output.
fn apply_gate(gate: &Gate, basis: Basis, input: &Superposition) -> EngineResult<Superposition> {
    if basis == Basis::Y {
        return Err(IrError::NotImplemented("applying gates in the Y basis".into()).into());
    }
    let matrix = gate.matrix_in(basis)?;
    let targets = gate.targets();
    let k = targets.len();

    let mut output = Superposition::new();
    for (state, amplitude) in input {
        gate.check_register(state.dimension())?;
        let column = targets.iter().try_fold(0usize, |acc, &t| {
            state.get(t).map(|bit| (acc << 1) | usize::from(bit))
        })?;
        for row in 0..matrix.rows() {
            let entry = &matrix[(row, column)];
            if entry.is_zero() {
                continue;
            }
            let flips: Vec<u32> = targets
                .iter()
                .enumerate()
                .filter(|&(j, &t)| {
                    let wanted = ((row >> (k - 1 - j)) & 1) as u8;
                    state.get(t).is_ok_and(|bit| bit != wanted)
                })
                .map(|(_, &t)| t)
                .collect();
            let next = state.flip(&flips)?;
            let slot = output.entry(next).or_default();
            *slot = &*slot + &(entry * amplitude);
        }
    }
    output.retain(|_, amplitude| !amplitude.is_zero());
    debug!(gate = %gate, states = output.len(), "applied gate");
    Ok(output)
}
