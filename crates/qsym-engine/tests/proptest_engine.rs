//! Property-based tests for the engine.
//!
//! Random gate sequences on a three-qubit register are checked for
//! agreement between application and representation, between the two
//! backends, and for semantics-preserving simplification.

use proptest::prelude::*;
use qsym_algebra::{Coefficient, Matrix, Scalar};
use qsym_engine::{
    Numeric, Symbolic, apply_gates, approx_eq, gate_simp, gate_sort, matrix_to_qbits,
    qbits_to_matrix, represent_with,
};
use qsym_ir::{Basis, Circuit, Gate, QubitState};

const QUBITS: u32 = 3;

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Y(u32),
    Z(u32),
    S(u32),
    T(u32),
    Cnot(u32, u32),
    Swap(u32, u32),
}

impl GateOp {
    fn gate(&self) -> Gate {
        match *self {
            GateOp::H(q) => Gate::h(q),
            GateOp::X(q) => Gate::x(q),
            GateOp::Y(q) => Gate::y(q),
            GateOp::Z(q) => Gate::z(q),
            GateOp::S(q) => Gate::s(q),
            GateOp::T(q) => Gate::t(q),
            GateOp::Cnot(c, t) => Gate::cnot(c, t).unwrap(),
            GateOp::Swap(a, b) => Gate::swap(a, b).unwrap(),
        }
    }
}

fn arb_pair() -> impl Strategy<Value = (u32, u32)> {
    (0..QUBITS, 0..QUBITS).prop_filter("distinct qubits", |(a, b)| a != b)
}

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..QUBITS).prop_map(GateOp::H),
        (0..QUBITS).prop_map(GateOp::X),
        (0..QUBITS).prop_map(GateOp::Y),
        (0..QUBITS).prop_map(GateOp::Z),
        (0..QUBITS).prop_map(GateOp::S),
        (0..QUBITS).prop_map(GateOp::T),
        arb_pair().prop_map(|(c, t)| GateOp::Cnot(c, t)),
        arb_pair().prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<GateOp>> {
    prop::collection::vec(arb_gate_op(), 1..6)
}

fn arb_state() -> impl Strategy<Value = QubitState> {
    (0_usize..8).prop_map(|i| QubitState::from_index(i, QUBITS as usize))
}

fn operator(ops: &[GateOp]) -> Circuit {
    Circuit::product(ops.iter().map(|op| Circuit::from(op.gate())))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn apply_agrees_with_represent(ops in arb_ops(), state in arb_state()) {
        let circuit = operator(&ops);
        let matrix = represent_with::<Symbolic>(&circuit, Basis::Z, Some(QUBITS)).unwrap();
        let applied = apply_gates(&(circuit * state.clone()), Basis::Z).unwrap();
        let expected = matrix.try_mul(&state.represent(Basis::Z).unwrap()).unwrap();
        if expected.is_zero() {
            prop_assert!(applied.is_zero());
        } else {
            prop_assert_eq!(qbits_to_matrix(&applied).unwrap(), expected);
        }
    }

    #[test]
    fn backends_agree(ops in arb_ops()) {
        let circuit = operator(&ops);
        let exact = represent_with::<Symbolic>(&circuit, Basis::Z, Some(QUBITS)).unwrap();
        let numeric = represent_with::<Numeric>(&circuit, Basis::Z, Some(QUBITS)).unwrap();
        prop_assert!(approx_eq(&exact, &numeric, 1e-9));
    }

    #[test]
    fn sort_is_idempotent_and_preserves_semantics(ops in arb_ops(), state in arb_state()) {
        let circuit = operator(&ops) * state;
        let sorted = gate_sort(&circuit);
        prop_assert_eq!(gate_sort(&sorted), sorted.clone());
        prop_assert_eq!(
            apply_gates(&sorted, Basis::Z).unwrap(),
            apply_gates(&circuit, Basis::Z).unwrap()
        );
    }

    #[test]
    fn simp_preserves_semantics(ops in arb_ops(), state in arb_state()) {
        let circuit = operator(&ops) * state;
        let simplified = gate_simp(&circuit);
        prop_assert_eq!(
            apply_gates(&simplified, Basis::Z).unwrap(),
            apply_gates(&circuit, Basis::Z).unwrap()
        );
    }

    #[test]
    fn vector_round_trip(entries in prop::collection::vec(-3_i64..=3, 8)) {
        prop_assume!(entries.iter().any(|&e| e != 0));
        let v = Matrix::column_vector(
            entries
                .iter()
                .map(|&e| Coefficient::constant(Scalar::integer(e) * Scalar::frac_1_sqrt2()))
                .collect(),
        );
        let circuit = matrix_to_qbits(&v).unwrap();
        prop_assert_eq!(qbits_to_matrix(&circuit).unwrap(), v);
    }

    #[test]
    fn state_round_trip(state in arb_state()) {
        let v = state.represent(Basis::Z).unwrap();
        prop_assert_eq!(matrix_to_qbits(&v).unwrap(), Circuit::from(state));
    }
}
