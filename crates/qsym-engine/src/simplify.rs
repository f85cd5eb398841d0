//! Gate-sequence rewriting.
//!
//! [`gate_sort`] moves commuting gates into target order and
//! [`gate_simp`] reduces powers of Pauli, Hadamard, phase and T gates.

use qsym_ir::{Circuit, Gate, StandardGate};
use rustc_hash::FxHashSet;
use tracing::{debug, instrument};

/// Bubble commuting gates into ascending target order.
///
/// Adjacent gate or gate-power factors are swapped when the left one's
/// target tuple compares greater than the right one's and the two act on
/// disjoint qubits. Passes repeat until nothing moves. Sums are sorted term
/// by term.
#[instrument(skip_all)]
pub fn gate_sort(circuit: &Circuit) -> Circuit {
    match circuit {
        Circuit::Add(terms) => Circuit::sum(terms.iter().map(gate_sort)),
        Circuit::Mul(factors) => sort_product(factors.clone()),
        Circuit::Pow(base, n) if circuit.gate_base().is_none() => {
            Circuit::power(gate_sort(base), *n)
        }
        _ => circuit.clone(),
    }
}

fn sort_product(mut factors: Vec<Circuit>) -> Circuit {
    loop {
        let mut changed = false;
        for i in 0..factors.len().saturating_sub(1) {
            if should_swap(&factors[i], &factors[i + 1]) {
                debug!(left = %factors[i], right = %factors[i + 1], "swapping commuting gates");
                factors.swap(i, i + 1);
                changed = true;
            }
        }
        let rebuilt = Circuit::product(factors);
        if !changed {
            return rebuilt;
        }
        factors = rebuilt.factors().to_vec();
    }
}

fn should_swap(left: &Circuit, right: &Circuit) -> bool {
    let (Some((a, _)), Some((b, _))) = (left.gate_base(), right.gate_base()) else {
        return false;
    };
    if a.targets() <= b.targets() {
        return false;
    }
    let touched: FxHashSet<u32> = a.targets().iter().copied().collect();
    b.targets().iter().all(|t| !touched.contains(t))
}

/// Sort, then rewrite gate powers until none applies.
///
/// - `H^n`, `X^n`, `Y^n`, `Z^n` become the base to the power `n mod 2`
/// - `S^n` becomes `Z^(n div 2) · S^(n mod 2)`
/// - `T^n` becomes `S^(n div 2) · T^(n mod 2)`
///
/// Powers of products are simplified inside their base first. Conjugation
/// identities such as `H·X·H = Z` are left alone.
#[instrument(skip_all)]
pub fn gate_simp(circuit: &Circuit) -> Circuit {
    if let Circuit::Add(terms) = circuit {
        return Circuit::sum(terms.iter().map(gate_simp));
    }
    let mut current = gate_sort(circuit);
    loop {
        let factors = current.factors();
        let Some((i, replacement)) = factors
            .iter()
            .enumerate()
            .find_map(|(i, f)| rewrite_factor(f).map(|r| (i, r)))
        else {
            return current;
        };
        debug!(factor = %factors[i], "rewriting gate power");
        let mut next = factors[..i].to_vec();
        next.extend(replacement);
        next.extend_from_slice(&factors[i + 1..]);
        current = gate_sort(&Circuit::product(next));
    }
}

fn rewrite_factor(factor: &Circuit) -> Option<Vec<Circuit>> {
    match factor {
        Circuit::Pow(base, n) if factor.gate_base().is_none() => {
            let simplified = Circuit::power(gate_simp(base), *n);
            (simplified != *factor).then(|| vec![simplified])
        }
        _ => rewrite_power(factor),
    }
}

fn rewrite_power(factor: &Circuit) -> Option<Vec<Circuit>> {
    if !matches!(factor, Circuit::Pow(..)) {
        return None;
    }
    let (gate, n) = factor.gate_base()?;
    let &[q] = gate.targets() else {
        return None;
    };
    match gate.standard()? {
        StandardGate::H | StandardGate::X | StandardGate::Y | StandardGate::Z => {
            Some(vec![gate.pow(n % 2)])
        }
        StandardGate::S => Some(vec![Gate::z(q).pow(n / 2), gate.pow(n % 2)]),
        StandardGate::T => Some(vec![Gate::s(q).pow(n / 2), gate.pow(n % 2)]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ket(s: &str) -> Circuit {
        Circuit::Qubit(s.parse().unwrap())
    }

    #[test]
    fn test_sort_disjoint_gates() {
        let circuit = Gate::x(1) * Gate::x(0) * ket("00");
        assert_eq!(gate_sort(&circuit), Gate::x(0) * Gate::x(1) * ket("00"));
    }

    #[test]
    fn test_sort_keeps_overlapping_gates() {
        let circuit = Gate::cnot(1, 0).unwrap() * Gate::x(0) * ket("00");
        assert_eq!(gate_sort(&circuit), circuit);
    }

    #[test]
    fn test_sort_merges_after_swap() {
        let circuit = Gate::h(1) * Gate::h(0) * Gate::h(1);
        let sorted = gate_sort(&circuit);
        assert_eq!(sorted, Gate::h(0) * Gate::h(1).pow(2));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let circuit = Gate::z(2) * Gate::cnot(1, 0).unwrap() * Gate::t(3) * Gate::h(0);
        let once = gate_sort(&circuit);
        assert_eq!(gate_sort(&once), once);
    }

    #[test]
    fn test_sort_sums_term_by_term() {
        let circuit = Gate::x(1) * Gate::x(0) * ket("00") + ket("11");
        let sorted = gate_sort(&circuit);
        assert_eq!(sorted, Gate::x(0) * Gate::x(1) * ket("00") + ket("11"));
    }

    #[test]
    fn test_simp_pauli_squares() {
        assert!(gate_simp(&Gate::x(0).pow(2)).is_one());
        assert_eq!(gate_simp(&Gate::h(0).pow(3)), Gate::h(0).into());
        assert_eq!(
            gate_simp(&(Gate::y(1).pow(4) * ket("01"))),
            ket("01")
        );
    }

    #[test]
    fn test_simp_phase_chain() {
        assert_eq!(gate_simp(&Gate::t(0).pow(2)), Gate::s(0).into());
        assert_eq!(gate_simp(&Gate::s(0).pow(2)), Gate::z(0).into());
        assert!(gate_simp(&Gate::t(0).pow(8)).is_one());
        assert_eq!(gate_simp(&Gate::t(0).pow(3)), Gate::s(0) * Gate::t(0));
    }

    #[test]
    fn test_simp_after_sort() {
        let circuit = Gate::h(1) * Gate::h(0) * Gate::h(1) * ket("00");
        assert_eq!(gate_simp(&circuit), Gate::h(0) * ket("00"));
    }

    #[test]
    fn test_simp_merges_across_exponent_limit() {
        // X^(2^32 - 1) * X = X^(2^32) = 1
        let circuit = Gate::x(0).pow(u32::MAX) * Gate::x(0);
        assert!(gate_simp(&circuit).is_one());

        let circuit = Gate::t(0).pow(u32::MAX) * Gate::t(0) * ket("1");
        assert_eq!(gate_simp(&circuit), ket("1"));
    }

    #[test]
    fn test_simp_inside_power_of_product() {
        let inner = Gate::x(0).pow(2) * Gate::y(0);
        let circuit = Circuit::power(inner, 3);
        assert_eq!(circuit.to_string(), "(X(0)**2*Y(0))**3");
        assert_eq!(gate_simp(&circuit), Gate::y(0).into());

        let circuit = Gate::h(0) * Circuit::power(Gate::s(0).pow(2) * Gate::x(0), 2) * ket("0");
        let expected = Gate::h(0) * Circuit::power(Gate::z(0) * Gate::x(0), 2) * ket("0");
        assert_eq!(gate_simp(&circuit), expected);
    }

    #[test]
    fn test_simp_nested_overflowing_power() {
        let circuit = Circuit::power(Gate::z(0).pow(1 << 31), 2);
        assert!(matches!(circuit, Circuit::Pow(ref base, 2) if matches!(**base, Circuit::Pow(..))));
        assert!(gate_simp(&circuit).is_one());
    }

    #[test]
    fn test_simp_leaves_conjugations() {
        let circuit = Gate::h(0) * Gate::x(0) * Gate::h(0);
        assert_eq!(gate_simp(&circuit), circuit);
    }
}
