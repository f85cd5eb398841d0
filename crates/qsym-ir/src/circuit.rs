//! Symbolic circuit expressions.
//!
//! A [`Circuit`] is an algebraic expression over scalars, qubit states and
//! gates. All construction goes through the normalising constructors
//! [`Circuit::product`], [`Circuit::sum`] and [`Circuit::power`], so two
//! circuits that differ only by flattening, scalar folding, like-term
//! collection or gate-power merging compare equal.
//!
//! Products read right to left: in `CNOT(1,0)*H(1)*|00>` the Hadamard acts
//! first.

use num_traits::{One, Zero};
use qsym_algebra::{Coefficient, Scalar};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::gate::Gate;
use crate::qubit::QubitState;

/// A symbolic circuit expression.
///
/// Normal-form invariants, maintained by the constructors:
/// - `Mul` has at least two factors, no nested `Mul`, at most one `Scalar`
///   factor which is first and is neither 0 nor 1, and no two adjacent
///   factors with the same gate base whose exponents sum to at most
///   `u32::MAX`.
/// - `Add` has at least two terms, no nested `Add`, distinct non-scalar
///   parts and canonical term order.
/// - `Pow` has an exponent of at least 2 and a base that is not a
///   `Scalar`. The base is a `Pow` only when the combined exponent would
///   exceed `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Circuit {
    /// A coefficient.
    Scalar(Coefficient),
    /// A basis state.
    Qubit(QubitState),
    /// A gate.
    Gate(Gate),
    /// A base raised to a non-negative integer power.
    Pow(Box<Circuit>, u32),
    /// A sum of terms.
    Add(Vec<Circuit>),
    /// A product of factors, applied right to left.
    Mul(Vec<Circuit>),
}

impl Circuit {
    /// The scalar 0, which also stands for the empty superposition.
    pub fn zero() -> Self {
        Circuit::Scalar(Coefficient::zero())
    }

    /// The scalar 1.
    pub fn one() -> Self {
        Circuit::Scalar(Coefficient::one())
    }

    /// Whether this is the scalar 0.
    pub fn is_zero(&self) -> bool {
        matches!(self, Circuit::Scalar(c) if c.is_zero())
    }

    /// Whether this is the scalar 1.
    pub fn is_one(&self) -> bool {
        matches!(self, Circuit::Scalar(c) if c.is_one())
    }

    /// Normalised product of `factors`, leftmost first.
    pub fn product(factors: impl IntoIterator<Item = Circuit>) -> Self {
        let mut coefficient = Coefficient::one();
        let mut rest = Vec::new();
        for factor in factors {
            match factor {
                Circuit::Mul(inner) => {
                    for f in inner {
                        push_factor(&mut coefficient, &mut rest, f);
                    }
                }
                other => push_factor(&mut coefficient, &mut rest, other),
            }
        }
        if coefficient.is_zero() {
            return Circuit::zero();
        }

        let mut merged: Vec<Circuit> = Vec::with_capacity(rest.len());
        for factor in rest {
            if let Some(last) = merged.last_mut() {
                let combined = match (last.gate_base(), factor.gate_base()) {
                    (Some((a, m)), Some((b, n))) if a == b => m
                        .checked_add(n)
                        .map(|exp| Circuit::power(Circuit::Gate(a.clone()), exp)),
                    _ => None,
                };
                if let Some(combined) = combined {
                    *last = combined;
                    continue;
                }
            }
            merged.push(factor);
        }

        if merged.is_empty() {
            return Circuit::Scalar(coefficient);
        }
        if coefficient.is_one() {
            if merged.len() == 1 {
                return merged.remove(0);
            }
            return Circuit::Mul(merged);
        }
        let mut factors = Vec::with_capacity(merged.len() + 1);
        factors.push(Circuit::Scalar(coefficient));
        factors.extend(merged);
        Circuit::Mul(factors)
    }

    /// Normalised sum of `terms`.
    pub fn sum(terms: impl IntoIterator<Item = Circuit>) -> Self {
        let mut collected: BTreeMap<Option<Circuit>, Coefficient> = BTreeMap::new();
        let mut add = |term: Circuit| {
            let (coefficient, rest) = term.into_coefficient_split();
            let entry = collected.entry(rest).or_default();
            *entry = &*entry + &coefficient;
        };
        for term in terms {
            match term {
                Circuit::Add(inner) => inner.into_iter().for_each(&mut add),
                other => add(other),
            }
        }

        let mut out: Vec<Circuit> = collected
            .into_iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(rest, c)| match rest {
                None => Circuit::Scalar(c),
                Some(r) => Circuit::product([Circuit::Scalar(c), r]),
            })
            .collect();
        match out.len() {
            0 => Circuit::zero(),
            1 => out.remove(0),
            _ => Circuit::Add(out),
        }
    }

    /// Normalised power `base^exp`.
    pub fn power(base: Circuit, exp: u32) -> Self {
        match (base, exp) {
            (_, 0) => Circuit::one(),
            (base, 1) => base,
            (Circuit::Scalar(c), n) => Circuit::Scalar(c.pow(n)),
            (Circuit::Pow(inner, m), n) => match m.checked_mul(n) {
                Some(exp) => Circuit::power(*inner, exp),
                None => Circuit::Pow(Box::new(Circuit::Pow(inner, m)), n),
            },
            (base, n) => Circuit::Pow(Box::new(base), n),
        }
    }

    /// The gate and exponent of a gate or gate power.
    pub fn gate_base(&self) -> Option<(&Gate, u32)> {
        match self {
            Circuit::Gate(g) => Some((g, 1)),
            Circuit::Pow(base, n) => match base.as_ref() {
                Circuit::Gate(g) => Some((g, *n)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Factors of a product, or the expression itself.
    pub fn factors(&self) -> &[Circuit] {
        match self {
            Circuit::Mul(factors) => factors,
            other => std::slice::from_ref(other),
        }
    }

    /// Terms of a sum, or the expression itself.
    pub fn terms(&self) -> &[Circuit] {
        match self {
            Circuit::Add(terms) => terms,
            other => std::slice::from_ref(other),
        }
    }

    /// Split into the leading coefficient and the remaining expression.
    ///
    /// `3*H(0)*|0>` splits into `3` and `H(0)*|0>`; a bare scalar splits
    /// into itself and `1`.
    pub fn split_coefficient(&self) -> (Coefficient, Circuit) {
        let (c, rest) = self.clone().into_coefficient_split();
        (c, rest.unwrap_or_else(Circuit::one))
    }

    fn into_coefficient_split(self) -> (Coefficient, Option<Circuit>) {
        match self {
            Circuit::Scalar(c) => (c, None),
            Circuit::Mul(mut factors) => {
                let coefficient = match factors.first() {
                    Some(Circuit::Scalar(c)) => c.clone(),
                    _ => return (Coefficient::one(), Some(Circuit::Mul(factors))),
                };
                factors.remove(0);
                let rest = if factors.len() == 1 {
                    factors.pop()
                } else {
                    Some(Circuit::Mul(factors))
                };
                (coefficient, rest)
            }
            other => (Coefficient::one(), Some(other)),
        }
    }

    /// Distribute products over sums and unroll powers of non-gate bases.
    ///
    /// Gate powers such as `H(0)**2` are kept, everything else ends up as a
    /// sum of products of scalars, gates, gate powers and states.
    pub fn expand(&self) -> Circuit {
        match self {
            Circuit::Scalar(_) | Circuit::Qubit(_) | Circuit::Gate(_) => self.clone(),
            Circuit::Pow(base, n) => {
                let base = base.expand();
                if matches!(base, Circuit::Gate(_)) {
                    Circuit::power(base, *n)
                } else {
                    expand_product(vec![base; *n as usize])
                }
            }
            Circuit::Add(terms) => Circuit::sum(terms.iter().map(Circuit::expand)),
            Circuit::Mul(factors) => expand_product(factors.iter().map(Circuit::expand).collect()),
        }
    }

    /// Replace the symbol `name` by `value` in every coefficient and custom
    /// gate matrix.
    pub fn substitute(&self, name: &str, value: &Coefficient) -> Circuit {
        match self {
            Circuit::Scalar(c) => Circuit::Scalar(c.substitute(name, value)),
            Circuit::Qubit(_) => self.clone(),
            Circuit::Gate(g) => Circuit::Gate(g.substitute(name, value)),
            Circuit::Pow(base, n) => Circuit::power(base.substitute(name, value), *n),
            Circuit::Add(terms) => Circuit::sum(terms.iter().map(|t| t.substitute(name, value))),
            Circuit::Mul(factors) => {
                Circuit::product(factors.iter().map(|f| f.substitute(name, value)))
            }
        }
    }

    /// Every free symbol.
    pub fn symbols(&self) -> BTreeSet<String> {
        match self {
            Circuit::Scalar(c) => c.symbols(),
            Circuit::Qubit(_) => BTreeSet::new(),
            Circuit::Gate(g) => g.symbols(),
            Circuit::Pow(base, _) => base.symbols(),
            Circuit::Add(children) | Circuit::Mul(children) => {
                children.iter().flat_map(Circuit::symbols).collect()
            }
        }
    }

    fn fmt_factor(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Circuit::Scalar(c) => fmt_coefficient_factor(f, c),
            Circuit::Add(_) | Circuit::Mul(_) => write!(f, "({self})"),
            _ => write!(f, "{self}"),
        }
    }
}

fn push_factor(coefficient: &mut Coefficient, rest: &mut Vec<Circuit>, factor: Circuit) {
    match factor {
        Circuit::Scalar(c) => *coefficient = &*coefficient * &c,
        other => rest.push(other),
    }
}

fn expand_product(factors: Vec<Circuit>) -> Circuit {
    let mut partials: Vec<Vec<Circuit>> = vec![Vec::new()];
    for factor in factors {
        match factor {
            Circuit::Add(terms) => {
                partials = partials
                    .iter()
                    .flat_map(|partial| {
                        terms.iter().map(move |term| {
                            let mut next = partial.clone();
                            next.push(term.clone());
                            next
                        })
                    })
                    .collect();
            }
            other => {
                for partial in &mut partials {
                    partial.push(other.clone());
                }
            }
        }
    }
    Circuit::sum(partials.into_iter().map(Circuit::product))
}

fn fmt_coefficient_factor(f: &mut fmt::Formatter<'_>, c: &Coefficient) -> fmt::Result {
    if c.num_terms() > 1 {
        write!(f, "({c})")
    } else {
        write!(f, "{c}")
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Circuit::Scalar(c) => write!(f, "{c}"),
            Circuit::Qubit(q) => write!(f, "{q}"),
            Circuit::Gate(g) => write!(f, "{g}"),
            Circuit::Pow(base, n) => match base.as_ref() {
                Circuit::Gate(_) | Circuit::Qubit(_) => write!(f, "{base}**{n}"),
                _ => write!(f, "({base})**{n}"),
            },
            Circuit::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{term}")?;
                        continue;
                    }
                    let (c, rest) = term.split_coefficient();
                    if c.is_single_term() && c.is_negative_term() {
                        let negated = Circuit::product([Circuit::Scalar(-c), rest]);
                        write!(f, " - {negated}")?;
                    } else {
                        write!(f, " + {term}")?;
                    }
                }
                Ok(())
            }
            Circuit::Mul(factors) => {
                let mut rest = factors.as_slice();
                if let Some(Circuit::Scalar(c)) = factors.first() {
                    rest = &factors[1..];
                    if *c == -Coefficient::one() {
                        write!(f, "-")?;
                    } else {
                        fmt_coefficient_factor(f, c)?;
                        write!(f, "*")?;
                    }
                }
                for (i, factor) in rest.iter().enumerate() {
                    if i > 0 {
                        write!(f, "*")?;
                    }
                    factor.fmt_factor(f)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Coefficient> for Circuit {
    fn from(value: Coefficient) -> Self {
        Circuit::Scalar(value)
    }
}

impl From<Scalar> for Circuit {
    fn from(value: Scalar) -> Self {
        Circuit::Scalar(Coefficient::constant(value))
    }
}

impl From<i64> for Circuit {
    fn from(value: i64) -> Self {
        Circuit::Scalar(Coefficient::integer(value))
    }
}

impl From<QubitState> for Circuit {
    fn from(value: QubitState) -> Self {
        Circuit::Qubit(value)
    }
}

impl From<Gate> for Circuit {
    fn from(value: Gate) -> Self {
        Circuit::Gate(value)
    }
}

impl<T: Into<Circuit>> Mul<T> for Circuit {
    type Output = Circuit;

    fn mul(self, rhs: T) -> Circuit {
        Circuit::product([self, rhs.into()])
    }
}

impl<T: Into<Circuit>> Add<T> for Circuit {
    type Output = Circuit;

    fn add(self, rhs: T) -> Circuit {
        Circuit::sum([self, rhs.into()])
    }
}

impl<T: Into<Circuit>> Sub<T> for Circuit {
    type Output = Circuit;

    fn sub(self, rhs: T) -> Circuit {
        Circuit::sum([self, -rhs.into()])
    }
}

impl Neg for Circuit {
    type Output = Circuit;

    fn neg(self) -> Circuit {
        Circuit::product([Circuit::from(-1), self])
    }
}

impl<T: Into<Circuit>> Mul<T> for Gate {
    type Output = Circuit;

    fn mul(self, rhs: T) -> Circuit {
        Circuit::from(self) * rhs
    }
}

impl<T: Into<Circuit>> Add<T> for QubitState {
    type Output = Circuit;

    fn add(self, rhs: T) -> Circuit {
        Circuit::from(self) + rhs
    }
}

impl Mul<Circuit> for Scalar {
    type Output = Circuit;

    fn mul(self, rhs: Circuit) -> Circuit {
        Circuit::from(self) * rhs
    }
}

impl Mul<Circuit> for Coefficient {
    type Output = Circuit;

    fn mul(self, rhs: Circuit) -> Circuit {
        Circuit::from(self) * rhs
    }
}
