//! Symbolic coefficients: polynomials in named real symbols with exact
//! complex scalar coefficients.
//!
//! A [`Coefficient`] is kept in expanded canonical form at all times, so
//! structural equality is algebraic equality.

use num_complex::Complex64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::Adjoint;
use crate::error::{AlgebraError, AlgebraResult};
use crate::scalar::Scalar;

/// A product of symbols raised to positive powers, sorted by symbol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Monomial(Vec<(String, u32)>);

impl Monomial {
    /// The empty product.
    pub fn unit() -> Self {
        Self(Vec::new())
    }

    /// A single symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self(vec![(name.into(), 1)])
    }

    /// Whether this is the empty product.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.0.is_empty()
    }

    /// Exponent of `name`, zero if absent.
    pub fn degree_of(&self, name: &str) -> u32 {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0, |(_, e)| *e)
    }

    /// The monomial with `name` removed.
    pub fn without(&self, name: &str) -> Self {
        Self(self.0.iter().filter(|(n, _)| n != name).cloned().collect())
    }

    /// Iterate over `(symbol, exponent)` pairs.
    pub fn factors(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(n, e)| (n.as_str(), *e))
    }

    fn mul(&self, other: &Self) -> Self {
        let mut merged: BTreeMap<&str, u32> = BTreeMap::new();
        for (name, exp) in self.factors().chain(other.factors()) {
            *merged.entry(name).or_insert(0) += exp;
        }
        Self(
            merged
                .into_iter()
                .map(|(n, e)| (n.to_string(), e))
                .collect(),
        )
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, exp)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            if *exp == 1 {
                write!(f, "{name}")?;
            } else {
                write!(f, "{name}**{exp}")?;
            }
        }
        Ok(())
    }
}

/// A polynomial `Σ scalar·monomial` with no zero terms.
///
/// Symbols stand for real parameters; conjugation acts on the scalars only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Coefficient {
    #[serde(with = "term_list")]
    terms: BTreeMap<Monomial, Scalar>,
}

impl Coefficient {
    /// A constant coefficient.
    pub fn constant(value: Scalar) -> Self {
        let mut terms = BTreeMap::new();
        if !value.is_zero() {
            terms.insert(Monomial::unit(), value);
        }
        Self { terms }
    }

    /// An integer constant.
    pub fn integer(value: i64) -> Self {
        Self::constant(Scalar::integer(value))
    }

    /// A named real symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::symbol(name), Scalar::one());
        Self { terms }
    }

    /// Whether the coefficient contains no symbols.
    pub fn is_constant(&self) -> bool {
        self.terms.keys().all(Monomial::is_unit)
    }

    /// The constant value, if the coefficient has no symbols.
    pub fn as_scalar(&self) -> Option<Scalar> {
        if !self.is_constant() {
            return None;
        }
        Some(
            self.terms
                .get(&Monomial::unit())
                .cloned()
                .unwrap_or_else(Scalar::zero),
        )
    }

    /// Whether this is a single signed term when printed.
    pub fn is_single_term(&self) -> bool {
        match self.terms.iter().next() {
            None => true,
            Some((_, scalar)) => self.terms.len() == 1 && scalar.is_single_term(),
        }
    }

    /// Whether the printed form starts with a minus sign.
    pub fn is_negative_term(&self) -> bool {
        self.terms
            .values()
            .next()
            .is_some_and(Scalar::is_negative_term)
    }

    /// Number of terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Iterate over `(monomial, scalar)` terms in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Scalar)> {
        self.terms.iter()
    }

    /// All symbol names appearing in this coefficient.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|m| m.factors().map(|(n, _)| n.to_string()))
            .collect()
    }

    /// Replace every occurrence of `name` with `value`.
    pub fn substitute(&self, name: &str, value: &Coefficient) -> Self {
        let mut result = Coefficient::zero();
        for (monomial, scalar) in &self.terms {
            let degree = monomial.degree_of(name);
            let mut term = Coefficient::monomial(monomial.without(name), scalar.clone());
            if degree > 0 {
                term = &term * &value.pow(degree);
            }
            result = &result + &term;
        }
        result
    }

    /// Multiply every term by an exact scalar.
    pub fn scale(&self, factor: &Scalar) -> Self {
        let mut terms = BTreeMap::new();
        for (m, s) in &self.terms {
            let v = s * factor;
            if !v.is_zero() {
                terms.insert(m.clone(), v);
            }
        }
        Self { terms }
    }

    /// Integer power by repeated squaring.
    pub fn pow(&self, exp: u32) -> Self {
        let mut result = Coefficient::one();
        let mut base = self.clone();
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Numeric value, failing if free symbols remain.
    pub fn to_complex64(&self) -> AlgebraResult<Complex64> {
        self.as_scalar()
            .map(|s| s.to_complex64())
            .ok_or_else(|| AlgebraError::NonNumeric(self.to_string()))
    }

    fn monomial(monomial: Monomial, scalar: Scalar) -> Self {
        let mut terms = BTreeMap::new();
        if !scalar.is_zero() {
            terms.insert(monomial, scalar);
        }
        Self { terms }
    }
}

impl Zero for Coefficient {
    fn zero() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for Coefficient {
    fn one() -> Self {
        Self::integer(1)
    }
}

impl From<Scalar> for Coefficient {
    fn from(value: Scalar) -> Self {
        Coefficient::constant(value)
    }
}

impl From<i64> for Coefficient {
    fn from(value: i64) -> Self {
        Coefficient::integer(value)
    }
}

impl Adjoint for Coefficient {
    fn adjoint(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(m, s)| (m.clone(), s.conj()))
                .collect(),
        }
    }
}

impl Add<&Coefficient> for &Coefficient {
    type Output = Coefficient;

    fn add(self, rhs: &Coefficient) -> Coefficient {
        let mut terms = self.terms.clone();
        for (m, s) in &rhs.terms {
            let sum = match terms.get(m) {
                Some(existing) => existing + s,
                None => s.clone(),
            };
            if sum.is_zero() {
                terms.remove(m);
            } else {
                terms.insert(m.clone(), sum);
            }
        }
        Coefficient { terms }
    }
}

impl Sub<&Coefficient> for &Coefficient {
    type Output = Coefficient;

    fn sub(self, rhs: &Coefficient) -> Coefficient {
        self + &(-rhs)
    }
}

impl Mul<&Coefficient> for &Coefficient {
    type Output = Coefficient;

    fn mul(self, rhs: &Coefficient) -> Coefficient {
        let mut result = Coefficient::zero();
        for (m1, s1) in &self.terms {
            for (m2, s2) in &rhs.terms {
                let term = Coefficient::monomial(m1.mul(m2), s1 * s2);
                result = &result + &term;
            }
        }
        result
    }
}

impl Neg for &Coefficient {
    type Output = Coefficient;

    fn neg(self) -> Coefficient {
        self.scale(&-Scalar::one())
    }
}

impl Add for Coefficient {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Sub for Coefficient {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl Mul for Coefficient {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl Neg for Coefficient {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

fn fmt_term(f: &mut fmt::Formatter<'_>, monomial: &Monomial, scalar: &Scalar) -> fmt::Result {
    if monomial.is_unit() {
        return write!(f, "{scalar}");
    }
    if *scalar == Scalar::one() {
        write!(f, "{monomial}")
    } else if *scalar == -Scalar::one() {
        write!(f, "-{monomial}")
    } else if scalar.is_single_term() {
        write!(f, "{scalar}*{monomial}")
    } else {
        write!(f, "({scalar})*{monomial}")
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (monomial, scalar)) in self.terms.iter().enumerate() {
            if i == 0 {
                fmt_term(f, monomial, scalar)?;
            } else if scalar.is_single_term() && scalar.is_negative_term() {
                write!(f, " - ")?;
                fmt_term(f, monomial, &-scalar)?;
            } else {
                write!(f, " + ")?;
                fmt_term(f, monomial, scalar)?;
            }
        }
        Ok(())
    }
}

/// Serialize the term map as a list of pairs so that formats with string-only
/// map keys (JSON) can carry it.
mod term_list {
    use super::{Monomial, Scalar};
    use num_traits::Zero;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        terms: &BTreeMap<Monomial, Scalar>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(terms.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Monomial, Scalar>, D::Error> {
        let pairs: Vec<(Monomial, Scalar)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().filter(|(_, s)| !s.is_zero()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_roundtrip() {
        let c = Coefficient::constant(Scalar::frac_1_sqrt2());
        assert!(c.is_constant());
        assert_eq!(c.as_scalar(), Some(Scalar::frac_1_sqrt2()));
        assert!(Coefficient::integer(0).is_zero());
    }

    #[test]
    fn test_symbolic_arithmetic() {
        let a = Coefficient::symbol("a");
        let b = Coefficient::symbol("b");

        let sum = &a + &b;
        let square = &sum * &sum;
        let expected = &(&(&a * &a) + &(&Coefficient::integer(2) * &(&a * &b))) + &(&b * &b);
        assert_eq!(square, expected);

        let cancelled = &sum - &a;
        assert_eq!(cancelled, b);
        assert!(!cancelled.is_constant());
        assert_eq!(cancelled.as_scalar(), None);
    }

    #[test]
    fn test_symbols_and_substitute() {
        let a = Coefficient::symbol("a");
        let b = Coefficient::symbol("b");
        let expr = &(&a * &a) + &b;

        let names: Vec<_> = expr.symbols().into_iter().collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);

        let bound = expr.substitute("a", &Coefficient::integer(3));
        assert_eq!(bound, &Coefficient::integer(9) + &b);

        let fully = bound.substitute("b", &Coefficient::integer(-9));
        assert!(fully.is_zero());
    }

    #[test]
    fn test_pow_of_large_constant() {
        let big = Coefficient::integer(2).pow(64);
        assert_eq!(big.to_string(), "18446744073709551616");
        let a = Coefficient::symbol("a");
        let scaled = &big * &a;
        assert_eq!(scaled.to_string(), "18446744073709551616*a");
        assert_eq!(
            (&a + &Coefficient::integer(1)).pow(3),
            &(&(&a.pow(3) + &(&Coefficient::integer(3) * &a.pow(2))) + &(&Coefficient::integer(3) * &a))
                + &Coefficient::integer(1)
        );
    }

    #[test]
    fn test_adjoint_conjugates_scalars() {
        let c = &Coefficient::constant(Scalar::i()) * &Coefficient::symbol("a");
        let expected = &Coefficient::constant(-Scalar::i()) * &Coefficient::symbol("a");
        assert_eq!(c.adjoint(), expected);
    }

    #[test]
    fn test_to_complex64() {
        assert!(Coefficient::symbol("x").to_complex64().is_err());
        let v = Coefficient::constant(Scalar::i()).to_complex64().unwrap();
        assert!((v - Complex64::new(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_display() {
        let a = Coefficient::symbol("a");
        let b = Coefficient::symbol("b");
        assert_eq!(Coefficient::zero().to_string(), "0");
        assert_eq!((&a - &b).to_string(), "a - b");
        assert_eq!((&a * &a).to_string(), "a**2");
        assert_eq!(
            (&Coefficient::constant(Scalar::frac_1_sqrt2()) * &a).to_string(),
            "sqrt(2)/2*a"
        );
        assert_eq!((&Coefficient::integer(1) + &a).to_string(), "1 + a");
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = &Coefficient::symbol("a") + &Coefficient::constant(Scalar::i());
        let json = serde_json::to_string(&c).unwrap();
        let back: Coefficient = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
