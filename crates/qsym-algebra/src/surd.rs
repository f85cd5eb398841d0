//! Exact real numbers of the form `a + b·√2` with rational `a`, `b`.
//!
//! Every real entry of the standard gate set (0, ±1, ±1/√2, ±√2/2) lives in
//! this field, so products of gate matrices never leave it. Both parts are
//! arbitrary-precision, so large constants and high powers stay exact.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{AlgebraError, AlgebraResult};

/// An element `rational + radical·√2` of the field Q(√2).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Surd {
    /// Rational part.
    pub rational: BigRational,
    /// Coefficient of √2.
    pub radical: BigRational,
}

impl Surd {
    /// Create `rational + radical·√2`.
    pub fn new(rational: BigRational, radical: BigRational) -> Self {
        Self { rational, radical }
    }

    /// An integer.
    pub fn integer(value: i64) -> Self {
        Self::from(BigInt::from(value))
    }

    /// A fraction `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn fraction(numer: i64, denom: i64) -> Self {
        Self::from(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// √2.
    pub fn sqrt2() -> Self {
        Self::new(BigRational::zero(), BigRational::one())
    }

    /// 1/√2 = √2/2.
    pub fn frac_1_sqrt2() -> Self {
        Self::new(
            BigRational::zero(),
            BigRational::new(BigInt::one(), BigInt::from(2)),
        )
    }

    /// Whether the √2 part vanishes.
    #[inline]
    pub fn is_rational(&self) -> bool {
        self.radical.is_zero()
    }

    /// Whether exactly one of the two parts is non-zero.
    #[inline]
    pub fn is_single_term(&self) -> bool {
        self.rational.is_zero() || self.radical.is_zero()
    }

    /// Whether the printed form starts with a minus sign.
    pub fn is_negative_term(&self) -> bool {
        if self.rational.is_zero() {
            self.radical.is_negative()
        } else {
            self.rational.is_negative()
        }
    }

    /// Galois conjugate `a - b·√2`.
    pub fn radical_conjugate(&self) -> Self {
        Self::new(self.rational.clone(), -&self.radical)
    }

    /// Field norm `a² - 2b²`, which is zero only for zero.
    pub fn norm(&self) -> BigRational {
        let two = BigRational::from_integer(BigInt::from(2));
        &self.rational * &self.rational - two * &self.radical * &self.radical
    }

    /// Multiplicative inverse.
    pub fn inv(&self) -> AlgebraResult<Self> {
        let norm = self.norm();
        if norm.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        let conj = self.radical_conjugate();
        Ok(Self::new(conj.rational / &norm, conj.radical / &norm))
    }

    /// Integer power by repeated squaring.
    pub fn pow(&self, exp: u32) -> Self {
        let mut result = Self::one();
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

    /// Floating-point approximation.
    ///
    /// Parts too large for `f64` come out infinite.
    pub fn to_f64(&self) -> f64 {
        ratio_to_f64(&self.rational) + ratio_to_f64(&self.radical) * std::f64::consts::SQRT_2
    }
}

fn ratio_to_f64(value: &BigRational) -> f64 {
    value.to_f64().unwrap_or_else(|| {
        if value.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

impl Zero for Surd {
    fn zero() -> Self {
        Self::new(BigRational::zero(), BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.rational.is_zero() && self.radical.is_zero()
    }
}

impl One for Surd {
    fn one() -> Self {
        Self::integer(1)
    }
}

impl Default for Surd {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Surd {
    fn from(value: i64) -> Self {
        Surd::integer(value)
    }
}

impl From<BigInt> for Surd {
    fn from(value: BigInt) -> Self {
        Surd::from(BigRational::from_integer(value))
    }
}

impl From<BigRational> for Surd {
    fn from(value: BigRational) -> Self {
        Surd::new(value, BigRational::zero())
    }
}

impl<'b> Add<&'b Surd> for &Surd {
    type Output = Surd;

    fn add(self, rhs: &'b Surd) -> Surd {
        Surd::new(&self.rational + &rhs.rational, &self.radical + &rhs.radical)
    }
}

impl<'b> Sub<&'b Surd> for &Surd {
    type Output = Surd;

    fn sub(self, rhs: &'b Surd) -> Surd {
        Surd::new(&self.rational - &rhs.rational, &self.radical - &rhs.radical)
    }
}

impl<'b> Mul<&'b Surd> for &Surd {
    type Output = Surd;

    // (a + b√2)(c + d√2) = (ac + 2bd) + (ad + bc)√2
    fn mul(self, rhs: &'b Surd) -> Surd {
        let two = BigRational::from_integer(BigInt::from(2));
        Surd::new(
            &self.rational * &rhs.rational + two * &self.radical * &rhs.radical,
            &self.rational * &rhs.radical + &self.radical * &rhs.rational,
        )
    }
}

impl Neg for &Surd {
    type Output = Surd;

    fn neg(self) -> Surd {
        Surd::new(-&self.rational, -&self.radical)
    }
}

impl Neg for Surd {
    type Output = Surd;

    fn neg(self) -> Surd {
        -&self
    }
}

/// Forwards the owned-operand forms of a binary operator to the
/// reference form.
macro_rules! forward_binop {
    ($ty:ident, $imp:ident, $method:ident) => {
        impl $imp for $ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                $imp::$method(&self, &rhs)
            }
        }

        impl<'a> $imp<&'a $ty> for $ty {
            type Output = $ty;

            fn $method(self, rhs: &'a $ty) -> $ty {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<$ty> for &$ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                $imp::$method(self, &rhs)
            }
        }
    };
}

pub(crate) use forward_binop;

forward_binop!(Surd, Add, add);
forward_binop!(Surd, Sub, sub);
forward_binop!(Surd, Mul, mul);

fn fmt_ratio(f: &mut fmt::Formatter<'_>, value: &BigRational) -> fmt::Result {
    if value.is_integer() {
        write!(f, "{}", value.numer())
    } else {
        write!(f, "{}/{}", value.numer(), value.denom())
    }
}

fn fmt_radical(f: &mut fmt::Formatter<'_>, value: &BigRational) -> fmt::Result {
    let numer = value.numer().abs();
    if numer.is_one() {
        write!(f, "sqrt(2)")?;
    } else {
        write!(f, "{numer}*sqrt(2)")?;
    }
    if !value.is_integer() {
        write!(f, "/{}", value.denom())?;
    }
    Ok(())
}

impl fmt::Display for Surd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.rational.is_zero(), self.radical.is_zero()) {
            (true, true) => write!(f, "0"),
            (false, true) => fmt_ratio(f, &self.rational),
            (true, false) => {
                if self.radical.is_negative() {
                    write!(f, "-")?;
                }
                fmt_radical(f, &self.radical)
            }
            (false, false) => {
                fmt_ratio(f, &self.rational)?;
                if self.radical.is_negative() {
                    write!(f, " - ")?;
                } else {
                    write!(f, " + ")?;
                }
                fmt_radical(f, &self.radical)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt2_squared() {
        assert_eq!(Surd::sqrt2() * Surd::sqrt2(), Surd::integer(2));
        assert_eq!(
            Surd::frac_1_sqrt2() * Surd::frac_1_sqrt2(),
            Surd::fraction(1, 2)
        );
    }

    #[test]
    fn test_inverse() {
        let x = Surd::integer(1) + Surd::sqrt2();
        let inv = x.inv().unwrap();
        assert_eq!(&x * &inv, Surd::one());
        assert_eq!(Surd::sqrt2().inv().unwrap(), Surd::frac_1_sqrt2());
        assert!(matches!(Surd::zero().inv(), Err(AlgebraError::DivisionByZero)));
    }

    #[test]
    fn test_to_f64() {
        assert!((Surd::frac_1_sqrt2().to_f64() - 1.0 / 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((Surd::fraction(3, 4).to_f64() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Surd::zero().to_string(), "0");
        assert_eq!(Surd::integer(-3).to_string(), "-3");
        assert_eq!(Surd::fraction(1, 2).to_string(), "1/2");
        assert_eq!(Surd::sqrt2().to_string(), "sqrt(2)");
        assert_eq!(Surd::frac_1_sqrt2().to_string(), "sqrt(2)/2");
        assert_eq!((-Surd::frac_1_sqrt2()).to_string(), "-sqrt(2)/2");
        assert_eq!((Surd::one() - Surd::sqrt2() * Surd::integer(3)).to_string(), "1 - 3*sqrt(2)");
    }

    #[test]
    fn test_pow_beyond_machine_width() {
        let big = Surd::integer(2).pow(64);
        assert_eq!(big.to_string(), "18446744073709551616");
        assert_eq!(big.clone() * Surd::fraction(1, 2).pow(64), Surd::one());
        assert!((big.to_f64() - 2.0_f64.powi(64)).abs() < 1.0);

        // (√2)^130 = 2^65
        assert_eq!(Surd::sqrt2().pow(130), Surd::integer(2).pow(65));
        assert_eq!(Surd::sqrt2().pow(0), Surd::one());
    }

    #[test]
    fn test_inverse_of_large_value() {
        let x = Surd::integer(3).pow(50) + Surd::sqrt2().pow(81);
        assert_eq!(&x * &x.inv().unwrap(), Surd::one());
    }
}
