//! Exact complex scalars over Q(√2).

use num_complex::Complex64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::Adjoint;
use crate::error::AlgebraResult;
use crate::surd::{Surd, forward_binop};

/// An exact complex number `re + im·i` with `re`, `im` in Q(√2).
///
/// This covers every entry of the built-in gates, including the T-gate
/// phase `exp(iπ/4) = (1 + i)/√2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scalar {
    /// Real part.
    pub re: Surd,
    /// Imaginary part.
    pub im: Surd,
}

impl Scalar {
    /// Create a scalar from its real and imaginary parts.
    pub fn new(re: Surd, im: Surd) -> Self {
        Self { re, im }
    }

    /// A real scalar.
    pub fn real(re: Surd) -> Self {
        Self::new(re, Surd::zero())
    }

    /// An integer.
    pub fn integer(value: i64) -> Self {
        Self::real(Surd::integer(value))
    }

    /// A rational `numer / denom`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn fraction(numer: i64, denom: i64) -> Self {
        Self::real(Surd::fraction(numer, denom))
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Self::new(Surd::zero(), Surd::one())
    }

    /// √2.
    pub fn sqrt2() -> Self {
        Self::real(Surd::sqrt2())
    }

    /// 1/√2.
    pub fn frac_1_sqrt2() -> Self {
        Self::real(Surd::frac_1_sqrt2())
    }

    /// `exp(iπ/4) = √2/2 + i·√2/2`.
    pub fn exp_i_pi_4() -> Self {
        Self::new(Surd::frac_1_sqrt2(), Surd::frac_1_sqrt2())
    }

    /// Whether the imaginary part vanishes.
    #[inline]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Whether the printed form is a single signed term (no `+`/`-` inside).
    pub fn is_single_term(&self) -> bool {
        if self.im.is_zero() {
            self.re.is_single_term()
        } else {
            self.re.is_zero() && self.im.is_single_term()
        }
    }

    /// Whether the printed form starts with a minus sign.
    pub fn is_negative_term(&self) -> bool {
        if self.im.is_zero() || !self.re.is_zero() {
            self.re.is_negative_term()
        } else {
            self.im.is_negative_term()
        }
    }

    /// Complex conjugate.
    pub fn conj(&self) -> Self {
        Self::new(self.re.clone(), -&self.im)
    }

    /// Squared modulus `re² + im²`.
    pub fn norm_sqr(&self) -> Surd {
        &self.re * &self.re + &self.im * &self.im
    }

    /// Multiplicative inverse.
    pub fn inv(&self) -> AlgebraResult<Self> {
        let inv_norm = self.norm_sqr().inv()?;
        let conj = self.conj();
        Ok(Self::new(conj.re * &inv_norm, conj.im * &inv_norm))
    }

    /// Exact quotient `self / rhs`.
    pub fn try_div(&self, rhs: &Self) -> AlgebraResult<Self> {
        Ok(self * rhs.inv()?)
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
    pub fn to_complex64(&self) -> Complex64 {
        Complex64::new(self.re.to_f64(), self.im.to_f64())
    }
}

impl Zero for Scalar {
    fn zero() -> Self {
        Self::real(Surd::zero())
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

impl One for Scalar {
    fn one() -> Self {
        Self::integer(1)
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::integer(value)
    }
}

impl From<Surd> for Scalar {
    fn from(value: Surd) -> Self {
        Scalar::real(value)
    }
}

impl Adjoint for Scalar {
    fn adjoint(&self) -> Self {
        self.conj()
    }
}

impl<'b> Add<&'b Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl<'b> Sub<&'b Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &'b Scalar) -> Scalar {
        Scalar::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }
}

impl<'b> Mul<&'b Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::new(
            &self.re * &rhs.re - &self.im * &rhs.im,
            &self.re * &rhs.im + &self.im * &rhs.re,
        )
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar::new(-&self.re, -&self.im)
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        -&self
    }
}

forward_binop!(Scalar, Add, add);
forward_binop!(Scalar, Sub, sub);
forward_binop!(Scalar, Mul, mul);

fn fmt_imaginary(f: &mut fmt::Formatter<'_>, im: &Surd) -> fmt::Result {
    if *im == Surd::one() {
        write!(f, "i")
    } else if *im == -Surd::one() {
        write!(f, "-i")
    } else if im.is_single_term() {
        write!(f, "{im}*i")
    } else {
        write!(f, "({im})*i")
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            return write!(f, "{}", self.re);
        }
        if self.re.is_zero() {
            return fmt_imaginary(f, &self.im);
        }
        write!(f, "({}", self.re)?;
        if self.im.is_single_term() && self.im.is_negative_term() {
            write!(f, " - ")?;
            fmt_imaginary(f, &-&self.im)?;
        } else {
            write!(f, " + ")?;
            fmt_imaginary(f, &self.im)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i_squared() {
        assert_eq!(Scalar::i() * Scalar::i(), -Scalar::one());
        assert_eq!(Scalar::i().pow(4), Scalar::one());
    }

    #[test]
    fn test_t_phase_powers() {
        let t = Scalar::exp_i_pi_4();
        assert_eq!(t.pow(2), Scalar::i());
        assert_eq!(t.pow(4), -Scalar::one());
        assert_eq!(t.pow(8), Scalar::one());
    }

    #[test]
    fn test_inverse_and_division() {
        let z = Scalar::new(Surd::integer(1), Surd::integer(1));
        assert_eq!(&z * &z.inv().unwrap(), Scalar::one());
        let half = Scalar::one().try_div(&Scalar::integer(2)).unwrap();
        assert_eq!(half, Scalar::fraction(1, 2));
        assert!(Scalar::one().try_div(&Scalar::zero()).is_err());
    }

    #[test]
    fn test_large_powers_stay_exact() {
        let two = Scalar::integer(2);
        let big = two.pow(64);
        assert_eq!(big.to_string(), "18446744073709551616");
        assert_eq!(big.try_div(&two.pow(63)).unwrap(), two);

        // (1 + i)^128 = 2^64
        let z = Scalar::new(Surd::integer(1), Surd::integer(1));
        assert_eq!(z.pow(128), big);
        assert_eq!(Scalar::exp_i_pi_4().pow(1_000_001), Scalar::exp_i_pi_4());
    }

    #[test]
    fn test_to_complex64() {
        let c = Scalar::exp_i_pi_4().to_complex64();
        let expected = Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4);
        assert!((c - expected).norm() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::i().to_string(), "i");
        assert_eq!((-Scalar::i()).to_string(), "-i");
        assert_eq!(Scalar::frac_1_sqrt2().to_string(), "sqrt(2)/2");
        assert_eq!(
            Scalar::exp_i_pi_4().to_string(),
            "(sqrt(2)/2 + sqrt(2)/2*i)"
        );
        assert_eq!(
            Scalar::new(Surd::integer(1), Surd::integer(-2)).to_string(),
            "(1 - 2*i)"
        );
    }
}
