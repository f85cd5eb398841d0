//! QSYM algebra layer.
//!
//! The small slice of computer algebra the qubit engine needs:
//!
//! - [`Surd`] and [`Scalar`]: exact arbitrary-precision numbers in Q(√2, i),
//!   closed under the arithmetic of the standard gate set
//! - [`Coefficient`]: polynomials in named real symbols over [`Scalar`],
//!   always held in expanded canonical form
//! - [`Matrix`]: dense `ndarray` matrices of coefficients with block
//!   slicing, joins, Kronecker products and adjoints
//!
//! # Example
//!
//! ```rust
//! use qsym_algebra::{Adjoint, Matrix, Scalar};
//!
//! let h = Matrix::from_scalars(&[
//!     [Scalar::frac_1_sqrt2(), Scalar::frac_1_sqrt2()],
//!     [Scalar::frac_1_sqrt2(), -Scalar::frac_1_sqrt2()],
//! ]);
//! assert_eq!(h.try_mul(&h.adjoint()).unwrap(), Matrix::identity(2));
//! ```

pub mod coefficient;
pub mod error;
pub mod matrix;
pub mod scalar;
pub mod surd;

pub use coefficient::{Coefficient, Monomial};
pub use error::{AlgebraError, AlgebraResult};
pub use matrix::Matrix;
pub use scalar::Scalar;
pub use surd::Surd;

/// Hermitian conjugation for values that define it.
pub trait Adjoint {
    /// The conjugate transpose.
    #[must_use]
    fn adjoint(&self) -> Self;
}
