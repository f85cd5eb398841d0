//! Full Hilbert-space matrices of gates placed in a register.
//!
//! The construction is written once against the [`LinearAlgebra`] strategy
//! and instantiated for exact symbolic matrices ([`Symbolic`]) and for
//! floating-point `ndarray` matrices ([`Numeric`]).

use ndarray::Array2;
use num_complex::Complex64;
use qsym_algebra::{AlgebraError, Coefficient, Matrix};
use qsym_ir::{Basis, Gate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use crate::error::{EngineError, EngineResult};

/// Matrix operations the representer needs from a backend.
pub trait LinearAlgebra {
    /// The backend's matrix type.
    type Matrix: Clone + fmt::Debug;

    /// Convert an exact matrix into the backend's type.
    fn from_symbolic(matrix: &Matrix) -> EngineResult<Self::Matrix>;

    /// The `n × n` identity.
    fn identity(n: usize) -> Self::Matrix;

    /// A `rows × cols` zero matrix.
    fn zeros(rows: usize, cols: usize) -> Self::Matrix;

    /// Kronecker product `a ⊗ b`.
    fn kron(a: &Self::Matrix, b: &Self::Matrix) -> Self::Matrix;

    /// Entrywise sum.
    fn add(a: &Self::Matrix, b: &Self::Matrix) -> EngineResult<Self::Matrix>;

    /// Matrix product `a · b`.
    fn matmul(a: &Self::Matrix, b: &Self::Matrix) -> EngineResult<Self::Matrix>;

    /// Multiply every entry by a coefficient.
    fn scale(matrix: &Self::Matrix, factor: &Coefficient) -> EngineResult<Self::Matrix>;
}

/// Exact matrices of [`Coefficient`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Symbolic;

impl LinearAlgebra for Symbolic {
    type Matrix = Matrix;

    fn from_symbolic(matrix: &Matrix) -> EngineResult<Matrix> {
        Ok(matrix.clone())
    }

    fn identity(n: usize) -> Matrix {
        Matrix::identity(n)
    }

    fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::zeros(rows, cols)
    }

    fn kron(a: &Matrix, b: &Matrix) -> Matrix {
        a.kron(b)
    }

    fn add(a: &Matrix, b: &Matrix) -> EngineResult<Matrix> {
        Ok(a.try_add(b)?)
    }

    fn matmul(a: &Matrix, b: &Matrix) -> EngineResult<Matrix> {
        Ok(a.try_mul(b)?)
    }

    fn scale(matrix: &Matrix, factor: &Coefficient) -> EngineResult<Matrix> {
        Ok(matrix.scale(factor))
    }
}

/// Floating-point matrices of `Complex64`.
///
/// Symbolic coefficients have no numeric value; converting a matrix that
/// still contains symbols fails with [`AlgebraError::NonNumeric`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

impl Numeric {
    fn check_shapes(
        operation: &'static str,
        a: &Array2<Complex64>,
        b: &Array2<Complex64>,
        compatible: bool,
    ) -> EngineResult<()> {
        if compatible {
            return Ok(());
        }
        Err(AlgebraError::ShapeMismatch {
            operation,
            left: a.dim(),
            right: b.dim(),
        }
        .into())
    }
}

impl LinearAlgebra for Numeric {
    type Matrix = Array2<Complex64>;

    fn from_symbolic(matrix: &Matrix) -> EngineResult<Array2<Complex64>> {
        let values = matrix
            .entries()
            .map(Coefficient::to_complex64)
            .collect::<Result<Vec<_>, _>>()?;
        let cols = matrix.cols();
        Ok(Array2::from_shape_fn(matrix.shape(), |(r, c)| {
            values[r * cols + c]
        }))
    }

    fn identity(n: usize) -> Array2<Complex64> {
        Array2::eye(n)
    }

    fn zeros(rows: usize, cols: usize) -> Array2<Complex64> {
        Array2::zeros((rows, cols))
    }

    fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
        ndarray::linalg::kron(a, b)
    }

    fn add(a: &Array2<Complex64>, b: &Array2<Complex64>) -> EngineResult<Array2<Complex64>> {
        Self::check_shapes("add", a, b, a.dim() == b.dim())?;
        Ok(a + b)
    }

    fn matmul(a: &Array2<Complex64>, b: &Array2<Complex64>) -> EngineResult<Array2<Complex64>> {
        Self::check_shapes("mul", a, b, a.ncols() == b.nrows())?;
        Ok(a.dot(b))
    }

    fn scale(
        matrix: &Array2<Complex64>,
        factor: &Coefficient,
    ) -> EngineResult<Array2<Complex64>> {
        let factor = factor.to_complex64()?;
        Ok(matrix.mapv(|x| x * factor))
    }
}

/// Which backend a representation is computed with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Exact symbolic matrices.
    #[default]
    Symbolic,
    /// Floating-point `ndarray` matrices.
    Numeric,
}

impl Backend {
    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Symbolic => "symbolic",
            Backend::Numeric => "numeric",
        }
    }
}

impl FromStr for Backend {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symbolic" | "exact" => Ok(Backend::Symbolic),
            "numeric" | "ndarray" => Ok(Backend::Numeric),
            other => Err(EngineError::MalformedInput(format!(
                "unknown backend '{other}': expected 'symbolic' or 'numeric'"
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A matrix produced by either backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Representation {
    /// Exact result.
    Symbolic(Matrix),
    /// Floating-point result.
    Numeric(Array2<Complex64>),
}

impl Representation {
    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Representation::Symbolic(m) => m.shape(),
            Representation::Numeric(m) => m.dim(),
        }
    }

    /// The backend that produced this value.
    pub fn backend(&self) -> Backend {
        match self {
            Representation::Symbolic(_) => Backend::Symbolic,
            Representation::Numeric(_) => Backend::Numeric,
        }
    }

    /// The exact matrix, if this is a symbolic result.
    pub fn as_symbolic(&self) -> Option<&Matrix> {
        match self {
            Representation::Symbolic(m) => Some(m),
            Representation::Numeric(_) => None,
        }
    }

    /// Floating-point view of the result.
    pub fn to_numeric(&self) -> EngineResult<Array2<Complex64>> {
        match self {
            Representation::Symbolic(m) => Numeric::from_symbolic(m),
            Representation::Numeric(m) => Ok(m.clone()),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Symbolic(m) => write!(f, "{m}"),
            Representation::Numeric(m) => {
                write!(f, "[")?;
                for (r, row) in m.rows().into_iter().enumerate() {
                    if r > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[")?;
                    for (c, z) in row.iter().enumerate() {
                        if c > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{z}")?;
                    }
                    write!(f, "]")?;
                }
                write!(f, "]")
            }
        }
    }
}

fn projector(row_bit: usize, col_bit: usize) -> Matrix {
    let mut rows = [[0i64; 2]; 2];
    rows[row_bit][col_bit] = 1;
    Matrix::from_integers(&rows)
}

/// The `2^n × 2^n` matrix of `gate` acting on a register of `register_size`
/// qubits, in `basis`.
///
/// A register of one qubit yields the gate matrix itself.
pub fn represent_gate<B: LinearAlgebra>(
    gate: &Gate,
    basis: Basis,
    register_size: usize,
) -> EngineResult<B::Matrix> {
    gate.check_register(register_size)?;
    let matrix = gate.matrix_in(basis)?;
    trace!(gate = %gate, register_size, "building Hilbert-space matrix");
    if register_size == 1 {
        return B::from_symbolic(&matrix);
    }

    let targets = gate.targets();
    let n = register_size;
    if let [qubit] = targets {
        let q = *qubit as usize;
        let mut result = B::identity(1 << (n - q - 1));
        result = B::kron(&result, &B::from_symbolic(&matrix)?);
        return Ok(B::kron(&result, &B::identity(1 << q)));
    }

    // Sum over 2x2 blocks: |r><c| on every control line, block (r, c) on the
    // target line. Position p in the Kronecker list is qubit n - 1 - p.
    let (controls, target) = targets.split_at(targets.len() - 1);
    let target = target[0];
    let pattern_bits = controls.len();
    let identity = B::identity(2);
    let dim = 1 << n;
    let mut total: Option<B::Matrix> = None;
    for r in 0..(1usize << pattern_bits) {
        for c in 0..(1usize << pattern_bits) {
            let block = matrix.block(2 * r, 2 * c, 2, 2)?;
            if block.is_zero() {
                continue;
            }
            let mut term = B::identity(1);
            for p in 0..n {
                let qubit = (n - 1 - p) as u32;
                let factor = if qubit == target {
                    B::from_symbolic(&block)?
                } else if let Some(j) = controls.iter().position(|&t| t == qubit) {
                    let shift = pattern_bits - 1 - j;
                    B::from_symbolic(&projector((r >> shift) & 1, (c >> shift) & 1))?
                } else {
                    identity.clone()
                };
                term = B::kron(&term, &factor);
            }
            total = Some(match total {
                None => term,
                Some(acc) => B::add(&acc, &term)?,
            });
        }
    }
    Ok(total.unwrap_or_else(|| B::zeros(dim, dim)))
}

/// Symbolic shorthand for [`represent_gate`].
pub fn gate_matrix(gate: &Gate, basis: Basis, register_size: usize) -> EngineResult<Matrix> {
    represent_gate::<Symbolic>(gate, basis, register_size)
}

/// Whether every entry of a numeric matrix is within `tolerance` of the
/// corresponding exact entry.
pub fn approx_eq(exact: &Matrix, numeric: &Array2<Complex64>, tolerance: f64) -> bool {
    if exact.shape() != numeric.dim() {
        return false;
    }
    exact
        .entries()
        .zip(numeric.iter())
        .all(|(e, z)| match e.to_complex64() {
            Ok(v) => (v - z).norm() <= tolerance,
            Err(_) => false,
        })
}
