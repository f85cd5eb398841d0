//! Dense symbolic matrices.
//!
//! Storage, slicing and joins come from [`ndarray`]. The Kronecker and matrix
//! products are written out here because ndarray's BLAS-style kernels need
//! `Copy` elements.

use ndarray::{Array1, Array2, ArrayView1, Axis, concatenate, s};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

use crate::Adjoint;
use crate::coefficient::Coefficient;
use crate::error::{AlgebraError, AlgebraResult};
use crate::scalar::Scalar;

/// A dense matrix of [`Coefficient`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct Matrix {
    data: Array2<Coefficient>,
}

impl Matrix {
    /// A `rows × cols` zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from(Array2::zeros((rows, cols)))
    }

    /// The `n × n` identity.
    pub fn identity(n: usize) -> Self {
        Self::from(Array2::eye(n))
    }

    /// Build from row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Coefficient>) -> AlgebraResult<Self> {
        let len = data.len();
        Array2::from_shape_vec((rows, cols), data)
            .map(Self::from)
            .map_err(|_| AlgebraError::ShapeMismatch {
                operation: "from_vec",
                left: (rows, cols),
                right: (len, 1),
            })
    }

    /// Build from a list of rows, which must all have the same length.
    pub fn from_rows(rows: Vec<Vec<Coefficient>>) -> AlgebraResult<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
            return Err(AlgebraError::ShapeMismatch {
                operation: "from_rows",
                left: (1, ncols),
                right: (1, row.len()),
            });
        }
        Self::from_vec(nrows, ncols, rows.into_iter().flatten().collect())
    }

    /// Build a square or rectangular matrix from exact scalars.
    pub fn from_scalars<const C: usize>(rows: &[[Scalar; C]]) -> Self {
        Self::from(Array2::from_shape_fn((rows.len(), C), |(r, c)| {
            Coefficient::constant(rows[r][c].clone())
        }))
    }

    /// Build from integer literals.
    pub fn from_integers<const C: usize>(rows: &[[i64; C]]) -> Self {
        Self::from(Array2::from_shape_fn((rows.len(), C), |(r, c)| {
            Coefficient::integer(rows[r][c])
        }))
    }

    /// A square diagonal matrix of exact scalars.
    pub fn from_diagonal(diagonal: impl IntoIterator<Item = Scalar>) -> Self {
        let entries: Array1<Coefficient> = diagonal.into_iter().map(Coefficient::constant).collect();
        Self::from(Array2::from_diag(&entries))
    }

    /// A column vector.
    pub fn column_vector(entries: Vec<Coefficient>) -> Self {
        Self::from(Array1::from(entries).insert_axis(Axis(1)))
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.data.is_square()
    }

    /// Whether the matrix has a single column.
    pub fn is_column(&self) -> bool {
        self.cols() == 1
    }

    /// Whether every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(Zero::is_zero)
    }

    /// Entry at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Coefficient> {
        self.data.get((row, col))
    }

    /// All entries in row-major order.
    pub fn entries(&self) -> impl Iterator<Item = &Coefficient> {
        self.data.iter()
    }

    /// Iterate over the rows.
    pub fn row_views(&self) -> impl Iterator<Item = ArrayView1<'_, Coefficient>> {
        self.data.rows().into_iter()
    }

    /// The underlying array.
    pub fn as_array(&self) -> &Array2<Coefficient> {
        &self.data
    }

    /// Column `col` as a column vector.
    pub fn column(&self, col: usize) -> AlgebraResult<Self> {
        self.block(0, col, self.rows(), 1)
    }

    /// The `rows × cols` block whose top-left corner is `(row, col)`.
    pub fn block(&self, row: usize, col: usize, rows: usize, cols: usize) -> AlgebraResult<Self> {
        if row + rows > self.rows() || col + cols > self.cols() {
            return Err(AlgebraError::BlockOutOfBounds {
                row,
                col,
                rows,
                cols,
                shape: self.shape(),
            });
        }
        Ok(Self::from(
            self.data.slice(s![row..row + rows, col..col + cols]).to_owned(),
        ))
    }

    /// Place `other` to the right of `self`.
    pub fn row_join(&self, other: &Self) -> AlgebraResult<Self> {
        concatenate(Axis(1), &[self.data.view(), other.data.view()])
            .map(Self::from)
            .map_err(|_| self.mismatch("row_join", other))
    }

    /// Place `other` below `self`.
    pub fn col_join(&self, other: &Self) -> AlgebraResult<Self> {
        concatenate(Axis(0), &[self.data.view(), other.data.view()])
            .map(Self::from)
            .map_err(|_| self.mismatch("col_join", other))
    }

    /// Kronecker (tensor) product `self ⊗ other`.
    pub fn kron(&self, other: &Self) -> Self {
        let (orows, ocols) = other.shape();
        let mut out = Array2::zeros((self.rows() * orows, self.cols() * ocols));
        for ((ar, ac), a) in self.data.indexed_iter() {
            if a.is_zero() {
                continue;
            }
            for ((br, bc), b) in other.data.indexed_iter() {
                if b.is_zero() {
                    continue;
                }
                out[[ar * orows + br, ac * ocols + bc]] = a * b;
            }
        }
        Self::from(out)
    }

    /// Kronecker product of a sequence, left to right. Empty input yields the
    /// 1×1 identity.
    pub fn kron_all<'a>(factors: impl IntoIterator<Item = &'a Matrix>) -> Self {
        factors
            .into_iter()
            .fold(Self::identity(1), |acc, m| acc.kron(m))
    }

    /// Matrix product `self · other`.
    pub fn try_mul(&self, other: &Self) -> AlgebraResult<Self> {
        if self.cols() != other.rows() {
            return Err(self.mismatch("mul", other));
        }
        let mut out = Array2::<Coefficient>::zeros((self.rows(), other.cols()));
        for ((r, k), a) in self.data.indexed_iter() {
            if a.is_zero() {
                continue;
            }
            for (c, b) in other.data.row(k).iter().enumerate() {
                if b.is_zero() {
                    continue;
                }
                let slot = &mut out[[r, c]];
                *slot = &*slot + &(a * b);
            }
        }
        Ok(Self::from(out))
    }

    /// Entrywise sum.
    pub fn try_add(&self, other: &Self) -> AlgebraResult<Self> {
        if self.shape() != other.shape() {
            return Err(self.mismatch("add", other));
        }
        let mut out = self.data.clone();
        out.zip_mut_with(&other.data, |a, b| *a = &*a + b);
        Ok(Self::from(out))
    }

    /// Multiply every entry by `factor`.
    pub fn scale(&self, factor: &Coefficient) -> Self {
        self.map(|e| e * factor)
    }

    /// Transpose.
    pub fn transpose(&self) -> Self {
        Self::from(self.data.t().as_standard_layout().into_owned())
    }

    /// Apply `f` to every entry.
    pub fn map(&self, f: impl Fn(&Coefficient) -> Coefficient) -> Self {
        Self::from(self.data.map(f))
    }

    /// Substitute a symbol in every entry.
    pub fn substitute(&self, name: &str, value: &Coefficient) -> Self {
        self.map(|e| e.substitute(name, value))
    }

    fn mismatch(&self, operation: &'static str, other: &Self) -> AlgebraError {
        AlgebraError::ShapeMismatch {
            operation,
            left: self.shape(),
            right: other.shape(),
        }
    }
}

impl From<Array2<Coefficient>> for Matrix {
    fn from(data: Array2<Coefficient>) -> Self {
        Self { data }
    }
}

impl Adjoint for Matrix {
    fn adjoint(&self) -> Self {
        self.transpose().map(Adjoint::adjoint)
    }
}

impl PartialOrd for Matrix {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Matrix {
    fn cmp(&self, other: &Self) -> Ordering {
        self.shape()
            .cmp(&other.shape())
            .then_with(|| self.data.iter().cmp(other.data.iter()))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Coefficient;

    fn index(&self, index: (usize, usize)) -> &Coefficient {
        &self.data[index]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (r, row) in self.row_views().enumerate() {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (c, entry) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{entry}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

/// Serialized form: shape plus row-major entries.
#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vec<Coefficient>,
}

impl From<Matrix> for MatrixRepr {
    fn from(matrix: Matrix) -> Self {
        let (rows, cols) = matrix.shape();
        Self {
            rows,
            cols,
            data: matrix.data.iter().cloned().collect(),
        }
    }
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = AlgebraError;

    fn try_from(repr: MatrixRepr) -> AlgebraResult<Self> {
        Matrix::from_vec(repr.rows, repr.cols, repr.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn pauli_x() -> Matrix {
        Matrix::from_integers(&[[0, 1], [1, 0]])
    }

    #[test]
    fn test_identity_kron() {
        let i2 = Matrix::identity(2);
        assert_eq!(i2.kron(&i2), Matrix::identity(4));
        assert_eq!(Matrix::kron_all(std::iter::empty::<&Matrix>()), Matrix::identity(1));
    }

    #[test]
    fn test_kron_ordering() {
        // X ⊗ I swaps the two halves of a 4-vector.
        let xi = pauli_x().kron(&Matrix::identity(2));
        let expected = Matrix::from_integers(&[
            [0, 0, 1, 0],
            [0, 0, 0, 1],
            [1, 0, 0, 0],
            [0, 1, 0, 0],
        ]);
        assert_eq!(xi, expected);
    }

    #[test]
    fn test_mul_and_add() {
        let x = pauli_x();
        assert_eq!(x.try_mul(&x).unwrap(), Matrix::identity(2));
        let sum = x.try_add(&Matrix::identity(2)).unwrap();
        assert_eq!(sum, Matrix::from_integers(&[[1, 1], [1, 1]]));
        assert!(x.try_mul(&Matrix::identity(3)).is_err());
        assert!(x.try_add(&Matrix::zeros(2, 1)).is_err());
    }

    #[test]
    fn test_block_and_joins() {
        let m = Matrix::from_integers(&[[1, 2, 3, 4], [5, 6, 7, 8]]);
        let left = m.block(0, 0, 2, 2).unwrap();
        let right = m.block(0, 2, 2, 2).unwrap();
        assert_eq!(left.row_join(&right).unwrap(), m);

        let top = m.block(0, 0, 1, 4).unwrap();
        let bottom = m.block(1, 0, 1, 4).unwrap();
        assert_eq!(top.col_join(&bottom).unwrap(), m);

        assert!(m.block(1, 3, 2, 2).is_err());
        assert_eq!(
            m.column(2).unwrap(),
            Matrix::column_vector(vec![Coefficient::integer(3), Coefficient::integer(7)])
        );
    }

    #[test]
    fn test_adjoint() {
        let y = Matrix::from_scalars(&[
            [Scalar::zero(), -Scalar::i()],
            [Scalar::i(), Scalar::zero()],
        ]);
        assert_eq!(y.adjoint(), y);
        assert_eq!(y.transpose().transpose(), y);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![
            vec![Coefficient::integer(1)],
            vec![Coefficient::integer(1), Coefficient::integer(2)],
        ];
        assert!(matches!(
            Matrix::from_rows(rows),
            Err(AlgebraError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_from_diagonal() {
        let s = Matrix::from_diagonal([Scalar::one(), Scalar::i()]);
        let expected = Matrix::from_scalars(&[
            [Scalar::one(), Scalar::zero()],
            [Scalar::zero(), Scalar::i()],
        ]);
        assert_eq!(s, expected);
        assert_eq!(Matrix::from_diagonal(std::iter::empty()), Matrix::zeros(0, 0));
    }

    #[test]
    fn test_transpose_of_rectangular() {
        let m = Matrix::from_integers(&[[1, 2, 3], [4, 5, 6]]);
        let t = m.transpose();
        assert_eq!(t, Matrix::from_integers(&[[1, 4], [2, 5], [3, 6]]));
        let flat: Vec<_> = t.entries().map(ToString::to_string).collect();
        assert_eq!(flat, ["1", "4", "2", "5", "3", "6"]);
        assert_eq!(t[(2, 1)], Coefficient::integer(6));
        assert_eq!(t.get(3, 0), None);
    }

    #[test]
    fn test_ordering_and_serde() {
        let a = Matrix::from_integers(&[[0, 1]]);
        let b = Matrix::from_integers(&[[1, 0]]);
        assert!(a < b);
        assert!(Matrix::identity(1) < Matrix::identity(2));

        let json = serde_json::to_string(&pauli_x()).unwrap();
        let back: Matrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pauli_x());

        let bad = r#"{"rows":2,"cols":2,"data":[]}"#;
        assert!(serde_json::from_str::<Matrix>(bad).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(pauli_x().to_string(), "[[0, 1], [1, 0]]");
    }
}
