//! Measurement bases and the change-of-basis transforms.

use qsym_algebra::{Adjoint, Matrix, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::qubit::qubits_for_length;

/// Basis in which states and operators are represented.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Basis {
    /// Computational basis.
    #[default]
    Z,
    /// Hadamard basis.
    X,
    /// Circular basis.
    Y,
}

impl Basis {
    /// All bases.
    pub const ALL: [Basis; 3] = [Basis::Z, Basis::X, Basis::Y];

    /// Single-letter name.
    pub fn name(&self) -> &'static str {
        match self {
            Basis::Z => "Z",
            Basis::X => "X",
            Basis::Y => "Y",
        }
    }

    /// The single-qubit 2×2 transform from the Z basis.
    pub fn transform(&self) -> Matrix {
        match self {
            Basis::Z => Matrix::identity(2),
            Basis::X => {
                let h = Scalar::frac_1_sqrt2();
                Matrix::from_scalars(&[[h.clone(), h.clone()], [h.clone(), -h]])
            }
            Basis::Y => Matrix::from_diagonal([Scalar::i(), -Scalar::i()]),
        }
    }

    /// The transform tensored over `num_qubits` qubits.
    pub fn register_transform(&self, num_qubits: usize) -> Matrix {
        let single = self.transform();
        Matrix::kron_all(std::iter::repeat_n(&single, num_qubits))
    }

    /// Re-express a Z-basis state vector in this basis.
    pub fn change_state(&self, vector: &Matrix) -> IrResult<Matrix> {
        if *self == Basis::Z {
            return Ok(vector.clone());
        }
        let n = register_qubits("state vector", vector.rows(), vector.shape())?;
        Ok(self.register_transform(n).try_mul(vector)?)
    }

    /// Re-express a Z-basis operator in this basis as `T·M·T†`.
    pub fn change_operator(&self, matrix: &Matrix) -> IrResult<Matrix> {
        match self {
            Basis::Z => Ok(matrix.clone()),
            Basis::X => {
                if !matrix.is_square() {
                    return Err(IrError::InvalidMatrix {
                        name: "operator".into(),
                        shape: matrix.shape(),
                    });
                }
                let k = register_qubits("operator", matrix.rows(), matrix.shape())?;
                let t = self.register_transform(k);
                Ok(t.try_mul(matrix)?.try_mul(&t.adjoint())?)
            }
            Basis::Y => Err(IrError::NotImplemented(
                "operator representation in the Y basis".into(),
            )),
        }
    }
}

fn register_qubits(name: &str, len: usize, shape: (usize, usize)) -> IrResult<usize> {
    qubits_for_length(len).ok_or_else(|| IrError::InvalidMatrix {
        name: name.to_string(),
        shape,
    })
}

impl FromStr for Basis {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Z" => Ok(Basis::Z),
            "X" => Ok(Basis::X),
            "Y" => Ok(Basis::Y),
            _ => Err(IrError::UnknownBasis(s.to_string())),
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_z() {
        assert_eq!(Basis::default(), Basis::Z);
        assert_eq!(Basis::Z.transform(), Matrix::identity(2));
    }

    #[test]
    fn test_transforms_are_unitary() {
        for basis in Basis::ALL {
            let t = basis.transform();
            assert_eq!(t.try_mul(&t.adjoint()).unwrap(), Matrix::identity(2));
        }
    }

    #[test]
    fn test_register_transform_shape() {
        assert_eq!(Basis::X.register_transform(3).shape(), (8, 8));
        assert_eq!(Basis::X.register_transform(0), Matrix::identity(1));
    }

    #[test]
    fn test_change_operator_x_maps_z_to_x() {
        let z = Matrix::from_integers(&[[1, 0], [0, -1]]);
        let x = Matrix::from_integers(&[[0, 1], [1, 0]]);
        assert_eq!(Basis::X.change_operator(&z).unwrap(), x);
        assert_eq!(Basis::Z.change_operator(&z).unwrap(), z);
    }

    #[test]
    fn test_change_operator_y_not_implemented() {
        let z = Matrix::identity(2);
        assert!(matches!(
            Basis::Y.change_operator(&z),
            Err(IrError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_change_operator_rejects_bad_shapes() {
        assert!(Basis::X.change_operator(&Matrix::zeros(3, 3)).is_err());
        assert!(Basis::X.change_operator(&Matrix::zeros(2, 4)).is_err());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("x".parse::<Basis>().unwrap(), Basis::X);
        assert_eq!(" Y ".parse::<Basis>().unwrap(), Basis::Y);
        assert!(matches!(
            "W".parse::<Basis>(),
            Err(IrError::UnknownBasis(_))
        ));
        assert_eq!(Basis::Z.to_string(), "Z");
    }
}
