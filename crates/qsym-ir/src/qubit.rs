//! Definite basis states of an n-qubit register.

use num_traits::One;
use qsym_algebra::{Coefficient, Matrix};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::basis::Basis;
use crate::error::{IrError, IrResult};

/// A basis state `|b_{n-1} … b_1 b_0⟩`.
///
/// Bits are stored in printed order. Index 0 is the least-significant,
/// rightmost bit, so `state.get(k)` reads element `dimension - k - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitState {
    bits: Vec<u8>,
}

impl QubitState {
    /// Create a state from bits in printed order.
    pub fn new(bits: impl IntoIterator<Item = u8>) -> IrResult<Self> {
        let bits: Vec<u8> = bits.into_iter().collect();
        if let Some((position, &value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
            return Err(IrError::InvalidValue { position, value });
        }
        Ok(Self { bits })
    }

    /// The all-zero state of `dimension` qubits.
    pub fn zero(dimension: usize) -> Self {
        Self {
            bits: vec![0; dimension],
        }
    }

    /// The state whose big-endian bit pattern equals `value`.
    pub fn from_index(value: usize, dimension: usize) -> Self {
        let bits = (0..dimension)
            .rev()
            .map(|k| u8::from(k < usize::BITS as usize && (value >> k) & 1 == 1))
            .collect();
        Self { bits }
    }

    /// Number of qubits.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.bits.len()
    }

    /// Bits in printed order (most significant first).
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Value of qubit `index`.
    pub fn get(&self, index: u32) -> IrResult<u8> {
        self.position(index).map(|p| self.bits[p])
    }

    /// A new state with the named qubits toggled.
    pub fn flip(&self, indices: &[u32]) -> IrResult<Self> {
        let mut bits = self.bits.clone();
        for &index in indices {
            let p = self.position(index)?;
            bits[p] ^= 1;
        }
        Ok(Self { bits })
    }

    /// The big-endian integer value of the bits.
    pub fn index(&self) -> usize {
        self.bits
            .iter()
            .fold(0usize, |acc, &b| (acc << 1) | usize::from(b))
    }

    /// Column-vector representation in `basis`.
    ///
    /// In the Z basis this is the one-hot vector of length `2^dimension` with
    /// its 1 at [`index`](Self::index).
    pub fn represent(&self, basis: Basis) -> IrResult<Matrix> {
        let z = self.represent_z();
        match basis {
            Basis::Z => Ok(z),
            Basis::X | Basis::Y => basis.change_state(&z),
        }
    }

    fn represent_z(&self) -> Matrix {
        let mut entries = vec![Coefficient::default(); 1 << self.dimension()];
        entries[self.index()] = Coefficient::one();
        Matrix::column_vector(entries)
    }

    fn position(&self, index: u32) -> IrResult<usize> {
        let dimension = self.dimension();
        let index_usize = index as usize;
        if index_usize >= dimension {
            return Err(IrError::IndexOutOfRange { index, dimension });
        }
        Ok(dimension - index_usize - 1)
    }
}

/// Number of qubits whose state space has `len` amplitudes, if `len` is a
/// power of two.
pub fn qubits_for_length(len: usize) -> Option<usize> {
    len.is_power_of_two().then(|| len.trailing_zeros() as usize)
}

impl FromStr for QubitState {
    type Err = IrError;

    /// Parse `0110` or `|0110>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('|')
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or_else(|| s.trim());
        let bits = digits
            .chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(IrError::InvalidValue {
                    position,
                    value: other
                        .to_digit(10)
                        .and_then(|d| u8::try_from(d).ok())
                        .unwrap_or(u8::MAX),
                }),
            })
            .collect::<IrResult<Vec<u8>>>()?;
        Self::new(bits)
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for b in &self.bits {
            write!(f, "{b}")?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsym_algebra::Scalar;

    #[test]
    fn test_rejects_non_binary() {
        assert!(matches!(
            QubitState::new([0, 2, 1]),
            Err(IrError::InvalidValue {
                position: 1,
                value: 2
            })
        ));
        assert!("|012>".parse::<QubitState>().is_err());
    }

    #[test]
    fn test_indexing_is_little_endian() {
        let q: QubitState = "|110>".parse().unwrap();
        assert_eq!(q.dimension(), 3);
        assert_eq!(q.get(0).unwrap(), 0);
        assert_eq!(q.get(1).unwrap(), 1);
        assert_eq!(q.get(2).unwrap(), 1);
        assert!(matches!(
            q.get(3),
            Err(IrError::IndexOutOfRange {
                index: 3,
                dimension: 3
            })
        ));
    }

    #[test]
    fn test_flip_returns_new_state() {
        let q: QubitState = "|000>".parse().unwrap();
        let flipped = q.flip(&[0, 2]).unwrap();
        assert_eq!(flipped.to_string(), "|101>");
        assert_eq!(q.to_string(), "|000>");
        assert!(q.flip(&[5]).is_err());
    }

    #[test]
    fn test_index_roundtrip() {
        let q: QubitState = "|1011>".parse().unwrap();
        assert_eq!(q.index(), 11);
        assert_eq!(QubitState::from_index(11, 4), q);
        assert_eq!(qubits_for_length(16), Some(4));
        assert_eq!(qubits_for_length(6), None);
    }

    #[test]
    fn test_represent_z_one_hot() {
        let q: QubitState = "|10>".parse().unwrap();
        let v = q.represent(Basis::Z).unwrap();
        assert_eq!(v.shape(), (4, 1));
        for (i, entry) in v.entries().enumerate() {
            let expected = if i == 2 { 1 } else { 0 };
            assert_eq!(*entry, Coefficient::integer(expected));
        }
    }

    #[test]
    fn test_represent_x() {
        let q: QubitState = "|1>".parse().unwrap();
        let v = q.represent(Basis::X).unwrap();
        let h = Scalar::frac_1_sqrt2();
        assert_eq!(
            v,
            Matrix::column_vector(vec![Coefficient::constant(h.clone()), Coefficient::constant(-h)])
        );
    }
}
