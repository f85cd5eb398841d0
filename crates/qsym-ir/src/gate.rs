//! Quantum gate types.

use qsym_algebra::{Coefficient, Matrix, Scalar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::basis::Basis;
use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::qubits_for_length;

/// Gates with a fixed, built-in matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Phase gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Controlled-X gate.
    CNOT,
    /// Controlled-Z gate.
    CZ,
    /// Controlled phase gate, diag(1, 1, 1, i).
    CPhase,
    /// SWAP gate.
    Swap,
    /// Doubly controlled X.
    Toffoli,
}

impl StandardGate {
    /// Every standard gate.
    pub const ALL: [StandardGate; 11] = [
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::T,
        StandardGate::CNOT,
        StandardGate::CZ,
        StandardGate::CPhase,
        StandardGate::Swap,
        StandardGate::Toffoli,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "X",
            StandardGate::Y => "Y",
            StandardGate::Z => "Z",
            StandardGate::H => "H",
            StandardGate::S => "S",
            StandardGate::T => "T",
            StandardGate::CNOT => "CNOT",
            StandardGate::CZ => "CZ",
            StandardGate::CPhase => "CPHASE",
            StandardGate::Swap => "SWAP",
            StandardGate::Toffoli => "TOFFOLI",
        }
    }

    /// Look up a gate by name, ignoring case.
    ///
    /// Accepts the common aliases `phase`, `cx`, `cs` and `ccx`.
    pub fn from_name(name: &str) -> Option<Self> {
        let gate = match name.to_ascii_uppercase().as_str() {
            "X" => StandardGate::X,
            "Y" => StandardGate::Y,
            "Z" => StandardGate::Z,
            "H" => StandardGate::H,
            "S" | "PHASE" => StandardGate::S,
            "T" => StandardGate::T,
            "CNOT" | "CX" => StandardGate::CNOT,
            "CZ" => StandardGate::CZ,
            "CPHASE" | "CS" => StandardGate::CPhase,
            "SWAP" => StandardGate::Swap,
            "TOFFOLI" | "CCX" => StandardGate::Toffoli,
            _ => return None,
        };
        Some(gate)
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::T => 1,

            StandardGate::CNOT | StandardGate::CZ | StandardGate::CPhase | StandardGate::Swap => 2,

            StandardGate::Toffoli => 3,
        }
    }

    /// The Z-basis matrix.
    pub fn matrix(&self) -> Matrix {
        let (o, l) = (Scalar::integer(0), Scalar::integer(1));
        let i = Scalar::i();
        match self {
            StandardGate::X => Matrix::from_integers(&[[0, 1], [1, 0]]),
            StandardGate::Y => Matrix::from_scalars(&[[o.clone(), -&i], [i, o]]),
            StandardGate::Z => Matrix::from_integers(&[[1, 0], [0, -1]]),
            StandardGate::H => {
                let h = Scalar::frac_1_sqrt2();
                Matrix::from_scalars(&[[h.clone(), h.clone()], [h.clone(), -h]])
            }
            StandardGate::S => Matrix::from_diagonal([l, i]),
            StandardGate::T => Matrix::from_diagonal([l, Scalar::exp_i_pi_4()]),
            StandardGate::CNOT => Matrix::from_integers(&[
                [1, 0, 0, 0],
                [0, 1, 0, 0],
                [0, 0, 0, 1],
                [0, 0, 1, 0],
            ]),
            StandardGate::CZ => Matrix::from_integers(&[
                [1, 0, 0, 0],
                [0, 1, 0, 0],
                [0, 0, 1, 0],
                [0, 0, 0, -1],
            ]),
            StandardGate::CPhase => Matrix::from_diagonal([l.clone(), l.clone(), l, i]),
            StandardGate::Swap => Matrix::from_integers(&[
                [1, 0, 0, 0],
                [0, 0, 1, 0],
                [0, 1, 0, 0],
                [0, 0, 0, 1],
            ]),
            StandardGate::Toffoli => {
                let mut rows = [[0i64; 8]; 8];
                for (r, row) in rows.iter_mut().enumerate() {
                    let c = match r {
                        6 => 7,
                        7 => 6,
                        _ => r,
                    };
                    row[c] = 1;
                }
                Matrix::from_integers(&rows)
            }
        }
    }
}

/// A named gate with a caller-supplied matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomGate {
    name: String,
    matrix: Matrix,
}

impl CustomGate {
    /// Create a custom gate, checking that the matrix is square with a
    /// power-of-two side of at least 2.
    pub fn new(name: impl Into<String>, matrix: Matrix) -> IrResult<Self> {
        let name = name.into();
        let valid = matrix.is_square()
            && qubits_for_length(matrix.rows()).is_some_and(|n| n >= 1);
        if !valid {
            return Err(IrError::InvalidMatrix {
                name,
                shape: matrix.shape(),
            });
        }
        Ok(Self { name, matrix })
    }

    /// The gate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Z-basis matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Number of qubits the matrix acts on.
    pub fn num_qubits(&self) -> u32 {
        self.matrix.rows().trailing_zeros()
    }
}

/// Either a standard or a custom gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GateKind {
    /// A built-in gate.
    Standard(StandardGate),
    /// A user-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => g.name(),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits(),
        }
    }

    /// The Z-basis matrix.
    pub fn matrix(&self) -> Matrix {
        match self {
            GateKind::Standard(g) => g.matrix(),
            GateKind::Custom(g) => g.matrix.clone(),
        }
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<CustomGate> for GateKind {
    fn from(gate: CustomGate) -> Self {
        GateKind::Custom(gate)
    }
}

/// A gate placed on specific qubits.
///
/// Targets are listed controls first, target last. The first target is the
/// most significant bit of the gate matrix's row and column index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Gate {
    kind: GateKind,
    targets: Vec<u32>,
}

impl Gate {
    /// Place a gate on `targets`.
    pub fn new(kind: impl Into<GateKind>, targets: impl Into<Vec<u32>>) -> IrResult<Self> {
        let kind = kind.into();
        let targets = targets.into();
        let expected = kind.num_qubits() as usize;
        if targets.len() != expected {
            return Err(IrError::ArityMismatch {
                gate: kind.name().to_string(),
                expected,
                got: targets.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for &t in &targets {
            if !seen.insert(t) {
                return Err(IrError::DuplicateTarget {
                    gate: kind.name().to_string(),
                    target: t,
                });
            }
        }
        Ok(Self { kind, targets })
    }

    fn single(gate: StandardGate, qubit: u32) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            targets: vec![qubit],
        }
    }

    /// Pauli-X on `qubit`.
    pub fn x(qubit: u32) -> Self {
        Self::single(StandardGate::X, qubit)
    }

    /// Pauli-Y on `qubit`.
    pub fn y(qubit: u32) -> Self {
        Self::single(StandardGate::Y, qubit)
    }

    /// Pauli-Z on `qubit`.
    pub fn z(qubit: u32) -> Self {
        Self::single(StandardGate::Z, qubit)
    }

    /// Hadamard on `qubit`.
    pub fn h(qubit: u32) -> Self {
        Self::single(StandardGate::H, qubit)
    }

    /// Phase gate on `qubit`.
    pub fn s(qubit: u32) -> Self {
        Self::single(StandardGate::S, qubit)
    }

    /// T gate on `qubit`.
    pub fn t(qubit: u32) -> Self {
        Self::single(StandardGate::T, qubit)
    }

    /// CNOT with `control` and `target`.
    pub fn cnot(control: u32, target: u32) -> IrResult<Self> {
        Self::new(StandardGate::CNOT, [control, target])
    }

    /// Controlled-Z.
    pub fn cz(control: u32, target: u32) -> IrResult<Self> {
        Self::new(StandardGate::CZ, [control, target])
    }

    /// Controlled phase.
    pub fn cphase(control: u32, target: u32) -> IrResult<Self> {
        Self::new(StandardGate::CPhase, [control, target])
    }

    /// SWAP of two qubits.
    pub fn swap(a: u32, b: u32) -> IrResult<Self> {
        Self::new(StandardGate::Swap, [a, b])
    }

    /// Toffoli with two controls and a target.
    pub fn toffoli(control1: u32, control2: u32, target: u32) -> IrResult<Self> {
        Self::new(StandardGate::Toffoli, [control1, control2, target])
    }

    /// A custom gate from a name and matrix.
    pub fn custom(
        name: impl Into<String>,
        matrix: Matrix,
        targets: impl Into<Vec<u32>>,
    ) -> IrResult<Self> {
        Self::new(CustomGate::new(name, matrix)?, targets)
    }

    /// The kind of gate.
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// The standard gate, if this is one.
    pub fn standard(&self) -> Option<StandardGate> {
        match &self.kind {
            GateKind::Standard(g) => Some(*g),
            GateKind::Custom(_) => None,
        }
    }

    /// Target indices, controls first.
    pub fn targets(&self) -> &[u32] {
        &self.targets
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The Z-basis matrix.
    pub fn matrix(&self) -> Matrix {
        self.kind.matrix()
    }

    /// The matrix in `basis`.
    pub fn matrix_in(&self, basis: Basis) -> IrResult<Matrix> {
        basis.change_operator(&self.matrix())
    }

    /// Highest target index.
    pub fn minimum_dimension(&self) -> u32 {
        self.targets.iter().copied().max().unwrap_or(0)
    }

    /// Check that the gate fits in a register of `register_size` qubits.
    pub fn check_register(&self, register_size: usize) -> IrResult<()> {
        let minimum_dimension = self.minimum_dimension();
        if minimum_dimension as usize >= register_size {
            return Err(IrError::HilbertSpaceTooSmall {
                gate: self.to_string(),
                minimum_dimension,
                register_size,
            });
        }
        Ok(())
    }

    /// `self` raised to `exp`, normalised.
    pub fn pow(&self, exp: u32) -> Circuit {
        Circuit::power(Circuit::Gate(self.clone()), exp)
    }

    /// Symbols appearing in a custom matrix.
    pub fn symbols(&self) -> BTreeSet<String> {
        match &self.kind {
            GateKind::Standard(_) => BTreeSet::new(),
            GateKind::Custom(g) => g
                .matrix
                .entries()
                .flat_map(Coefficient::symbols)
                .collect(),
        }
    }

    /// Bind `name` to `value` in a custom matrix.
    pub fn substitute(&self, name: &str, value: &Coefficient) -> Self {
        match &self.kind {
            GateKind::Standard(_) => self.clone(),
            GateKind::Custom(g) => Self {
                kind: GateKind::Custom(CustomGate {
                    name: g.name.clone(),
                    matrix: g.matrix.substitute(name, value),
                }),
                targets: self.targets.clone(),
            },
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, t) in self.targets.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{t}")?;
        }
        write!(f, ")")
    }
}
