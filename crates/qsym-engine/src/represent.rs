//! Matrix representations of circuits.

use qsym_ir::{Basis, Circuit};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::{EngineError, EngineResult};
use crate::hilbert::{Backend, LinearAlgebra, Numeric, Representation, Symbolic, represent_gate};

/// Options for [`represent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepresentOptions {
    /// Basis to represent in.
    pub basis: Basis,
    /// Register size for circuits without a qubit state.
    pub register_size: Option<u32>,
    /// Matrix backend.
    pub backend: Backend,
}

impl RepresentOptions {
    /// Default options: Z basis, no register size, symbolic backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the basis.
    #[must_use]
    pub fn with_basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    /// Set the register size.
    #[must_use]
    pub fn with_register_size(mut self, register_size: u32) -> Self {
        self.register_size = Some(register_size);
        self
    }

    /// Set the backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}

/// Represent `circuit` as a matrix or column vector.
///
/// States become basis vectors, gates become full Hilbert-space matrices,
/// products multiply right to left and sums add. When the circuit contains
/// a state the register size is taken from it; otherwise
/// `options.register_size` must be set.
#[instrument(skip_all, fields(basis = %options.basis, backend = %options.backend))]
pub fn represent(circuit: &Circuit, options: &RepresentOptions) -> EngineResult<Representation> {
    match options.backend {
        Backend::Symbolic => {
            represent_with::<Symbolic>(circuit, options.basis, options.register_size)
                .map(Representation::Symbolic)
        }
        Backend::Numeric => {
            represent_with::<Numeric>(circuit, options.basis, options.register_size)
                .map(Representation::Numeric)
        }
    }
}

/// [`represent`] against an explicit backend.
pub fn represent_with<B: LinearAlgebra>(
    circuit: &Circuit,
    basis: Basis,
    register_size: Option<u32>,
) -> EngineResult<B::Matrix> {
    let expanded = circuit.expand();
    represent_expanded::<B>(&expanded, basis, register_size)
}

fn represent_expanded<B: LinearAlgebra>(
    circuit: &Circuit,
    basis: Basis,
    register_size: Option<u32>,
) -> EngineResult<B::Matrix> {
    match circuit {
        Circuit::Qubit(q) => B::from_symbolic(&q.represent(basis)?),
        Circuit::Gate(_) | Circuit::Pow(..) => {
            let n = required_size(circuit, register_size)?;
            operator_matrix::<B>(circuit, basis, n)
        }
        Circuit::Add(terms) => {
            let mut total: Option<B::Matrix> = None;
            for term in terms {
                let m = represent_expanded::<B>(term, basis, register_size)?;
                total = Some(match total {
                    None => m,
                    Some(acc) => B::add(&acc, &m)?,
                });
            }
            total.ok_or_else(|| EngineError::MalformedCircuit("empty sum".into()))
        }
        Circuit::Mul(factors) => represent_product::<B>(circuit, factors, basis, register_size),
        Circuit::Scalar(c) => Err(EngineError::MalformedCircuit(format!(
            "scalar '{c}' has no matrix representation without an operator or state"
        ))),
    }
}

fn represent_product<B: LinearAlgebra>(
    circuit: &Circuit,
    factors: &[Circuit],
    basis: Basis,
    register_size: Option<u32>,
) -> EngineResult<B::Matrix> {
    let Some((last, rest)) = factors.split_last() else {
        return Err(EngineError::MalformedCircuit("empty product".into()));
    };

    let (mut result, n) = match last {
        Circuit::Qubit(q) => (B::from_symbolic(&q.represent(basis)?)?, q.dimension()),
        other => {
            let n = required_size(circuit, register_size)?;
            (operator_matrix::<B>(other, basis, n)?, n)
        }
    };
    debug!(factors = factors.len(), register_size = n, "representing product");

    for factor in rest.iter().rev() {
        result = match factor {
            Circuit::Scalar(c) => B::scale(&result, c)?,
            other => {
                let m = operator_matrix::<B>(other, basis, n)?;
                B::matmul(&m, &result)?
            }
        };
    }
    Ok(result)
}

/// The full matrix of a gate or gate power.
fn operator_matrix<B: LinearAlgebra>(
    factor: &Circuit,
    basis: Basis,
    register_size: usize,
) -> EngineResult<B::Matrix> {
    let Some((gate, exp)) = factor.gate_base() else {
        return Err(EngineError::MalformedCircuit(format!(
            "factor '{factor}' is neither a scalar, a gate nor a rightmost state"
        )));
    };
    let single = represent_gate::<B>(gate, basis, register_size)?;
    trace!(gate = %gate, exp, "gate power");
    let mut result = single.clone();
    for _ in 1..exp {
        result = B::matmul(&single, &result)?;
    }
    Ok(result)
}

fn required_size(circuit: &Circuit, register_size: Option<u32>) -> EngineResult<usize> {
    register_size
        .map(|n| n as usize)
        .ok_or_else(|| EngineError::RegisterSizeRequired(circuit.to_string()))
}
