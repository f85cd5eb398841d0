//! Text syntax for QSYM circuit expressions.
//!
//! The grammar is the one printed by the `Display` impls of the IR, so
//! anything the engine prints can be read back:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') power | power
//! power   := primary (('**' | '^') unary)?
//! primary := INT | 'i' | 'sqrt' '(' expr ')' | KET
//!          | NAME '(' INT (',' INT)* ')'    gate
//!          | NAME                           real symbol
//!          | '(' expr ')'
//! ```
//!
//! Division is only by numeric constants and exponents must be
//! non-negative integers.
//!
//! # Example
//!
//! ```rust
//! use qsym_parse::{parse, parse_vector};
//!
//! let circuit = parse("CNOT(1,0)*H(1)*|00>").unwrap();
//! assert_eq!(circuit.to_string(), "CNOT(1,0)*H(1)*|00>");
//!
//! let superposition = parse("sqrt(2)/2*|0> - sqrt(2)/2*|1>").unwrap();
//! assert_eq!(superposition.terms().len(), 2);
//!
//! let vector = parse_vector("[1, 0, 0, i]").unwrap();
//! assert_eq!(vector.shape(), (4, 1));
//! ```
//!
//! # Supported Gates
//!
//! Single-qubit: `X`, `Y`, `Z`, `H`, `S` (`PHASE`), `T`
//!
//! Two-qubit: `CNOT` (`CX`), `CZ`, `CPHASE` (`CS`), `SWAP`
//!
//! Three-qubit: `TOFFOLI` (`CCX`)
//!
//! Gate names are case-insensitive.

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_vector};
