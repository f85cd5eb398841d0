//! Expression parsing for circuit expressions.
//!
//! Values are built directly into normalized [`Circuit`]s as they are parsed,
//! so there is no intermediate syntax tree.

use num_bigint::{BigInt, Sign};
use qsym_algebra::{Coefficient, Scalar, Surd};
use qsym_ir::{Circuit, Gate, QubitState, StandardGate};

use super::Parser;
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Precedence of the operand of unary minus, so that `-a**2` is `-(a**2)`.
const POW_PRECEDENCE: u8 = 3;

impl Parser {
    /// Parse an expression.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Circuit> {
        self.parse_binary_expr(0)
    }

    /// Parse binary expression with precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Circuit> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op() {
            let prec = op_precedence(op);
            if prec < min_prec {
                break;
            }
            self.advance(); // consume operator

            // Powers associate to the right.
            let next_prec = if op == BinOp::Pow { prec } else { prec + 1 };
            let position = self.position();
            let right = self.parse_binary_expr(next_prec)?;
            left = apply_binary(op, left, right, position)?;
        }

        Ok(left)
    }

    /// Parse unary expression.
    fn parse_unary_expr(&mut self) -> ParseResult<Circuit> {
        if self.consume(&Token::Minus) {
            let expr = self.parse_binary_expr(POW_PRECEDENCE)?;
            return Ok(-expr);
        }
        if self.consume(&Token::Plus) {
            return self.parse_binary_expr(POW_PRECEDENCE);
        }
        self.parse_primary_expr()
    }

    /// Parse primary expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Circuit> {
        let position = self.position();
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("expression".into()))?;

        match token {
            Token::IntLiteral(v) => {
                self.advance();
                Ok(Circuit::from(Scalar::real(Surd::from(BigInt::from(v)))))
            }
            Token::Imaginary => {
                self.advance();
                Ok(Circuit::from(Scalar::i()))
            }
            Token::Sqrt => {
                self.advance();
                self.expect(Token::LParen)?;
                let argument = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(Circuit::from(exact_sqrt(&argument)?))
            }
            Token::Ket(bits) => {
                self.advance();
                let state: QubitState = bits.parse()?;
                Ok(Circuit::from(state))
            }
            Token::Identifier(name) => {
                self.advance();
                if self.consume(&Token::LParen) {
                    let targets = self.parse_qubit_list()?;
                    self.expect(Token::RParen)?;
                    let kind = StandardGate::from_name(&name)
                        .ok_or_else(|| ParseError::UnknownGate(name.clone()))?;
                    Ok(Circuit::from(Gate::new(kind, targets)?))
                } else {
                    Ok(Circuit::from(Coefficient::symbol(name)))
                }
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            _ => Err(ParseError::UnexpectedToken {
                position,
                expected: "expression".into(),
                found: token.to_string(),
            }),
        }
    }

    /// Parse the comma-separated qubit indices of a gate call.
    fn parse_qubit_list(&mut self) -> ParseResult<Vec<u32>> {
        let mut targets = vec![self.parse_qubit()?];
        while self.consume(&Token::Comma) {
            targets.push(self.parse_qubit()?);
        }
        Ok(targets)
    }

    fn parse_qubit(&mut self) -> ParseResult<u32> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => u32::try_from(v)
                .map_err(|_| ParseError::InvalidQubit(format!("{v} does not fit in 32 bits"))),
            Some(other) => Err(ParseError::InvalidQubit(format!(
                "expected a non-negative integer, found '{other}'"
            ))),
            None => Err(ParseError::UnexpectedEof("qubit index".into())),
        }
    }

    /// Peek at binary operator.
    fn peek_binary_op(&self) -> Option<BinOp> {
        match self.peek()? {
            Token::Plus => Some(BinOp::Add),
            Token::Minus => Some(BinOp::Sub),
            Token::Star => Some(BinOp::Mul),
            Token::Slash => Some(BinOp::Div),
            Token::Power | Token::Caret => Some(BinOp::Pow),
            _ => None,
        }
    }
}

/// Get operator precedence.
fn op_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div => 2,
        BinOp::Pow => POW_PRECEDENCE,
    }
}

fn apply_binary(op: BinOp, left: Circuit, right: Circuit, position: usize) -> ParseResult<Circuit> {
    Ok(match op {
        BinOp::Add => left + right,
        BinOp::Sub => left - right,
        BinOp::Mul => left * right,
        BinOp::Div => {
            let divisor = constant(&right).ok_or_else(|| {
                ParseError::InvalidOperand(format!(
                    "divisor at position {position} must be a numeric constant, got '{right}'"
                ))
            })?;
            let inverse = divisor.inv().map_err(|_| {
                ParseError::InvalidOperand(format!("division by zero at position {position}"))
            })?;
            left * inverse
        }
        BinOp::Pow => Circuit::power(left, exponent(&right)?),
    })
}

/// The numeric value of a symbol-free scalar expression.
fn constant(circuit: &Circuit) -> Option<Scalar> {
    match circuit {
        Circuit::Scalar(c) => c.as_scalar(),
        _ => None,
    }
}

/// A non-negative integer constant, if the expression is one.
fn non_negative_integer(circuit: &Circuit) -> Option<BigInt> {
    let value = constant(circuit)?;
    let re = &value.re;
    if !value.is_real() || !re.is_rational() || !re.rational.is_integer() {
        return None;
    }
    let n = re.rational.to_integer();
    (n.sign() != Sign::Minus).then_some(n)
}

fn exponent(circuit: &Circuit) -> ParseResult<u32> {
    non_negative_integer(circuit)
        .and_then(|n| u32::try_from(&n).ok())
        .ok_or_else(|| {
            ParseError::InvalidExponent(format!(
                "expected an integer in 0..=4294967295, got '{circuit}'"
            ))
        })
}

/// `sqrt(n)` for an integer `n` whose square root lies in Q(√2).
///
/// That holds exactly when `n = s²` or `n = 2s²`.
fn exact_sqrt(argument: &Circuit) -> ParseResult<Scalar> {
    let n = non_negative_integer(argument).ok_or_else(|| {
        ParseError::InvalidOperand(format!(
            "sqrt takes a non-negative integer, got '{argument}'"
        ))
    })?;
    if let Some(s) = integer_sqrt(&n) {
        return Ok(Scalar::real(Surd::from(s)));
    }
    if !n.bit(0) {
        if let Some(s) = integer_sqrt(&(&n >> 1u32)) {
            return Ok(Scalar::real(Surd::from(s) * Surd::sqrt2()));
        }
    }
    Err(ParseError::InvalidOperand(format!(
        "sqrt({n}) is not exactly representable"
    )))
}

fn integer_sqrt(n: &BigInt) -> Option<BigInt> {
    let root = n.sqrt();
    (&root * &root == *n).then_some(root)
}

#[cfg(test)]
mod tests {
    use crate::{ParseError, parse};
    use qsym_algebra::{Coefficient, Scalar, Surd};
    use qsym_ir::{Circuit, Gate, QubitState};

    fn ket(s: &str) -> Circuit {
        Circuit::Qubit(s.parse::<QubitState>().unwrap())
    }

    #[test]
    fn test_bell_circuit() {
        let parsed = parse("CNOT(1,0)*H(1)*|00>").unwrap();
        assert_eq!(parsed, Gate::cnot(1, 0).unwrap() * Gate::h(1) * ket("00"));
    }

    #[test]
    fn test_precedence() {
        // Power binds tighter than product, product tighter than sum.
        let parsed = parse("H(0)**2*X(0) + |1>").unwrap();
        let expected = Gate::h(0).pow(2) * Gate::x(0) + ket("1");
        assert_eq!(parsed, expected);

        // Unary minus applies to the whole power.
        assert_eq!(
            parse("-a**2").unwrap(),
            Circuit::from(-Coefficient::symbol("a").pow(2))
        );
        // Caret is an alias for power and associates to the right.
        assert_eq!(parse("2^3^2").unwrap(), Circuit::from(512));
    }

    #[test]
    fn test_scalars() {
        assert_eq!(
            parse("sqrt(2)/2").unwrap(),
            Circuit::from(Scalar::frac_1_sqrt2())
        );
        assert_eq!(parse("sqrt(8)").unwrap(), Circuit::from(Scalar::sqrt2() * Scalar::integer(2)));
        assert_eq!(parse("sqrt(9)").unwrap(), Circuit::from(3));
        assert_eq!(parse("i*i").unwrap(), Circuit::from(-1));
        assert_eq!(parse("1/(1 + i)").unwrap(), {
            let z = Scalar::new(Surd::integer(1), Surd::integer(1));
            Circuit::from(z.inv().unwrap())
        });
    }

    #[test]
    fn test_symbolic_amplitudes() {
        let parsed = parse("a*|0> + b*|1>").unwrap();
        let expected = Coefficient::symbol("a") * ket("0") + Coefficient::symbol("b") * ket("1");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.symbols().len(), 2);
    }

    #[test]
    fn test_gate_errors() {
        assert!(matches!(parse("RX(0)"), Err(ParseError::UnknownGate(name)) if name == "RX"));
        assert!(matches!(parse("CNOT(0,0)"), Err(ParseError::Ir(_))));
        assert!(matches!(parse("CNOT(0)"), Err(ParseError::Ir(_))));
        assert!(matches!(parse("H(a)"), Err(ParseError::InvalidQubit(_))));
        assert!(matches!(
            parse("H(4294967296)"),
            Err(ParseError::InvalidQubit(_))
        ));
    }

    #[test]
    fn test_operand_errors() {
        assert!(matches!(parse("H(0)**a"), Err(ParseError::InvalidExponent(_))));
        assert!(matches!(parse("H(0)**(1/2)"), Err(ParseError::InvalidExponent(_))));
        assert!(matches!(parse("|0>/a"), Err(ParseError::InvalidOperand(_))));
        assert!(matches!(parse("|0>/0"), Err(ParseError::InvalidOperand(_))));
        assert!(matches!(parse("sqrt(3)"), Err(ParseError::InvalidOperand(_))));
    }

    #[test]
    fn test_constants_beyond_machine_width() {
        let big = Coefficient::integer(2).pow(64);
        assert_eq!(
            parse("2**64*|0>").unwrap(),
            Circuit::from(big.clone()) * ket("0")
        );
        assert_eq!(parse("18446744073709551615 + 1").unwrap(), Circuit::from(big.clone()));
        assert_eq!(parse("2**64/2**64").unwrap(), Circuit::from(1));

        // sqrt(2**81) = 2**40 * sqrt(2)
        let expected = Coefficient::integer(2).pow(40) * Coefficient::constant(Scalar::sqrt2());
        assert_eq!(parse("sqrt(2**81)").unwrap(), Circuit::from(expected));
        assert_eq!(parse("sqrt(2**128)").unwrap(), Circuit::from(big));
    }

    #[test]
    fn test_sqrt_of_large_prime_is_rejected() {
        // 2**61 - 1 is prime.
        assert!(matches!(
            parse("sqrt(2305843009213693951)"),
            Err(ParseError::InvalidOperand(_))
        ));
        assert!(matches!(parse("sqrt(6)"), Err(ParseError::InvalidOperand(_))));
        assert_eq!(parse("sqrt(0)").unwrap(), Circuit::from(0));
        assert_eq!(parse("sqrt(18)").unwrap(), Circuit::from(Scalar::sqrt2() * Scalar::integer(3)));
    }

    #[test]
    fn test_exponent_must_fit_in_32_bits() {
        assert!(matches!(parse("X(0)**(2**32)"), Err(ParseError::InvalidExponent(_))));
        assert!(matches!(parse("X(0)**(-1)"), Err(ParseError::InvalidExponent(_))));
    }

    #[test]
    fn test_zero_exponent_is_one() {
        assert!(parse("H(0)**0").unwrap().is_one());
    }
}
