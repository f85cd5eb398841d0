//! Parser for circuit expressions.

mod expression;

use qsym_algebra::{Coefficient, Matrix};
use qsym_ir::Circuit;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a circuit expression such as `CNOT(1,0)*H(1)*|00>`.
///
/// The whole input must be a single expression.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let mut parser = Parser::new(source)?;
    let circuit = parser.parse_expression()?;
    parser.expect_end()?;
    Ok(circuit)
}

/// Parse an amplitude vector into a column [`Matrix`].
///
/// Both the flat form `[1, 0, 0, i]` and the nested column form
/// `[[1], [0], [0], [i]]` printed by [`Matrix`]'s `Display` are accepted.
/// Every entry must be a scalar expression.
pub fn parse_vector(source: &str) -> ParseResult<Matrix> {
    let mut parser = Parser::new(source)?;
    parser.expect(Token::LBracket)?;
    let mut entries = Vec::new();
    if !parser.check(&Token::RBracket) {
        entries.push(parser.parse_vector_entry()?);
        while parser.consume(&Token::Comma) {
            entries.push(parser.parse_vector_entry()?);
        }
    }
    parser.expect(Token::RBracket)?;
    parser.expect_end()?;
    Ok(Matrix::column_vector(entries))
}

/// Parser state.
pub(super) struct Parser {
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
    end: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, msg)) => {
                    return Err(ParseError::LexerError {
                        position: span.start,
                        message: msg,
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            end: source.len(),
        })
    }

    /// Byte offset of the current token, or the input length at the end.
    pub(super) fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.span.start)
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.token.clone();
        self.pos += 1;
        Some(token)
    }

    /// Expect a specific token.
    #[allow(clippy::needless_pass_by_value)]
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<()> {
        let position = self.position();
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(&expected) {
            return Err(ParseError::UnexpectedToken {
                position,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Fail unless every token has been consumed.
    fn expect_end(&self) -> ParseResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                position: self.position(),
                expected: "end of input".into(),
                found: token.to_string(),
            }),
        }
    }

    /// One vector entry, optionally wrapped as a single-element row.
    fn parse_vector_entry(&mut self) -> ParseResult<Coefficient> {
        let nested = self.consume(&Token::LBracket);
        let position = self.position();
        let entry = self.parse_expression()?;
        if nested {
            self.expect(Token::RBracket)?;
        }
        match entry {
            Circuit::Scalar(c) => Ok(c),
            other => Err(ParseError::InvalidOperand(format!(
                "vector entry at position {position} is not a scalar: '{other}'"
            ))),
        }
    }
}
