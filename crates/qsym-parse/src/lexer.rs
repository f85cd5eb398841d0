//! Lexer for circuit expressions using logos.

use logos::Logos;
use std::fmt;

/// Tokens of the circuit expression language.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Keywords
    #[token("sqrt")]
    Sqrt,
    #[token("i", priority = 3)]
    Imaginary,

    // Literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLiteral(u64),

    /// A computational basis state such as `|0101>`; carries the bit string.
    #[regex(r"\|[01]*>", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    Ket(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("**")]
    Power,
    #[token("^")]
    Caret,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Sqrt => write!(f, "sqrt"),
            Token::Imaginary => write!(f, "i"),
            Token::IntLiteral(v) => write!(f, "{v}"),
            Token::Ket(bits) => write!(f, "|{bits}>"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Power => write!(f, "**"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// A token with its source span.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize source code.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(Ok(SpannedToken { token, span })),
            Err(()) => {
                let slice = &source[span.clone()];
                tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_bell_expression() {
        assert_eq!(
            tokens("CNOT(1,0)*H(1)*|00>"),
            vec![
                Token::Identifier("CNOT".into()),
                Token::LParen,
                Token::IntLiteral(1),
                Token::Comma,
                Token::IntLiteral(0),
                Token::RParen,
                Token::Star,
                Token::Identifier("H".into()),
                Token::LParen,
                Token::IntLiteral(1),
                Token::RParen,
                Token::Star,
                Token::Ket("00".into()),
            ]
        );
    }

    #[test]
    fn test_keywords_beat_identifiers() {
        assert_eq!(
            tokens("sqrt(2)*i + in"),
            vec![
                Token::Sqrt,
                Token::LParen,
                Token::IntLiteral(2),
                Token::RParen,
                Token::Star,
                Token::Imaginary,
                Token::Plus,
                Token::Identifier("in".into()),
            ]
        );
    }

    #[test]
    fn test_power_is_one_token() {
        assert_eq!(
            tokens("H(0)**2 ^ 3"),
            vec![
                Token::Identifier("H".into()),
                Token::LParen,
                Token::IntLiteral(0),
                Token::RParen,
                Token::Power,
                Token::IntLiteral(2),
                Token::Caret,
                Token::IntLiteral(3),
            ]
        );
    }

    #[test]
    fn test_invalid_ket() {
        let results = tokenize("|012>");
        assert!(results.iter().any(Result::is_err));
        let (span, message) = results.into_iter().find_map(Result::err).unwrap();
        assert_eq!(span.start, 0);
        assert!(message.contains("Invalid token"));
    }
}
