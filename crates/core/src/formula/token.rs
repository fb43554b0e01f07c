use logos::Logos;
use std::fmt;

/// Lexical tokens of the propositional-logic notation used throughout the
/// lesson content: the five connectives, parentheses, and variable names.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// `¬` — negation.
    #[token("¬")]
    Not,
    /// `∧` — conjunction.
    #[token("∧")]
    And,
    /// `∨` — disjunction.
    #[token("∨")]
    Or,
    /// `→` — implication.
    #[token("→")]
    Implies,
    /// `↔` — biconditional.
    #[token("↔")]
    Iff,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Variable names such as `P` or `Raining`.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Var(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Not => write!(f, "¬"),
            Token::And => write!(f, "∧"),
            Token::Or => write!(f, "∨"),
            Token::Implies => write!(f, "→"),
            Token::Iff => write!(f, "↔"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Var(name) => write!(f, "{name}"),
        }
    }
}
