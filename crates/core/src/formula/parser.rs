use logos::Logos;

use crate::formula::FormulaError;
use crate::formula::ast::Expr;
use crate::formula::token::Token;

/// Recursive-descent parser for propositional formulas.
///
/// Precedence, weakest to tightest: ↔, →, ∨, ∧, ¬. All binary connectives
/// associate left-to-right; parentheses override. This is the authoritative
/// precedence table for the whole site, and the lesson content states the
/// same one.
pub(crate) struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    pub(crate) fn parse(input: &str) -> Result<Expr, FormulaError> {
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer(input);
        while let Some(result) = lexer.next() {
            let offset = lexer.span().start;
            match result {
                Ok(token) => tokens.push((token, offset)),
                Err(()) => return Err(FormulaError::UnknownToken { offset }),
            }
        }
        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }

        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.iff()?;
        match parser.peek() {
            None => Ok(expr),
            Some((token, offset)) => Err(FormulaError::UnexpectedToken {
                found: token.to_string(),
                offset: *offset,
            }),
        }
    }

    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.get(self.pos).cloned();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    /// Consume the next token if it matches, left-assoc binary loop helper.
    fn eat(&mut self, expected: &Token) -> bool {
        if matches!(self.peek(), Some((token, _)) if token == expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn iff(&mut self) -> Result<Expr, FormulaError> {
        let mut expr = self.implies()?;
        while self.eat(&Token::Iff) {
            let rhs = self.implies()?;
            expr = Expr::Iff(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn implies(&mut self) -> Result<Expr, FormulaError> {
        let mut expr = self.or()?;
        while self.eat(&Token::Implies) {
            let rhs = self.or()?;
            expr = Expr::Implies(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn or(&mut self) -> Result<Expr, FormulaError> {
        let mut expr = self.and()?;
        while self.eat(&Token::Or) {
            let rhs = self.and()?;
            expr = Expr::Or(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, FormulaError> {
        let mut expr = self.unary()?;
        while self.eat(&Token::And) {
            let rhs = self.unary()?;
            expr = Expr::And(Box::new(expr), Box::new(rhs));
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        match self.advance() {
            Some((Token::Not, _)) => Ok(Expr::Not(Box::new(self.unary()?))),
            Some((Token::Var(name), _)) => Ok(Expr::Var(name)),
            Some((Token::LParen, offset)) => {
                let inner = self.iff()?;
                if self.eat(&Token::RParen) {
                    Ok(inner)
                } else {
                    Err(FormulaError::UnclosedParen { offset })
                }
            }
            Some((token, offset)) => Err(FormulaError::UnexpectedToken {
                found: token.to_string(),
                offset,
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expr {
        Parser::parse(input).unwrap()
    }

    #[test]
    fn conjunction_binds_tighter_than_disjunction() {
        assert_eq!(parse("P∨Q∧R"), parse("P∨(Q∧R)"));
        assert_ne!(parse("P∨Q∧R"), parse("(P∨Q)∧R"));
    }

    #[test]
    fn disjunction_binds_tighter_than_implication() {
        assert_eq!(parse("P∨Q→R"), parse("(P∨Q)→R"));
    }

    #[test]
    fn implication_binds_tighter_than_biconditional() {
        assert_eq!(parse("P→Q↔R"), parse("(P→Q)↔R"));
    }

    #[test]
    fn negation_binds_tightest() {
        assert_eq!(parse("¬P∧Q"), parse("(¬P)∧Q"));
        assert_ne!(parse("¬P∧Q"), parse("¬(P∧Q)"));
    }

    #[test]
    fn binary_connectives_associate_left() {
        assert_eq!(parse("P→Q→R"), parse("(P→Q)→R"));
        assert_eq!(parse("P∧Q∧R"), parse("(P∧Q)∧R"));
    }

    #[test]
    fn double_negation_parses() {
        assert_eq!(
            parse("¬¬P"),
            Expr::Not(Box::new(Expr::Not(Box::new(Expr::Var("P".into())))))
        );
    }

    #[test]
    fn unbalanced_parens_are_rejected() {
        assert!(matches!(
            Parser::parse("(P∧Q"),
            Err(FormulaError::UnclosedParen { offset: 0 })
        ));
        assert!(matches!(
            Parser::parse("P∧Q)"),
            Err(FormulaError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn empty_and_operator_only_inputs_are_rejected() {
        assert_eq!(Parser::parse(""), Err(FormulaError::Empty));
        assert_eq!(Parser::parse("   "), Err(FormulaError::Empty));
        assert!(matches!(
            Parser::parse("∧"),
            Err(FormulaError::UnexpectedToken { .. })
        ));
        assert_eq!(Parser::parse("P∧"), Err(FormulaError::UnexpectedEnd));
    }

    #[test]
    fn unknown_symbol_reports_byte_offset() {
        // "P " is two bytes, the bad symbol starts at offset 2.
        assert_eq!(
            Parser::parse("P ⊕ Q"),
            Err(FormulaError::UnknownToken { offset: 2 })
        );
    }
}
