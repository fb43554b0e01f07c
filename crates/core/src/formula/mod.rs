//! Propositional formula parsing and evaluation.
//!
//! Formulas are written with the connectives `¬ ∧ ∨ → ↔`, parentheses, and
//! free variables, the same notation the lesson pages use. Parsing builds an
//! expression tree so precedence is resolved once, up front, and evaluation
//! is a cheap pure walk per truth-table row.

mod ast;
mod parser;
mod token;

use std::fmt;

use thiserror::Error;

use crate::table::Assignment;

pub use ast::Expr;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors for malformed formulas or bad evaluation inputs.
///
/// These are always surfaced to the caller; a broken formula is never
/// silently evaluated to `false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,

    #[error("unrecognized symbol at byte {offset}")]
    UnknownToken { offset: usize },

    #[error("unexpected `{found}` at byte {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("formula ended before the expression was complete")]
    UnexpectedEnd,

    #[error("`(` at byte {offset} is never closed")]
    UnclosedParen { offset: usize },

    #[error("variable `{0}` has no value in the assignment")]
    UnboundVariable(String),
}

//
// ─── FORMULA ───────────────────────────────────────────────────────────────────
//

/// A validated propositional formula: the source text plus its parsed tree.
///
/// # Examples
///
/// ```
/// # use logic_core::formula::Formula;
/// # use logic_core::table::Assignment;
/// let formula = Formula::parse("P∨Q∧R")?;
/// let assignment: Assignment =
///     [("P", false), ("Q", true), ("R", false)].into_iter().collect();
///
/// // ∧ binds tighter than ∨, so this is P∨(Q∧R).
/// assert!(!formula.evaluate(&assignment)?);
/// # Ok::<(), logic_core::formula::FormulaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    text: String,
    expr: Expr,
}

impl Formula {
    /// Parse a formula from its textual notation.
    ///
    /// # Errors
    ///
    /// Returns a `FormulaError` for empty input, unknown symbols, or a
    /// malformed expression (unbalanced parentheses, misplaced connectives).
    pub fn parse(text: impl Into<String>) -> Result<Self, FormulaError> {
        let text = text.into();
        let expr = parser::Parser::parse(&text)?;
        Ok(Self { text, expr })
    }

    /// Evaluate the formula under an assignment of truth values.
    ///
    /// # Errors
    ///
    /// Returns `FormulaError::UnboundVariable` if any variable in the formula
    /// is missing from the assignment.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, FormulaError> {
        self.expr.eval(assignment)
    }

    /// Variables referenced by the formula, in first-occurrence order.
    ///
    /// This is the column order a truth table for the formula uses.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.expr.variables()
    }

    /// The source text the formula was parsed from.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed expression tree.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::str::FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
