use std::fmt;

use crate::formula::FormulaError;
use crate::table::Assignment;

//
// ─── EXPRESSION TREE ───────────────────────────────────────────────────────────
//

/// Parsed propositional formula.
///
/// Connective precedence is encoded structurally by the parser, so evaluation
/// is a plain recursive walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Var(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Implies(Box<Expr>, Box<Expr>),
    Iff(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate under the given assignment.
    ///
    /// # Errors
    ///
    /// Returns `FormulaError::UnboundVariable` if the formula references a
    /// variable the assignment does not bind. Missing bindings are never
    /// treated as `false`.
    pub fn eval(&self, assignment: &Assignment) -> Result<bool, FormulaError> {
        match self {
            Expr::Var(name) => assignment
                .get(name)
                .ok_or_else(|| FormulaError::UnboundVariable(name.clone())),
            Expr::Not(inner) => Ok(!inner.eval(assignment)?),
            Expr::And(lhs, rhs) => Ok(lhs.eval(assignment)? && rhs.eval(assignment)?),
            Expr::Or(lhs, rhs) => Ok(lhs.eval(assignment)? || rhs.eval(assignment)?),
            Expr::Implies(lhs, rhs) => Ok(!lhs.eval(assignment)? || rhs.eval(assignment)?),
            Expr::Iff(lhs, rhs) => Ok(lhs.eval(assignment)? == rhs.eval(assignment)?),
        }
    }

    /// Variables referenced by the formula, in first-occurrence order.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Expr::Var(name) => {
                if !out.iter().any(|v| v == name) {
                    out.push(name.clone());
                }
            }
            Expr::Not(inner) => inner.collect_variables(out),
            Expr::And(lhs, rhs)
            | Expr::Or(lhs, rhs)
            | Expr::Implies(lhs, rhs)
            | Expr::Iff(lhs, rhs) => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
        }
    }

    /// Binding strength, higher binds tighter. Used by `Display` to decide
    /// where parentheses are required.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Var(_) => 5,
            Expr::Not(_) => 4,
            Expr::And(_, _) => 3,
            Expr::Or(_, _) => 2,
            Expr::Implies(_, _) => 1,
            Expr::Iff(_, _) => 0,
        }
    }

    fn fmt_binary(&self, lhs: &Expr, op: &str, rhs: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Binary connectives associate to the left, so an equal-precedence
        // right child needs parentheses while a left one does not.
        fmt_child(lhs, lhs.precedence() < self.precedence(), f)?;
        write!(f, "{op}")?;
        fmt_child(rhs, rhs.precedence() <= self.precedence(), f)
    }
}

fn fmt_child(child: &Expr, needs_parens: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if needs_parens {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Not(inner) => {
                write!(f, "¬")?;
                fmt_child(inner, inner.precedence() < self.precedence(), f)
            }
            Expr::And(lhs, rhs) => self.fmt_binary(lhs, "∧", rhs, f),
            Expr::Or(lhs, rhs) => self.fmt_binary(lhs, "∨", rhs, f),
            Expr::Implies(lhs, rhs) => self.fmt_binary(lhs, "→", rhs, f),
            Expr::Iff(lhs, rhs) => self.fmt_binary(lhs, "↔", rhs, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(pairs: &[(&str, bool)]) -> Assignment {
        pairs.iter().map(|&(name, value)| (name, value)).collect()
    }

    fn var(name: &str) -> Expr {
        Expr::Var(name.into())
    }

    #[test]
    fn variables_in_first_occurrence_order() {
        let expr = Expr::Or(
            Box::new(Expr::And(Box::new(var("Q")), Box::new(var("P")))),
            Box::new(var("Q")),
        );
        assert_eq!(expr.variables(), vec!["Q".to_string(), "P".to_string()]);
    }

    #[test]
    fn eval_implication_truth_table() {
        let expr = Expr::Implies(Box::new(var("P")), Box::new(var("Q")));
        assert!(expr.eval(&assignment(&[("P", false), ("Q", false)])).unwrap());
        assert!(expr.eval(&assignment(&[("P", false), ("Q", true)])).unwrap());
        assert!(!expr.eval(&assignment(&[("P", true), ("Q", false)])).unwrap());
        assert!(expr.eval(&assignment(&[("P", true), ("Q", true)])).unwrap());
    }

    #[test]
    fn eval_unbound_variable_fails() {
        let expr = Expr::And(Box::new(var("P")), Box::new(var("Q")));
        let err = expr.eval(&assignment(&[("P", true)])).unwrap_err();
        assert_eq!(err, FormulaError::UnboundVariable("Q".into()));
    }

    #[test]
    fn display_inserts_parens_only_where_needed() {
        let expr = Expr::Not(Box::new(Expr::And(Box::new(var("P")), Box::new(var("Q")))));
        assert_eq!(expr.to_string(), "¬(P∧Q)");

        let expr = Expr::Or(
            Box::new(var("P")),
            Box::new(Expr::And(Box::new(var("Q")), Box::new(var("R")))),
        );
        assert_eq!(expr.to_string(), "P∨Q∧R");
    }

    #[test]
    fn display_parenthesizes_right_child_at_equal_precedence() {
        // (P→Q)→R associates left, so only P→(Q→R) needs parens.
        let left = Expr::Implies(
            Box::new(Expr::Implies(Box::new(var("P")), Box::new(var("Q")))),
            Box::new(var("R")),
        );
        assert_eq!(left.to_string(), "P→Q→R");

        let right = Expr::Implies(
            Box::new(var("P")),
            Box::new(Expr::Implies(Box::new(var("Q")), Box::new(var("R")))),
        );
        assert_eq!(right.to_string(), "P→(Q→R)");
    }
}
