//! Truth-table domain enumeration and table building.

use crate::formula::{Formula, FormulaError};

//
// ─── ASSIGNMENT ────────────────────────────────────────────────────────────────
//

/// A mapping from variable names to truth values.
///
/// Entries keep their insertion order so a table row prints its columns in
/// the same order the variables were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    entries: Vec<(String, bool)>,
}

impl Assignment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous binding of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Truth value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut assignment = Assignment::new();
        for (name, value) in iter {
            assignment.set(name, value);
        }
        assignment
    }
}

//
// ─── ENUMERATION ───────────────────────────────────────────────────────────────
//

/// Every assignment over the given variables, in truth-table row order.
///
/// Exactly `2^N` rows. The first variable varies slowest and the all-true
/// row comes first, descending to all-false:
///
/// ```
/// # use logic_core::table::enumerate;
/// let rows = enumerate(&["P", "Q"]);
/// assert_eq!(rows.len(), 4);
/// assert_eq!(rows[0].get("P"), Some(true));
/// assert_eq!(rows[0].get("Q"), Some(true));
/// assert_eq!(rows[3].get("P"), Some(false));
/// assert_eq!(rows[3].get("Q"), Some(false));
/// ```
///
/// Intended for the small variable counts lesson tables use (at most a
/// handful); the full domain is materialized eagerly.
#[must_use]
pub fn enumerate<S: AsRef<str>>(variables: &[S]) -> Vec<Assignment> {
    let n = variables.len();
    let rows = 1usize << n;

    (0..rows)
        .map(|row| {
            // Row 0 is the all-true assignment, so read bits off the
            // descending counter rather than the row index itself.
            let bits = rows - 1 - row;
            variables
                .iter()
                .enumerate()
                .map(|(j, name)| (name.as_ref(), bits & (1 << (n - 1 - j)) != 0))
                .collect()
        })
        .collect()
}

//
// ─── TRUTH TABLE ───────────────────────────────────────────────────────────────
//

/// One evaluated truth-table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub assignment: Assignment,
    pub value: bool,
}

/// Score for a user-filled table: how many of their per-row answers match
/// the reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableScore {
    pub correct: usize,
    pub total: usize,
}

impl TableScore {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

/// A fully evaluated truth table for one formula.
///
/// The practice pages build the reference table up front, then grade the
/// user's per-row answers against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    variables: Vec<String>,
    rows: Vec<TableRow>,
}

impl TruthTable {
    /// Build the table for `formula` with the given column order.
    ///
    /// # Errors
    ///
    /// Returns `FormulaError::UnboundVariable` if the formula references a
    /// variable missing from `variables`.
    pub fn build<S: AsRef<str>>(variables: &[S], formula: &Formula) -> Result<Self, FormulaError> {
        let rows = enumerate(variables)
            .into_iter()
            .map(|assignment| {
                let value = formula.evaluate(&assignment)?;
                Ok(TableRow { assignment, value })
            })
            .collect::<Result<Vec<_>, FormulaError>>()?;

        Ok(Self {
            variables: variables.iter().map(|s| s.as_ref().to_owned()).collect(),
            rows,
        })
    }

    /// Build the table using the formula's own variables as columns.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors from [`TruthTable::build`].
    pub fn for_formula(formula: &Formula) -> Result<Self, FormulaError> {
        Self::build(&formula.variables(), formula)
    }

    /// Column order, matching the variable order the table was built with.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Grade user answers against the reference column.
    ///
    /// `answers` is positional, one entry per row; `None` (unanswered) counts
    /// as incorrect. Extra answers beyond the table length are ignored.
    #[must_use]
    pub fn grade(&self, answers: &[Option<bool>]) -> TableScore {
        let correct = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, row)| answers.get(*i).copied().flatten() == Some(row.value))
            .count();

        TableScore {
            correct,
            total: self.rows.len(),
        }
    }
}
