#![forbid(unsafe_code)]

//! Core domain logic for the logic-mastery learning site: propositional
//! formula evaluation, truth-table generation, and the progress model with
//! its completion/accuracy scoring.

pub mod formula;
pub mod model;
pub mod table;
pub mod time;

pub use formula::{Expr, Formula, FormulaError};
pub use table::{enumerate, Assignment, TableRow, TableScore, TruthTable};
pub use time::Clock;
