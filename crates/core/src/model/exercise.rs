use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── DOMAIN & DIFFICULTY ───────────────────────────────────────────────────────
//

/// Real-world domain an exercise is framed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Programming,
    Law,
    Science,
    Everyday,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Domain::Programming => "programming",
            Domain::Law => "law",
            Domain::Science => "science",
            Domain::Everyday => "everyday",
        };
        write!(f, "{label}")
    }
}

/// Learner-facing difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        write!(f, "{label}")
    }
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// An exercise answer: true/false, a single notation string, or an ordered
/// list of strings for multi-part questions.
///
/// Translation exercises carry pre-authored notation strings; there is no
/// natural-language parsing anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Bool(bool),
    Text(String),
    Multi(Vec<String>),
}

impl Answer {
    /// Whether two answers match. Text is compared after trimming
    /// surrounding whitespace; everything else is exact.
    #[must_use]
    pub fn matches(&self, other: &Answer) -> bool {
        match (self, other) {
            (Answer::Bool(a), Answer::Bool(b)) => a == b,
            (Answer::Text(a), Answer::Text(b)) => a.trim() == b.trim(),
            (Answer::Multi(a), Answer::Multi(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| x.trim() == y.trim())
            }
            _ => false,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Bool(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_owned())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// A single practice exercise with its authored answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub module_id: u32,
    pub domain: Domain,
    pub difficulty: Difficulty,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub answer: Answer,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Answer>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Exercise {
    /// Whether `given` is an accepted answer: the primary answer or any of
    /// the authored alternatives.
    #[must_use]
    pub fn check(&self, given: &Answer) -> bool {
        self.answer.matches(given) || self.alternatives.iter().any(|alt| alt.matches(given))
    }
}
