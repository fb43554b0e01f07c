use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::exercise::Difficulty;

/// Section flags are worth 10 points each; lesson + examples + summary cap
/// at 30, with the remaining 70 coming from exercises.
const SECTION_POINTS: f64 = 10.0;
const EXERCISE_POINTS: f64 = 70.0;

//
// ─── EXERCISE PROGRESS ─────────────────────────────────────────────────────────
//

/// Per-exercise attempt record.
///
/// `correct` is a best-ever flag: once an exercise has been answered
/// correctly it stays correct, no matter how later attempts go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseProgress {
    pub completed: bool,
    pub correct: bool,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<DateTime<Utc>>,
}

//
// ─── MODULE PROGRESS ───────────────────────────────────────────────────────────
//

/// Completion signals for one module: the three section flags plus the
/// per-exercise records.
///
/// Created lazily the first time any signal is recorded; the default
/// (all-false, no exercises) is the defined initial state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleProgress {
    pub lesson_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_completed_at: Option<DateTime<Utc>>,
    pub examples_viewed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples_viewed_at: Option<DateTime<Utc>>,
    pub summary_viewed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_viewed_at: Option<DateTime<Utc>>,
    pub exercises: HashMap<String, ExerciseProgress>,
}

impl ModuleProgress {
    /// Record one exercise attempt.
    ///
    /// Increments the attempt counter, marks the exercise completed, and
    /// keeps `correct` true once it has ever been true.
    pub fn record_attempt(&mut self, exercise_id: &str, was_correct: bool, now: DateTime<Utc>) {
        let entry = self.exercises.entry(exercise_id.to_owned()).or_default();
        entry.attempts += 1;
        entry.completed = true;
        entry.correct = entry.correct || was_correct;
        entry.last_attempt = Some(now);
    }

    /// Completion percentage in `0..=100`.
    ///
    /// Each viewed section contributes 10 points; completed exercises scale
    /// the remaining 70 by `completed / exercise_count`. A module with no
    /// exercises contributes 0 exercise points rather than dividing by zero.
    /// The sum is rounded once, at the end.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn completion_percent(&self, exercise_count: u32) -> u8 {
        let sections = [
            self.lesson_completed,
            self.examples_viewed,
            self.summary_viewed,
        ];
        let section_score = sections.iter().filter(|&&s| s).count() as f64 * SECTION_POINTS;

        let completed = self.exercises.values().filter(|e| e.completed).count();
        let exercise_score = if exercise_count > 0 {
            completed as f64 / f64::from(exercise_count) * EXERCISE_POINTS
        } else {
            0.0
        };

        (section_score + exercise_score).round() as u8
    }

    /// Accuracy percentage in `0..=100` over attempted exercises.
    ///
    /// Each exercise counts once regardless of attempt count, using the
    /// best-ever `correct` flag. No attempts yet means 0, not an error.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn accuracy_percent(&self) -> u8 {
        let attempted: Vec<&ExerciseProgress> = self
            .exercises
            .values()
            .filter(|e| e.attempts > 0)
            .collect();
        if attempted.is_empty() {
            return 0;
        }

        let correct = attempted.iter().filter(|e| e.correct).count();
        (correct as f64 / attempted.len() as f64 * 100.0).round() as u8
    }
}

//
// ─── PREFERENCES ───────────────────────────────────────────────────────────────
//

/// Site theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Learner preferences kept alongside progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub difficulty: Difficulty,
    pub theme: Theme,
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// The whole persisted progress record: one per user, keyed by a fixed
/// storage key in whatever store backs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub modules: HashMap<String, ModuleProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visited: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_visited_at: Option<DateTime<Utc>>,
    pub preferences: Preferences,
}

impl UserProgress {
    /// Progress for a module, defaulting for modules never touched.
    #[must_use]
    pub fn module(&self, slug: &str) -> ModuleProgress {
        self.modules.get(slug).cloned().unwrap_or_default()
    }

    /// Mutable progress for a module, creating the record lazily.
    pub fn module_mut(&mut self, slug: &str) -> &mut ModuleProgress {
        self.modules.entry(slug.to_owned()).or_default()
    }

    /// Stamp the last-visited marker, done on every recording operation.
    pub fn touch(&mut self, slug: &str, now: DateTime<Utc>) {
        self.last_visited = Some(slug.to_owned());
        self.last_visited_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn default_module_scores_zero() {
        let module = ModuleProgress::default();
        assert_eq!(module.completion_percent(12), 0);
        assert_eq!(module.accuracy_percent(), 0);
    }

    #[test]
    fn first_attempt_counts_from_one() {
        let mut module = ModuleProgress::default();
        module.record_attempt("ex-1", false, fixed_now());

        let record = &module.exercises["ex-1"];
        assert_eq!(record.attempts, 1);
        assert!(record.completed);
        assert!(!record.correct);
        assert_eq!(record.last_attempt, Some(fixed_now()));
    }

    #[test]
    fn correct_flag_is_sticky() {
        let mut module = ModuleProgress::default();
        module.record_attempt("ex-1", true, fixed_now());
        module.record_attempt("ex-1", false, fixed_now());

        let record = &module.exercises["ex-1"];
        assert!(record.correct);
        assert_eq!(record.attempts, 2);
        assert_eq!(module.accuracy_percent(), 100);
    }

    #[test]
    fn sections_are_worth_ten_points_each() {
        let mut module = ModuleProgress::default();
        module.lesson_completed = true;
        assert_eq!(module.completion_percent(12), 10);
        module.examples_viewed = true;
        module.summary_viewed = true;
        assert_eq!(module.completion_percent(12), 30);
    }

    #[test]
    fn exercises_scale_the_remaining_seventy_points() {
        let mut module = ModuleProgress::default();
        for i in 0..6 {
            module.record_attempt(&format!("ex-{i}"), true, fixed_now());
        }
        // 6 of 12 exercises = 35 points, no sections viewed.
        assert_eq!(module.completion_percent(12), 35);
    }

    #[test]
    fn everything_done_is_exactly_one_hundred() {
        let mut module = ModuleProgress::default();
        module.lesson_completed = true;
        module.examples_viewed = true;
        module.summary_viewed = true;
        for i in 0..10 {
            module.record_attempt(&format!("ex-{i}"), true, fixed_now());
        }
        assert_eq!(module.completion_percent(10), 100);
    }

    #[test]
    fn zero_exercise_modules_contribute_no_exercise_points() {
        let mut module = ModuleProgress::default();
        module.lesson_completed = true;
        module.record_attempt("stray", true, fixed_now());
        assert_eq!(module.completion_percent(0), 10);
    }

    #[test]
    fn rounding_happens_once_on_the_final_sum() {
        let mut module = ModuleProgress::default();
        module.lesson_completed = true;
        module.record_attempt("ex-0", true, fixed_now());
        // 10 + 70/12 = 15.833…, rounds to 16.
        assert_eq!(module.completion_percent(12), 16);

        let mut module = ModuleProgress::default();
        for i in 0..5 {
            module.record_attempt(&format!("ex-{i}"), true, fixed_now());
        }
        // 5/12 × 70 = 29.1666…, rounds to 29.
        assert_eq!(module.completion_percent(12), 29);
    }

    #[test]
    fn accuracy_counts_each_exercise_once() {
        let mut module = ModuleProgress::default();
        module.record_attempt("a", true, fixed_now());
        module.record_attempt("a", true, fixed_now());
        module.record_attempt("b", false, fixed_now());
        module.record_attempt("c", false, fixed_now());
        // 1 correct of 3 attempted = 33.33…%, rounds to 33.
        assert_eq!(module.accuracy_percent(), 33);
    }

    #[test]
    fn completion_is_monotonic_under_new_signals() {
        let mut module = ModuleProgress::default();
        let mut last = module.completion_percent(12);

        module.lesson_completed = true;
        let next = module.completion_percent(12);
        assert!(next >= last);
        last = next;

        for i in 0..12 {
            module.record_attempt(&format!("ex-{i}"), false, fixed_now());
            let next = module.completion_percent(12);
            assert!(next >= last);
            last = next;
        }

        module.examples_viewed = true;
        module.summary_viewed = true;
        assert_eq!(module.completion_percent(12), 100);
        assert!(module.completion_percent(12) >= last);
    }

    #[test]
    fn user_progress_reads_default_for_unknown_modules() {
        let progress = UserProgress::default();
        let module = progress.module("predicate");
        assert_eq!(module, ModuleProgress::default());
        assert!(progress.modules.is_empty());
    }

    #[test]
    fn module_mut_creates_lazily() {
        let mut progress = UserProgress::default();
        progress.module_mut("predicate").lesson_completed = true;
        assert!(progress.modules.contains_key("predicate"));
        assert!(progress.module("predicate").lesson_completed);
    }

    #[test]
    fn serde_round_trip_uses_camel_case_keys() {
        let mut progress = UserProgress::default();
        progress.module_mut("propositional").lesson_completed = true;
        progress.touch("propositional", fixed_now());

        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("\"lessonCompleted\":true"));
        assert!(json.contains("\"lastVisited\":\"propositional\""));

        let back: UserProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
