use std::sync::Arc;

use tracing::warn;

use logic_core::model::{Answer, Difficulty, Exercise, ModuleProgress, Theme, UserProgress};
use logic_core::time::Clock;
use storage::{MemoryStore, ProgressStore};

use crate::catalog::{BuiltinCatalog, ModuleCatalog};

//
// ─── PROGRESS TRACKER ──────────────────────────────────────────────────────────
//

/// Owner of the per-user progress record.
///
/// All progress writes funnel through this service: it mutates the in-memory
/// record, stamps the last-visited marker, and saves through the injected
/// store after every change. A store that fails (restricted environment,
/// unwritable disk) only costs persistence, never the session: failures are
/// logged and the tracker keeps operating on the in-memory record.
///
/// # Examples
///
/// ```
/// # use services::ProgressTracker;
/// let mut tracker = ProgressTracker::in_memory();
/// tracker.mark_lesson_complete("propositional");
/// tracker.record_exercise_attempt("propositional", "prop-1", true);
///
/// assert_eq!(tracker.module_completion("propositional"), 16);
/// assert_eq!(tracker.module_accuracy("propositional"), 100);
/// ```
pub struct ProgressTracker {
    store: Arc<dyn ProgressStore>,
    catalog: Arc<dyn ModuleCatalog>,
    clock: Clock,
    progress: UserProgress,
}

impl ProgressTracker {
    /// Build a tracker over the given store and catalog, loading any
    /// previously saved record.
    ///
    /// An empty or failing store yields the default record; load failures
    /// are logged, not propagated.
    #[must_use]
    pub fn new(store: Arc<dyn ProgressStore>, catalog: Arc<dyn ModuleCatalog>, clock: Clock) -> Self {
        let progress = match store.load() {
            Ok(Some(progress)) => progress,
            Ok(None) => UserProgress::default(),
            Err(e) => {
                warn!(error = %e, "could not load saved progress, starting fresh");
                UserProgress::default()
            }
        };

        Self {
            store,
            catalog,
            clock,
            progress,
        }
    }

    /// Tracker over an in-memory store and the built-in catalog.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(BuiltinCatalog),
            Clock::Default,
        )
    }

    //
    // ─── RECORDING ─────────────────────────────────────────────────────────
    //

    /// Mark a module's lesson as completed. Idempotent.
    pub fn mark_lesson_complete(&mut self, slug: &str) {
        let now = self.clock.now();
        let module = self.progress.module_mut(slug);
        module.lesson_completed = true;
        module.lesson_completed_at = Some(now);
        self.progress.touch(slug, now);
        self.persist();
    }

    /// Mark a module's worked examples as viewed. Idempotent.
    pub fn mark_examples_viewed(&mut self, slug: &str) {
        let now = self.clock.now();
        let module = self.progress.module_mut(slug);
        module.examples_viewed = true;
        module.examples_viewed_at = Some(now);
        self.progress.touch(slug, now);
        self.persist();
    }

    /// Mark a module's summary as viewed. Idempotent.
    pub fn mark_summary_viewed(&mut self, slug: &str) {
        let now = self.clock.now();
        let module = self.progress.module_mut(slug);
        module.summary_viewed = true;
        module.summary_viewed_at = Some(now);
        self.progress.touch(slug, now);
        self.persist();
    }

    /// Record one attempt at an exercise.
    ///
    /// The first attempt leaves the counter at 1; `correct` sticks once an
    /// attempt has ever been right.
    pub fn record_exercise_attempt(&mut self, slug: &str, exercise_id: &str, was_correct: bool) {
        let now = self.clock.now();
        self.progress
            .module_mut(slug)
            .record_attempt(exercise_id, was_correct, now);
        self.progress.touch(slug, now);
        self.persist();
    }

    /// Check `given` against the exercise's answer key and record the
    /// attempt in one step. Returns whether the answer was accepted.
    pub fn submit_answer(&mut self, slug: &str, exercise: &Exercise, given: &Answer) -> bool {
        let correct = exercise.check(given);
        self.record_exercise_attempt(slug, &exercise.id, correct);
        correct
    }

    /// Set the preferred difficulty tier.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.progress.preferences.difficulty = difficulty;
        self.persist();
    }

    /// Set the site theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.progress.preferences.theme = theme;
        self.persist();
    }

    /// Restore the default empty record, discarding all progress.
    pub fn reset(&mut self) {
        self.progress = UserProgress::default();
        self.persist();
    }

    //
    // ─── READING ───────────────────────────────────────────────────────────
    //

    /// Completion percentage for a module, `0..=100`.
    ///
    /// Modules with no recorded progress score 0; the exercise denominator
    /// comes from the catalog.
    #[must_use]
    pub fn module_completion(&self, slug: &str) -> u8 {
        self.progress
            .module(slug)
            .completion_percent(self.catalog.exercise_count(slug))
    }

    /// Accuracy percentage over attempted exercises, `0..=100`.
    #[must_use]
    pub fn module_accuracy(&self, slug: &str) -> u8 {
        self.progress.module(slug).accuracy_percent()
    }

    /// Progress record for one module, defaulted for untouched modules.
    #[must_use]
    pub fn module_progress(&self, slug: &str) -> ModuleProgress {
        self.progress.module(slug)
    }

    /// The full in-memory progress record.
    #[must_use]
    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    /// Slug of the most recently visited module, if any.
    #[must_use]
    pub fn last_visited(&self) -> Option<&str> {
        self.progress.last_visited.as_deref()
    }

    /// Save through to the store, degrading to in-memory-only on failure.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.progress) {
            warn!(error = %e, "progress not persisted, continuing in memory");
        }
    }
}
