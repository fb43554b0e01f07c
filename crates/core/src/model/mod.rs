mod exercise;
mod module;
mod progress;

pub use exercise::{Answer, Difficulty, Domain, Exercise};
pub use module::{get_module, get_module_by_id, Module, MODULES};
pub use progress::{ExerciseProgress, ModuleProgress, Preferences, Theme, UserProgress};
