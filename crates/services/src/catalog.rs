use logic_core::model::get_module;

/// Read-only lookup into the module catalog.
///
/// Completion scoring needs each module's total exercise count as its
/// denominator; keeping the lookup behind a trait lets tests supply their
/// own counts.
pub trait ModuleCatalog: Send + Sync {
    /// Total exercises for a module; 0 for unknown slugs.
    fn exercise_count(&self, slug: &str) -> u32;
}

/// Catalog backed by the static [`logic_core::model::MODULES`] table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl ModuleCatalog for BuiltinCatalog {
    fn exercise_count(&self, slug: &str) -> u32 {
        get_module(slug).map_or(0, |m| m.exercise_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_reads_the_static_table() {
        let catalog = BuiltinCatalog;
        assert_eq!(catalog.exercise_count("propositional"), 12);
        assert_eq!(catalog.exercise_count("translation"), 15);
        assert_eq!(catalog.exercise_count("no-such-module"), 0);
    }
}
