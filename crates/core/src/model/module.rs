//! The static module catalog.
//!
//! Five learning modules, fixed at build time. The catalog supplies the
//! exercise counts that completion scoring uses as its denominator.

/// One entry in the module catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    pub id: u32,
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub exercise_count: u32,
    pub estimated_time: &'static str,
    pub topics: &'static [&'static str],
}

/// All learning modules, in curriculum order.
pub const MODULES: [Module; 5] = [
    Module {
        id: 1,
        slug: "propositional",
        title: "Propositional Logic",
        description: "Connectives, truth tables, and compound expressions",
        icon: "∧",
        exercise_count: 12,
        estimated_time: "45 min",
        topics: &[
            "Connectives",
            "Truth Tables",
            "De Morgan's Laws",
            "Logical Equivalence",
        ],
    },
    Module {
        id: 2,
        slug: "translation",
        title: "Translation",
        description: "Converting natural language to logical notation",
        icon: "↔",
        exercise_count: 15,
        estimated_time: "60 min",
        topics: &[
            "Direct Translation",
            "Ambiguous Sentences",
            "Tricky Patterns",
            "Legal Clauses",
        ],
    },
    Module {
        id: 3,
        slug: "validity",
        title: "Validity & Proofs",
        description: "Constructing and verifying logical arguments",
        icon: "⊢",
        exercise_count: 10,
        estimated_time: "75 min",
        topics: &[
            "Modus Ponens",
            "Modus Tollens",
            "Proof Construction",
            "Inference Rules",
        ],
    },
    Module {
        id: 4,
        slug: "predicate",
        title: "Predicate Logic",
        description: "Quantifiers, relations, and structure",
        icon: "∀",
        exercise_count: 12,
        estimated_time: "60 min",
        topics: &[
            "Universal Quantifier",
            "Existential Quantifier",
            "Nested Quantifiers",
            "SQL Parallels",
        ],
    },
    Module {
        id: 5,
        slug: "applications",
        title: "Applications",
        description: "Fallacies, puzzles, and real-world reasoning",
        icon: "◊",
        exercise_count: 15,
        estimated_time: "90 min",
        topics: &[
            "Formal Fallacies",
            "Informal Fallacies",
            "Knights & Knaves",
            "Logic Puzzles",
        ],
    },
];

/// Look a module up by slug.
#[must_use]
pub fn get_module(slug: &str) -> Option<&'static Module> {
    MODULES.iter().find(|m| m.slug == slug)
}

/// Look a module up by numeric id.
#[must_use]
pub fn get_module_by_id(id: u32) -> Option<&'static Module> {
    MODULES.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_and_ids_are_unique() {
        for (i, a) in MODULES.iter().enumerate() {
            for b in &MODULES[i + 1..] {
                assert_ne!(a.slug, b.slug);
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn lookup_by_slug() {
        let module = get_module("propositional").unwrap();
        assert_eq!(module.id, 1);
        assert_eq!(module.exercise_count, 12);
        assert!(get_module("nonexistent").is_none());
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(get_module_by_id(3).unwrap().slug, "validity");
        assert!(get_module_by_id(99).is_none());
    }
}
