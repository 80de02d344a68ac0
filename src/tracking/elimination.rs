//! Per-round elimination bookkeeping.

use rustc_hash::FxHashSet;

use crate::core::SubjectId;

/// Subjects eliminated since the last green light.
///
/// A subject stays in the registry until [`clear`](Self::clear); the game loop
/// skips registered subjects entirely, so each player can be hit at most once
/// per red phase.
#[derive(Clone, Debug, Default)]
pub struct EliminationRegistry {
    eliminated: FxHashSet<SubjectId>,
}

impl EliminationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_eliminated(&self, subject: SubjectId) -> bool {
        self.eliminated.contains(&subject)
    }

    /// Flag a subject. Returns false if it was already flagged.
    pub fn mark_eliminated(&mut self, subject: SubjectId) -> bool {
        self.eliminated.insert(subject)
    }

    /// Forget every elimination (start of a new round).
    pub fn clear(&mut self) {
        self.eliminated.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.eliminated.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eliminated.is_empty()
    }

    /// Eliminated subjects in ascending ID order.
    #[must_use]
    pub fn sorted(&self) -> Vec<SubjectId> {
        let mut ids: Vec<_> = self.eliminated.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_query() {
        let mut registry = EliminationRegistry::new();
        let s1 = SubjectId::new(1);

        assert!(!registry.is_eliminated(s1));
        assert!(registry.mark_eliminated(s1));
        assert!(registry.is_eliminated(s1));
        assert!(!registry.is_eliminated(SubjectId::new(2)));
    }

    #[test]
    fn test_mark_twice() {
        let mut registry = EliminationRegistry::new();
        assert!(registry.mark_eliminated(SubjectId::new(5)));
        assert!(!registry.mark_eliminated(SubjectId::new(5)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut registry = EliminationRegistry::new();
        registry.mark_eliminated(SubjectId::new(3));
        registry.mark_eliminated(SubjectId::new(1));
        assert_eq!(registry.sorted(), vec![SubjectId::new(1), SubjectId::new(3)]);

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.is_eliminated(SubjectId::new(3)));
    }
}
