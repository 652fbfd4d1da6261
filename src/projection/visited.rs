use std::collections::HashSet;

use crate::entity_catalog::RelationId;

/// Relations already traversed during one full-select walk.
///
/// Created once per traversal and shared by every recursive call of that
/// traversal; never consulted for explicit selections.
#[derive(Debug, Clone, Default)]
pub struct VisitedRelations {
    relations: HashSet<RelationId>,
}

impl VisitedRelations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a relation traversed. Returns false if it already was.
    pub fn insert(&mut self, relation: RelationId) -> bool {
        self.relations.insert(relation)
    }

    pub fn contains(&self, relation: &RelationId) -> bool {
        self.relations.contains(relation)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
