use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

use super::literal::ArgumentValue;

/// One requested field: its parsed arguments and nested selection
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectionNode {
    pub arguments: IndexMap<String, ArgumentValue>,
    pub children: SelectionTree,
}

impl SelectionNode {
    pub fn leaf() -> Self {
        Self::default()
    }

    pub fn with_children(children: SelectionTree) -> Self {
        Self {
            arguments: IndexMap::new(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Canonical selection: field name → [`SelectionNode`], one entry per name.
///
/// Iteration follows first-mention order, which carries no meaning for
/// projection building.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SelectionTree {
    fields: IndexMap<String, SelectionNode>,
}

impl SelectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a field into this level.
    ///
    /// A name seen for the first time is inserted as-is. For a repeated name the
    /// arguments of the first occurrence are kept and the children are merged
    /// recursively with the same policy.
    pub fn merge(&mut self, name: impl Into<String>, node: SelectionNode) {
        match self.fields.entry(name.into()) {
            Entry::Occupied(mut existing) => {
                existing.get_mut().children.merge_tree(node.children);
            }
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
        }
    }

    /// Merge every field of `other` into this tree.
    pub fn merge_tree(&mut self, other: SelectionTree) {
        for (name, node) in other.fields {
            self.merge(name, node);
        }
    }

    pub fn get(&self, name: &str) -> Option<&SelectionNode> {
        self.fields.get(name)
    }

    /// Remove a field, keeping the order of the remaining ones.
    pub fn take(&mut self, name: &str) -> Option<SelectionNode> {
        self.fields.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectionNode)> {
        self.fields.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Number of nested levels; an empty tree has depth 0, a flat one depth 1.
    pub fn depth(&self) -> usize {
        self.fields
            .values()
            .map(|node| 1 + node.children.depth())
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<(String, SelectionNode)> for SelectionTree {
    fn from_iter<I: IntoIterator<Item = (String, SelectionNode)>>(iter: I) -> Self {
        let mut tree = SelectionTree::new();
        for (name, node) in iter {
            tree.merge(name, node);
        }
        tree
    }
}
