//! Selection normalizer
//!
//! Walks the raw request selections and accumulates a [`SelectionTree`]:
//! - fragment spreads and inline fragments contribute their fields directly at
//!   the level where they appear
//! - concrete fields get their arguments parsed and their nested selections
//!   normalized into a fresh child tree
//! - repeated field names are merged (first arguments win, children union)

use std::collections::HashMap;

use super::ast::{FieldNode, RequestSelection};
use super::errors::SelectionError;
use super::literal::parse_literal;
use super::tree::{SelectionNode, SelectionTree};

/// Lookup capability for named fragments.
pub trait FragmentResolver {
    fn resolve(&self, name: &str) -> Result<&[RequestSelection], SelectionError>;
}

/// Named fragment definitions keyed by fragment name
pub type FragmentMap = HashMap<String, Vec<RequestSelection>>;

impl FragmentResolver for FragmentMap {
    fn resolve(&self, name: &str) -> Result<&[RequestSelection], SelectionError> {
        self.get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SelectionError::UnknownFragment(name.to_string()))
    }
}

/// Resolver for requests that define no fragments; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFragments;

impl FragmentResolver for NoFragments {
    fn resolve(&self, name: &str) -> Result<&[RequestSelection], SelectionError> {
        Err(SelectionError::UnknownFragment(name.to_string()))
    }
}

/// Normalize the root selections of a request into a canonical tree.
pub fn normalize<R>(root: &[RequestSelection], resolver: &R) -> Result<SelectionTree, SelectionError>
where
    R: FragmentResolver + ?Sized,
{
    let mut tree = SelectionTree::new();
    normalize_into(root, resolver, &mut tree)?;
    Ok(tree)
}

/// Normalize `selections` into an existing accumulator.
pub fn normalize_into<R>(
    selections: &[RequestSelection],
    resolver: &R,
    tree: &mut SelectionTree,
) -> Result<(), SelectionError>
where
    R: FragmentResolver + ?Sized,
{
    let mut normalizer = Normalizer {
        resolver,
        expanding: Vec::new(),
    };
    normalizer.flatten(selections, tree)
}

struct Normalizer<'r, R: ?Sized> {
    resolver: &'r R,
    /// Named fragments currently being expanded, outermost first
    expanding: Vec<String>,
}

impl<R: FragmentResolver + ?Sized> Normalizer<'_, R> {
    fn flatten(
        &mut self,
        selections: &[RequestSelection],
        tree: &mut SelectionTree,
    ) -> Result<(), SelectionError> {
        for selection in selections {
            match selection {
                RequestSelection::Field(field) => {
                    let node = self.field_node(field)?;
                    tree.merge(field.name.clone(), node);
                }
                RequestSelection::InlineFragment(inner) => self.flatten(inner, tree)?,
                RequestSelection::FragmentSpread(name) => {
                    if self.expanding.iter().any(|n| n == name) {
                        log::warn!("fragment `{}` spreads itself, skipping nested spread", name);
                        continue;
                    }
                    let resolver = self.resolver;
                    let fragment = resolver.resolve(name)?;
                    self.expanding.push(name.clone());
                    let result = self.flatten(fragment, tree);
                    self.expanding.pop();
                    result?;
                }
            }
        }
        Ok(())
    }

    fn field_node(&mut self, field: &FieldNode) -> Result<SelectionNode, SelectionError> {
        let mut node = SelectionNode::leaf();
        // A repeated argument name within one field keeps its last value
        for (name, value) in &field.arguments {
            node.arguments.insert(name.clone(), parse_literal(value));
        }
        self.flatten(&field.selections, &mut node.children)?;
        Ok(node)
    }
}
