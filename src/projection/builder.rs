//! Relational projection builder
//!
//! Compiles a [`SelectionTree`] against entity metadata into a
//! [`ProjectionState`]. Two modes, chosen by the selection:
//!
//! - **Explicit**: project only the requested columns (plus the identifier),
//!   left join only the requested relations, and recurse into each with its
//!   nested selection.
//! - **Full select**: walk every relation reachable from the entity. Relations
//!   with an inverse are joined and recursed into once; re-entering a traversed
//!   pair emits a plain alias projection instead. Relations without an inverse
//!   project the foreign key under the child alias.

use crate::config::PlannerConfig;
use crate::entity_catalog::{EntityCatalog, RelationMetadata};
use crate::selection::SelectionTree;
use crate::utils::naming::{child_alias, column_alias, snake_case};

use super::errors::PlanError;
use super::state::ProjectionState;
use super::visited::VisitedRelations;

/// What to project for one entity node
#[derive(Debug, Clone, Copy)]
pub enum Selection<'s> {
    /// No explicit selection: everything reachable
    All,
    Fields(&'s SelectionTree),
}

impl<'s> Selection<'s> {
    /// An empty tree selects nothing explicitly and therefore means [`Selection::All`].
    pub fn from_tree(tree: &'s SelectionTree) -> Self {
        if tree.is_empty() {
            Selection::All
        } else {
            Selection::Fields(tree)
        }
    }
}

impl<'s> From<Option<&'s SelectionTree>> for Selection<'s> {
    fn from(tree: Option<&'s SelectionTree>) -> Self {
        tree.map_or(Selection::All, Selection::from_tree)
    }
}

pub struct ProjectionBuilder<'c, C: EntityCatalog + ?Sized> {
    catalog: &'c C,
    identifier_property: String,
}

impl<'c, C: EntityCatalog + ?Sized> ProjectionBuilder<'c, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self::with_config(catalog, &PlannerConfig::default())
    }

    pub fn with_config(catalog: &'c C, config: &PlannerConfig) -> Self {
        Self {
            catalog,
            identifier_property: config.identifier_property.clone(),
        }
    }

    /// Compile `selection` for `entity_type` into a fresh plan rooted at `alias`.
    pub fn build(
        &self,
        entity_type: &str,
        selection: Selection<'_>,
        alias: &str,
    ) -> Result<ProjectionState, PlanError> {
        let mut state = ProjectionState::new();
        self.project(entity_type, selection, alias, &mut state, None)?;
        log::debug!(
            "planned `{}` as `{}`: {} projections, {} joins, {} from sources",
            entity_type,
            alias,
            state.projections().len(),
            state.joins().len(),
            state.from_sources().len()
        );
        Ok(state)
    }

    /// Append the projection of `selection` for `entity_type` at `alias` to `state`.
    ///
    /// `visited` is only used in full-select mode; when absent a new set is
    /// created for the traversal that starts here.
    pub fn project<'st>(
        &self,
        entity_type: &str,
        selection: Selection<'_>,
        alias: &str,
        state: &'st mut ProjectionState,
        visited: Option<&mut VisitedRelations>,
    ) -> Result<&'st mut ProjectionState, PlanError> {
        match selection {
            Selection::Fields(tree) if !tree.is_empty() => {
                self.select_fields(entity_type, tree, alias, state)?;
            }
            _ => match visited {
                Some(visited) => self.select_all(entity_type, alias, state, visited)?,
                None => {
                    let mut visited = VisitedRelations::new();
                    self.select_all(entity_type, alias, state, &mut visited)?;
                }
            },
        }
        Ok(state)
    }

    fn select_fields(
        &self,
        entity_type: &str,
        tree: &SelectionTree,
        alias: &str,
        state: &mut ProjectionState,
    ) -> Result<(), PlanError> {
        let meta = self.catalog.entity(entity_type)?;
        let identifier = meta.identifier().unwrap_or(self.identifier_property.as_str());

        let columns: Vec<_> = meta
            .columns()
            .iter()
            .filter(|column| tree.contains(&column.property_name))
            .collect();

        // Hydration needs the identifier even when it was not requested
        if !columns.iter().any(|column| column.property_name == identifier) {
            let storage_name = meta
                .column(identifier)
                .map(|column| column.storage_name.clone())
                .unwrap_or_else(|| snake_case(identifier));
            log::trace!("adding identifier `{}` to `{}`", identifier, alias);
            state.add_select(alias, identifier, column_alias(alias, &storage_name));
        }

        for column in columns {
            state.add_select(
                alias,
                &column.property_name,
                column_alias(alias, &column.storage_name),
            );
        }

        for relation in meta.relations() {
            let Some(node) = tree.get(&relation.property_name) else {
                continue;
            };
            let child = child_alias(alias, &relation.property_name);
            log::debug!(
                "joining `{}` as `{}` for selection of {}",
                relation.id(),
                child,
                relation.target
            );
            state.left_join(alias, &relation.property_name, &child);
            self.project(
                relation.inverse_entity_type(),
                Selection::from_tree(&node.children),
                &child,
                state,
                None,
            )?;
        }

        Ok(())
    }

    fn select_all(
        &self,
        entity_type: &str,
        alias: &str,
        state: &mut ProjectionState,
        visited: &mut VisitedRelations,
    ) -> Result<(), PlanError> {
        let meta = self.catalog.entity(entity_type)?;

        for relation in meta.relations() {
            let child = child_alias(alias, &relation.property_name);

            if !relation.is_bidirectional() {
                state.add_select(alias, &relation.property_name, child);
                continue;
            }

            if is_reentry(relation, visited) {
                log::debug!("relation `{}` already traversed, selecting `{}`", relation.id(), alias);
                state.add_select_entity(alias);
                continue;
            }

            visited.insert(relation.id());
            state.add_from(&relation.target, relation.inverse_entity_type());
            state.left_join(alias, &relation.property_name, &child);
            self.select_all(relation.inverse_entity_type(), &child, state, visited)?;
        }

        Ok(())
    }
}

/// A bidirectional relation re-enters the walk when it has been traversed
/// itself, or, for pairs spanning two entity types, when its inverse has.
///
/// A self-referencing pair (manager/reports on one entity) reaches a new level
/// of the hierarchy through the inverse, so only the relation itself is checked.
fn is_reentry(relation: &RelationMetadata, visited: &VisitedRelations) -> bool {
    if visited.contains(&relation.id()) {
        return true;
    }
    relation.target != relation.entity
        && relation
            .inverse_id()
            .is_some_and(|inverse| visited.contains(&inverse))
}
