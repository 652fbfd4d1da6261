//! Projection building
//!
//! Turns a normalized selection into a [`ProjectionState`] plan against an
//! [`EntityCatalog`].

pub mod builder;
pub mod errors;
pub mod state;
pub mod visited;

pub use builder::{ProjectionBuilder, Selection};
pub use errors::PlanError;
pub use state::{FromSource, JoinDirective, Projection, ProjectionState};
pub use visited::VisitedRelations;

use crate::config::PlannerConfig;
use crate::entity_catalog::EntityCatalog;
use crate::selection::{SelectionError, SelectionTree};

/// Plan a normalized selection from the configured root alias.
///
/// Selections nested deeper than `config.max_selection_depth` are rejected
/// before any metadata is read.
pub fn plan_selection<C>(
    catalog: &C,
    config: &PlannerConfig,
    entity_type: &str,
    tree: &SelectionTree,
) -> Result<ProjectionState, PlanError>
where
    C: EntityCatalog + ?Sized,
{
    let depth = tree.depth();
    let max = config.max_selection_depth as usize;
    if depth > max {
        return Err(SelectionError::SelectionTooDeep { depth, max }.into());
    }

    ProjectionBuilder::with_config(catalog, config).build(
        entity_type,
        Selection::from_tree(tree),
        &config.root_alias,
    )
}
