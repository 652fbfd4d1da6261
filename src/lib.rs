//! Selection Planner - compile hierarchical field selections into relational projections
//!
//! This crate turns a client-supplied selection request (which fields of an entity
//! and of its nested relations are wanted) into a projection plan: the columns to
//! select and the tree of left joins to walk, against a typed entity-relationship
//! catalog.
//!
//! - Selection normalization (duplicate merging, fragment inlining)
//! - Entity catalog definitions loaded from YAML
//! - Projection building with cycle detection for bidirectional relations
//!
//! ```ignore
//! use selection_planner::{plan_selection, PlannerConfig, StaticEntityCatalog};
//! use selection_planner::selection::graphql::GraphqlRequest;
//!
//! let catalog = StaticEntityCatalog::from_yaml_file("entities.yaml")?;
//! let request = GraphqlRequest::parse("{ users { name posts { title } } }")?;
//! let tree = request.resolver_fields("users")?.unwrap_or_default();
//! let plan = plan_selection(&catalog, &PlannerConfig::default(), "User", &tree)?;
//! ```

pub mod config;
pub mod entity_catalog;
pub mod projection;
pub mod selection;
pub mod utils;

pub use config::PlannerConfig;
pub use entity_catalog::{EntityCatalog, EntityMetadata, StaticEntityCatalog};
pub use projection::{
    plan_selection, PlanError, ProjectionBuilder, ProjectionState, Selection, VisitedRelations,
};
pub use selection::{normalize, ArgumentValue, SelectionNode, SelectionTree};
