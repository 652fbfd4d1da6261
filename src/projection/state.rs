//! Projection plan accumulated while compiling a selection.
//!
//! The state is append-only: the builder pushes column projections, left joins
//! and auxiliary from-sources in traversal order, and the finished value is
//! handed to the execution engine.

use serde::Serialize;
use std::fmt;

use crate::utils::naming::source_reference;

/// One projected output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// `{source_alias}.{field} AS {output_alias}`
    Column {
        source_alias: String,
        field: String,
        output_alias: String,
    },
    /// Every column of an already joined alias, emitted when a full-select
    /// walk re-enters a relation pair it has traversed
    Entity { source_alias: String },
}

impl Projection {
    pub fn output_alias(&self) -> Option<&str> {
        match self {
            Projection::Column { output_alias, .. } => Some(output_alias),
            Projection::Entity { .. } => None,
        }
    }

    pub fn source_alias(&self) -> &str {
        match self {
            Projection::Column { source_alias, .. } | Projection::Entity { source_alias } => {
                source_alias
            }
        }
    }
}

/// `LEFT JOIN {source_alias}.{relation} AS {target_alias}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinDirective {
    pub source_alias: String,
    pub relation: String,
    pub target_alias: String,
}

/// Additional `FROM {entity} AS {alias}` source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FromSource {
    pub entity: String,
    pub alias: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionState {
    projections: Vec<Projection>,
    joins: Vec<JoinDirective>,
    from_sources: Vec<FromSource>,
}

impl ProjectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_select(
        &mut self,
        source_alias: impl Into<String>,
        field: impl Into<String>,
        output_alias: impl Into<String>,
    ) -> &mut Self {
        self.projections.push(Projection::Column {
            source_alias: source_alias.into(),
            field: field.into(),
            output_alias: output_alias.into(),
        });
        self
    }

    pub fn add_select_entity(&mut self, source_alias: impl Into<String>) -> &mut Self {
        self.projections.push(Projection::Entity {
            source_alias: source_alias.into(),
        });
        self
    }

    pub fn left_join(
        &mut self,
        source_alias: impl Into<String>,
        relation: impl Into<String>,
        target_alias: impl Into<String>,
    ) -> &mut Self {
        self.joins.push(JoinDirective {
            source_alias: source_alias.into(),
            relation: relation.into(),
            target_alias: target_alias.into(),
        });
        self
    }

    pub fn add_from(&mut self, entity: impl Into<String>, alias: impl Into<String>) -> &mut Self {
        self.from_sources.push(FromSource {
            entity: entity.into(),
            alias: alias.into(),
        });
        self
    }

    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    pub fn joins(&self) -> &[JoinDirective] {
        &self.joins
    }

    pub fn from_sources(&self) -> &[FromSource] {
        &self.from_sources
    }

    /// Output aliases of column projections, in order
    pub fn output_aliases(&self) -> Vec<&str> {
        self.projections
            .iter()
            .filter_map(Projection::output_alias)
            .collect()
    }

    /// Target aliases of joins, in order
    pub fn join_targets(&self) -> Vec<&str> {
        self.joins.iter().map(|j| j.target_alias.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty() && self.joins.is_empty() && self.from_sources.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ProjectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for source in &self.from_sources {
            writeln!(f, "FROM {} AS {}", source.entity, source.alias)?;
        }
        for projection in &self.projections {
            match projection {
                Projection::Column {
                    source_alias,
                    field,
                    output_alias,
                } => writeln!(
                    f,
                    "SELECT {} AS {}",
                    source_reference(source_alias, field),
                    output_alias
                )?,
                Projection::Entity { source_alias } => writeln!(f, "SELECT {}", source_alias)?,
            }
        }
        for join in &self.joins {
            writeln!(
                f,
                "LEFT JOIN {} AS {}",
                source_reference(&join.source_alias, &join.relation),
                join.target_alias
            )?;
        }
        Ok(())
    }
}
