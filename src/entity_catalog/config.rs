//! Entity catalog definitions loaded from YAML.
//!
//! ```yaml
//! entities:
//!   - name: User
//!     identifier: id            # optional, defaults to the planner setting
//!     columns:
//!       - id
//!       - name: firstName       # detailed form
//!         storage: first_name   # optional, defaults to snake_case(name)
//!     relations:
//!       - name: posts
//!         target: Post
//!         inverse: author       # optional, makes the pair bidirectional
//!   - name: Post
//!     columns: [id, title]
//!     relations:
//!       - { name: author, target: User, inverse: posts }
//! ```
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::entity_schema::{EntityMetadata, StaticEntityCatalog};
use super::errors::CatalogError;

/// Configuration for an entity catalog loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCatalogConfig {
    /// Optional catalog name, for diagnostics only
    #[serde(default)]
    pub name: Option<String>,
    pub entities: Vec<EntityDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub name: String,
    /// Optional: identifier property overriding the planner default
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub relations: Vec<RelationDefinition>,
}

/// Column given either as a bare property name or with an explicit storage name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ColumnDefinition {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        storage: Option<String>,
    },
}

impl ColumnDefinition {
    pub fn property_name(&self) -> &str {
        match self {
            ColumnDefinition::Name(name) => name,
            ColumnDefinition::Detailed { name, .. } => name,
        }
    }

    pub fn storage_name(&self) -> Option<&str> {
        match self {
            ColumnDefinition::Name(_) => None,
            ColumnDefinition::Detailed { storage, .. } => storage.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationDefinition {
    pub name: String,
    pub target: String,
    #[serde(default)]
    pub inverse: Option<String>,
}

impl EntityCatalogConfig {
    /// Load catalog configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|e| CatalogError::ConfigReadError {
            error: e.to_string(),
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse catalog configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(yaml).map_err(|e| CatalogError::ConfigParseError {
            error: e.to_string(),
        })
    }

    /// Basic validation of the catalog configuration
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.entities.is_empty() {
            return Err(CatalogError::invalid(
                "Catalog must contain at least one entity definition",
            ));
        }

        let mut seen_names = HashSet::new();
        for entity in &self.entities {
            if !seen_names.insert(&entity.name) {
                return Err(CatalogError::invalid(format!(
                    "Duplicate entity: {}",
                    entity.name
                )));
            }
            if let Some(property) = entity.columns.iter().find_map(|c| {
                c.storage_name()
                    .filter(|s| s.is_empty())
                    .map(|_| c.property_name())
            }) {
                return Err(CatalogError::invalid(format!(
                    "Column `{}.{}` has an empty storage name",
                    entity.name, property
                )));
            }
        }

        Ok(())
    }

    /// Validate and convert into a lookup catalog.
    pub fn to_catalog(&self) -> Result<StaticEntityCatalog, CatalogError> {
        self.validate()?;

        let mut builder = StaticEntityCatalog::builder();
        for definition in &self.entities {
            let mut entity = EntityMetadata::builder(&definition.name);
            if let Some(identifier) = &definition.identifier {
                entity = entity.identifier(identifier);
            }
            for column in &definition.columns {
                entity = match column.storage_name() {
                    Some(storage) => entity.column_with_storage(column.property_name(), storage),
                    None => entity.column(column.property_name()),
                };
            }
            for relation in &definition.relations {
                entity = match &relation.inverse {
                    Some(inverse) => entity.bidirectional(&relation.name, &relation.target, inverse),
                    None => entity.relation(&relation.name, &relation.target),
                };
            }
            builder = builder.entity(entity);
        }

        let catalog = builder.build()?;
        log::info!(
            "Loaded entity catalog{} with {} entities",
            self.name
                .as_deref()
                .map(|n| format!(" '{}'", n))
                .unwrap_or_default(),
            catalog.len()
        );
        Ok(catalog)
    }
}
