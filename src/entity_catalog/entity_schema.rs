use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::errors::CatalogError;
use crate::utils::naming::snake_case;

/// Read-only lookup of entity metadata by entity type name.
pub trait EntityCatalog {
    fn entity(&self, entity_type: &str) -> Result<&EntityMetadata, CatalogError>;
}

/// Stable identity of one relation descriptor: owning entity + property
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationId {
    pub entity: String,
    pub property: String,
}

impl RelationId {
    pub fn new(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            property: property.into(),
        }
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity, self.property)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub property_name: String,
    pub storage_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationMetadata {
    /// Entity type that declares this relation
    pub entity: String,
    pub property_name: String,
    /// Entity type on the other side of the relation
    pub target: String,
    /// Property of the target entity forming a bidirectional pair with this one
    pub inverse: Option<String>,
}

impl RelationMetadata {
    pub fn id(&self) -> RelationId {
        RelationId::new(&self.entity, &self.property_name)
    }

    pub fn inverse_id(&self) -> Option<RelationId> {
        self.inverse
            .as_ref()
            .map(|inverse| RelationId::new(&self.target, inverse))
    }

    /// Entity type the inverse relation belongs to, i.e. the related entity.
    pub fn inverse_entity_type(&self) -> &str {
        &self.target
    }

    pub fn is_bidirectional(&self) -> bool {
        self.inverse.is_some()
    }
}

/// Columns and relations of one entity type, in declaration order, with
/// property-name lookup tables.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadata {
    name: String,
    identifier: Option<String>,
    columns: Vec<ColumnMetadata>,
    relations: Vec<RelationMetadata>,
    column_index: HashMap<String, usize>,
    relation_index: HashMap<String, usize>,
}

impl EntityMetadata {
    pub fn builder(name: impl Into<String>) -> EntityMetadataBuilder {
        EntityMetadataBuilder {
            name: name.into(),
            identifier: None,
            columns: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier property declared for this entity, if it overrides the
    /// planner default.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    pub fn relations(&self) -> &[RelationMetadata] {
        &self.relations
    }

    pub fn column(&self, property_name: &str) -> Option<&ColumnMetadata> {
        self.column_index
            .get(property_name)
            .map(|&i| &self.columns[i])
    }

    pub fn relation(&self, property_name: &str) -> Option<&RelationMetadata> {
        self.relation_index
            .get(property_name)
            .map(|&i| &self.relations[i])
    }

    pub fn has_column(&self, property_name: &str) -> bool {
        self.column_index.contains_key(property_name)
    }

    pub fn has_relation(&self, property_name: &str) -> bool {
        self.relation_index.contains_key(property_name)
    }
}

pub struct EntityMetadataBuilder {
    name: String,
    identifier: Option<String>,
    columns: Vec<ColumnMetadata>,
    relations: Vec<RelationMetadata>,
}

impl EntityMetadataBuilder {
    pub fn identifier(mut self, property_name: impl Into<String>) -> Self {
        self.identifier = Some(property_name.into());
        self
    }

    /// Column stored under the snake-cased property name
    pub fn column(self, property_name: impl Into<String>) -> Self {
        let property_name = property_name.into();
        let storage_name = snake_case(&property_name);
        self.column_with_storage(property_name, storage_name)
    }

    pub fn column_with_storage(
        mut self,
        property_name: impl Into<String>,
        storage_name: impl Into<String>,
    ) -> Self {
        self.columns.push(ColumnMetadata {
            property_name: property_name.into(),
            storage_name: storage_name.into(),
        });
        self
    }

    /// Unidirectional relation
    pub fn relation(self, property_name: impl Into<String>, target: impl Into<String>) -> Self {
        self.push_relation(property_name.into(), target.into(), None)
    }

    /// Relation paired with `inverse` on the target entity
    pub fn bidirectional(
        self,
        property_name: impl Into<String>,
        target: impl Into<String>,
        inverse: impl Into<String>,
    ) -> Self {
        self.push_relation(property_name.into(), target.into(), Some(inverse.into()))
    }

    fn push_relation(mut self, property_name: String, target: String, inverse: Option<String>) -> Self {
        self.relations.push(RelationMetadata {
            entity: self.name.clone(),
            property_name,
            target,
            inverse,
        });
        self
    }

    pub fn build(self) -> Result<EntityMetadata, CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::invalid("Entity name cannot be empty"));
        }

        let mut seen = HashSet::new();
        let properties = self
            .columns
            .iter()
            .map(|c| &c.property_name)
            .chain(self.relations.iter().map(|r| &r.property_name));
        for property in properties {
            if property.is_empty() {
                return Err(CatalogError::invalid(format!(
                    "Entity `{}` declares an empty property name",
                    self.name
                )));
            }
            if !seen.insert(property.as_str()) {
                return Err(CatalogError::invalid(format!(
                    "Duplicate property `{}` on entity `{}`",
                    property, self.name
                )));
            }
        }

        let column_index = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.property_name.clone(), i))
            .collect();
        let relation_index = self
            .relations
            .iter()
            .enumerate()
            .map(|(i, r)| (r.property_name.clone(), i))
            .collect();

        Ok(EntityMetadata {
            name: self.name,
            identifier: self.identifier,
            columns: self.columns,
            relations: self.relations,
            column_index,
            relation_index,
        })
    }
}

/// In-memory catalog built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct StaticEntityCatalog {
    entities: HashMap<String, EntityMetadata>,
}

impl StaticEntityCatalog {
    pub fn builder() -> StaticEntityCatalogBuilder {
        StaticEntityCatalogBuilder::default()
    }

    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, CatalogError> {
        super::config::EntityCatalogConfig::from_yaml_file(path)?.to_catalog()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        super::config::EntityCatalogConfig::from_yaml_str(yaml)?.to_catalog()
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityCatalog for StaticEntityCatalog {
    fn entity(&self, entity_type: &str) -> Result<&EntityMetadata, CatalogError> {
        self.entities
            .get(entity_type)
            .ok_or_else(|| CatalogError::unknown_entity(entity_type))
    }
}

#[derive(Default)]
pub struct StaticEntityCatalogBuilder {
    entities: Vec<EntityMetadataBuilder>,
}

impl StaticEntityCatalogBuilder {
    pub fn entity(mut self, entity: EntityMetadataBuilder) -> Self {
        self.entities.push(entity);
        self
    }

    /// Build every entity and check that relations form a consistent graph:
    /// targets exist and each inverse names a relation on the target that
    /// points back.
    pub fn build(self) -> Result<StaticEntityCatalog, CatalogError> {
        let mut entities = HashMap::new();
        for builder in self.entities {
            let entity = builder.build()?;
            if entities.contains_key(entity.name()) {
                return Err(CatalogError::invalid(format!(
                    "Duplicate entity: {}",
                    entity.name()
                )));
            }
            entities.insert(entity.name().to_string(), entity);
        }

        for entity in entities.values() {
            for relation in entity.relations() {
                let target = entities.get(&relation.target).ok_or_else(|| {
                    CatalogError::invalid(format!(
                        "Relation `{}` targets unknown entity `{}`",
                        relation.id(),
                        relation.target
                    ))
                })?;

                let Some(inverse) = &relation.inverse else {
                    continue;
                };
                let paired = target.relation(inverse).ok_or_else(|| {
                    CatalogError::invalid(format!(
                        "Relation `{}` names inverse `{}.{}` which does not exist",
                        relation.id(),
                        relation.target,
                        inverse
                    ))
                })?;
                if paired.target != relation.entity
                    || paired.inverse.as_deref() != Some(relation.property_name.as_str())
                {
                    return Err(CatalogError::invalid(format!(
                        "Relations `{}` and `{}` are not declared as inverses of each other",
                        relation.id(),
                        paired.id()
                    )));
                }
            }
        }

        log::debug!("entity catalog built with {} entities", entities.len());
        Ok(StaticEntityCatalog { entities })
    }
}
