pub mod config;
pub mod entity_schema;
pub mod errors;

pub use config::{ColumnDefinition, EntityCatalogConfig, EntityDefinition, RelationDefinition};
pub use entity_schema::{
    ColumnMetadata, EntityCatalog, EntityMetadata, RelationId, RelationMetadata,
    StaticEntityCatalog, StaticEntityCatalogBuilder,
};
pub use errors::CatalogError;
