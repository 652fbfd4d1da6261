//! # Entity Catalog Error Types
//!
//! - **Lookup Errors**: an entity type the catalog does not know
//! - **Configuration Errors**: file I/O, YAML parsing and structural validation
//!   while loading catalog definitions

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("No entity metadata found for `{entity_type}`")]
    UnknownEntity { entity_type: String },
    #[error("Failed to read catalog file: {error}")]
    ConfigReadError { error: String },
    #[error("Failed to parse catalog: {error}")]
    ConfigParseError { error: String },
    #[error("Invalid catalog: {message}")]
    InvalidConfig { message: String },
}

impl CatalogError {
    pub fn unknown_entity(entity_type: impl Into<String>) -> Self {
        CatalogError::UnknownEntity {
            entity_type: entity_type.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        CatalogError::InvalidConfig {
            message: message.into(),
        }
    }
}
