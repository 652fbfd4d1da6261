use thiserror::Error;

use crate::entity_catalog::CatalogError;
use crate::selection::SelectionError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    #[error("Entity lookup failed: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
}
