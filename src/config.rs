use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Planner configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    /// Property forced into every explicit projection so rows can be hydrated
    /// back into entities. Entities may override it in the catalog.
    #[validate(length(min = 1, message = "Identifier property cannot be empty"))]
    pub identifier_property: String,

    /// Alias given to the root entity of a plan
    #[validate(length(min = 1, message = "Root alias cannot be empty"))]
    pub root_alias: String,

    /// Maximum nesting depth accepted for an explicit selection (1-256)
    #[validate(range(
        min = 1,
        max = 256,
        message = "Max selection depth must be between 1 and 256"
    ))]
    pub max_selection_depth: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            identifier_property: "id".to_string(),
            root_alias: "root".to_string(),
            max_selection_depth: 32,
        }
    }
}

impl PlannerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            identifier_property: env::var("SELECTION_PLANNER_IDENTIFIER")
                .unwrap_or_else(|_| "id".to_string()),
            root_alias: env::var("SELECTION_PLANNER_ROOT_ALIAS")
                .unwrap_or_else(|_| "root".to_string()),
            max_selection_depth: parse_env_var("SELECTION_PLANNER_MAX_DEPTH", "32")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
