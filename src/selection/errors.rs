use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectionError {
    #[error("Unknown fragment `{0}`")]
    UnknownFragment(String),
    #[error("Failed to parse request document: {0}")]
    GraphqlParse(String),
    #[error("Request document contains no operation")]
    NoOperation,
    #[error("Selection depth {depth} exceeds the configured maximum of {max}")]
    SelectionTooDeep { depth: usize, max: usize },
}
