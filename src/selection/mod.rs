//! Selection normalization
//!
//! Flattens a raw selection request (fields with literal arguments, possibly
//! repeated, possibly behind fragment references) into a canonical
//! [`SelectionTree`] keyed by field name.

pub mod ast;
pub mod errors;
pub mod graphql;
pub mod literal;
pub mod normalizer;
pub mod tree;

pub use ast::{FieldNode, LiteralNode, RequestSelection};
pub use errors::SelectionError;
pub use literal::{parse_literal, ArgumentValue};
pub use normalizer::{normalize, normalize_into, FragmentMap, FragmentResolver, NoFragments};
pub use tree::{SelectionNode, SelectionTree};
