//! Argument literal parsing
//!
//! Literal argument nodes are converted to a closed [`ArgumentValue`] type.
//! Unsupported literal kinds (variables, enums, null) and numeric lexemes that
//! cannot be read as numbers become [`ArgumentValue::Absent`] instead of failing
//! the request.

use indexmap::IndexMap;
use serde::Serialize;

use super::ast::LiteralNode;

/// Parsed argument value
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum ArgumentValue {
    String(String),
    /// Integer and float literals share one numeric representation
    Number(f64),
    Boolean(bool),
    List(Vec<ArgumentValue>),
    Object(IndexMap<String, ArgumentValue>),
    #[default]
    Absent,
}

impl ArgumentValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, ArgumentValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgumentValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgumentValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as an integer, if it has no fractional part and fits in i64
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ArgumentValue::Number(n)
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgumentValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgumentValue]> {
        match self {
            ArgumentValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ArgumentValue>> {
        match self {
            ArgumentValue::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Parse one literal argument node.
pub fn parse_literal(node: &LiteralNode) -> ArgumentValue {
    match node {
        LiteralNode::String(s) => ArgumentValue::String(s.clone()),
        LiteralNode::Boolean(b) => ArgumentValue::Boolean(*b),
        LiteralNode::Int(raw) | LiteralNode::Float(raw) => match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => ArgumentValue::Number(n),
            _ => {
                log::debug!("numeric literal `{}` is not a finite number, treating as absent", raw);
                ArgumentValue::Absent
            }
        },
        LiteralNode::Object(fields) => ArgumentValue::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), parse_literal(value)))
                .collect(),
        ),
        LiteralNode::List(values) => ArgumentValue::List(values.iter().map(parse_literal).collect()),
        LiteralNode::Variable(_) | LiteralNode::Enum(_) | LiteralNode::Null => {
            log::trace!("unsupported literal kind {:?}, treating as absent", node);
            ArgumentValue::Absent
        }
    }
}
