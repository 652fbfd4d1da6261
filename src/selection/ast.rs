//! Ingress shape for selection requests.
//!
//! Any request language is adapted to these types before normalization. A
//! request is a list of [`RequestSelection`]s: concrete fields, references to
//! named fragments, or inline fragments whose selections apply in place.

/// One entry of a selection set
#[derive(Debug, Clone, PartialEq)]
pub enum RequestSelection {
    Field(FieldNode),
    /// Reference to a named fragment, resolved at normalization time
    FragmentSpread(String),
    /// Anonymous fragment whose selections are inlined at the current level
    InlineFragment(Vec<RequestSelection>),
}

impl RequestSelection {
    pub fn field(name: impl Into<String>) -> Self {
        RequestSelection::Field(FieldNode::new(name))
    }

    pub fn spread(fragment_name: impl Into<String>) -> Self {
        RequestSelection::FragmentSpread(fragment_name.into())
    }
}

impl From<FieldNode> for RequestSelection {
    fn from(field: FieldNode) -> Self {
        RequestSelection::Field(field)
    }
}

/// A requested field with its literal arguments and nested selections
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldNode {
    pub name: String,
    /// Arguments in request order
    pub arguments: Vec<(String, LiteralNode)>,
    pub selections: Vec<RequestSelection>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: LiteralNode) -> Self {
        self.arguments.push((name.into(), value));
        self
    }

    pub fn with_selections<I, S>(mut self, selections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RequestSelection>,
    {
        self.selections
            .extend(selections.into_iter().map(Into::into));
        self
    }
}

/// Literal argument value as written in the request.
///
/// Numeric literals keep their raw lexeme; conversion happens in
/// [`parse_literal`](super::literal::parse_literal).
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    String(String),
    Int(String),
    Float(String),
    Boolean(bool),
    Object(Vec<(String, LiteralNode)>),
    List(Vec<LiteralNode>),
    /// Reference to an operation variable
    Variable(String),
    Enum(String),
    Null,
}
