//! GraphQL request adapter
//!
//! Converts a GraphQL query document into the ingress shape accepted by the
//! normalizer: the first operation's root selections plus a [`FragmentMap`] of
//! every named fragment definition in the document.

use graphql_parser::query::{
    self as gql, Definition, OperationDefinition, Selection, SelectionSet, Value,
};

use super::ast::{FieldNode, LiteralNode, RequestSelection};
use super::errors::SelectionError;
use super::normalizer::{normalize, FragmentMap};
use super::tree::SelectionTree;

/// A parsed GraphQL document reduced to selections and fragments
#[derive(Debug, Clone)]
pub struct GraphqlRequest {
    root: Vec<RequestSelection>,
    fragments: FragmentMap,
}

impl GraphqlRequest {
    /// Parse a query document. The first operation in the document is used.
    pub fn parse(source: &str) -> Result<Self, SelectionError> {
        let document = gql::parse_query::<String>(source)
            .map_err(|e| SelectionError::GraphqlParse(e.to_string()))?;

        let mut root = None;
        let mut fragments = FragmentMap::new();
        for definition in &document.definitions {
            match definition {
                Definition::Operation(operation) => {
                    if root.is_none() {
                        root = Some(convert_selection_set(operation_selection_set(operation)));
                    } else {
                        log::debug!("ignoring additional operation in request document");
                    }
                }
                Definition::Fragment(fragment) => {
                    fragments.insert(
                        fragment.name.clone(),
                        convert_selection_set(&fragment.selection_set),
                    );
                }
            }
        }

        let root = root.ok_or(SelectionError::NoOperation)?;
        Ok(Self { root, fragments })
    }

    pub fn root_selections(&self) -> &[RequestSelection] {
        &self.root
    }

    pub fn fragments(&self) -> &FragmentMap {
        &self.fragments
    }

    /// Normalized selection of the whole operation, keyed by root field name.
    pub fn selection_tree(&self) -> Result<SelectionTree, SelectionError> {
        normalize(&self.root, &self.fragments)
    }

    /// Normalized children of every root occurrence of `field_name`, i.e. the
    /// selection the resolver of that field is asked to produce.
    ///
    /// Returns `None` when the operation does not select the field.
    pub fn resolver_fields(&self, field_name: &str) -> Result<Option<SelectionTree>, SelectionError> {
        let mut tree = self.selection_tree()?;
        Ok(tree
            .take(field_name)
            .map(|node| node.children))
    }
}

fn operation_selection_set<'d, 'a>(
    operation: &'d OperationDefinition<'a, String>,
) -> &'d SelectionSet<'a, String> {
    match operation {
        OperationDefinition::SelectionSet(set) => set,
        OperationDefinition::Query(query) => &query.selection_set,
        OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        OperationDefinition::Subscription(subscription) => &subscription.selection_set,
    }
}

fn convert_selection_set(set: &SelectionSet<'_, String>) -> Vec<RequestSelection> {
    set.items.iter().map(convert_selection).collect()
}

fn convert_selection(selection: &Selection<'_, String>) -> RequestSelection {
    match selection {
        Selection::Field(field) => RequestSelection::Field(FieldNode {
            name: field.name.clone(),
            arguments: field
                .arguments
                .iter()
                .map(|(name, value)| (name.clone(), convert_value(value)))
                .collect(),
            selections: convert_selection_set(&field.selection_set),
        }),
        Selection::FragmentSpread(spread) => {
            RequestSelection::FragmentSpread(spread.fragment_name.clone())
        }
        Selection::InlineFragment(inline) => {
            RequestSelection::InlineFragment(convert_selection_set(&inline.selection_set))
        }
    }
}

fn convert_value(value: &Value<'_, String>) -> LiteralNode {
    match value {
        Value::Variable(name) => LiteralNode::Variable(name.clone()),
        // Out-of-range integers keep an empty lexeme and parse to absent
        Value::Int(number) => LiteralNode::Int(
            number
                .as_i64()
                .map(|n| n.to_string())
                .unwrap_or_default(),
        ),
        Value::Float(f) => LiteralNode::Float(f.to_string()),
        Value::String(s) => LiteralNode::String(s.clone()),
        Value::Boolean(b) => LiteralNode::Boolean(*b),
        Value::Null => LiteralNode::Null,
        Value::Enum(name) => LiteralNode::Enum(name.clone()),
        Value::List(values) => LiteralNode::List(values.iter().map(convert_value).collect()),
        Value::Object(fields) => LiteralNode::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), convert_value(value)))
                .collect(),
        ),
    }
}
