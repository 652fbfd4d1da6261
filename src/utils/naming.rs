//! Alias and storage-name conventions for projection plans.
//!
//! Every node in the join tree is identified by an alias path. Child aliases are
//! derived from the parent alias and the relation property, and projected columns
//! are aliased from the node alias and the column's storage name.
//!
//! ## Format
//! - source reference: `{alias}.{property}`
//! - column output alias: `{alias}_{storage_name}`
//! - child alias: `{alias}_{relation}`
//!
//! ## Examples
//! - `("user", "first_name")` → column alias `"user_first_name"`
//! - `("user", "posts")` → child alias `"user_posts"`

/// Convert a property name to its lower-snake storage form.
///
/// An underscore is inserted before an uppercase letter that follows a lowercase
/// letter or digit, and before the last uppercase letter of an acronym that is
/// followed by a lowercase letter.
///
/// # Examples
/// ```
/// use selection_planner::utils::naming::snake_case;
///
/// assert_eq!(snake_case("firstName"), "first_name");
/// assert_eq!(snake_case("userID"), "user_id");
/// assert_eq!(snake_case("HTMLParser"), "html_parser");
/// assert_eq!(snake_case("created_at"), "created_at");
/// ```
pub fn snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Qualified reference to a property of an aliased source: `{alias}.{property}`.
pub fn source_reference(alias: &str, property: &str) -> String {
    format!("{alias}.{property}")
}

/// Output alias for a projected column: `{alias}_{storage_name}`.
///
/// # Examples
/// ```
/// use selection_planner::utils::naming::column_alias;
///
/// assert_eq!(column_alias("root", "id"), "root_id");
/// assert_eq!(column_alias("root_posts", "published_at"), "root_posts_published_at");
/// ```
pub fn column_alias(alias: &str, storage_name: &str) -> String {
    format!("{alias}_{storage_name}")
}

/// Alias for the node reached through a relation: `{alias}_{relation}`.
///
/// The relation property is kept verbatim so that the alias path mirrors the
/// request path.
pub fn child_alias(alias: &str, relation: &str) -> String {
    format!("{alias}_{relation}")
}
