//! Emptiness analysis
//!
//!     Decides, without any field values, whether a template would show field-derived content
//!     if exactly the fields in `non_blank` were filled. Card generation uses this to decide
//!     whether a note gets a card for a given template.
//!
//!     The analysis measures data coverage, not visual output. Literal text contributes
//!     nothing, so a template made only of text is always empty.
//!
//! Rules
//!
//!     Empty, Text                 empty
//!     Replacement(key)            non-empty iff key is non-blank; filters do not matter
//!     Sequence(children)          non-empty iff any child is non-empty
//!     Conditional(key, child)     non-empty iff key is non-blank and child is non-empty
//!     NegatedConditional(key, c)  non-empty iff key is blank and child is non-empty
//!
//!     A conditional is judged by its gate and its body together. `{{#A}}{{^A}}{{A}}{{/A}}{{/A}}`
//!     is empty for every input even though each gate on its own can pass.

use crate::template::ast::Node;
use std::collections::HashSet;

/// Whether `node` shows no field-derived content when exactly `non_blank` are filled.
pub fn is_empty(node: &Node, non_blank: &HashSet<String>) -> bool {
    !has_content(node, non_blank)
}

/// Complement of [is_empty].
pub fn has_content(node: &Node, non_blank: &HashSet<String>) -> bool {
    match node {
        Node::Empty | Node::Text { .. } => false,
        Node::Replacement { key, .. } => non_blank.contains(key.as_str()),
        Node::Sequence { children } => children.iter().any(|child| has_content(child, non_blank)),
        Node::Conditional { key, child } => {
            non_blank.contains(key.as_str()) && has_content(child, non_blank)
        }
        Node::NegatedConditional { key, child } => {
            !non_blank.contains(key.as_str()) && has_content(child, non_blank)
        }
    }
}
