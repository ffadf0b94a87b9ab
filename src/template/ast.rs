//! Parsed template tree
//!
//!     A template parses once into a [Node] and is then rendered or analyzed any number of
//!     times. Nothing mutates a tree after the parser hands it out, so trees can be cached and
//!     shared between threads freely.
//!
//!     Scopes never wrap a lone child: a scope that collected nothing is [Node::Empty], a
//!     scope with one child is that child, and only two or more children make a
//!     [Node::Sequence]. See [Node::from_children].

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    Empty,
    Text {
        text: String,
    },
    /// `{{filterN:...:filter1:key}}`. `filters` is in application order: `filters[0]` is the
    /// filter written closest to the key.
    Replacement {
        key: String,
        filters: Vec<String>,
    },
    Sequence {
        children: Vec<Node>,
    },
    /// `{{#key}}child{{/key}}`
    Conditional {
        key: String,
        child: Box<Node>,
    },
    /// `{{^key}}child{{/key}}`
    NegatedConditional {
        key: String,
        child: Box<Node>,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text { text: text.into() }
    }

    /// Build a replacement from a directive body such as `Filter2:Filter1:Key`.
    ///
    /// The last segment is the key. Empty keys and empty filter names are kept as they are.
    pub fn replacement(body: &str) -> Node {
        let mut segments = body.rsplit(':');
        let key = segments.next().unwrap_or_default().to_string();
        let filters = segments.map(str::to_string).collect();
        Node::Replacement { key, filters }
    }

    pub fn conditional(key: impl Into<String>, child: Node) -> Node {
        Node::Conditional {
            key: key.into(),
            child: Box::new(child),
        }
    }

    pub fn negated_conditional(key: impl Into<String>, child: Node) -> Node {
        Node::NegatedConditional {
            key: key.into(),
            child: Box::new(child),
        }
    }

    /// Collapse the children of a scope into a single node.
    pub fn from_children(mut children: Vec<Node>) -> Node {
        match children.len() {
            0 => Node::Empty,
            1 => children.remove(0),
            _ => Node::Sequence { children },
        }
    }

    /// Field names referenced anywhere in the tree, by replacements or conditionals, in order
    /// of first appearance.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_field_names(&mut names);
        names
    }

    fn collect_field_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Node::Empty | Node::Text { .. } => {}
            Node::Replacement { key, .. } => push_unique(names, key),
            Node::Sequence { children } => {
                for child in children {
                    child.collect_field_names(names);
                }
            }
            Node::Conditional { key, child } | Node::NegatedConditional { key, child } => {
                push_unique(names, key);
                child.collect_field_names(names);
            }
        }
    }
}

fn push_unique<'a>(names: &mut Vec<&'a str>, name: &'a str) {
    if !names.contains(&name) {
        names.push(name);
    }
}

/// Writes the tree back out in `{{ }}` syntax.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Empty => Ok(()),
            Node::Text { text } => f.write_str(text),
            Node::Replacement { key, filters } => {
                f.write_str("{{")?;
                for filter in filters.iter().rev() {
                    write!(f, "{}:", filter)?;
                }
                write!(f, "{}}}}}", key)
            }
            Node::Sequence { children } => {
                for child in children {
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Node::Conditional { key, child } => {
                write!(f, "{{{{#{}}}}}{}{{{{/{}}}}}", key, child, key)
            }
            Node::NegatedConditional { key, child } => {
                write!(f, "{{{{^{}}}}}{}{{{{/{}}}}}", key, child, key)
            }
        }
    }
}
