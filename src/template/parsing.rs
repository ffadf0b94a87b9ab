//! Template parser
//!
//!     The parser consumes the flat token stream and builds the [Node] tree. Nesting is tracked
//!     with an explicit stack of open scopes instead of recursion, so memory is bounded by the
//!     nesting depth and every error is reported at the token that caused it.
//!
//!     The root scope is implicit and never sits on the stack: an empty stack means "at the
//!     root". Opening a conditional pushes a named scope, closing one pops it, checks the name
//!     and appends the collapsed scope to whatever scope is now on top.
//!
//! Errors
//!
//!     Closing with nothing open: [TemplateError::ConditionalNotOpen].
//!     Closing a name other than the innermost open one: [TemplateError::WrongConditionalClosed].
//!     Input ending inside a conditional: [TemplateError::ConditionalNotClosed], naming the
//!     innermost scope still open.
//!
//!     Field names are never checked here; an unknown field is the renderer's concern.

use crate::template::ast::Node;
use crate::template::error::TemplateError;
use crate::template::lexing::{Token, Tokenizer};

/// A conditional waiting for its closing directive.
#[derive(Debug)]
struct Scope<'a> {
    name: &'a str,
    negated: bool,
    children: Vec<Node>,
}

impl<'a> Scope<'a> {
    fn open(name: &'a str, negated: bool) -> Self {
        Scope {
            name,
            negated,
            children: Vec::new(),
        }
    }

    /// Close the scope with the name found in the closing directive.
    fn close(self, closing: &str) -> Result<Node, TemplateError> {
        if self.name != closing {
            return Err(TemplateError::WrongConditionalClosed {
                expected: self.name.to_string(),
                found: closing.to_string(),
            });
        }
        let child = Node::from_children(self.children);
        Ok(if self.negated {
            Node::negated_conditional(self.name, child)
        } else {
            Node::conditional(self.name, child)
        })
    }
}

/// Parse a template.
///
/// Templates starting with `{{=<% %>=}}` are read with the legacy delimiters as well.
pub fn parse(template: &str) -> Result<Node, TemplateError> {
    let node = parse_tokens(Tokenizer::new(template));
    if let Err(err) = &node {
        tracing::debug!(%err, "template failed to parse");
    }
    node
}

/// Build a tree from an already tokenized template.
pub fn parse_tokens<'a, I>(tokens: I) -> Result<Node, TemplateError>
where
    I: IntoIterator<Item = Result<Token<'a>, TemplateError>>,
{
    let mut root: Vec<Node> = Vec::new();
    let mut open: Vec<Scope<'a>> = Vec::new();

    for token in tokens {
        match token? {
            Token::Text(text) => current(&mut root, &mut open).push(Node::text(text)),
            Token::Replacement(body) => {
                current(&mut root, &mut open).push(Node::replacement(body))
            }
            Token::OpenConditional(name) => {
                tracing::trace!(name, depth = open.len() + 1, "open conditional");
                open.push(Scope::open(name, false));
            }
            Token::OpenNegatedConditional(name) => {
                tracing::trace!(name, depth = open.len() + 1, "open negated conditional");
                open.push(Scope::open(name, true));
            }
            Token::CloseConditional(name) => {
                let scope = open
                    .pop()
                    .ok_or_else(|| TemplateError::ConditionalNotOpen(name.to_string()))?;
                let node = scope.close(name)?;
                current(&mut root, &mut open).push(node);
            }
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(TemplateError::ConditionalNotClosed(unclosed.name.to_string()));
    }
    Ok(Node::from_children(root))
}

/// Children of the innermost open scope, or of the root when nothing is open.
fn current<'s>(root: &'s mut Vec<Node>, open: &'s mut [Scope<'_>]) -> &'s mut Vec<Node> {
    match open.last_mut() {
        Some(scope) => &mut scope.children,
        None => root,
    }
}
