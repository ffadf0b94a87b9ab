//! Template errors
//!
//! Only tokenizing and parsing can fail. Every variant is terminal for the template that
//! produced it: there is no partial tree to fall back on. Rendering never produces one of these,
//! problems found while rendering are written into the output instead.

use crate::template::config::Messages;
use std::fmt;

/// Errors that can occur while tokenizing or parsing a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// An opening delimiter without a closing one. Carries the input from the opener onwards.
    NoClosingBrackets(String),
    /// End of input reached while a conditional was still open. Carries its name.
    ConditionalNotClosed(String),
    /// A closing directive with no conditional open. Carries the closing name.
    ConditionalNotOpen(String),
    /// A closing directive whose name differs from the innermost open conditional.
    WrongConditionalClosed { expected: String, found: String },
}

impl TemplateError {
    /// The user-facing sentence for this error, taken from the configured message table.
    ///
    /// This is what a card shows in place of its content when its template fails to parse.
    pub fn message(&self, messages: &Messages) -> String {
        match self {
            TemplateError::NoClosingBrackets(rest) => messages.no_closing_brackets(rest),
            TemplateError::ConditionalNotClosed(name) => messages.conditional_not_closed(name),
            TemplateError::ConditionalNotOpen(name) => messages.conditional_not_open(name),
            TemplateError::WrongConditionalClosed { expected, found } => {
                messages.wrong_conditional_closed(expected, found)
            }
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::NoClosingBrackets(rest) => {
                write!(f, "No closing brackets for directive starting at '{}'", rest)
            }
            TemplateError::ConditionalNotClosed(name) => {
                write!(f, "Conditional '{}' is never closed", name)
            }
            TemplateError::ConditionalNotOpen(name) => {
                write!(f, "Conditional '{}' is closed but was never opened", name)
            }
            TemplateError::WrongConditionalClosed { expected, found } => write!(
                f,
                "Conditional '{}' closed while '{}' was expected",
                found, expected
            ),
        }
    }
}

impl std::error::Error for TemplateError {}
