//! Tokenizer for card templates
//!
//!     The tokenizer turns a template into a flat stream of tokens. It knows nothing about
//!     nesting: an opening conditional and its closing counterpart are just two unrelated
//!     tokens here, and balancing them is the parser's job.
//!
//! Directives
//!
//!     A directive is the text between an opening and a closing delimiter. Its body is
//!     classified by its first significant character:
//!
//!         `#name`   opens a conditional
//!         `/name`   closes a conditional
//!         `^name`   opens a negated conditional
//!         anything else is a replacement, `filterN:...:filter1:field`
//!
//!     A leading `!` is not a marker: `{{!Hint}}` is a replacement for a field named `!Hint`.
//!
//! Delimiters
//!
//!     New templates use `{{ }}`. Older templates start with the directive `{{=<% %>=}}` and then
//!     use `<% %>`; in that mode both conventions are recognized and whichever opener comes first
//!     wins. Without the directive, `<%` is plain text. See [delimiters].
//!
//! Streaming
//!
//!     [next_token] returns the token together with the unconsumed remainder, so it can be
//!     driven by hand; [Tokenizer] wraps it as an iterator.

pub mod delimiters;

pub use delimiters::{legacy_to_new, new_to_legacy, Syntax, ALT_HANDLEBAR_DIRECTIVE};

use crate::template::error::TemplateError;
use delimiters::find_opener;
use serde::Serialize;

/// A lexical token. Contents borrow from the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Token<'a> {
    Text(&'a str),
    Replacement(&'a str),
    OpenConditional(&'a str),
    CloseConditional(&'a str),
    OpenNegatedConditional(&'a str),
}

impl<'a> Token<'a> {
    /// The text carried by the token, whatever its kind.
    pub fn content(&self) -> &'a str {
        match *self {
            Token::Text(s)
            | Token::Replacement(s)
            | Token::OpenConditional(s)
            | Token::CloseConditional(s)
            | Token::OpenNegatedConditional(s) => s,
        }
    }
}

/// Classify the body of a directive.
///
/// Leading `{` characters are dropped so that `{{{#foo}}}` is read as `#foo`. A body shorter
/// than two bytes cannot hold a marker and a name, so `{{#}}` is a replacement for `#`.
pub fn classify_handle(body: &str) -> Token<'_> {
    let start = body.trim_start_matches('{').trim();
    if start.len() < 2 {
        return Token::Replacement(start);
    }
    if let Some(name) = start.strip_prefix('#') {
        Token::OpenConditional(name.trim_start())
    } else if let Some(name) = start.strip_prefix('/') {
        Token::CloseConditional(name.trim_start())
    } else if let Some(name) = start.strip_prefix('^') {
        Token::OpenNegatedConditional(name.trim_start())
    } else {
        Token::Replacement(start)
    }
}

/// Text up to the next recognized opener.
///
/// Returns `None` for empty input and when the input starts with an opener.
pub fn text_token(input: &str, legacy: bool) -> Option<(Token<'_>, &str)> {
    if input.is_empty() {
        return None;
    }
    match find_opener(input, legacy) {
        Some((0, _)) => None,
        Some((start, _)) => Some((Token::Text(&input[..start]), &input[start..])),
        None => Some((Token::Text(input), "")),
    }
}

/// A complete directive in one specific convention at the start of `input`.
///
/// Returns `None` if `input` does not start with that convention's opener or the closer is
/// missing.
pub fn syntax_token(input: &str, syntax: Syntax) -> Option<(Token<'_>, &str)> {
    let body = input.strip_prefix(syntax.open())?;
    let end = body.find(syntax.close())?;
    Some((
        classify_handle(&body[..end]),
        &body[end + syntax.close().len()..],
    ))
}

/// A complete directive at the start of `input`, in any convention recognized by the mode.
pub fn handlebar_token(input: &str, legacy: bool) -> Option<(Token<'_>, &str)> {
    Syntax::recognized(legacy)
        .iter()
        .find_map(|&syntax| syntax_token(input, syntax))
}

/// Lex one token from the start of `input`.
///
/// `Ok(None)` means the input is exhausted. An opener without its closer is the only error.
pub fn next_token(input: &str, legacy: bool) -> Result<Option<(Token<'_>, &str)>, TemplateError> {
    if input.is_empty() {
        return Ok(None);
    }
    if let Some(found) = text_token(input, legacy) {
        return Ok(Some(found));
    }
    match handlebar_token(input, legacy) {
        Some(found) => Ok(Some(found)),
        None => Err(TemplateError::NoClosingBrackets(input.to_string())),
    }
}

/// Iterator over the tokens of a template.
///
/// After an error the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: &'a str,
    legacy: bool,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize a template, switching to legacy-aware mode when it starts with
    /// [ALT_HANDLEBAR_DIRECTIVE] (leading whitespace allowed).
    pub fn new(template: &'a str) -> Self {
        match template.trim_start().strip_prefix(ALT_HANDLEBAR_DIRECTIVE) {
            Some(rest) => Self::with_mode(rest, true),
            None => Self::with_mode(template, false),
        }
    }

    /// Tokenize with an explicit mode and no directive detection.
    pub fn with_mode(template: &'a str, legacy: bool) -> Self {
        Tokenizer {
            rest: template,
            legacy,
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// The input not consumed yet.
    pub fn remaining(&self) -> &'a str {
        self.rest
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        match next_token(self.rest, self.legacy) {
            Ok(Some((token, rest))) => {
                tracing::trace!(?token, "lexed");
                self.rest = rest;
                Some(Ok(token))
            }
            Ok(None) => None,
            Err(err) => {
                self.rest = "";
                Some(Err(err))
            }
        }
    }
}

/// Tokenize a whole template, stopping at the first error.
pub fn tokenize(template: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    Tokenizer::new(template).collect()
}
