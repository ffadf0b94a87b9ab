//! Delimiter pairs and the opening-delimiter scanner
//!
//! Both delimiter conventions go through the same logos scanner. The scanner only looks for
//! openers; closers are searched with a plain substring search once an opener has been found,
//! since everything between the two is the directive body regardless of its contents.

use logos::Logos;
use serde::Serialize;

/// The directive that switches a template to the legacy delimiters.
pub const ALT_HANDLEBAR_DIRECTIVE: &str = "{{=<% %>=}}";

/// A delimiter convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Syntax {
    /// `{{ directive }}`
    Handlebars,
    /// `<% directive %>`
    Legacy,
}

impl Syntax {
    pub fn open(self) -> &'static str {
        match self {
            Syntax::Handlebars => "{{",
            Syntax::Legacy => "<%",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Syntax::Handlebars => "}}",
            Syntax::Legacy => "%>",
        }
    }

    /// The conventions a tokenizer recognizes, in order of preference at a given position.
    pub fn recognized(legacy: bool) -> &'static [Syntax] {
        if legacy {
            &[Syntax::Handlebars, Syntax::Legacy]
        } else {
            &[Syntax::Handlebars]
        }
    }
}

/// Raw scanner tokens. Anything that is not an opener is a run of text or a lone bracket.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
enum Opener {
    #[token("{{")]
    Handlebars,
    #[token("<%")]
    Legacy,
    #[token("{")]
    #[token("<")]
    Stray,
    #[regex(r"[^{<]+")]
    Run,
}

/// Byte offset and convention of the first opener in `input`.
///
/// With `legacy` unset, `<%` is ordinary text and only `{{` counts.
pub(crate) fn find_opener(input: &str, legacy: bool) -> Option<(usize, Syntax)> {
    let mut lexer = Opener::lexer(input);
    while let Some(result) = lexer.next() {
        match result {
            Ok(Opener::Handlebars) => return Some((lexer.span().start, Syntax::Handlebars)),
            Ok(Opener::Legacy) if legacy => return Some((lexer.span().start, Syntax::Legacy)),
            _ => {}
        }
    }
    None
}

/// Rewrite `{{`/`}}` into `<%`/`%>`.
pub fn new_to_legacy(text: &str) -> String {
    text.replace("{{", "<%").replace("}}", "%>")
}

/// Rewrite `<%`/`%>` into `{{`/`}}`.
pub fn legacy_to_new(text: &str) -> String {
    text.replace("<%", "{{").replace("%>", "}}")
}
