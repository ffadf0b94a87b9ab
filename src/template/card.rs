//! Card-level helpers
//!
//! A card has two faces rendered from two templates. The answer template can show the rendered
//! question through the `FrontSide` pseudo-field. A note type also has several question templates
//! (one per card type); [available_ordinals] says which of them would produce a card for a note.

use crate::template::analysis::has_content;
use crate::template::rendering::{is_blank, render_template, RenderContext};
use crate::template::parsing::parse;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Pseudo-field holding the rendered question while the answer is rendered.
pub const FRONT_SIDE: &str = "FrontSide";

/// Both rendered faces of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFaces {
    pub question: String,
    pub answer: String,
}

/// Names of the fields whose value is not blank.
pub fn non_blank_fields(fields: &HashMap<String, String>) -> HashSet<String> {
    fields
        .iter()
        .filter(|(_, value)| !is_blank(value))
        .map(|(name, _)| name.clone())
        .collect()
}

/// Render the question and the answer of a card.
///
/// `FrontSide` is empty while rendering the question and holds the rendered question while
/// rendering the answer; a `FrontSide` entry in `fields` is ignored. A face whose template fails
/// to parse shows the error message instead.
pub fn render_card(
    question: &str,
    answer: &str,
    fields: &HashMap<String, String>,
    context: &RenderContext,
) -> CardFaces {
    let mut fields = fields.clone();
    fields.insert(FRONT_SIDE.to_string(), String::new());
    let question = render_template(question, &fields, context);
    fields.insert(FRONT_SIDE.to_string(), question.clone());
    let answer = render_template(answer, &fields, context);
    CardFaces { question, answer }
}

/// Ordinals of the question templates that are not empty for a note whose filled fields are
/// `non_blank`.
///
/// Templates that fail to parse never generate a card. With `allow_empty`, a note that would get
/// no card at all gets card `0`.
pub fn available_ordinals<S: AsRef<str>>(
    templates: &[S],
    non_blank: &HashSet<String>,
    allow_empty: bool,
) -> Vec<usize> {
    let mut available: Vec<usize> = templates
        .iter()
        .enumerate()
        .filter_map(|(ord, template)| match parse(template.as_ref()) {
            Ok(node) => has_content(&node, non_blank).then_some(ord),
            Err(err) => {
                tracing::warn!(ord, %err, "skipping template that does not parse");
                None
            }
        })
        .collect();
    if allow_empty && available.is_empty() {
        available.push(0);
    }
    available
}
