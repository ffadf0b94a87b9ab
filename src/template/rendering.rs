//! Renderer
//!
//! Walks a parsed tree against concrete field values. Rendering cannot fail: a card must always
//! show something the user can act on, so a replacement naming a field the note does not have
//! renders as the configured "there is no field called ..." diagnostic, in place.
//!
//! Conditionals test blankness: a value that is empty or only whitespace counts as blank, and a
//! missing field counts as blank too.

use crate::template::ast::Node;
use crate::template::config::Messages;
use crate::template::filters::{FilterRegistry, TYPE_FILTER};
use crate::template::parsing::parse;
use std::collections::HashMap;

/// Everything rendering needs besides the tree and the field values.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    messages: Messages,
    filters: FilterRegistry,
}

impl RenderContext {
    pub fn new(messages: Messages, filters: FilterRegistry) -> Self {
        RenderContext { messages, filters }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }
}

/// Whether a field value counts as blank.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn has_value(fields: &HashMap<String, String>, key: &str) -> bool {
    fields.get(key).is_some_and(|value| !is_blank(value))
}

/// Render a parsed template.
pub fn render(node: &Node, fields: &HashMap<String, String>, context: &RenderContext) -> String {
    let mut out = String::new();
    render_into(node, fields, context, &mut out);
    out
}

/// Parse and render in one go. A template that fails to parse renders as its error message.
pub fn render_template(
    template: &str,
    fields: &HashMap<String, String>,
    context: &RenderContext,
) -> String {
    match parse(template) {
        Ok(node) => render(&node, fields, context),
        Err(err) => err.message(context.messages()),
    }
}

fn render_into(
    node: &Node,
    fields: &HashMap<String, String>,
    context: &RenderContext,
    out: &mut String,
) {
    match node {
        Node::Empty => {}
        Node::Text { text } => out.push_str(text),
        Node::Sequence { children } => {
            for child in children {
                render_into(child, fields, context, out);
            }
        }
        Node::Replacement { key, filters } => {
            out.push_str(&render_replacement(key, filters, fields, context))
        }
        Node::Conditional { key, child } => {
            if has_value(fields, key) {
                render_into(child, fields, context, out);
            }
        }
        Node::NegatedConditional { key, child } => {
            if !has_value(fields, key) {
                render_into(child, fields, context, out);
            }
        }
    }
}

fn render_replacement(
    key: &str,
    filters: &[String],
    fields: &HashMap<String, String>,
    context: &RenderContext,
) -> String {
    let mut text = match fields.get(key) {
        Some(value) => value.clone(),
        // `{{filter:}}` is a filter run on nothing, not a reference to a field named "".
        None if is_blank(key) && !filters.is_empty() => String::new(),
        None => {
            tracing::debug!(field = key, "replacement for unknown field");
            context.messages().unknown_field(key)
        }
    };
    for (index, filter) in filters.iter().enumerate() {
        text = if filter == TYPE_FILTER {
            type_marker(key, &filters[..index])
        } else {
            context.filters().apply(filter, &text, key)
        };
    }
    text
}

/// `[[type:...:key]]`, rebuilt from the filters written between `type` and the key.
fn type_marker(key: &str, inner: &[String]) -> String {
    let mut marker = String::from("[[type:");
    for filter in inner.iter().rev() {
        marker.push_str(filter);
        marker.push(':');
    }
    marker.push_str(key);
    marker.push_str("]]");
    marker
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn render_str(template: &str, pairs: &[(&str, &str)]) -> String {
        let node = parse(template).expect("template to parse");
        render(&node, &fields(pairs), &RenderContext::default())
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_render_text_and_fields() {
        assert_eq!(render_str("Q: {{Front}}!", &[("Front", "cat")]), "Q: cat!");
    }

    #[test]
    fn test_render_unknown_field() {
        assert_eq!(
            render_str("{{Front}}", &[]),
            "there is no field called 'Front'"
        );
    }

    #[test]
    fn test_render_bang_field_is_just_a_name() {
        assert_eq!(
            render_str("{{!Hint}}", &[("Hint", "x")]),
            "there is no field called '!Hint'"
        );
    }

    #[test]
    fn test_render_filter_on_empty_key() {
        assert_eq!(render_str("[{{cloze:}}]", &[]), "[]");
    }

    #[test]
    fn test_render_conditionals_trim() {
        let template = "{{#Back}}yes{{/Back}}{{^Back}}no{{/Back}}";
        assert_eq!(render_str(template, &[("Back", "x")]), "yes");
        assert_eq!(render_str(template, &[("Back", "  ")]), "no");
        assert_eq!(render_str(template, &[]), "no");
    }

    #[test]
    fn test_type_marker() {
        assert_eq!(render_str("{{type:Front}}", &[("Front", "x")]), "[[type:Front]]");
        assert_eq!(
            render_str("{{type:cloze:Text}}", &[("Text", "x")]),
            "[[type:cloze:Text]]"
        );
    }

    #[test]
    fn test_filters_apply_closest_first() {
        let mut context = RenderContext::default();
        context
            .filters_mut()
            .register("a", |text: &str, _: &str| format!("a({})", text));
        context
            .filters_mut()
            .register("b", |text: &str, _: &str| format!("b({})", text));

        let node = parse("{{b:a:Front}}").expect("template to parse");
        assert_eq!(
            render(&node, &fields(&[("Front", "x")]), &context),
            "b(a(x))"
        );
    }

    #[test]
    fn test_render_template_reports_parse_errors() {
        let rendered = render_template("{{#Foo}}", &fields(&[]), &RenderContext::default());
        assert_eq!(
            rendered,
            "'{{#Foo}}' was opened but never closed with '{{/Foo}}'."
        );
    }
}
