//! Parser tests: tree shapes and the error taxonomy

use card_template::template::{parse, Node, TemplateError};
use rstest::rstest;

fn text(s: &str) -> Node {
    Node::text(s)
}

fn field(name: &str) -> Node {
    Node::Replacement {
        key: name.to_string(),
        filters: vec![],
    }
}

#[test]
fn test_empty_template() {
    assert_eq!(parse(""), Ok(Node::Empty));
}

#[test]
fn test_single_child_is_not_wrapped() {
    assert_eq!(parse("{{Test}}"), Ok(field("Test")));
    assert_eq!(parse("plain"), Ok(text("plain")));
}

#[test]
fn test_filters_are_stored_closest_first() {
    assert_eq!(
        parse("{{Filter2:Filter1:Test}}"),
        Ok(Node::Replacement {
            key: "Test".to_string(),
            filters: vec!["Filter1".to_string(), "Filter2".to_string()],
        })
    );
}

#[test]
fn test_sequence_of_text_and_fields() {
    assert_eq!(
        parse("Q: {{Front}}<br>{{Back}}"),
        Ok(Node::Sequence {
            children: vec![text("Q: "), field("Front"), text("<br>"), field("Back")]
        })
    );
}

#[test]
fn test_nested_conditionals() {
    assert_eq!(
        parse("{{#A}}a{{^B}}{{C}}{{/B}}{{/A}}!"),
        Ok(Node::Sequence {
            children: vec![
                Node::conditional(
                    "A",
                    Node::Sequence {
                        children: vec![text("a"), Node::negated_conditional("B", field("C"))]
                    }
                ),
                text("!"),
            ]
        })
    );
}

#[test]
fn test_bang_is_part_of_the_name() {
    assert_eq!(parse("{{!Hint}}"), Ok(field("!Hint")));
}

#[test]
fn test_unusual_replacements_are_accepted() {
    assert_eq!(
        parse("{{::}}"),
        Ok(Node::Replacement {
            key: String::new(),
            filters: vec![String::new(), String::new()],
        })
    );
    assert_eq!(parse("{{}}"), Ok(field("")));
}

#[test]
fn test_legacy_template_parses_like_new_one() {
    assert_eq!(
        parse("{{=<% %>=}}<%#Back%><%text:Back%><%/Back%>"),
        parse("{{#Back}}{{text:Back}}{{/Back}}")
    );
}

#[test]
fn test_legacy_delimiters_are_literal_without_directive() {
    assert_eq!(
        parse("<%Front%>{{Back}}"),
        Ok(Node::Sequence {
            children: vec![text("<%Front%>"), field("Back")]
        })
    );
}

#[rstest]
#[case("{{#Foo}}{{/Bar}}", TemplateError::WrongConditionalClosed { expected: "Foo".into(), found: "Bar".into() })]
#[case("{{^Foo}}x{{/foo}}", TemplateError::WrongConditionalClosed { expected: "Foo".into(), found: "foo".into() })]
#[case("{{/Foo}}", TemplateError::ConditionalNotOpen("Foo".into()))]
#[case("{{#A}}{{/A}}{{/A}}", TemplateError::ConditionalNotOpen("A".into()))]
#[case("{{#Foo}}", TemplateError::ConditionalNotClosed("Foo".into()))]
#[case("{{#A}}{{#B}}{{/B}}", TemplateError::ConditionalNotClosed("A".into()))]
#[case("{{#A}}{{^B}}", TemplateError::ConditionalNotClosed("B".into()))]
#[case("a {{Front", TemplateError::NoClosingBrackets("{{Front".into()))]
#[case("{{#A}}{{Front", TemplateError::NoClosingBrackets("{{Front".into()))]
fn test_parse_errors(#[case] template: &str, #[case] expected: TemplateError) {
    assert_eq!(parse(template), Err(expected));
}

#[test]
fn test_tree_prints_back_to_template() {
    let template = "{{#A}}a{{^B}}{{f:C}}{{/B}}{{/A}}!";
    let node = parse(template).expect("template to parse");
    assert_eq!(node.to_string(), template);
}

#[test]
fn test_tree_serializes_to_json() {
    let node = parse("{{#A}}{{B}}{{/A}}").expect("template to parse");
    let json = serde_json::to_value(&node).expect("tree to serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "type": "conditional",
            "key": "A",
            "child": { "type": "replacement", "key": "B", "filters": [] }
        })
    );
}
