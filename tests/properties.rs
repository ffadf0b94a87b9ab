//! Property-based tests for the template pipeline
//!
//! Templates are generated balanced by construction from a small alphabet of field names, so
//! that conditionals and replacements frequently refer to the same fields.

use card_template::template::lexing::{new_to_legacy, ALT_HANDLEBAR_DIRECTIVE};
use card_template::template::{is_empty, parse, Node, TemplateError};
use proptest::prelude::*;
use std::collections::HashSet;

/// Field and conditional names
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-F]"
}

/// Balanced templates. Text never contains delimiter characters.
fn template_strategy(negated: bool) -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z0-9 .,!?]{1,8}",
        name_strategy().prop_map(|name| format!("{{{{{}}}}}", name)),
        ("[a-z]{1,4}", name_strategy())
            .prop_map(|(filter, name)| format!("{{{{{}:{}}}}}", filter, name)),
    ];
    leaf.prop_recursive(4, 32, 5, move |inner| {
        let marker = if negated {
            prop_oneof![Just('#'), Just('^')].boxed()
        } else {
            Just('#').boxed()
        };
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(|parts| parts.concat()),
            (marker, name_strategy(), inner).prop_map(|(marker, name, body)| {
                format!("{{{{{}{}}}}}{}{{{{/{}}}}}", marker, name, body, name)
            }),
        ]
    })
}

/// One piece of a possibly unbalanced template
#[derive(Debug, Clone)]
enum Piece {
    Text,
    Open(String),
    Negated(String),
    Close(String),
}

fn piece_strategy() -> impl Strategy<Value = Piece> {
    prop_oneof![
        Just(Piece::Text),
        "[AB]".prop_map(Piece::Open),
        "[AB]".prop_map(Piece::Negated),
        "[AB]".prop_map(Piece::Close),
    ]
}

fn render_pieces(pieces: &[Piece]) -> String {
    pieces
        .iter()
        .map(|piece| match piece {
            Piece::Text => "x".to_string(),
            Piece::Open(name) => format!("{{{{#{}}}}}", name),
            Piece::Negated(name) => format!("{{{{^{}}}}}", name),
            Piece::Close(name) => format!("{{{{/{}}}}}", name),
        })
        .collect()
}

/// The error a correct parser must report, if any.
fn expected_error(pieces: &[Piece]) -> Option<TemplateError> {
    let mut open: Vec<&str> = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Text => {}
            Piece::Open(name) | Piece::Negated(name) => open.push(name),
            Piece::Close(name) => match open.pop() {
                None => return Some(TemplateError::ConditionalNotOpen(name.clone())),
                Some(expected) if expected != name.as_str() => {
                    return Some(TemplateError::WrongConditionalClosed {
                        expected: expected.to_string(),
                        found: name.clone(),
                    })
                }
                Some(_) => {}
            },
        }
    }
    open.last()
        .map(|name| TemplateError::ConditionalNotClosed(name.to_string()))
}

fn has_degenerate_sequence(node: &Node) -> bool {
    match node {
        Node::Sequence { children } => {
            children.len() < 2 || children.iter().any(has_degenerate_sequence)
        }
        Node::Conditional { child, .. } | Node::NegatedConditional { child, .. } => {
            has_degenerate_sequence(child)
        }
        Node::Empty | Node::Text { .. } | Node::Replacement { .. } => false,
    }
}

fn names_strategy() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set(name_strategy(), 0..6)
}

proptest! {
    #[test]
    fn test_balanced_templates_parse(template in template_strategy(true)) {
        prop_assert!(parse(&template).is_ok());
    }

    #[test]
    fn test_legacy_round_trip(template in template_strategy(true)) {
        let legacy = format!("{}{}", ALT_HANDLEBAR_DIRECTIVE, new_to_legacy(&template));
        prop_assert_eq!(parse(&legacy), parse(&template));
    }

    #[test]
    fn test_tree_prints_back_to_equal_tree(template in template_strategy(true)) {
        let node = parse(&template).expect("balanced template to parse");
        prop_assert_eq!(parse(&node.to_string()), Ok(node));
    }

    #[test]
    fn test_sequences_hold_at_least_two_children(template in template_strategy(true)) {
        let node = parse(&template).expect("balanced template to parse");
        prop_assert!(!has_degenerate_sequence(&node));
    }

    #[test]
    fn test_parser_agrees_with_stack_oracle(pieces in prop::collection::vec(piece_strategy(), 0..12)) {
        let template = render_pieces(&pieces);
        match expected_error(&pieces) {
            Some(err) => prop_assert_eq!(parse(&template), Err(err)),
            None => prop_assert!(parse(&template).is_ok()),
        }
    }

    #[test]
    fn test_emptiness_is_monotonic(
        template in template_strategy(false),
        filled in names_strategy(),
        extra in names_strategy(),
    ) {
        let node = parse(&template).expect("balanced template to parse");
        let more: HashSet<String> = filled.union(&extra).cloned().collect();
        if !is_empty(&node, &filled) {
            prop_assert!(!is_empty(&node, &more));
        }
    }
}
