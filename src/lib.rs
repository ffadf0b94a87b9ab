//! # card-template
//!
//! Compiles the handlebars-like template language used to lay out the question and answer
//! faces of a flashcard, renders it against note field values, and decides statically whether
//! a template could show any field-derived content for a given set of filled fields.
//!
//! Layout
//!
//!     src/template
//!       ├── lexing       Flat tokenizer over `{{...}}` and legacy `<%...%>` directives
//!       ├── parsing      Scope-stack parser producing the immutable [Node](template::Node) tree
//!       ├── rendering    Tree walk against concrete field values
//!       ├── analysis     Emptiness analysis against a set of non-blank field names
//!       ├── filters      Named filter registry consulted by the renderer
//!       ├── config       Message table loaded from embedded defaults plus user layers
//!       ├── cache        Parse cache keyed by template text
//!       └── card         Question/answer rendering and template availability
//!
//! The pipeline is `parse` once, then `render` / `is_empty` as many times as needed. Parsing is
//! the only fallible step; rendering always produces text and embeds problems inline.

pub mod template;
