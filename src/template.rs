//! Main module for card template functionality

pub mod analysis;
pub mod ast;
pub mod cache;
pub mod card;
pub mod config;
pub mod error;
pub mod filters;
pub mod lexing;
pub mod parsing;
pub mod rendering;

pub use analysis::{has_content, is_empty};
pub use ast::Node;
pub use cache::TemplateCache;
pub use card::{available_ordinals, non_blank_fields, render_card, CardFaces, FRONT_SIDE};
pub use config::{Loader, Messages, TemplateConfig};
pub use error::TemplateError;
pub use filters::{Filter, FilterRegistry};
pub use lexing::{Syntax, Token, Tokenizer};
pub use parsing::parse;
pub use rendering::{is_blank, render, render_template, RenderContext};
