//! `@`-directive expansion for markdown bodies.
//!
//! Directives are whole lines, recognized after trimming:
//!
//! - `@tabs` opens a tab group; a blank line closes it
//! - `@render "Label" path.vuego` renders a template as a live preview
//! - `@file "Label" path` shows a file's source as a code view
//! - `@example path.vuego` shows a preview and its source as a two-tab group
//!
//! Everything else is markdown. Consecutive markdown lines are rendered in one
//! call so that lists and fenced code keep their context.
//!
//! Arguments are split by [`tokenize`]: whitespace separates tokens and a
//! double-quoted span is a single token.

mod args;
mod processor;

pub use args::tokenize;
pub use processor::{DirectiveProcessor, Expansion, TabGroupIds};
