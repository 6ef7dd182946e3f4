//! # marktree_parser
//!
//! Builds marktree document trees from markdown source.
//!
//! This crate provides:
//! - A `Parser` trait for producers that fill a [`Tree`]
//! - A CommonMark parser built on `markdown-rs`
//!
//! ## Example
//!
//! ```rust
//! use marktree_ast::{NodeType, Tree};
//! use marktree_parser::parse_document;
//!
//! let mut tree = Tree::new();
//! let doc = parse_document(&mut tree, "# Hello\n\nThis is a paragraph.").unwrap();
//!
//! assert_eq!(tree.node_type(doc), Some(NodeType::Document));
//! assert_eq!(tree.children(doc).count(), 2);
//! ```

mod error;
mod markdown;
mod traits;

use marktree_ast::{NodeId, Tree};

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::Parser;

/// Parses CommonMark `source` into a new document root inside `tree`.
pub fn parse_document(tree: &mut Tree, source: &str) -> Result<NodeId, ParseError> {
    MarkdownParser::new().parse(tree, source)
}
