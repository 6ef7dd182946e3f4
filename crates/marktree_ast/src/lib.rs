//! # marktree_ast
//!
//! Document tree for CommonMark-style markdown.
//!
//! This crate provides the node taxonomy, the content model that decides
//! which node types may own which, and a mutable tree whose every mutation
//! either succeeds completely or leaves the tree untouched.
//!
//! ## Architecture
//!
//! - Nodes live in a `generational-arena` owned by a [`Tree`]
//! - A [`NodeId`] is a copyable handle; handles of destroyed nodes go stale
//!   instead of dangling
//! - Children form a doubly-linked sibling chain with parent back-links
//! - Type-specific data sits in a [`Payload`] behind type-gated accessors
//!
//! ## Example
//!
//! ```rust
//! use marktree_ast::{NodeType, Tree};
//!
//! let mut tree = Tree::new();
//! let doc = tree.new_node(NodeType::Document);
//! let para = tree.new_node(NodeType::Paragraph);
//! let text = tree.new_node(NodeType::String);
//!
//! tree.set_string_content(text, "Hello, world!").unwrap();
//! tree.append_child(para, text).unwrap();
//! tree.append_child(doc, para).unwrap();
//!
//! assert_eq!(tree.consistency_check(doc), 0);
//! assert_eq!(tree.descendants(doc).count(), 3);
//! ```

mod accessors;
mod check;
mod content_model;
mod error;
mod node;
mod node_type;
mod position;
mod tree;
pub mod visitor;

pub use check::Defect;
pub use content_model::can_contain;
pub use error::{ErrorKind, TreeError};
pub use node::{LinkData, ListData, ListType, Node, Payload};
pub use node_type::NodeType;
pub use position::{SourcePos, SourceRange};
pub use tree::{Ancestors, Children, Descendants, NodeId, Tree};

// Re-export commonly used visitor items for convenience
pub use visitor::{VisitResult, Visitor, walk_children, walk_node};
