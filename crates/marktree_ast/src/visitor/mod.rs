//! Visitor pattern for tree traversal.
//!
//! - [`Visitor`] - read-only traversal trait with one hook per node family
//! - [`walk_node`] - dispatches a node to its hook
//! - [`walk_children`] - visits all children of a node in order
//!
//! # Example
//!
//! ```rust
//! use marktree_ast::{NodeId, NodeType, Tree};
//! use marktree_ast::visitor::{Visitor, VisitResult, walk_node};
//! use std::ops::ControlFlow;
//!
//! struct TextCollector<'t> {
//!     texts: Vec<&'t str>,
//! }
//!
//! impl<'t> Visitor<'t> for TextCollector<'t> {
//!     fn visit_string(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
//!         if let Some(text) = tree.string_content(id) {
//!             self.texts.push(text);
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! let para = tree.new_node(NodeType::Paragraph);
//! let text = tree.new_node(NodeType::String);
//! tree.set_string_content(text, "hello").unwrap();
//! tree.append_child(para, text).unwrap();
//!
//! let mut collector = TextCollector { texts: Vec::new() };
//! let _ = walk_node(&mut collector, &tree, para);
//! assert_eq!(collector.texts, vec!["hello"]);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_node};
