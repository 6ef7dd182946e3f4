//! # marktree_html
//!
//! HTML rendering for marktree document trees.
//!
//! Rendering is a read-only depth-first walk over a [`Tree`] built on the
//! [`marktree_ast::Visitor`] trait. A tree that fails its consistency check
//! is rejected instead of being rendered on a best-effort basis.
//!
//! ## Example
//!
//! ```rust
//! use marktree_ast::{NodeType, Tree};
//! use marktree_html::render_html;
//!
//! let mut tree = Tree::new();
//! let doc = tree.new_node(NodeType::Document);
//! let para = tree.new_node(NodeType::Paragraph);
//! let text = tree.new_node(NodeType::String);
//! tree.set_string_content(text, "Hello, world!").unwrap();
//! tree.append_child(para, text).unwrap();
//! tree.append_child(doc, para).unwrap();
//!
//! assert_eq!(render_html(&tree, doc).unwrap(), "<p>Hello, world!</p>\n");
//! ```

mod error;
mod options;
mod renderer;

use marktree_ast::{NodeId, Tree};

pub use error::RenderError;
pub use options::RenderOptions;
pub use renderer::HtmlRenderer;

/// Renders the subtree under `root` with default options.
pub fn render_html(tree: &Tree, root: NodeId) -> Result<String, RenderError> {
    HtmlRenderer::new().render(tree, root)
}
