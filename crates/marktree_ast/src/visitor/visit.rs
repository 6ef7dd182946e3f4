//! Visitor trait for read-only traversal.
//!
//! Container hooks default to walking their children; leaf hooks default to
//! doing nothing. Override only the hooks you care about.

use std::ops::ControlFlow;

use crate::{NodeId, Tree};

use super::walk::walk_children;

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - keep going
/// - `ControlFlow::Break(())` - stop the whole traversal
pub type VisitResult = ControlFlow<()>;

/// Visitor over a [`Tree`] that does not modify it.
///
/// The `'t` lifetime lets visitors keep references into the tree (for
/// instance borrowed string content) for as long as the tree is borrowed.
pub trait Visitor<'t>: Sized {
    /// Called before a node's hook.
    #[inline]
    fn enter_node(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after a node's hook returned `Continue`.
    #[inline]
    fn exit_node(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    // Blocks

    fn visit_document(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    fn visit_block_quote(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    fn visit_list(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    fn visit_list_item(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    /// Visits fenced and indented code blocks.
    fn visit_code_block(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_html_block(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_paragraph(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    /// Visits ATX and setext headers.
    fn visit_header(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    fn visit_hrule(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_reference_def(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    // Inlines

    fn visit_string(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_soft_break(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_line_break(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_inline_code(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_inline_html(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        ControlFlow::Continue(())
    }

    fn visit_emph(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    fn visit_strong(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    fn visit_link(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }

    fn visit_image(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        walk_children(self, tree, id)
    }
}
