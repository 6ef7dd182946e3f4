//! Walk functions backing the [`Visitor`] defaults.

use std::ops::ControlFlow;

use crate::{NodeId, NodeType, Tree};

use super::visit::{VisitResult, Visitor};

/// Walks a node: `enter_node`, the type-specific hook, then `exit_node`.
///
/// Stale handles are skipped.
pub fn walk_node<'t, V>(visitor: &mut V, tree: &'t Tree, id: NodeId) -> VisitResult
where
    V: Visitor<'t>,
{
    let Some(node_type) = tree.node_type(id) else {
        return ControlFlow::Continue(());
    };

    visitor.enter_node(tree, id)?;

    match node_type {
        NodeType::Document => visitor.visit_document(tree, id),
        NodeType::BlockQuote => visitor.visit_block_quote(tree, id),
        NodeType::List => visitor.visit_list(tree, id),
        NodeType::ListItem => visitor.visit_list_item(tree, id),
        NodeType::FencedCode | NodeType::IndentedCode => visitor.visit_code_block(tree, id),
        NodeType::HtmlBlock => visitor.visit_html_block(tree, id),
        NodeType::Paragraph => visitor.visit_paragraph(tree, id),
        NodeType::AtxHeader | NodeType::SetextHeader => visitor.visit_header(tree, id),
        NodeType::HRule => visitor.visit_hrule(tree, id),
        NodeType::ReferenceDef => visitor.visit_reference_def(tree, id),
        NodeType::String => visitor.visit_string(tree, id),
        NodeType::SoftBreak => visitor.visit_soft_break(tree, id),
        NodeType::LineBreak => visitor.visit_line_break(tree, id),
        NodeType::InlineCode => visitor.visit_inline_code(tree, id),
        NodeType::InlineHtml => visitor.visit_inline_html(tree, id),
        NodeType::Emph => visitor.visit_emph(tree, id),
        NodeType::Strong => visitor.visit_strong(tree, id),
        NodeType::Link => visitor.visit_link(tree, id),
        NodeType::Image => visitor.visit_image(tree, id),
    }?;

    visitor.exit_node(tree, id)
}

/// Walks every child of `id` in order, stopping on `Break`.
#[inline]
pub fn walk_children<'t, V>(visitor: &mut V, tree: &'t Tree, id: NodeId) -> VisitResult
where
    V: Visitor<'t>,
{
    for child in tree.children(id) {
        walk_node(visitor, tree, child)?;
    }
    ControlFlow::Continue(())
}
