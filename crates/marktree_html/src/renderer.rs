//! HTML renderer.

use std::ops::ControlFlow;

use marktree_ast::{
    ListType, NodeId, NodeType, Tree, VisitResult, Visitor, walk_children, walk_node,
};
use tracing::{debug, warn};

use crate::{RenderError, RenderOptions};

/// Renders document trees to HTML.
///
/// Block elements are separated by newlines; inline content is written as
/// is. Text and attribute values are escaped, raw HTML nodes are not.
///
/// # Example
///
/// ```rust
/// use marktree_ast::Tree;
/// use marktree_html::{HtmlRenderer, RenderOptions};
/// use marktree_parser::parse_document;
///
/// let mut tree = Tree::new();
/// let doc = parse_document(&mut tree, "# Title\n").unwrap();
///
/// let options = RenderOptions { sourcepos: true, ..RenderOptions::default() };
/// let html = HtmlRenderer::with_options(options).render(&tree, doc).unwrap();
/// assert_eq!(html, "<h1 data-sourcepos=\"1:1-1:7\">Title</h1>\n");
/// ```
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
    buffer: String,
    error: Option<RenderError>,
}

impl HtmlRenderer {
    /// Creates a renderer with default options.
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Creates a renderer with the given options.
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            buffer: String::new(),
            error: None,
        }
    }

    /// Returns the renderer's options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders the subtree under `root`.
    ///
    /// Fails without output if `root` is stale or the subtree has structural
    /// defects. Non-empty output always ends with a newline.
    pub fn render(&mut self, tree: &Tree, root: NodeId) -> Result<String, RenderError> {
        if !tree.contains(root) {
            debug!(%root, "render called on a stale root");
            return Err(RenderError::StaleNode);
        }
        let defects = tree.defects(root);
        if !defects.is_empty() {
            warn!(%root, count = defects.len(), "refusing to render inconsistent tree");
            return Err(RenderError::Inconsistent { defects });
        }

        self.buffer.clear();
        self.error = None;

        if walk_node(self, tree, root).is_continue() {
            let _ = self.cr();
        }
        if let Some(err) = self.error.take() {
            self.buffer.clear();
            return Err(err);
        }

        debug!(%root, bytes = self.buffer.len(), "rendered html");
        Ok(std::mem::take(&mut self.buffer))
    }

    /// Appends `text` to the output, growing the buffer fallibly.
    fn push(&mut self, text: &str) -> VisitResult {
        if let Err(err) = self.buffer.try_reserve(text.len()) {
            self.error = Some(err.into());
            return ControlFlow::Break(());
        }
        self.buffer.push_str(text);
        ControlFlow::Continue(())
    }

    // Text gets the attribute encoder so that `"` becomes `&quot;` as well.
    fn push_text(&mut self, text: &str) -> VisitResult {
        let escaped = html_escape::encode_double_quoted_attribute(text);
        self.push(escaped.as_ref())
    }

    fn push_attribute(&mut self, key: &str, value: &str) -> VisitResult {
        self.push(" ")?;
        self.push(key)?;
        self.push("=\"")?;
        self.push(html_escape::encode_double_quoted_attribute(value).as_ref())?;
        self.push("\"")
    }

    /// Starts a new line unless the output is empty or already on one.
    fn cr(&mut self) -> VisitResult {
        if self.buffer.is_empty() || self.buffer.ends_with('\n') {
            ControlFlow::Continue(())
        } else {
            self.push("\n")
        }
    }

    fn sourcepos(&mut self, tree: &Tree, id: NodeId) -> VisitResult {
        match tree.source_range(id) {
            Some(range) if self.options.sourcepos => {
                self.push_attribute("data-sourcepos", &range.to_string())
            }
            _ => ControlFlow::Continue(()),
        }
    }

    /// Writes `<tag` plus the source position on a fresh line, leaving the
    /// tag open for further attributes.
    fn open_block(&mut self, tree: &Tree, id: NodeId, tag: &str) -> VisitResult {
        self.cr()?;
        self.push("<")?;
        self.push(tag)?;
        self.sourcepos(tree, id)
    }

    fn is_in_tight_list(tree: &Tree, paragraph: NodeId) -> bool {
        let Some(item) = tree.parent(paragraph) else {
            return false;
        };
        match tree.parent(item) {
            Some(list) if tree.node_type(item) == Some(NodeType::ListItem) => tree.list_tight(list),
            _ => false,
        }
    }
}

impl<'t> Visitor<'t> for HtmlRenderer {
    fn visit_block_quote(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.open_block(tree, id, "blockquote")?;
        self.push(">\n")?;
        walk_children(self, tree, id)?;
        self.cr()?;
        self.push("</blockquote>\n")
    }

    fn visit_list(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        let ordered = tree.list_type(id) == ListType::Ordered;
        self.open_block(tree, id, if ordered { "ol" } else { "ul" })?;
        let start = tree.list_start(id);
        if ordered && start != 1 {
            self.push_attribute("start", &start.to_string())?;
        }
        self.push(">\n")?;
        walk_children(self, tree, id)?;
        self.cr()?;
        self.push(if ordered { "</ol>\n" } else { "</ul>\n" })
    }

    fn visit_list_item(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.open_block(tree, id, "li")?;
        self.push(">")?;
        walk_children(self, tree, id)?;
        self.push("</li>\n")
    }

    fn visit_code_block(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.open_block(tree, id, "pre")?;
        self.push("><code")?;
        let language = tree
            .fence_info(id)
            .and_then(|info| info.split_whitespace().next());
        if let Some(language) = language {
            self.push_attribute("class", &format!("language-{language}"))?;
        }
        self.push(">")?;
        self.push_text(tree.string_content(id).unwrap_or_default())?;
        self.push("</code></pre>\n")
    }

    fn visit_html_block(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.cr()?;
        self.push(tree.string_content(id).unwrap_or_default())?;
        self.cr()
    }

    fn visit_paragraph(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        if Self::is_in_tight_list(tree, id) {
            return walk_children(self, tree, id);
        }
        self.open_block(tree, id, "p")?;
        self.push(">")?;
        walk_children(self, tree, id)?;
        self.push("</p>\n")
    }

    fn visit_header(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        let tag = format!("h{}", tree.header_level(id));
        self.open_block(tree, id, &tag)?;
        self.push(">")?;
        walk_children(self, tree, id)?;
        self.push("</")?;
        self.push(&tag)?;
        self.push(">\n")
    }

    fn visit_hrule(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.open_block(tree, id, "hr")?;
        self.push(" />\n")
    }

    // Link reference definitions produce no output

    fn visit_string(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.push_text(tree.string_content(id).unwrap_or_default())
    }

    fn visit_soft_break(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        if self.options.hardbreaks {
            self.push("<br />\n")
        } else {
            self.push("\n")
        }
    }

    fn visit_line_break(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        self.push("<br />\n")
    }

    fn visit_inline_code(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.push("<code>")?;
        self.push_text(tree.string_content(id).unwrap_or_default())?;
        self.push("</code>")
    }

    fn visit_inline_html(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.push(tree.string_content(id).unwrap_or_default())
    }

    fn visit_emph(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.push("<em>")?;
        walk_children(self, tree, id)?;
        self.push("</em>")
    }

    fn visit_strong(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.push("<strong>")?;
        walk_children(self, tree, id)?;
        self.push("</strong>")
    }

    fn visit_link(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.push("<a")?;
        self.push_attribute("href", tree.url(id).unwrap_or_default())?;
        let title = tree.title(id).unwrap_or_default();
        if !title.is_empty() {
            self.push_attribute("title", title)?;
        }
        self.push(">")?;
        walk_children(self, tree, id)?;
        self.push("</a>")
    }

    fn visit_image(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        let mut alt = AltText::default();
        let _ = walk_children(&mut alt, tree, id);

        self.push("<img")?;
        self.push_attribute("src", tree.url(id).unwrap_or_default())?;
        self.push_attribute("alt", &alt.text)?;
        let title = tree.title(id).unwrap_or_default();
        if !title.is_empty() {
            self.push_attribute("title", title)?;
        }
        self.push(" />")
    }
}

/// Collects the plain text of an image description.
#[derive(Default)]
struct AltText {
    text: String,
}

impl AltText {
    fn literal(&mut self, tree: &Tree, id: NodeId) -> VisitResult {
        self.text.push_str(tree.string_content(id).unwrap_or_default());
        ControlFlow::Continue(())
    }

    fn space(&mut self) -> VisitResult {
        self.text.push(' ');
        ControlFlow::Continue(())
    }
}

impl<'t> Visitor<'t> for AltText {
    fn visit_string(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.literal(tree, id)
    }

    fn visit_inline_code(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.literal(tree, id)
    }

    fn visit_inline_html(&mut self, tree: &'t Tree, id: NodeId) -> VisitResult {
        self.literal(tree, id)
    }

    fn visit_soft_break(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        self.space()
    }

    fn visit_line_break(&mut self, _tree: &'t Tree, _id: NodeId) -> VisitResult {
        self.space()
    }
}
