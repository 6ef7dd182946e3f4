//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! The `markdown` crate produces an mdast tree; this module rebuilds it node
//! by node in a [`Tree`], attaching everything through the tree's checked
//! mutation methods.

use std::collections::HashMap;

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};
use marktree_ast::{ListType, NodeId, NodeType, SourcePos, SourceRange, Tree};
use tracing::debug;

use crate::{ParseError, Parser};

/// Markdown parser implementation.
///
/// Uses `markdown-rs` with CommonMark options by default. Constructs that
/// have no node type in the tree (front matter, GFM tables, math, MDX) fail
/// with [`ParseError::Unsupported`] when enabled through
/// [`MarkdownParser::with_options`].
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self::with_options(Self::default_options())
    }

    /// Creates a parser with custom markdown-rs options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Gets default parse options (CommonMark).
    fn default_options() -> ParseOptions {
        ParseOptions::default()
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, tree: &mut Tree, source: &str) -> Result<NodeId, ParseError> {
        let mdast = to_mdast(source, &self.options)
            .map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let Node::Root(root) = &mdast else {
            return Err(ParseError::invalid_source("markdown parser returned no root"));
        };

        let doc = tree.new_node(NodeType::Document);
        let mut builder = Builder {
            tree: &mut *tree,
            source,
            definitions: collect_definitions(&mdast),
        };
        let built = builder
            .set_range(doc, &mdast)
            .and_then(|()| builder.blocks(doc, &root.children));

        match built {
            Ok(()) => {
                debug!(
                    parser = self.name(),
                    nodes = tree.descendants(doc).count(),
                    "parsed document"
                );
                Ok(doc)
            }
            Err(err) => {
                debug!(parser = self.name(), error = %err, "parse failed");
                tree.destroy(doc);
                Err(err)
            }
        }
    }
}

/// Destination and title of a link reference definition.
#[derive(Clone)]
struct Definition {
    url: String,
    title: String,
}

/// Converts one mdast tree into nodes of a [`Tree`].
struct Builder<'t, 's> {
    tree: &'t mut Tree,
    source: &'s str,
    definitions: HashMap<String, Definition>,
}

impl Builder<'_, '_> {
    /// Creates a node of `node_type` and appends it to `parent`.
    ///
    /// The node is destroyed again if the tree rejects the edge.
    fn add(&mut self, parent: NodeId, node_type: NodeType) -> Result<NodeId, ParseError> {
        let id = self.tree.new_node(node_type);
        if let Err(err) = self.tree.append_child(parent, id) {
            self.tree.destroy(id);
            return Err(err.into());
        }
        Ok(id)
    }

    /// Like [`Builder::add`], also recording the mdast node's source range.
    fn add_block(
        &mut self,
        parent: NodeId,
        node_type: NodeType,
        node: &Node,
    ) -> Result<NodeId, ParseError> {
        let id = self.add(parent, node_type)?;
        self.set_range(id, node)?;
        Ok(id)
    }

    fn set_range(&mut self, id: NodeId, node: &Node) -> Result<(), ParseError> {
        if let Some(range) = source_range(node) {
            self.tree.set_source_range(id, range)?;
        }
        Ok(())
    }

    fn blocks(&mut self, parent: NodeId, children: &[Node]) -> Result<(), ParseError> {
        children
            .iter()
            .try_for_each(|child| self.block(parent, child))
    }

    fn block(&mut self, parent: NodeId, node: &Node) -> Result<(), ParseError> {
        match node {
            Node::Blockquote(quote) => {
                let id = self.add_block(parent, NodeType::BlockQuote, node)?;
                self.blocks(id, &quote.children)
            }

            Node::List(list) => {
                let id = self.add_block(parent, NodeType::List, node)?;
                if list.ordered {
                    let start = list.start.unwrap_or(1);
                    let start = i32::try_from(start).map_err(|_| {
                        ParseError::invalid_source_at(
                            format!("list start {start} is out of range"),
                            node.position().map_or(0, |pos| pos.start.offset),
                        )
                    })?;
                    self.tree.set_list_type(id, ListType::Ordered)?;
                    self.tree.set_list_start(id, start)?;
                } else {
                    self.tree.set_list_type(id, ListType::Bullet)?;
                }

                let item_spread = list
                    .children
                    .iter()
                    .any(|item| matches!(item, Node::ListItem(item) if item.spread));
                self.tree.set_list_tight(id, !(list.spread || item_spread))?;

                self.blocks(id, &list.children)
            }

            Node::ListItem(item) => {
                let id = self.add_block(parent, NodeType::ListItem, node)?;
                self.blocks(id, &item.children)
            }

            Node::Paragraph(para) => {
                let id = self.add_block(parent, NodeType::Paragraph, node)?;
                self.inlines(id, &para.children)
            }

            Node::Heading(heading) => {
                let node_type = if self.starts_with_atx_marker(node) {
                    NodeType::AtxHeader
                } else {
                    NodeType::SetextHeader
                };
                let id = self.add_block(parent, node_type, node)?;
                self.tree.set_header_level(id, heading.depth)?;
                self.inlines(id, &heading.children)
            }

            Node::Code(code) => {
                let fenced =
                    code.lang.is_some() || code.meta.is_some() || self.starts_with_fence(node);
                let content = if fenced && code.value.is_empty() {
                    "\n".repeat(self.fence_body_lines(node))
                } else {
                    with_newline(&code.value)
                };
                if fenced {
                    let id = self.add_block(parent, NodeType::FencedCode, node)?;
                    self.tree.set_string_content(id, content)?;
                    let info = match (&code.lang, &code.meta) {
                        (Some(lang), Some(meta)) => format!("{lang} {meta}"),
                        (Some(lang), None) => lang.clone(),
                        (None, Some(meta)) => meta.clone(),
                        (None, None) => String::new(),
                    };
                    self.tree.set_fence_info(id, info)?;
                } else {
                    let id = self.add_block(parent, NodeType::IndentedCode, node)?;
                    self.tree.set_string_content(id, content)?;
                }
                Ok(())
            }

            Node::Html(html) => {
                let id = self.add_block(parent, NodeType::HtmlBlock, node)?;
                self.tree.set_string_content(id, with_newline(&html.value))?;
                Ok(())
            }

            Node::ThematicBreak(_) => self.add_block(parent, NodeType::HRule, node).map(drop),

            Node::Definition(_) => self
                .add_block(parent, NodeType::ReferenceDef, node)
                .map(drop),

            other => Err(unsupported(other)),
        }
    }

    fn inlines(&mut self, parent: NodeId, children: &[Node]) -> Result<(), ParseError> {
        children
            .iter()
            .try_for_each(|child| self.inline(parent, child))
    }

    fn inline(&mut self, parent: NodeId, node: &Node) -> Result<(), ParseError> {
        match node {
            Node::Text(text) => self.text(parent, &text.value),

            Node::Break(_) => self.add(parent, NodeType::LineBreak).map(drop),

            Node::InlineCode(code) => {
                let id = self.add(parent, NodeType::InlineCode)?;
                self.tree.set_string_content(id, code.value.as_str())?;
                Ok(())
            }

            Node::Html(html) => {
                let id = self.add(parent, NodeType::InlineHtml)?;
                self.tree.set_string_content(id, html.value.as_str())?;
                Ok(())
            }

            Node::Emphasis(em) => {
                let id = self.add(parent, NodeType::Emph)?;
                self.inlines(id, &em.children)
            }

            Node::Strong(strong) => {
                let id = self.add(parent, NodeType::Strong)?;
                self.inlines(id, &strong.children)
            }

            Node::Link(link) => {
                let id = self.link(parent, NodeType::Link, &link.url, link.title.as_deref())?;
                self.inlines(id, &link.children)
            }

            Node::Image(image) => {
                let id = self.link(parent, NodeType::Image, &image.url, image.title.as_deref())?;
                self.text(id, &image.alt)
            }

            Node::LinkReference(reference) => match self.definition(&reference.identifier) {
                Some(def) => {
                    let title = Some(def.title.as_str());
                    let id = self.link(parent, NodeType::Link, &def.url, title)?;
                    self.inlines(id, &reference.children)
                }
                None => self.inlines(parent, &reference.children),
            },

            Node::ImageReference(reference) => match self.definition(&reference.identifier) {
                Some(def) => {
                    let title = Some(def.title.as_str());
                    let id = self.link(parent, NodeType::Image, &def.url, title)?;
                    self.text(id, &reference.alt)
                }
                None => self.text(parent, &reference.alt),
            },

            other => Err(unsupported(other)),
        }
    }

    fn link(
        &mut self,
        parent: NodeId,
        node_type: NodeType,
        url: &str,
        title: Option<&str>,
    ) -> Result<NodeId, ParseError> {
        let id = self.add(parent, node_type)?;
        self.tree.set_url(id, url)?;
        self.tree.set_title(id, title.unwrap_or_default())?;
        Ok(id)
    }

    /// Appends `text` as strings separated by soft breaks at line endings.
    fn text(&mut self, parent: NodeId, text: &str) -> Result<(), ParseError> {
        let mut lines = text.split('\n').peekable();
        let mut first = true;
        while let Some(line) = lines.next() {
            let last = lines.peek().is_none();
            let mut line = line.strip_suffix('\r').unwrap_or(line);
            if !first {
                line = line.trim_start_matches([' ', '\t']);
            }
            if !last {
                line = line.trim_end_matches([' ', '\t']);
            }

            if !line.is_empty() {
                let id = self.add(parent, NodeType::String)?;
                self.tree.set_string_content(id, line)?;
            }
            if !last {
                self.add(parent, NodeType::SoftBreak)?;
            }
            first = false;
        }
        Ok(())
    }

    fn definition(&self, identifier: &str) -> Option<Definition> {
        self.definitions.get(&normalize_label(identifier)).cloned()
    }

    fn source_at(&self, node: &Node) -> &str {
        node.position()
            .and_then(|pos| self.source.get(pos.start.offset..))
            .unwrap_or_default()
    }

    /// True if the heading opens with one to six `#` followed by a blank.
    fn starts_with_atx_marker(&self, node: &Node) -> bool {
        let line = strip_indent(self.source_at(node));
        let hashes = line.bytes().take_while(|&b| b == b'#').count();
        (1..=6).contains(&hashes)
            && matches!(line.as_bytes().get(hashes), None | Some(b' ' | b'\t' | b'\n' | b'\r'))
    }

    /// Number of lines between the opening and closing fence of a code block.
    ///
    /// mdast folds a body made of a single blank line into an empty value,
    /// so the line count is recovered from the source span.
    fn fence_body_lines(&self, node: &Node) -> usize {
        let Some(span) = node
            .position()
            .and_then(|pos| self.source.get(pos.start.offset..pos.end.offset))
        else {
            return 0;
        };
        let mut lines: Vec<&str> = span.lines().skip(1).collect();
        if lines.last().is_some_and(|line| is_closing_fence(line)) {
            lines.pop();
        }
        lines.len()
    }

    fn starts_with_fence(&self, node: &Node) -> bool {
        let line = strip_indent(self.source_at(node));
        line.starts_with("```") || line.starts_with("~~~")
    }
}

/// Strips the up-to-three spaces of indentation a block opener may carry.
fn strip_indent(line: &str) -> &str {
    let spaces = line.bytes().take(3).take_while(|&b| b == b' ').count();
    &line[spaces..]
}

fn is_closing_fence(line: &str) -> bool {
    let fence = strip_indent(line).trim_end();
    fence.len() >= 3 && (fence.bytes().all(|b| b == b'`') || fence.bytes().all(|b| b == b'~'))
}

fn with_newline(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{value}\n")
    }
}

/// Case-folds a link label and collapses its inner whitespace.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Collects every definition in the document. The first one for a label wins.
fn collect_definitions(root: &Node) -> HashMap<String, Definition> {
    let mut definitions = HashMap::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Node::Definition(def) = node {
            definitions
                .entry(normalize_label(&def.identifier))
                .or_insert_with(|| Definition {
                    url: def.url.clone(),
                    title: def.title.clone().unwrap_or_default(),
                });
        }
        if let Some(children) = node.children() {
            stack.extend(children.iter().rev());
        }
    }
    definitions
}

/// Converts an mdast position into an inclusive 1-based source range.
fn source_range(node: &Node) -> Option<SourceRange> {
    let pos = node.position()?;
    let start = SourcePos::new(to_u32(pos.start.line), to_u32(pos.start.column));
    // mdast end points are exclusive
    let end = SourcePos::new(
        to_u32(pos.end.line),
        to_u32(pos.end.column.saturating_sub(1).max(1)),
    );
    Some(SourceRange::new(start, end))
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn unsupported(node: &Node) -> ParseError {
    let name = match node {
        Node::Toml(_) | Node::Yaml(_) => "front matter",
        Node::Table(_) | Node::TableRow(_) | Node::TableCell(_) => "table",
        Node::Delete(_) => "strikethrough",
        Node::FootnoteDefinition(_) | Node::FootnoteReference(_) => "footnote",
        Node::Math(_) | Node::InlineMath(_) => "math",
        Node::Root(_) => "nested document root",
        _ => "mdx or misplaced node",
    };
    debug!(feature = name, "unsupported markdown construct");
    ParseError::unsupported(name)
}
