//! Node record and its type-specific payload.

use serde::{Deserialize, Serialize};

use crate::{NodeId, NodeType, SourceRange};

/// Kind of a list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListType {
    /// Not a list. Returned by getters on non-list nodes.
    #[default]
    None,
    /// Unordered list (`*`, `-`, `+`).
    Bullet,
    /// Numbered list.
    Ordered,
}

/// List attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListData {
    pub list_type: ListType,
    pub start: i32,
    pub tight: bool,
}

impl Default for ListData {
    fn default() -> Self {
        Self {
            list_type: ListType::Bullet,
            start: 1,
            tight: false,
        }
    }
}

/// Link and image attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkData {
    pub url: String,
    pub title: String,
}

/// Type-specific data of a node.
///
/// Exactly one variant belongs to each [`NodeType`]; see [`Payload::for_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Types without data of their own.
    None,
    /// ATX and setext headers.
    Header { level: u8 },
    /// Lists.
    List(ListData),
    /// Indented code, HTML blocks, strings, inline code and inline HTML.
    Literal { content: String },
    /// Fenced code: literal content plus the fence's info string.
    FencedCode { content: String, info: String },
    /// Links and images.
    Link(LinkData),
}

impl Payload {
    /// Default payload for a freshly created node of `node_type`.
    pub fn for_type(node_type: NodeType) -> Self {
        match node_type {
            NodeType::AtxHeader | NodeType::SetextHeader => Payload::Header { level: 1 },
            NodeType::List => Payload::List(ListData::default()),
            NodeType::IndentedCode
            | NodeType::HtmlBlock
            | NodeType::String
            | NodeType::InlineHtml
            | NodeType::InlineCode => Payload::Literal {
                content: String::new(),
            },
            NodeType::FencedCode => Payload::FencedCode {
                content: String::new(),
                info: String::new(),
            },
            NodeType::Link | NodeType::Image => Payload::Link(LinkData::default()),
            NodeType::Document
            | NodeType::BlockQuote
            | NodeType::ListItem
            | NodeType::Paragraph
            | NodeType::HRule
            | NodeType::ReferenceDef
            | NodeType::SoftBreak
            | NodeType::LineBreak
            | NodeType::Emph
            | NodeType::Strong => Payload::None,
        }
    }
}

/// A node stored in a [`Tree`](crate::Tree).
///
/// `first_child`/`last_child` are the owning links; `parent`, `prev` and
/// `next` are back-references maintained by the tree's mutation methods.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) node_type: NodeType,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) range: Option<SourceRange>,
    pub(crate) payload: Payload,
}

impl Node {
    pub(crate) fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            first_child: None,
            last_child: None,
            prev: None,
            next: None,
            range: None,
            payload: Payload::for_type(node_type),
        }
    }

    /// Returns the node's type.
    #[inline]
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the node's payload.
    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the source range, if one was recorded.
    #[inline]
    pub fn range(&self) -> Option<SourceRange> {
        self.range
    }
}
