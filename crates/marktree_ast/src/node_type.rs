//! Node type definitions.
//!
//! The taxonomy is closed: every node in a [`Tree`](crate::Tree) carries one
//! of these tags, and each tag has a dense index used by the content-model
//! table.

use serde::{Deserialize, Serialize};

/// Node types of the document tree.
///
/// Block types come first, inline types after them. The discriminant is the
/// dense index returned by [`NodeType::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[repr(u8)]
pub enum NodeType {
    // Block elements
    /// Root document node.
    Document,
    /// Block quote.
    BlockQuote,
    /// Bullet or ordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Code block opened by a ``` or `~~~` fence.
    FencedCode,
    /// Code block made of indented lines.
    IndentedCode,
    /// Raw HTML block.
    #[serde(rename = "HTMLBlock")]
    HtmlBlock,
    /// Paragraph containing inline content.
    Paragraph,
    /// Header introduced by `#` characters.
    #[serde(rename = "ATXHeader")]
    AtxHeader,
    /// Header underlined with `=` or `-`.
    SetextHeader,
    /// Horizontal rule / thematic break.
    HRule,
    /// Link reference definition.
    ReferenceDef,

    // Inline elements
    /// Plain text string.
    String,
    /// Line ending inside a paragraph.
    SoftBreak,
    /// Hard line break.
    LineBreak,
    /// Inline code span.
    InlineCode,
    /// Raw inline HTML.
    #[serde(rename = "InlineHTML")]
    InlineHtml,
    /// Emphasis (italic).
    Emph,
    /// Strong emphasis (bold).
    Strong,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
}

impl NodeType {
    /// Number of node types.
    pub const COUNT: usize = 21;

    /// Every node type, in index order.
    pub const ALL: [NodeType; Self::COUNT] = [
        NodeType::Document,
        NodeType::BlockQuote,
        NodeType::List,
        NodeType::ListItem,
        NodeType::FencedCode,
        NodeType::IndentedCode,
        NodeType::HtmlBlock,
        NodeType::Paragraph,
        NodeType::AtxHeader,
        NodeType::SetextHeader,
        NodeType::HRule,
        NodeType::ReferenceDef,
        NodeType::String,
        NodeType::SoftBreak,
        NodeType::LineBreak,
        NodeType::InlineCode,
        NodeType::InlineHtml,
        NodeType::Emph,
        NodeType::Strong,
        NodeType::Link,
        NodeType::Image,
    ];

    /// Returns the dense index of this type (`0..COUNT`).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if this node type is a block element.
    #[inline]
    pub const fn is_block(self) -> bool {
        matches!(
            self,
            NodeType::Document
                | NodeType::BlockQuote
                | NodeType::List
                | NodeType::ListItem
                | NodeType::FencedCode
                | NodeType::IndentedCode
                | NodeType::HtmlBlock
                | NodeType::Paragraph
                | NodeType::AtxHeader
                | NodeType::SetextHeader
                | NodeType::HRule
                | NodeType::ReferenceDef
        )
    }

    /// Returns true if this node type is an inline element.
    #[inline]
    pub const fn is_inline(self) -> bool {
        !self.is_block()
    }

    /// Returns true if this node type can never own children.
    #[inline]
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeType::FencedCode
                | NodeType::IndentedCode
                | NodeType::HtmlBlock
                | NodeType::HRule
                | NodeType::ReferenceDef
                | NodeType::String
                | NodeType::SoftBreak
                | NodeType::LineBreak
                | NodeType::InlineCode
                | NodeType::InlineHtml
        )
    }

    /// Returns true for both header flavours.
    #[inline]
    pub const fn is_header(self) -> bool {
        matches!(self, NodeType::AtxHeader | NodeType::SetextHeader)
    }

    /// Returns true for both code block flavours.
    #[inline]
    pub const fn is_code_block(self) -> bool {
        matches!(self, NodeType::FencedCode | NodeType::IndentedCode)
    }

    /// Returns true for block types that may hold other blocks.
    #[inline]
    pub const fn is_block_container(self) -> bool {
        matches!(
            self,
            NodeType::Document | NodeType::BlockQuote | NodeType::ListItem
        )
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Same spelling as the serde names
        let name = match self {
            NodeType::Document => "Document",
            NodeType::BlockQuote => "BlockQuote",
            NodeType::List => "List",
            NodeType::ListItem => "ListItem",
            NodeType::FencedCode => "FencedCode",
            NodeType::IndentedCode => "IndentedCode",
            NodeType::HtmlBlock => "HTMLBlock",
            NodeType::Paragraph => "Paragraph",
            NodeType::AtxHeader => "ATXHeader",
            NodeType::SetextHeader => "SetextHeader",
            NodeType::HRule => "HRule",
            NodeType::ReferenceDef => "ReferenceDef",
            NodeType::String => "String",
            NodeType::SoftBreak => "SoftBreak",
            NodeType::LineBreak => "LineBreak",
            NodeType::InlineCode => "InlineCode",
            NodeType::InlineHtml => "InlineHTML",
            NodeType::Emph => "Emph",
            NodeType::Strong => "Strong",
            NodeType::Link => "Link",
            NodeType::Image => "Image",
        };
        write!(f, "{}", name)
    }
}
