//! Parser trait definition.

use marktree_ast::{NodeId, Tree};

use crate::ParseError;

/// Trait for parsing source text into a document tree.
///
/// Implementations create a new document root inside the caller's [`Tree`]
/// and return its handle. A failed parse must not leave partial nodes
/// behind.
///
/// # Example
///
/// ```rust
/// use marktree_ast::{NodeId, NodeType, Tree};
/// use marktree_parser::{ParseError, Parser};
///
/// struct PlainParser;
///
/// impl Parser for PlainParser {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["txt"]
///     }
///
///     fn parse(&self, tree: &mut Tree, source: &str) -> Result<NodeId, ParseError> {
///         let doc = tree.new_node(NodeType::Document);
///         let para = tree.new_node(NodeType::Paragraph);
///         let text = tree.new_node(NodeType::String);
///         tree.set_string_content(text, source)?;
///         tree.append_child(para, text)?;
///         tree.append_child(doc, para)?;
///         Ok(doc)
///     }
/// }
///
/// assert!(PlainParser.can_parse("TXT"));
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["md", "markdown"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a new document root inside `tree`.
    fn parse(&self, tree: &mut Tree, source: &str) -> Result<NodeId, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
