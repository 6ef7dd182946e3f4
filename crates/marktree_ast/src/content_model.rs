//! Content model: which node types may own which.
//!
//! The admissibility relation is a `COUNT x COUNT` table computed at compile
//! time. Every mutation in [`Tree`](crate::Tree) and the consistency checker
//! consult [`can_contain`]; nothing else decides legal edges.

use crate::NodeType;

type Table = [[bool; NodeType::COUNT]; NodeType::COUNT];

static CONTENT_MODEL: Table = build_table();

/// Returns true if a node of type `parent` may own a child of type `child`.
#[inline]
pub fn can_contain(parent: NodeType, child: NodeType) -> bool {
    CONTENT_MODEL[parent.index()][child.index()]
}

/// Block types allowed directly under a document, block quote or list item.
const fn is_top_level_block(node_type: NodeType) -> bool {
    matches!(
        node_type,
        NodeType::BlockQuote
            | NodeType::List
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

const fn admits(parent: NodeType, child: NodeType) -> bool {
    if parent.is_block_container() {
        return is_top_level_block(child);
    }
    match parent {
        NodeType::List => matches!(child, NodeType::ListItem),
        NodeType::Paragraph
        | NodeType::AtxHeader
        | NodeType::SetextHeader
        | NodeType::Emph
        | NodeType::Strong
        | NodeType::Link
        | NodeType::Image => child.is_inline(),
        _ => false,
    }
}

const fn build_table() -> Table {
    let mut table = [[false; NodeType::COUNT]; NodeType::COUNT];
    let mut p = 0;
    while p < NodeType::COUNT {
        let mut c = 0;
        while c < NodeType::COUNT {
            table[p][c] = admits(NodeType::ALL[p], NodeType::ALL[c]);
            c += 1;
        }
        p += 1;
    }
    table
}
