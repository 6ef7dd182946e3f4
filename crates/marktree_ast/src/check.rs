//! Structural consistency checker.
//!
//! The mutation methods keep the tree consistent on their own; this module is
//! a diagnostic oracle for tests and for consumers (such as the HTML
//! renderer) that refuse to work on a damaged tree.

use thiserror::Error;
use tracing::warn;

use crate::content_model::can_contain;
use crate::{NodeId, NodeType, Tree};

/// A structural defect found by [`Tree::defects`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Defect {
    /// The root handle does not refer to a live node.
    #[error("root {root} is stale")]
    StaleRoot { root: NodeId },

    /// A sibling chain points at a destroyed node.
    #[error("children of {parent} link to a destroyed node")]
    DanglingLink { parent: NodeId },

    /// A child does not point back at the parent that owns it.
    #[error("{child} is owned by {owner} but records parent {recorded:?}")]
    ParentMismatch {
        child: NodeId,
        owner: NodeId,
        recorded: Option<NodeId>,
    },

    /// A child's `prev` link disagrees with the chain walked so far.
    #[error("{child} records prev {recorded:?}, expected {expected:?}")]
    PrevMismatch {
        child: NodeId,
        expected: Option<NodeId>,
        recorded: Option<NodeId>,
    },

    /// The parent's `last_child` is not the end of its chain.
    #[error("{parent} records last child {recorded:?}, expected {expected:?}")]
    LastChildMismatch {
        parent: NodeId,
        expected: Option<NodeId>,
        recorded: Option<NodeId>,
    },

    /// An edge the content model forbids.
    #[error("{parent_type} node {parent} contains a {child_type} node")]
    IllegalEdge {
        parent: NodeId,
        parent_type: NodeType,
        child_type: NodeType,
    },

    /// The walk visited more nodes than the store holds.
    #[error("sibling chains below {parent} loop")]
    Loop { parent: NodeId },
}

impl Tree {
    /// Checks the subtree under `root` and returns the number of defects.
    ///
    /// Returns 0 for a consistent tree. Each defect is logged at `warn`.
    pub fn consistency_check(&self, root: NodeId) -> usize {
        let defects = self.defects(root);
        for defect in &defects {
            warn!(%root, %defect, "tree defect");
        }
        defects.len()
    }

    /// Checks the subtree under `root` and returns every defect found.
    pub fn defects(&self, root: NodeId) -> Vec<Defect> {
        let mut defects = Vec::new();
        if !self.contains(root) {
            defects.push(Defect::StaleRoot { root });
            return defects;
        }

        let budget = self.nodes.len();
        let mut visited = 0usize;
        let mut stack = vec![root];

        while let Some(parent) = stack.pop() {
            let parent_node = &self.nodes[parent.0];
            let mut expected_prev = None;
            let mut cursor = parent_node.first_child;

            while let Some(child) = cursor {
                visited += 1;
                if visited > budget {
                    defects.push(Defect::Loop { parent });
                    return defects;
                }
                let Some(child_node) = self.get(child) else {
                    defects.push(Defect::DanglingLink { parent });
                    break;
                };

                if child_node.parent != Some(parent) {
                    defects.push(Defect::ParentMismatch {
                        child,
                        owner: parent,
                        recorded: child_node.parent,
                    });
                }
                if child_node.prev != expected_prev {
                    defects.push(Defect::PrevMismatch {
                        child,
                        expected: expected_prev,
                        recorded: child_node.prev,
                    });
                }
                if !can_contain(parent_node.node_type, child_node.node_type) {
                    defects.push(Defect::IllegalEdge {
                        parent,
                        parent_type: parent_node.node_type,
                        child_type: child_node.node_type,
                    });
                }

                stack.push(child);
                expected_prev = Some(child);
                cursor = child_node.next;
            }

            if parent_node.last_child != expected_prev {
                defects.push(Defect::LastChildMismatch {
                    parent,
                    expected: expected_prev,
                    recorded: parent_node.last_child,
                });
            }
        }

        defects
    }
}
