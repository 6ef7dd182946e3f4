//! Tree error types.

use thiserror::Error;

use crate::NodeType;

/// Errors returned by tree mutations and setters.
///
/// Every failing operation leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node's type does not own the field being written.
    #[error("{operation} is not supported on {node_type} nodes")]
    TypeMismatch {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Type of the node it was applied to.
        node_type: NodeType,
    },

    /// The value lies outside the field's legal range.
    #[error("invalid value for {field}: {value}")]
    DomainViolation {
        /// Name of the field.
        field: &'static str,
        /// The rejected value, formatted.
        value: String,
    },

    /// The content model forbids this parent/child pair.
    #[error("{parent} nodes cannot contain {child} nodes")]
    NotAllowed {
        /// Type of the would-be parent.
        parent: NodeType,
        /// Type of the would-be child.
        child: NodeType,
    },

    /// The node is the target itself or one of its ancestors.
    #[error("a node cannot become a descendant of itself")]
    Cycle,

    /// The sibling to insert next to has no parent.
    #[error("cannot insert next to a node without a parent")]
    Unattached,

    /// The handle refers to a destroyed node.
    #[error("node handle is stale")]
    StaleNode,
}

/// Coarse classification of [`TreeError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Accessor used on a node type that does not own the field.
    TypeMismatch,
    /// Value out of the field's range.
    DomainViolation,
    /// The mutation would break the content model or create a cycle.
    StructuralViolation,
    /// Insertion relative to a parentless node.
    Unattached,
    /// Operation on a destroyed node.
    Stale,
}

impl TreeError {
    /// Creates a type mismatch error.
    pub fn type_mismatch(operation: &'static str, node_type: NodeType) -> Self {
        Self::TypeMismatch {
            operation,
            node_type,
        }
    }

    /// Creates a domain violation error.
    pub fn domain(field: &'static str, value: impl ToString) -> Self {
        Self::DomainViolation {
            field,
            value: value.to_string(),
        }
    }

    /// Returns the error's classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            TreeError::DomainViolation { .. } => ErrorKind::DomainViolation,
            TreeError::NotAllowed { .. } | TreeError::Cycle => ErrorKind::StructuralViolation,
            TreeError::Unattached => ErrorKind::Unattached,
            TreeError::StaleNode => ErrorKind::Stale,
        }
    }
}
