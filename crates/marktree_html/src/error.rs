//! Render error types.

use std::collections::TryReserveError;

use marktree_ast::Defect;
use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The root handle refers to a destroyed node.
    #[error("Render root is stale")]
    StaleNode,

    /// The tree failed its consistency check.
    #[error("Tree is inconsistent: {} defect(s), first: {}", defects.len(), first_defect(defects))]
    Inconsistent {
        /// Every defect found under the root.
        defects: Vec<Defect>,
    },

    /// The output buffer could not grow.
    #[error("Output allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Render options could not be loaded.
    #[error("Options error: {0}")]
    Options(String),
}

impl RenderError {
    /// Creates an options error.
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options(message.into())
    }
}

fn first_defect(defects: &[Defect]) -> String {
    defects
        .first()
        .map_or_else(|| "none".to_string(), ToString::to_string)
}
