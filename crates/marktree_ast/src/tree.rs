//! Node store and tree mutation.
//!
//! All nodes live in a single generational arena. A [`NodeId`] is a copyable
//! handle into it; handles of destroyed nodes become stale and are never
//! handed out again for a different node. A store can hold any number of
//! free roots, and moving a subtree between roots is an ordinary mutation.

use generational_arena::{Arena, Index};
use tracing::{debug, trace};

use crate::content_model::can_contain;
use crate::{Node, NodeType, TreeError};

/// Handle of a node in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) Index);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (index, generation) = self.0.into_raw_parts();
        write!(f, "#{}v{}", index, generation)
    }
}

/// Arena-backed store of document nodes.
///
/// # Example
///
/// ```rust
/// use marktree_ast::{NodeType, Tree};
///
/// let mut tree = Tree::new();
/// let doc = tree.new_node(NodeType::Document);
/// let para = tree.new_node(NodeType::Paragraph);
///
/// tree.append_child(doc, para).unwrap();
/// assert_eq!(tree.first_child(doc), Some(para));
///
/// // Documents cannot nest
/// let other = tree.new_node(NodeType::Document);
/// assert!(tree.append_child(para, other).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tree {
    pub(crate) nodes: Arena<Node>,
}

impl Tree {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
        }
    }

    /// Creates an empty store with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    /// Returns the node behind `id`, if it is still alive.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.0).ok_or(TreeError::StaleNode)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id.0).ok_or(TreeError::StaleNode)
    }

    /// Creates a detached node of `node_type` with its default payload.
    pub fn new_node(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.insert(Node::new(node_type)));
        trace!(%id, %node_type, "created node");
        id
    }

    /// Destroys `id` and every node it owns.
    ///
    /// The node is unlinked from its parent first, so the rest of the tree
    /// stays consistent. Stale handles are ignored.
    pub fn destroy(&mut self, id: NodeId) {
        if !self.contains(id) {
            debug!(%id, "destroy called on a stale node");
            return;
        }

        self.detach(id);
        let doomed: Vec<NodeId> = self.descendants(id).collect();
        for node in &doomed {
            self.nodes.remove(node.0);
        }
        trace!(%id, count = doomed.len(), "destroyed subtree");
    }

    // Navigation

    /// Returns the type of `id`, or `None` for a stale handle.
    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(|node| node.node_type)
    }

    /// Returns the parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Returns the first child of `id`.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.first_child)
    }

    /// Returns the last child of `id`.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.last_child)
    }

    /// Returns the next sibling of `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.next)
    }

    /// Returns the previous sibling of `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.prev)
    }

    /// Iterates over the children of `id` in order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Iterates over `id` and its ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Iterates over `id` and all of its descendants in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.contains(id).then_some(id),
        }
    }

    // Mutation

    /// Appends `child` as the last child of `parent`.
    ///
    /// If `child` is attached somewhere else it is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_attach(parent, child)
            .inspect_err(|err| debug!(%parent, %child, %err, "append_child rejected"))?;

        self.detach(child);
        let old_last = self.nodes[parent.0].last_child;
        {
            let node = &mut self.nodes[child.0];
            node.parent = Some(parent);
            node.prev = old_last;
            node.next = None;
        }
        match old_last {
            Some(last) => self.nodes[last.0].next = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
        Ok(())
    }

    /// Prepends `child` as the first child of `parent`.
    ///
    /// If `child` is attached somewhere else it is moved.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_attach(parent, child)
            .inspect_err(|err| debug!(%parent, %child, %err, "prepend_child rejected"))?;

        self.detach(child);
        let old_first = self.nodes[parent.0].first_child;
        {
            let node = &mut self.nodes[child.0];
            node.parent = Some(parent);
            node.prev = None;
            node.next = old_first;
        }
        match old_first {
            Some(first) => self.nodes[first.0].prev = Some(child),
            None => self.nodes[parent.0].last_child = Some(child),
        }
        self.nodes[parent.0].first_child = Some(child);
        Ok(())
    }

    /// Inserts `node` immediately before `sibling`.
    ///
    /// Fails with [`TreeError::Unattached`] if `sibling` has no parent.
    /// Inserting a node before itself is a no-op.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) -> Result<(), TreeError> {
        let parent = self
            .check_insert(sibling, node)
            .inspect_err(|err| debug!(%sibling, %node, %err, "insert_before rejected"))?;
        if sibling == node {
            return Ok(());
        }

        self.detach(node);
        let prev = self.nodes[sibling.0].prev;
        {
            let new = &mut self.nodes[node.0];
            new.parent = Some(parent);
            new.prev = prev;
            new.next = Some(sibling);
        }
        self.nodes[sibling.0].prev = Some(node);
        match prev {
            Some(prev) => self.nodes[prev.0].next = Some(node),
            None => self.nodes[parent.0].first_child = Some(node),
        }
        Ok(())
    }

    /// Inserts `node` immediately after `sibling`.
    ///
    /// Fails with [`TreeError::Unattached`] if `sibling` has no parent.
    /// Inserting a node after itself is a no-op.
    pub fn insert_after(&mut self, sibling: NodeId, node: NodeId) -> Result<(), TreeError> {
        let parent = self
            .check_insert(sibling, node)
            .inspect_err(|err| debug!(%sibling, %node, %err, "insert_after rejected"))?;
        if sibling == node {
            return Ok(());
        }

        self.detach(node);
        let next = self.nodes[sibling.0].next;
        {
            let new = &mut self.nodes[node.0];
            new.parent = Some(parent);
            new.prev = Some(sibling);
            new.next = next;
        }
        self.nodes[sibling.0].next = Some(node);
        match next {
            Some(next) => self.nodes[next.0].prev = Some(node),
            None => self.nodes[parent.0].last_child = Some(node),
        }
        Ok(())
    }

    /// Detaches `id` (with its subtree) from its parent and siblings.
    ///
    /// The node is not destroyed and becomes a free root. Stale handles are
    /// ignored.
    pub fn unlink(&mut self, id: NodeId) {
        if self.contains(id) {
            self.detach(id);
        } else {
            debug!(%id, "unlink called on a stale node");
        }
    }

    /// Validates attaching `child` under `parent` without touching any link.
    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_type = self.node(parent)?.node_type;
        let child_type = self.node(child)?.node_type;

        if !can_contain(parent_type, child_type) {
            return Err(TreeError::NotAllowed {
                parent: parent_type,
                child: child_type,
            });
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(TreeError::Cycle);
        }
        Ok(())
    }

    /// Validates inserting `node` next to `sibling` and returns the parent.
    fn check_insert(&self, sibling: NodeId, node: NodeId) -> Result<NodeId, TreeError> {
        let parent = self.node(sibling)?.parent.ok_or(TreeError::Unattached)?;
        self.node(node)?;
        if sibling != node {
            self.check_attach(parent, node)?;
        }
        Ok(parent)
    }

    /// Removes a live node from its sibling chain.
    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.0];
            (node.parent, node.prev, node.next)
        };

        match prev {
            Some(prev) => self.nodes[prev.0].next = next,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent.0].first_child = next;
                }
            }
        }
        match next {
            Some(next) => self.nodes[next.0].prev = prev,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent.0].last_child = prev;
                }
            }
        }

        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.prev = None;
        node.next = None;
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next(current);
        Some(current)
    }
}

/// Iterator from a node up to its root.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    tree: &'a Tree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = match self.tree.first_child(current) {
            Some(child) => Some(child),
            None => {
                let mut cursor = current;
                loop {
                    if cursor == self.root {
                        break None;
                    }
                    if let Some(sibling) = self.tree.next(cursor) {
                        break Some(sibling);
                    }
                    match self.tree.parent(cursor) {
                        Some(parent) => cursor = parent,
                        None => break None,
                    }
                }
            }
        };
        Some(current)
    }
}
