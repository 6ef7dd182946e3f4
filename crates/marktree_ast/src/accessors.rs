//! Type-gated property accessors.
//!
//! Getters never fail: a node whose type does not own the field (or a stale
//! handle) yields the field's sentinel. Setters validate the node type and
//! the value before writing, so a rejected call leaves the payload as it was.

use tracing::debug;

use crate::{ListType, NodeId, NodeType, Payload, SourceRange, Tree, TreeError};

impl Tree {
    fn payload(&self, id: NodeId) -> Option<&Payload> {
        self.get(id).map(|node| &node.payload)
    }

    // Headers

    /// Header level of an ATX or setext header, 0 for any other node.
    pub fn header_level(&self, id: NodeId) -> u8 {
        match self.payload(id) {
            Some(Payload::Header { level }) => *level,
            _ => 0,
        }
    }

    /// Sets the header level. Levels outside `1..=6` are rejected.
    pub fn set_header_level(&mut self, id: NodeId, level: u8) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let Payload::Header { level: current } = &mut node.payload else {
            return Err(mismatch(id, "set_header_level", node.node_type));
        };
        if !(1..=6).contains(&level) {
            return Err(TreeError::domain("header_level", level));
        }
        *current = level;
        Ok(())
    }

    // Lists

    /// List type of a list node, [`ListType::None`] for any other node.
    pub fn list_type(&self, id: NodeId) -> ListType {
        match self.payload(id) {
            Some(Payload::List(list)) => list.list_type,
            _ => ListType::None,
        }
    }

    /// Sets the list type. [`ListType::None`] is rejected.
    pub fn set_list_type(&mut self, id: NodeId, list_type: ListType) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let Payload::List(list) = &mut node.payload else {
            return Err(mismatch(id, "set_list_type", node.node_type));
        };
        if list_type == ListType::None {
            return Err(TreeError::domain("list_type", "None"));
        }
        list.list_type = list_type;
        Ok(())
    }

    /// Start number of a list node, 0 for any other node.
    pub fn list_start(&self, id: NodeId) -> i32 {
        match self.payload(id) {
            Some(Payload::List(list)) => list.start,
            _ => 0,
        }
    }

    /// Sets the start number of a list. Negative values are rejected.
    pub fn set_list_start(&mut self, id: NodeId, start: i32) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let Payload::List(list) = &mut node.payload else {
            return Err(mismatch(id, "set_list_start", node.node_type));
        };
        if start < 0 {
            return Err(TreeError::domain("list_start", start));
        }
        list.start = start;
        Ok(())
    }

    /// Tightness of a list node, false for any other node.
    pub fn list_tight(&self, id: NodeId) -> bool {
        match self.payload(id) {
            Some(Payload::List(list)) => list.tight,
            _ => false,
        }
    }

    /// Sets whether a list is tight.
    pub fn set_list_tight(&mut self, id: NodeId, tight: bool) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let Payload::List(list) = &mut node.payload else {
            return Err(mismatch(id, "set_list_tight", node.node_type));
        };
        list.tight = tight;
        Ok(())
    }

    // Literals

    /// Literal content of code, HTML, string and inline code nodes.
    pub fn string_content(&self, id: NodeId) -> Option<&str> {
        match self.payload(id)? {
            Payload::Literal { content } | Payload::FencedCode { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Replaces the literal content of a node.
    pub fn set_string_content(
        &mut self,
        id: NodeId,
        content: impl Into<String>,
    ) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let (Payload::Literal { content: current } | Payload::FencedCode { content: current, .. }) =
            &mut node.payload
        else {
            return Err(mismatch(id, "set_string_content", node.node_type));
        };
        *current = content.into();
        Ok(())
    }

    /// Info string of a fenced code block.
    pub fn fence_info(&self, id: NodeId) -> Option<&str> {
        match self.payload(id)? {
            Payload::FencedCode { info, .. } => Some(info),
            _ => None,
        }
    }

    /// Replaces the info string of a fenced code block.
    pub fn set_fence_info(&mut self, id: NodeId, info: impl Into<String>) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let Payload::FencedCode { info: current, .. } = &mut node.payload else {
            return Err(mismatch(id, "set_fence_info", node.node_type));
        };
        *current = info.into();
        Ok(())
    }

    // Links and images

    /// Destination of a link or image.
    pub fn url(&self, id: NodeId) -> Option<&str> {
        match self.payload(id)? {
            Payload::Link(link) => Some(&link.url),
            _ => None,
        }
    }

    /// Replaces the destination of a link or image.
    pub fn set_url(&mut self, id: NodeId, url: impl Into<String>) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let Payload::Link(link) = &mut node.payload else {
            return Err(mismatch(id, "set_url", node.node_type));
        };
        link.url = url.into();
        Ok(())
    }

    /// Title of a link or image.
    pub fn title(&self, id: NodeId) -> Option<&str> {
        match self.payload(id)? {
            Payload::Link(link) => Some(&link.title),
            _ => None,
        }
    }

    /// Replaces the title of a link or image.
    pub fn set_title(&mut self, id: NodeId, title: impl Into<String>) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        let Payload::Link(link) = &mut node.payload else {
            return Err(mismatch(id, "set_title", node.node_type));
        };
        link.title = title.into();
        Ok(())
    }

    // Source positions

    /// Source range of a block node, if the producer recorded one.
    pub fn source_range(&self, id: NodeId) -> Option<SourceRange> {
        self.get(id).and_then(|node| node.range)
    }

    /// Records the source range of a block node.
    pub fn set_source_range(&mut self, id: NodeId, range: SourceRange) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        if !node.node_type.is_block() {
            return Err(mismatch(id, "set_source_range", node.node_type));
        }
        node.range = Some(range);
        Ok(())
    }

    /// First line of the node in the source, 0 when unknown.
    pub fn start_line(&self, id: NodeId) -> u32 {
        self.source_range(id).map_or(0, |range| range.start.line)
    }

    /// First column of the node in the source, 0 when unknown.
    pub fn start_column(&self, id: NodeId) -> u32 {
        self.source_range(id).map_or(0, |range| range.start.column)
    }

    /// Last line of the node in the source, 0 when unknown.
    pub fn end_line(&self, id: NodeId) -> u32 {
        self.source_range(id).map_or(0, |range| range.end.line)
    }

    /// Last column of the node in the source, 0 when unknown.
    pub fn end_column(&self, id: NodeId) -> u32 {
        self.source_range(id).map_or(0, |range| range.end.column)
    }
}

fn mismatch(id: NodeId, operation: &'static str, node_type: NodeType) -> TreeError {
    debug!(%id, %node_type, operation, "setter rejected");
    TreeError::type_mismatch(operation, node_type)
}
