use super::*;

impl Dom {
    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn push_detached(&mut self, data: NodeData) -> NodeId {
        self.push_node(Node {
            parent: None,
            children: Vec::new(),
            data,
        })
    }

    /// Pushes a node and links it as the last child of `parent` in one step;
    /// used while parsing, where `parent` is always a live container.
    pub(super) fn push_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.push_node(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(id);
        }
        id
    }

    /// A detached element; attach it with [`Dom::append_child`].
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push_detached(NodeData::Element(Element::new(tag_name, HashMap::new())))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_detached(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push_detached(NodeData::Comment(text.to_string()))
    }

    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0)?.parent
    }

    /// Direct children; empty for leaves and unknown ids.
    pub fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn child_elements(&self, node_id: NodeId) -> Vec<NodeId> {
        self.children(node_id)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    /// Strict ancestors of `node_id`, nearest first.
    pub fn ancestors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node_id), |current| self.parent(*current))
    }

    /// Appends `child` to `parent`, moving it out of its current parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_kind = self.kind(parent);
        if !matches!(parent_kind, Some(NodeKind::Document | NodeKind::Element)) {
            return Err(Error::DomMutation(format!(
                "cannot append into a {parent_kind:?} node"
            )));
        }
        match self.kind(child) {
            None => return Err(Error::InvalidNode(format!("unknown node #{}", child.0))),
            Some(NodeKind::Document) => {
                return Err(Error::DomMutation("the document cannot be appended".into()));
            }
            Some(_) => {}
        }
        if child == parent || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(Error::DomMutation(
                "cannot append a node inside its own subtree".into(),
            ));
        }

        self.detach(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    pub fn append_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        children
            .iter()
            .try_for_each(|child| self.append_child(parent, *child))
    }

    fn detach(&mut self, node_id: NodeId) {
        let Some(parent) = self.parent(node_id) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.retain(|id| *id != node_id);
        }
        if let Some(node) = self.nodes.get_mut(node_id.0) {
            node.parent = None;
        }
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.parent(child) != Some(parent) {
            return Err(Error::DomMutation(format!(
                "node #{} is not a child of node #{}",
                child.0, parent.0
            )));
        }
        self.detach(child);
        Ok(())
    }

    /// Detaches `node` from wherever it is; detached nodes are left alone.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::DomMutation("the document cannot be removed".into()));
        }
        self.node(node)?;
        self.detach(node);
        Ok(())
    }

    /// Every element below `node_id`, in document order, excluding `node_id`.
    ///
    /// Walks with an explicit work list, so nesting depth is bounded by the
    /// heap rather than the call stack.
    pub fn descendant_elements(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut pending = self.children(node_id).iter().rev().copied().collect::<Vec<_>>();
        while let Some(current) = pending.pop() {
            if self.element(current).is_some() {
                out.push(current);
            }
            pending.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn is_descendant_of(&self, node_id: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node_id).any(|current| current == ancestor)
    }

    pub fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        self.ancestors(node_id).find(|current| {
            self.tag_name(*current)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
        })
    }

    /// First connected element whose `id` attribute equals `id`.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendant_elements(self.root)
            .into_iter()
            .find(|node| self.attr(*node, "id").as_deref() == Some(id))
    }

    /// Concatenated text of `node_id` and its descendants; comments add
    /// nothing.
    pub fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        let mut pending = vec![node_id];
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.get(current.0) else {
                continue;
            };
            match &node.data {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Comment(_) => {}
                NodeData::Document | NodeData::Element(_) => {
                    pending.extend(node.children.iter().rev().copied());
                }
            }
        }
        out
    }
}
