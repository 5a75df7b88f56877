use slab::Slab;

/// A cursor into a [`RenderTree`]. Ids are only meaningful for the tree
/// that handed them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A rendered attribute, stored in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// The payload of a [`RenderNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    Element { tag: String, attrs: Vec<Attribute> },
    Text { text: String },
    Comment { value: String },
}

/// A single node in the rendered output: an element, a text run, or a
/// comment.
#[derive(Debug)]
pub struct RenderNode {
    pub(crate) data: NodeData,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

impl RenderNode {
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// The element's tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// The comment's value, if this is a comment.
    pub fn comment_value(&self) -> Option<&str> {
        match &self.data {
            NodeData::Comment { value } => Some(value),
            _ => None,
        }
    }

    /// Look up an attribute by name. Text and comment nodes have none.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.as_str()),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// An arena of rendered nodes, owned by the host renderer.
///
/// Structure is reachable through `first_child` and `next_sibling` links
/// only; consumers walk sibling chains with [`NodeId`] cursors instead of
/// copying any part of the tree.
#[derive(Default)]
pub struct RenderTree {
    nodes: Slab<RenderNode>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element node.
    pub fn element(&mut self, tag: impl Into<String>) -> NodeId {
        self.insert(NodeData::Element {
            tag: tag.into(),
            attrs: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn text(&mut self, text: impl Into<String>) -> NodeId {
        self.insert(NodeData::Text { text: text.into() })
    }

    /// Create a detached comment node.
    pub fn comment(&mut self, value: impl Into<String>) -> NodeId {
        self.insert(NodeData::Comment {
            value: value.into(),
        })
    }

    fn insert(&mut self, data: NodeData) -> NodeId {
        NodeId(self.nodes.insert(RenderNode {
            data,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }))
    }

    /// Add an attribute to an element node. Ignored for text and comments.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[id.0].data {
            attrs.push(Attribute {
                name: name.into(),
                value: value.into(),
            });
        }
    }

    /// Append `child` as the last child of `parent`, linking it onto the
    /// end of the sibling chain.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        match self.nodes[parent.0].last_child {
            Some(last) => self.nodes[last.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
    }

    pub fn get(&self, id: NodeId) -> &RenderNode {
        &self.nodes[id.0]
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }
}

#[test]
fn sibling_chain_links_in_append_order() {
    let mut tree = RenderTree::new();
    let parent = tree.element("ul");
    let a = tree.element("li");
    let b = tree.element("li");
    let c = tree.text("tail");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.next_sibling(c), None);
}

#[test]
fn attributes_are_element_only() {
    let mut tree = RenderTree::new();
    let el = tree.element("div");
    let text = tree.text("hi");
    tree.set_attribute(el, "class", "a");
    tree.set_attribute(text, "class", "b");

    assert_eq!(tree.get(el).attribute("class"), Some("a"));
    assert!(!tree.get(text).has_attribute("class"));
}
