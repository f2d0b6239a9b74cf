// ElementTree: a small arena-backed `Document` for callers without a DOM of
// their own, and for tests.
//
// Nodes live in a flat vector and refer to each other by index. Nodes are
// never removed, so indices stay valid for the life of the tree.

use super::Document;

/// Index of a node in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        language: Option<String>,
        classes: Vec<String>,
        hidden: bool,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// An owned tree of elements and text nodes.
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: Vec<Node>,
    language: Option<String>,
}

impl ElementTree {
    /// A tree with a single root element.
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element {
                    tag: root_tag.to_string(),
                    language: None,
                    classes: Vec::new(),
                    hidden: false,
                },
                children: Vec::new(),
            }],
            language: None,
        }
    }

    /// Set the document-wide language.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element under `parent`.
    pub fn add_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                tag: tag.to_string(),
                language: None,
                classes: Vec::new(),
                hidden: false,
            },
        )
    }

    /// Append a text node under `parent`.
    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    /// Set an element's own language. Ignored for text nodes.
    pub fn set_language(&mut self, node: NodeId, lang: &str) {
        if let NodeKind::Element { language, .. } = &mut self.nodes[node.0].kind {
            *language = Some(lang.to_string());
        }
    }

    /// Add a class to an element. Ignored for text nodes.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.nodes[node.0].kind {
            classes.push(class.to_string());
        }
    }

    /// Concatenated text of `node` and all its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let n = &self.nodes[id.0];
            if let NodeKind::Text(text) = &n.kind {
                out.push_str(text);
            }
            stack.extend(n.children.iter().rev());
        }
        out
    }
}

impl Document for ElementTree {
    type NodeId = NodeId;

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    fn set_text(&mut self, node: NodeId, text: String) {
        if let NodeKind::Text(current) = &mut self.nodes[node.0].kind {
            *current = text;
        }
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    fn language(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { language, .. } => language.as_deref(),
            NodeKind::Text(_) => None,
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        match &self.nodes[node.0].kind {
            NodeKind::Element { classes, .. } => classes.iter().any(|c| c == class),
            NodeKind::Text(_) => false,
        }
    }

    fn is_hidden(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Element { hidden: true, .. })
    }

    fn set_hidden(&mut self, node: NodeId, value: bool) {
        if let NodeKind::Element { hidden, .. } = &mut self.nodes[node.0].kind {
            *hidden = value;
        }
    }

    fn document_language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}
