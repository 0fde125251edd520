use std::fmt;

use papermark_config::{StyleKind, StyleRecord};

use super::{Document, Node, NodeId, NodeKind, Placeholders};
use crate::error::{RefKind, RenderError};
use crate::parsing::macros::MacroArgs;

/// A borrowed view of one node together with its document, so renderers
/// can walk the tree and resolve styles and references from any node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(super) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn document(self) -> &'a Document {
        self.doc
    }

    pub fn node(self) -> &'a Node {
        self.doc.node(self.id)
    }

    pub fn kind(self) -> &'a NodeKind {
        &self.node().kind
    }

    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.doc.node_ref(id))
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.node().children.iter().map(move |&id| doc.node_ref(id))
    }

    pub fn args(self) -> Option<&'a MacroArgs> {
        self.node().args.as_ref()
    }

    pub fn style_kind(self) -> Option<StyleKind> {
        self.doc.style_kind(self.id)
    }

    /// See [`Document::style_for`].
    pub fn style(self) -> Option<&'a StyleRecord> {
        self.doc.style_for(self.id)
    }

    pub fn placeholders(self) -> Placeholders {
        self.doc.placeholders(self.id)
    }

    pub fn enclosing_section(self) -> NodeRef<'a> {
        self.doc.node_ref(self.doc.enclosing_section(self.id))
    }

    pub fn section_chain(self) -> Vec<NodeRef<'a>> {
        self.doc
            .section_chain(self.id)
            .into_iter()
            .map(|id| self.doc.node_ref(id))
            .collect()
    }

    /// A section's level, or for a title the level of its section.
    pub fn level(self) -> Option<u8> {
        match self.kind() {
            NodeKind::Section(s) => Some(s.level),
            NodeKind::Title(_) => self.parent().and_then(NodeRef::level),
            _ => None,
        }
    }

    /// The heading text of a section.
    pub fn title(self) -> Option<&'a str> {
        self.children().find_map(|c| match c.kind() {
            NodeKind::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// The node's `format` string instantiated with its own placeholders:
    /// a heading label, or an image/table/code caption.
    pub fn label(self) -> Result<String, RenderError> {
        let format = self.format()?;
        self.placeholders().format(format)
    }

    /// The node an image/table/code reference points at. Other nodes
    /// resolve to themselves.
    pub fn target(self) -> Result<NodeRef<'a>, RenderError> {
        let (kind, name, found) = match self.kind() {
            NodeKind::ImageRef(name) => (RefKind::Image, name, self.doc.image(name)),
            NodeKind::TableRef(name) => (RefKind::Table, name, self.doc.table(name)),
            NodeKind::CodeRef(name) => (RefKind::Code, name, self.doc.code(name)),
            _ => return Ok(self),
        };
        found.ok_or_else(|| RenderError::UnresolvedReference {
            kind,
            name: name.clone(),
        })
    }

    /// A reference's own `format` instantiated with its target's
    /// placeholders, e.g. `图{gi}` -> `图2`.
    pub fn reference_label(self) -> Result<String, RenderError> {
        let format = self.format()?;
        self.target()?.placeholders().format(format)
    }

    fn format(self) -> Result<&'a str, RenderError> {
        self.style()
            .and_then(|record| record.format.as_deref())
            .ok_or(RenderError::MissingFormat {
                node: self.kind().name(),
            })
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}
