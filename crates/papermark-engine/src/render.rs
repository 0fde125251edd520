//! # Rendering dispatch
//!
//! A renderer implements one handler per node kind; [`Render::visit`]
//! selects the handler with an exhaustive match, so adding a node kind is a
//! compile error in every renderer rather than a runtime lookup failure.
//!
//! Handlers receive a [`NodeRef`], which gives them the node's merged
//! style ([`NodeRef::style`]), its caption or heading label
//! ([`NodeRef::label`]) and, for cross-references, the target's label
//! ([`NodeRef::reference_label`]). Container handlers decide where their
//! children go by calling [`Render::visit_children`].

use crate::document::{Document, NodeKind, NodeRef};
use crate::error::RenderError;

pub trait Render {
    /// Renderer-defined output state threaded through every handler.
    type Context;
    type Error: From<RenderError>;

    fn section(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn title(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn paragraph(&mut self, node: NodeRef<'_>, cx: &mut Self::Context)
    -> Result<(), Self::Error>;
    fn image(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn code(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn table(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn table_head(&mut self, node: NodeRef<'_>, cx: &mut Self::Context)
    -> Result<(), Self::Error>;
    fn table_row(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn table_head_cell(
        &mut self,
        node: NodeRef<'_>,
        cx: &mut Self::Context,
    ) -> Result<(), Self::Error>;
    fn table_cell(&mut self, node: NodeRef<'_>, cx: &mut Self::Context)
    -> Result<(), Self::Error>;
    fn text(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn italic(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn bold(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn escape(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn code_span(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn image_ref(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn table_ref(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn code_ref(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;
    fn citation(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error>;

    fn visit(&mut self, node: NodeRef<'_>, cx: &mut Self::Context) -> Result<(), Self::Error> {
        match node.kind() {
            NodeKind::Section(_) => self.section(node, cx),
            NodeKind::Title(_) => self.title(node, cx),
            NodeKind::Paragraph => self.paragraph(node, cx),
            NodeKind::Image(_) => self.image(node, cx),
            NodeKind::Code(_) => self.code(node, cx),
            NodeKind::Table(_) => self.table(node, cx),
            NodeKind::TableHead => self.table_head(node, cx),
            NodeKind::TableRow => self.table_row(node, cx),
            NodeKind::TableHeadCell => self.table_head_cell(node, cx),
            NodeKind::TableCell => self.table_cell(node, cx),
            NodeKind::Text(_) => self.text(node, cx),
            NodeKind::Italic(_) => self.italic(node, cx),
            NodeKind::Bold(_) => self.bold(node, cx),
            NodeKind::Escape(_) => self.escape(node, cx),
            NodeKind::CodeSpan(_) => self.code_span(node, cx),
            NodeKind::ImageRef(_) => self.image_ref(node, cx),
            NodeKind::TableRef(_) => self.table_ref(node, cx),
            NodeKind::CodeRef(_) => self.code_ref(node, cx),
            NodeKind::Ref(_) => self.citation(node, cx),
        }
    }

    fn visit_children(
        &mut self,
        node: NodeRef<'_>,
        cx: &mut Self::Context,
    ) -> Result<(), Self::Error> {
        for child in node.children() {
            self.visit(child, cx)?;
        }
        Ok(())
    }
}

/// Renders a whole document, starting from its root section.
pub fn render<R: Render>(
    doc: &Document,
    renderer: &mut R,
    cx: &mut R::Context,
) -> Result<(), R::Error> {
    renderer.visit(doc.root(), cx)
}
