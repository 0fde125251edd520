use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use papermark_engine::{NodeKind, NodeRef, Render, RenderError};

use crate::css;

/// Writes the `<body>` contents of a document into a `String`.
#[derive(Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Opens `tag`, adding the class if given and an inline `style` when the
    /// node carries its own style record.
    fn open(node: NodeRef<'_>, tag: &str, class: Option<&str>, out: &mut String) {
        out.push('<');
        out.push_str(tag);
        if let Some(class) = class {
            let _ = write!(out, " class=\"{class}\"");
        }
        if let Some(record) = node.node().style() {
            let style = css::declarations(record);
            if !style.is_empty() {
                let _ = write!(
                    out,
                    " style=\"{}\"",
                    encode_double_quoted_attribute(&style.inline())
                );
            }
        }
        out.push('>');
    }

    fn element(
        node: NodeRef<'_>,
        tag: &str,
        class: Option<&str>,
        text: &str,
        out: &mut String,
    ) {
        Self::open(node, tag, class, out);
        out.push_str(&encode_text(text));
        let _ = write!(out, "</{tag}>");
    }

    fn container(
        &mut self,
        node: NodeRef<'_>,
        tag: &str,
        out: &mut String,
    ) -> Result<(), RenderError> {
        Self::open(node, tag, None, out);
        self.visit_children(node, out)?;
        let _ = writeln!(out, "</{tag}>");
        Ok(())
    }

    fn span_text(node: NodeRef<'_>) -> &str {
        node.kind().text().unwrap_or_default()
    }
}

impl Render for HtmlRenderer {
    type Context = String;
    type Error = RenderError;

    fn section(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        if node.level() == Some(0) {
            return self.visit_children(node, out);
        }
        self.container(node, "div", out)
    }

    fn title(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        let level = node.level().unwrap_or(1).clamp(1, 6);
        let tag = format!("h{level}");
        let class = format!("head{level}");
        Self::element(node, &tag, Some(class.as_str()), &node.label()?, out);
        out.push('\n');
        Ok(())
    }

    fn paragraph(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        self.container(node, "p", out)
    }

    fn image(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        let NodeKind::Image(image) = node.kind() else {
            return Ok(());
        };
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"{}\">",
            encode_double_quoted_attribute(&image.link),
            encode_double_quoted_attribute(&image.name)
        );
        out.push('\n');
        Self::element(node, "div", Some("image-label"), &node.label()?, out);
        out.push('\n');
        Ok(())
    }

    fn code(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        let NodeKind::Code(code) = node.kind() else {
            return Ok(());
        };
        let numbered = node.style().is_some_and(|r| r.show_line_numbers());
        Self::element(node, "pre", None, &code.text(numbered), out);
        out.push('\n');
        Self::element(node, "div", Some("code-label"), &node.label()?, out);
        out.push('\n');
        Ok(())
    }

    fn table(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::element(node, "div", Some("table-label"), &node.label()?, out);
        out.push('\n');
        out.push_str("<table>\n");
        self.visit_children(node, out)?;
        out.push_str("</table>\n");
        Ok(())
    }

    fn table_head(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        self.container(node, "tr", out)
    }

    fn table_row(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        self.container(node, "tr", out)
    }

    fn table_head_cell(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::open(node, "th", None, out);
        self.visit_children(node, out)?;
        out.push_str("</th>");
        Ok(())
    }

    fn table_cell(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::open(node, "td", None, out);
        self.visit_children(node, out)?;
        out.push_str("</td>");
        Ok(())
    }

    fn text(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        out.push_str(&encode_text(Self::span_text(node)));
        Ok(())
    }

    fn italic(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::element(node, "i", None, Self::span_text(node), out);
        Ok(())
    }

    fn bold(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::element(node, "b", None, Self::span_text(node), out);
        Ok(())
    }

    fn escape(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        self.text(node, out)
    }

    fn code_span(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::element(node, "code", None, Self::span_text(node), out);
        Ok(())
    }

    fn image_ref(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::element(node, "span", Some("image-ref"), &node.reference_label()?, out);
        Ok(())
    }

    fn table_ref(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::element(node, "span", Some("table-ref"), &node.reference_label()?, out);
        Ok(())
    }

    fn code_ref(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        Self::element(node, "span", Some("code-ref"), &node.reference_label()?, out);
        Ok(())
    }

    fn citation(&mut self, node: NodeRef<'_>, out: &mut String) -> Result<(), RenderError> {
        if let Some(number) = node.kind().number() {
            let _ = write!(out, "<sup>{number}</sup>");
        }
        Ok(())
    }
}
