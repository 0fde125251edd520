//! # papermark-html
//!
//! Serializes a parsed [`Document`] as a standalone HTML page: a `<style>`
//! block generated from the document's style configuration, then the body
//! written by [`HtmlRenderer`] through the engine's [`Render`](papermark_engine::Render)
//! contract.

pub mod css;
mod writer;

pub use writer::HtmlRenderer;

use log::debug;
use papermark_engine::{Document, RenderError, render};

/// Renders a complete HTML page for `doc`.
pub fn to_html(doc: &Document) -> Result<String, RenderError> {
    let mut body = String::new();
    render(doc, &mut HtmlRenderer::new(), &mut body)?;

    let styles = css::stylesheet(doc.style());
    debug!(
        "rendered {} node(s) into {} byte(s) of HTML",
        doc.len(),
        body.len()
    );

    let mut page = String::with_capacity(body.len() + styles.len() + 128);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
    page.push_str(&styles);
    page.push_str("</style>\n</head>\n<body>\n");
    page.push_str(&body);
    page.push_str("</body>\n</html>\n");
    Ok(page)
}
