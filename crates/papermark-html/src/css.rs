//! Style records as CSS.
//!
//! Every built-in kind that has an HTML counterpart gets one rule in the
//! document's `<style>` block. Nodes carrying their own record (such as
//! generated reference entries) get the same declarations as an inline
//! `style` attribute instead.

use std::fmt::Write;

use papermark_config::{BlockAlignment, StyleConfig, StyleKind, StyleRecord};

/// The CSS selector a kind's rule is emitted under.
pub fn selector(kind: &StyleKind) -> Option<&'static str> {
    let selector = match kind {
        StyleKind::Base => "body",
        StyleKind::Heading => "h1,h2,h3,h4,h5,h6",
        StyleKind::H1 => ".head1",
        StyleKind::H2 => ".head2",
        StyleKind::H3 => ".head3",
        StyleKind::H4 => ".head4",
        StyleKind::H5 => ".head5",
        StyleKind::H6 => ".head6",
        StyleKind::Paragraph => "p",
        StyleKind::Image => "img",
        StyleKind::ImageRef => ".image-ref",
        StyleKind::ImageLabel => ".image-label",
        StyleKind::Table => "table",
        StyleKind::TableLabel => ".table-label",
        StyleKind::TableRef => ".table-ref",
        StyleKind::TableCell => "td",
        StyleKind::TableHeadCell => "th",
        StyleKind::Code => "pre",
        StyleKind::CodeLabel => ".code-label",
        StyleKind::CodeRef => ".code-ref",
        StyleKind::All => "*",
        StyleKind::CodeSpan => "code",
        StyleKind::Extension(_) => return None,
    };
    Some(selector)
}

/// Ordered CSS declarations. Setting a property twice keeps the first
/// position and the last value.
#[derive(Debug, Default, PartialEq)]
pub struct Declarations(Vec<(&'static str, String)>);

impl Declarations {
    fn set(&mut self, property: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.0.push((property, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// `property: value;` pairs on one line, for a `style` attribute.
    pub fn inline(&self) -> String {
        self.0
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn declarations(record: &StyleRecord) -> Declarations {
    let mut css = Declarations::default();

    let fonts: Vec<String> = [&record.en_font, &record.cn_font]
        .into_iter()
        .flatten()
        .map(|font| format!("\"{font}\""))
        .collect();
    if !fonts.is_empty() {
        css.set("font-family", fonts.join(", "));
    }
    if let Some(width) = record.width {
        css.set("width", format!("{width}pt"));
    }
    if let Some(height) = record.height {
        css.set("height", format!("{height}pt"));
    }
    if let Some(color) = &record.color {
        css.set("color", color);
    }
    if let Some(size) = record.font_size {
        css.set("font-size", format!("{size}pt"));
    }
    if let Some(bold) = record.bold {
        css.set("font-weight", if bold { "bold" } else { "normal" });
    }
    if let Some(italic) = record.italic {
        css.set("font-style", if italic { "italic" } else { "normal" });
    }
    if let Some(indent) = record.first_line_indent {
        css.set("text-indent", format!("{indent}em"));
    }
    if let Some(spacing) = record.line_spacing {
        css.set("line-height", format!("{spacing}pt"));
    }
    if let Some(spacing) = record.line_spacing_type {
        css.set("line-height", spacing.as_str());
    }
    if let Some(alignment) = record.alignment {
        css.set("text-align", alignment.as_str());
    }
    match record.block_alignment {
        Some(BlockAlignment::Center) => css.set("margin", "0 auto"),
        Some(BlockAlignment::Right) => css.set("margin-left", "auto"),
        Some(BlockAlignment::Left) => css.set("margin-right", "auto"),
        None => {}
    }
    if let Some(width) = record.border_width {
        css.set("border-width", format!("{width}pt"));
    }
    if let Some(style) = record.border_style {
        css.set("border-style", style.as_str());
    }
    if let Some(color) = &record.border_color {
        css.set("border-color", color);
    }
    if let Some(collapse) = record.border_collapse {
        css.set("border-collapse", collapse.as_str());
    }
    if let Some(display) = record.display {
        css.set("display", display.as_str());
    }
    if let Some(margin) = &record.margin {
        css.set("margin", margin);
    }
    if let Some(padding) = &record.padding {
        css.set("padding", padding);
    }
    if let Some(background) = &record.background {
        css.set("background-color", background);
    }
    css
}

/// The contents of the `<style>` element for a configuration.
pub fn stylesheet(config: &StyleConfig) -> String {
    let mut out = String::new();
    for entry in config.iter() {
        let Some(selector) = selector(entry.kind()) else {
            continue;
        };
        let _ = writeln!(out, "{selector} {{");
        for (property, value) in &declarations(entry.record()).0 {
            let _ = writeln!(out, "{property}: {value};");
        }
        out.push_str("}\n");
    }
    out
}
