//! Generated references section.
//!
//! Installs two hooks on a document:
//!
//! - before parsing, registers the `referencesList` style kind so front
//!   matter can override its `title` and `format`;
//! - after parsing, appends a level-2 section under the first level-1
//!   section with one paragraph per citation, in citation order.
//!
//! The entry format understands `{id}` (1-based position) and `{text}`
//! (the citation key).

use anyhow::Context;
use log::{debug, warn};
use papermark_config::{StyleKind, StyleRecord};

use crate::document::{Document, NodeKind, Placeholders};

pub const KIND: &str = "referencesList";
pub const DEFAULT_TITLE: &str = "参考文献";
pub const DEFAULT_FORMAT: &str = "[{id}] {text}";

pub fn style_kind() -> StyleKind {
    StyleKind::Extension(KIND.to_string())
}

/// The record registered for [`KIND`].
pub fn default_record() -> StyleRecord {
    let mut record = StyleRecord {
        word_wrap: Some(true),
        format: Some(DEFAULT_FORMAT.to_string()),
        ..Default::default()
    };
    record
        .extra
        .insert("title".to_string(), DEFAULT_TITLE.into());
    record
}

pub fn install(doc: &mut Document) {
    doc.add_pre_parse_hook(register_style);
    doc.add_post_parse_hook(append_references);
}

fn register_style(doc: &mut Document) -> anyhow::Result<()> {
    let kind = style_kind();
    if doc.style().contains(&kind) {
        return Ok(());
    }
    doc.style_mut()
        .register(kind, default_record())
        .context("registering the references list style")
}

fn append_references(doc: &mut Document) -> anyhow::Result<()> {
    let Some(chapter) = doc
        .find(|n| matches!(n.kind(), NodeKind::Section(s) if s.level == 1))
        .map(|n| n.id())
    else {
        warn!("no level-1 section to hold the references list; skipping it");
        return Ok(());
    };

    let record = doc
        .style()
        .get(&style_kind())
        .cloned()
        .unwrap_or_else(default_record);
    let title = record.extra_str("title").unwrap_or(DEFAULT_TITLE).to_string();
    let format = record.format.as_deref().unwrap_or(DEFAULT_FORMAT).to_string();

    let section = doc.append_section(chapter, 2, &title, None);
    let citations = doc.citations().to_vec();
    for (i, key) in citations.iter().enumerate() {
        let entry = Placeholders::new()
            .with("id", i + 1)
            .with("text", key)
            .format(&format)
            .with_context(|| format!("formatting reference entry for `{key}`"))?;
        let paragraph = doc.append_paragraph(section, &entry, None);
        doc.set_node_style(paragraph, record.clone());
    }
    debug!("appended references list with {} entries", citations.len());
    Ok(())
}
