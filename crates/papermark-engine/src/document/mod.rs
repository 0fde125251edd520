//! # Document tree
//!
//! The parsed document lives in a flat arena of [`Node`]s addressed by
//! [`NodeId`]. Parents own their children through `children` lists; the
//! `parent` link is only used for ancestor walks (section chains,
//! placeholders) and never for ownership.
//!
//! Besides the tree, a [`Document`] owns everything a renderer needs to
//! resolve references: the active [`StyleConfig`], the image/table/code
//! name tables, and the ordered citation list.
//!
//! ## Numbering
//!
//! - Sections are numbered when appended: 1 + the number of same-level
//!   sections already under the same parent. Nothing is renumbered later.
//! - Images, tables and code blocks get a document-wide sequence number per
//!   kind. Duplicate names still consume a number; the name table keeps the
//!   last registration.
//! - Citations are numbered by their position in the citation list.
//!   Repeated keys are not merged.

mod node;
mod node_ref;
mod placeholders;

pub use node::{Citation, Code, Image, Node, NodeId, NodeKind, Section, Table};
pub use node_ref::NodeRef;
pub use placeholders::Placeholders;

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;

use log::debug;
use papermark_config::{StyleConfig, StyleKind, StyleRecord};

use crate::error::ParseError;
use crate::hooks::{Hook, HookStage, Hooks};
use crate::parsing::inline::{InlineNode, parse_inline};
use crate::parsing::macros::MacroArgs;

pub struct Document {
    nodes: Vec<Node>,
    style: StyleConfig,
    images: HashMap<String, NodeId>,
    tables: HashMap<String, NodeId>,
    codes: HashMap<String, NodeId>,
    image_count: usize,
    table_count: usize,
    code_count: usize,
    citations: Vec<String>,
    hooks: Hooks,
}

impl Document {
    pub fn new() -> Self {
        Self::with_style(StyleConfig::new())
    }

    pub fn with_style(style: StyleConfig) -> Self {
        let root = Node::new(None, NodeKind::Section(Section { level: 0, number: 1 }), None);
        Self {
            nodes: vec![root],
            style,
            images: HashMap::new(),
            tables: HashMap::new(),
            codes: HashMap::new(),
            image_count: 0,
            table_count: 0,
            code_count: 0,
            citations: Vec::new(),
            hooks: Hooks::default(),
        }
    }

    /// Parses `text` into this document: pre-parse hooks, the line parser,
    /// then post-parse hooks. Any error aborts the whole parse and leaves
    /// the tree, style, name tables and citations as they were before.
    pub fn parse(&mut self, text: &str) -> Result<(), ParseError> {
        let checkpoint = self.checkpoint();
        let result = self
            .run_hooks(HookStage::PreParse)
            .and_then(|()| crate::parsing::parse_into(self, text))
            .and_then(|()| self.run_hooks(HookStage::PostParse));
        if result.is_err() {
            debug!("parse failed, rolling back to {} node(s)", checkpoint.nodes.len());
            self.restore(checkpoint);
        }
        result
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            nodes: self.nodes.clone(),
            style: self.style.clone(),
            images: self.images.clone(),
            tables: self.tables.clone(),
            codes: self.codes.clone(),
            counts: (self.image_count, self.table_count, self.code_count),
            citations: self.citations.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.nodes = checkpoint.nodes;
        self.style = checkpoint.style;
        self.images = checkpoint.images;
        self.tables = checkpoint.tables;
        self.codes = checkpoint.codes;
        (self.image_count, self.table_count, self.code_count) = checkpoint.counts;
        self.citations = checkpoint.citations;
    }

    pub fn add_pre_parse_hook<F>(&mut self, hook: F)
    where
        F: Fn(&mut Document) -> anyhow::Result<()> + 'static,
    {
        self.hooks.push(HookStage::PreParse, Box::new(hook));
    }

    pub fn add_post_parse_hook<F>(&mut self, hook: F)
    where
        F: Fn(&mut Document) -> anyhow::Result<()> + 'static,
    {
        self.hooks.push(HookStage::PostParse, Box::new(hook));
    }

    fn run_hooks(&mut self, stage: HookStage) -> Result<(), ParseError> {
        let hooks: Vec<Hook> = std::mem::take(self.hooks.list_mut(stage));
        debug!("running {} {stage} hook(s)", hooks.len());
        let result = hooks.iter().try_for_each(|hook| hook(self));
        // Hooks registered while running go after the existing ones.
        let added = std::mem::replace(self.hooks.list_mut(stage), hooks);
        self.hooks.list_mut(stage).extend(added);
        result.map_err(ParseError::Hook)
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn root(&self) -> NodeRef<'_> {
        self.node_ref(NodeId::ROOT)
    }

    /// # Panics
    /// If `id` was not produced by this document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef::new(self, id)
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node(NodeId::ROOT).children.is_empty()
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }

    pub fn image(&self, name: &str) -> Option<NodeRef<'_>> {
        self.images.get(name).map(|&id| self.node_ref(id))
    }

    pub fn table(&self, name: &str) -> Option<NodeRef<'_>> {
        self.tables.get(name).map(|&id| self.node_ref(id))
    }

    pub fn code(&self, name: &str) -> Option<NodeRef<'_>> {
        self.codes.get(name).map(|&id| self.node_ref(id))
    }

    /// Citation keys in order of appearance, repeats included.
    pub fn citations(&self) -> &[String] {
        &self.citations
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Appends a raw node. Callers are responsible for numbering and name
    /// registration; prefer the `append_*` builders.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind, args: Option<MacroArgs>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(Some(parent), kind, args));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// The section a new level-`level` section opened from `from` belongs
    /// under: the nearest section (from `from` upward) with a lower level.
    pub fn open_section_parent(&self, from: NodeId, level: u8) -> NodeId {
        let mut cur = self.enclosing_section(from);
        while let Some(parent) = self.node(cur).parent {
            match &self.node(cur).kind {
                NodeKind::Section(s) if s.level >= level => cur = parent,
                _ => break,
            }
        }
        cur
    }

    /// Opens a section at `level` (1-6) relative to the section containing
    /// `from`, numbers it among its same-level siblings, and gives it a
    /// [`NodeKind::Title`] child.
    pub fn append_section(
        &mut self,
        from: NodeId,
        level: u8,
        title: &str,
        args: Option<MacroArgs>,
    ) -> NodeId {
        debug_assert!((1..=6).contains(&level), "section level {level} out of range");
        let parent = self.open_section_parent(from, level);
        let number = 1 + self
            .node(parent)
            .children
            .iter()
            .filter(|&&c| matches!(&self.node(c).kind, NodeKind::Section(s) if s.level == level))
            .count();
        let section = self.append(parent, NodeKind::Section(Section { level, number }), args);
        self.append(section, NodeKind::Title(title.to_string()), None);
        section
    }

    /// Appends a paragraph holding the inline spans of `text`. Citations
    /// found in it are registered.
    pub fn append_paragraph(
        &mut self,
        parent: NodeId,
        text: &str,
        args: Option<MacroArgs>,
    ) -> NodeId {
        let paragraph = self.append(parent, NodeKind::Paragraph, args);
        self.append_inline(paragraph, text);
        paragraph
    }

    pub fn append_image(
        &mut self,
        parent: NodeId,
        name: &str,
        link: &str,
        args: Option<MacroArgs>,
    ) -> NodeId {
        self.image_count += 1;
        let kind = NodeKind::Image(Image {
            name: name.to_string(),
            link: link.to_string(),
            number: self.image_count,
        });
        let id = self.append(parent, kind, args);
        register(&mut self.images, "image", name, id);
        id
    }

    pub fn append_code(
        &mut self,
        parent: NodeId,
        name: &str,
        lines: Vec<String>,
        args: Option<MacroArgs>,
    ) -> NodeId {
        self.code_count += 1;
        let kind = NodeKind::Code(Code {
            name: name.to_string(),
            lines,
            number: self.code_count,
        });
        let id = self.append(parent, kind, args);
        register(&mut self.codes, "code", name, id);
        id
    }

    /// Appends a table with one head row and `rows` data rows. Each cell's
    /// text is parsed for inline spans. Row widths are not checked here.
    pub fn append_table(
        &mut self,
        parent: NodeId,
        name: &str,
        head: &[String],
        rows: &[Vec<String>],
        args: Option<MacroArgs>,
    ) -> NodeId {
        self.table_count += 1;
        let kind = NodeKind::Table(Table {
            name: name.to_string(),
            number: self.table_count,
            columns: head.len(),
            rows: rows.len(),
        });
        let table = self.append(parent, kind, args);

        let head_row = self.append(table, NodeKind::TableHead, None);
        for cell in head {
            let id = self.append(head_row, NodeKind::TableHeadCell, None);
            self.append_inline(id, cell);
        }
        for row in rows {
            let row_id = self.append(table, NodeKind::TableRow, None);
            for cell in row {
                let id = self.append(row_id, NodeKind::TableCell, None);
                self.append_inline(id, cell);
            }
        }

        register(&mut self.tables, "table", name, table);
        table
    }

    /// Attaches a style record to one node; it takes precedence over the
    /// configuration lookup in [`Document::style_for`].
    pub fn set_node_style(&mut self, id: NodeId, record: StyleRecord) {
        self.nodes[id.0].style = Some(record);
    }

    /// Appends `key` to the citation list and returns its number.
    pub fn cite(&mut self, key: &str) -> usize {
        self.citations.push(key.to_string());
        self.citations.len()
    }

    fn append_inline(&mut self, parent: NodeId, text: &str) {
        for inline in parse_inline(text) {
            let kind = match inline {
                InlineNode::Text(span) => NodeKind::Text(span.slice(text).to_string()),
                InlineNode::Escape { inner, .. } => NodeKind::Escape(inner.slice(text).to_string()),
                InlineNode::ImageRef { inner, .. } => {
                    NodeKind::ImageRef(inner.slice(text).to_string())
                }
                InlineNode::TableRef { inner, .. } => {
                    NodeKind::TableRef(inner.slice(text).to_string())
                }
                InlineNode::CodeRef { inner, .. } => {
                    NodeKind::CodeRef(inner.slice(text).to_string())
                }
                InlineNode::Citation { inner, .. } => {
                    let key = inner.slice(text);
                    let number = self.cite(key);
                    NodeKind::Ref(Citation {
                        key: key.to_string(),
                        number,
                    })
                }
                InlineNode::Bold { inner, .. } => NodeKind::Bold(inner.slice(text).to_string()),
                InlineNode::Italic { inner, .. } => NodeKind::Italic(inner.slice(text).to_string()),
                InlineNode::CodeSpan { inner, .. } => {
                    NodeKind::CodeSpan(inner.slice(text).to_string())
                }
            };
            self.append(parent, kind, None);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All node ids below `from` in depth-first pre-order, `from` excluded.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(from).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    /// First node in document order (depth-first) matching `pred`.
    pub fn find<P>(&self, pred: P) -> Option<NodeRef<'_>>
    where
        P: Fn(NodeRef<'_>) -> bool,
    {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .map(|id| self.node_ref(id))
            .find(|n| pred(*n))
    }

    /// The style kind a node is looked up under, if it is styled at all.
    pub fn style_kind(&self, id: NodeId) -> Option<StyleKind> {
        match &self.node(id).kind {
            NodeKind::Title(_) => {
                let section = self.enclosing_section(id);
                match &self.node(section).kind {
                    NodeKind::Section(s) => StyleKind::heading(s.level),
                    _ => None,
                }
            }
            NodeKind::Paragraph => Some(StyleKind::Paragraph),
            NodeKind::Image(_) => Some(StyleKind::Image),
            NodeKind::ImageRef(_) => Some(StyleKind::ImageRef),
            NodeKind::Table(_) => Some(StyleKind::Table),
            NodeKind::TableRef(_) => Some(StyleKind::TableRef),
            NodeKind::TableCell => Some(StyleKind::TableCell),
            NodeKind::TableHeadCell => Some(StyleKind::TableHeadCell),
            NodeKind::Code(_) => Some(StyleKind::Code),
            NodeKind::CodeRef(_) => Some(StyleKind::CodeRef),
            NodeKind::CodeSpan(_) => Some(StyleKind::CodeSpan),
            _ => None,
        }
    }

    /// The merged style record for a node: its own record if one was
    /// attached, otherwise its kind's record from the configuration.
    pub fn style_for(&self, id: NodeId) -> Option<&StyleRecord> {
        if let Some(record) = &self.node(id).style {
            return Some(record);
        }
        self.style_kind(id).and_then(|kind| self.style.get(&kind))
    }

    /// The nearest section containing `id`, or `id` itself if it is one.
    pub fn enclosing_section(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        loop {
            let node = self.node(cur);
            if matches!(node.kind, NodeKind::Section(_)) {
                return cur;
            }
            match node.parent {
                Some(parent) => cur = parent,
                None => return NodeId::ROOT,
            }
        }
    }

    /// Sections from the outermost one down to the section enclosing `id`.
    /// The root is excluded, so a level-L section's chain has L entries.
    pub fn section_chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cur = Some(self.enclosing_section(id));
        while let Some(section) = cur {
            if section == NodeId::ROOT {
                break;
            }
            chain.push(section);
            cur = self.node(section).parent;
        }
        chain.reverse();
        chain
    }

    /// Values for the node's `format` string: `s0..s5`, `text`, `gi`.
    pub fn placeholders(&self, id: NodeId) -> Placeholders {
        let mut values = Placeholders::new();
        for section in self.section_chain(id) {
            if let NodeKind::Section(s) = &self.node(section).kind {
                values.insert(format!("s{}", s.level - 1), s.number);
            }
        }
        let kind = &self.node(id).kind;
        if let Some(text) = kind.text() {
            values.insert("text", text);
        }
        if let Some(number) = kind.number() {
            values.insert("gi", number);
        }
        values
    }

    /// Indented dump of the tree, one node per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, NodeId::ROOT, 0);
        out
    }

    fn write_outline(&self, out: &mut String, id: NodeId, depth: usize) {
        for &child in &self.node(id).children {
            let _ = writeln!(out, "{:indent$}{}", "", self.node(child).kind, indent = depth * 2);
            self.write_outline(out, child, depth + 1);
        }
    }
}

/// Everything [`Document::parse`] may change, except the hook lists.
struct Checkpoint {
    nodes: Vec<Node>,
    style: StyleConfig,
    images: HashMap<String, NodeId>,
    tables: HashMap<String, NodeId>,
    codes: HashMap<String, NodeId>,
    counts: (usize, usize, usize),
    citations: Vec<String>,
}

fn register(table: &mut HashMap<String, NodeId>, what: &str, name: &str, id: NodeId) {
    if table.insert(name.to_string(), id).is_some() {
        debug!("{what} `{name}` registered again; references now point at the later one");
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("images", &self.images)
            .field("tables", &self.tables)
            .field("codes", &self.codes)
            .field("citations", &self.citations)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section_numbers(doc: &Document) -> Vec<(u8, usize)> {
        doc.descendants(NodeId::ROOT)
            .into_iter()
            .filter_map(|id| match doc.node(id).kind() {
                NodeKind::Section(s) => Some((s.level, s.number)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_document_has_only_root() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
        assert_eq!(doc.root().level(), Some(0));
    }

    #[test]
    fn sections_number_among_same_level_siblings() {
        let mut doc = Document::new();
        let ch1 = doc.append_section(NodeId::ROOT, 1, "One", None);
        let a = doc.append_section(ch1, 2, "A", None);
        let b = doc.append_section(a, 2, "B", None);
        doc.append_section(b, 3, "B.1", None);
        let ch2 = doc.append_section(b, 1, "Two", None);
        doc.append_section(ch2, 2, "C", None);

        assert_eq!(
            section_numbers(&doc),
            vec![(1, 1), (2, 1), (2, 2), (3, 1), (1, 2), (2, 1)]
        );
    }

    #[test]
    fn skipped_level_attaches_to_nearest_lower_section() {
        let mut doc = Document::new();
        let ch = doc.append_section(NodeId::ROOT, 1, "One", None);
        let deep = doc.append_section(ch, 3, "Deep", None);
        assert_eq!(doc.node(deep).parent(), Some(ch));
        assert_eq!(doc.section_chain(deep), vec![ch, deep]);
    }

    #[test]
    fn duplicate_names_keep_both_nodes_and_last_registration() {
        let mut doc = Document::new();
        let first = doc.append_code(NodeId::ROOT, "go", vec![], None);
        let second = doc.append_code(NodeId::ROOT, "go", vec![], None);

        assert_eq!(doc.node(first).kind().number(), Some(1));
        assert_eq!(doc.node(second).kind().number(), Some(2));
        assert_eq!(doc.code("go").map(|n| n.id()), Some(second));
    }

    #[test]
    fn repeated_citations_get_distinct_numbers() {
        let mut doc = Document::new();
        doc.append_paragraph(NodeId::ROOT, "see @[[knuth]] and @[[knuth]]", None);

        let numbers: Vec<usize> = doc
            .descendants(NodeId::ROOT)
            .into_iter()
            .filter_map(|id| match doc.node(id).kind() {
                NodeKind::Ref(c) => Some(c.number),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(doc.citations(), ["knuth", "knuth"]);
    }

    #[test]
    fn placeholders_follow_section_chain() {
        let mut doc = Document::new();
        let ch = doc.append_section(NodeId::ROOT, 1, "Intro", None);
        doc.append_section(ch, 2, "Skip", None);
        let sec = doc.append_section(ch, 2, "Method", None);
        let image = doc.append_image(sec, "fig", "a.png", None);

        let values = doc.placeholders(image);
        assert_eq!(values.get("s0"), Some("1"));
        assert_eq!(values.get("s1"), Some("2"));
        assert_eq!(values.get("text"), Some("fig"));
        assert_eq!(values.get("gi"), Some("1"));
        assert_eq!(values.get("s2"), None);
    }

    #[test]
    fn style_lookup_prefers_node_record() {
        let mut doc = Document::new();
        let p = doc.append_paragraph(NodeId::ROOT, "text", None);
        assert_eq!(doc.style_for(p).and_then(|r| r.first_line_indent), Some(2));

        doc.set_node_style(
            p,
            StyleRecord {
                first_line_indent: Some(0),
                ..Default::default()
            },
        );
        assert_eq!(doc.style_for(p).and_then(|r| r.first_line_indent), Some(0));
    }

    #[test]
    fn unstyled_kinds_have_no_record() {
        let mut doc = Document::new();
        let p = doc.append_paragraph(NodeId::ROOT, "plain **bold**", None);
        let children = doc.node(p).children().to_vec();
        assert!(doc.style_for(children[0]).is_none());
        assert!(doc.style_for(children[1]).is_none());
        assert!(doc.style_for(NodeId::ROOT).is_none());
    }

    #[test]
    fn find_searches_depth_first() {
        let mut doc = Document::new();
        let ch1 = doc.append_section(NodeId::ROOT, 1, "One", None);
        doc.append_section(ch1, 2, "Nested", None);
        doc.append_section(ch1, 1, "Two", None);

        let found = doc
            .find(|n| n.level() == Some(2))
            .and_then(|n| n.title().map(str::to_string));
        assert_eq!(found.as_deref(), Some("Nested"));
    }

    #[test]
    fn pre_parse_hooks_run_before_post_parse_hooks() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let order = Rc::new(RefCell::new(Vec::new()));
        let mut doc = Document::new();
        let o = Rc::clone(&order);
        doc.add_post_parse_hook(move |_| {
            o.borrow_mut().push("post");
            Ok(())
        });
        let o = Rc::clone(&order);
        doc.add_pre_parse_hook(move |_| {
            o.borrow_mut().push("pre");
            Ok(())
        });

        doc.parse("text\n").unwrap();
        assert_eq!(*order.borrow(), vec!["pre", "post"]);
    }

    #[test]
    fn failing_hook_aborts_parse() {
        let mut doc = Document::new();
        doc.add_pre_parse_hook(|_| anyhow::bail!("no thanks"));
        let err = doc.parse("# Title\n").unwrap_err();
        assert!(matches!(err, ParseError::Hook(_)));
        assert!(doc.is_empty());
    }

    #[test]
    fn failed_parse_leaves_document_untouched() {
        let mut doc = Document::new();
        doc.parse("# Kept\n![kept](k.png)\n").unwrap();
        let before = doc.outline();

        let err = doc
            .parse("---\nh2:\n  color: red\n---\n## Lost\n![lost](l.png)\nsee @[[cite]]\n| a |\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::TableNameRequired { line: 8 }));

        assert_eq!(doc.outline(), before);
        assert!(doc.image("lost").is_none());
        assert!(doc.image("kept").is_some());
        assert!(doc.citations().is_empty());
        assert_eq!(doc.style().get(&StyleKind::H2).and_then(|r| r.color.as_deref()), None);

        doc.parse("![next](n.png)\n").unwrap();
        assert_eq!(doc.image("next").and_then(|n| n.kind().number()), Some(2));
    }

    #[test]
    fn failing_post_parse_hook_rolls_back_the_tree() {
        let mut doc = Document::new();
        doc.add_post_parse_hook(|_| anyhow::bail!("late failure"));
        let err = doc.parse("# Title\n@[[k]]\n").unwrap_err();
        assert!(matches!(err, ParseError::Hook(_)));
        assert!(doc.is_empty());
        assert!(doc.citations().is_empty());
    }
}
