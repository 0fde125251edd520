use std::fmt;

use papermark_config::StyleRecord;

use crate::parsing::macros::MacroArgs;

/// Index of a node in its [`Document`](super::Document) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The document root, a level-0 section.
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// 0 for the document root, 1-6 otherwise.
    pub level: u8,
    /// Position among same-level siblings, 1-based.
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub link: String,
    pub number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub name: String,
    pub lines: Vec<String>,
    pub number: usize,
}

impl Code {
    /// The code text as rendered: lines joined by `\n`, optionally prefixed
    /// with their 1-based line number.
    pub fn text(&self, line_numbers: bool) -> String {
        if !line_numbers {
            return self.lines.join("\n");
        }
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{} {line}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub number: usize,
    pub columns: usize,
    /// Data rows, excluding the head.
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub key: String,
    /// Position in the document's citation list, 1-based.
    pub number: usize,
}

/// What a node is, with its kind-specific payload.
///
/// Containers (sections, paragraphs, tables and their rows and cells) keep
/// their children in [`Node::children`]; everything else is a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Section(Section),
    Title(String),
    Paragraph,
    Image(Image),
    Code(Code),
    Table(Table),
    TableHead,
    TableRow,
    TableHeadCell,
    TableCell,
    Text(String),
    Italic(String),
    Bold(String),
    Escape(String),
    CodeSpan(String),
    ImageRef(String),
    TableRef(String),
    CodeRef(String),
    Ref(Citation),
}

impl NodeKind {
    /// The type name macros are matched against (case-insensitively).
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Section(_) => "Section",
            NodeKind::Title(_) => "Title",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Image(_) => "Image",
            NodeKind::Code(_) => "Code",
            NodeKind::Table(_) => "Table",
            NodeKind::TableHead => "TableHead",
            NodeKind::TableRow => "TableRow",
            NodeKind::TableHeadCell => "TableHeadCell",
            NodeKind::TableCell => "TableCell",
            NodeKind::Text(_) => "Text",
            NodeKind::Italic(_) => "ItalicSpan",
            NodeKind::Bold(_) => "BoldSpan",
            NodeKind::Escape(_) => "EscapeSpan",
            NodeKind::CodeSpan(_) => "CodeSpan",
            NodeKind::ImageRef(_) => "ImageRef",
            NodeKind::TableRef(_) => "TableRef",
            NodeKind::CodeRef(_) => "CodeRef",
            NodeKind::Ref(_) => "Ref",
        }
    }

    /// The value bound to `{text}` in format strings: a title's text, a
    /// block's name, a span's content or a citation key.
    pub fn text(&self) -> Option<&str> {
        match self {
            NodeKind::Title(text)
            | NodeKind::Text(text)
            | NodeKind::Italic(text)
            | NodeKind::Bold(text)
            | NodeKind::Escape(text)
            | NodeKind::CodeSpan(text)
            | NodeKind::ImageRef(text)
            | NodeKind::TableRef(text)
            | NodeKind::CodeRef(text) => Some(text),
            NodeKind::Image(image) => Some(&image.name),
            NodeKind::Code(code) => Some(&code.name),
            NodeKind::Table(table) => Some(&table.name),
            NodeKind::Ref(citation) => Some(&citation.key),
            NodeKind::Section(_)
            | NodeKind::Paragraph
            | NodeKind::TableHead
            | NodeKind::TableRow
            | NodeKind::TableHeadCell
            | NodeKind::TableCell => None,
        }
    }

    /// The sequence number of numbered kinds (bound to `{gi}`).
    pub fn number(&self) -> Option<usize> {
        match self {
            NodeKind::Section(section) => Some(section.number),
            NodeKind::Image(image) => Some(image.number),
            NodeKind::Code(code) => Some(code.number),
            NodeKind::Table(table) => Some(table.number),
            NodeKind::Ref(citation) => Some(citation.number),
            _ => None,
        }
    }
}

/// One line of the outline dump.
impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Section(s) => write!(f, "<Section level={} number={}>", s.level, s.number),
            NodeKind::Title(text) => write!(f, "<Title text={text}>"),
            NodeKind::Image(i) => write!(
                f,
                "<Image name={} link={} number={}>",
                i.name, i.link, i.number
            ),
            NodeKind::Code(c) => write!(
                f,
                "<Code name={} lines={} number={}>",
                c.name,
                c.lines.len(),
                c.number
            ),
            NodeKind::Table(t) => write!(
                f,
                "<Table name={} row={} col={} number={}>",
                t.name, t.rows, t.columns, t.number
            ),
            NodeKind::Text(text) => write!(f, "{text:?}"),
            NodeKind::Ref(c) => write!(f, "<Ref key={} number={}>", c.key, c.number),
            NodeKind::ImageRef(name) | NodeKind::TableRef(name) | NodeKind::CodeRef(name) => {
                write!(f, "<{} name={name}>", self.name())
            }
            NodeKind::Italic(text)
            | NodeKind::Bold(text)
            | NodeKind::Escape(text)
            | NodeKind::CodeSpan(text) => write!(f, "<{} text={text}>", self.name()),
            NodeKind::Paragraph
            | NodeKind::TableHead
            | NodeKind::TableRow
            | NodeKind::TableHeadCell
            | NodeKind::TableCell => write!(f, "<{}>", self.name()),
        }
    }
}

/// A node in the document arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
    pub(crate) args: Option<MacroArgs>,
    pub(crate) style: Option<StyleRecord>,
}

impl Node {
    pub(crate) fn new(parent: Option<NodeId>, kind: NodeKind, args: Option<MacroArgs>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            kind,
            args,
            style: None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Arguments of the macro that annotated this node, if any.
    pub fn args(&self) -> Option<&MacroArgs> {
        self.args.as_ref()
    }

    /// A record attached to this node directly, bypassing the style
    /// configuration lookup.
    pub fn style(&self) -> Option<&StyleRecord> {
        self.style.as_ref()
    }
}
