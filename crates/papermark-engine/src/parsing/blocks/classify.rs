use crate::parsing::macros::Macro;

use super::kinds::{CodeFence, FenceKind, FrontMatter, Heading, ImageLine, TableRow};

/// What a line would start or be if read in the normal state. Checks run
/// in the order of the variants; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading { level: u8, title: &'a str },
    Image { name: &'a str, link: &'a str },
    TableRow,
    FrontMatterDelimiter,
    FenceOpen { kind: FenceKind, name: &'a str },
    Macro,
    Blank,
    Text,
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context. Whether a fence line closes a
/// code block or a `---` opens front matter is decided by the builder.
#[derive(Debug, Clone, Copy)]
pub struct LineClass<'a> {
    /// 1-based line number.
    pub number: usize,
    /// The line as written, without its line ending.
    pub raw: &'a str,
    /// The line with surrounding whitespace removed.
    pub trimmed: &'a str,
    pub kind: LineKind<'a>,
}

/// Classifies individual lines for the block parsing phase.
pub struct LineClassifier;

impl LineClassifier {
    pub fn classify<'a>(&self, number: usize, line: &'a str) -> LineClass<'a> {
        let raw = line.trim_end_matches(['\r', '\n']);
        let trimmed = raw.trim();

        LineClass {
            number,
            raw,
            trimmed,
            kind: Self::kind(trimmed),
        }
    }

    fn kind(trimmed: &str) -> LineKind<'_> {
        if let Some((level, title)) = Heading::parse(trimmed) {
            LineKind::Heading { level, title }
        } else if let Some((name, link)) = ImageLine::parse(trimmed) {
            LineKind::Image { name, link }
        } else if TableRow::is_row(trimmed) {
            LineKind::TableRow
        } else if FrontMatter::is_delimiter(trimmed) {
            LineKind::FrontMatterDelimiter
        } else if let Some((kind, name)) = CodeFence::open(trimmed) {
            LineKind::FenceOpen { kind, name }
        } else if Macro::is_macro_line(trimmed) {
            LineKind::Macro
        } else if trimmed.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Text
        }
    }
}
