use log::{debug, warn};

use crate::document::{Document, NodeId};
use crate::error::ParseError;
use crate::parsing::macros::{Macro, MacroArgs, MacroValue};

use super::{
    classify::{LineClass, LineKind},
    kinds::{CodeFence, FenceKind, FrontMatter, TableRow},
};

#[derive(Debug)]
enum BlockState {
    Normal,
    FrontMatter {
        start_line: usize,
        lines: Vec<String>,
    },
    Code {
        start_line: usize,
        kind: FenceKind,
        name: String,
        lines: Vec<String>,
    },
    Table {
        start_line: usize,
        rows: Vec<String>,
    },
}

/// Phase 2 of block parsing: consumes classified lines and builds the
/// document tree as blocks open and close.
///
/// A pending macro is held as an explicit value and handed to whichever
/// block is constructed next; that block keeps its arguments only if its
/// node type matches.
pub struct BlockBuilder<'d> {
    doc: &'d mut Document,
    state: BlockState,
    container: NodeId,
    pending: Option<Macro>,
    front_matter_seen: bool,
    content_seen: bool,
}

impl<'d> BlockBuilder<'d> {
    pub fn new(doc: &'d mut Document) -> Self {
        Self {
            doc,
            state: BlockState::Normal,
            container: NodeId::ROOT,
            pending: None,
            front_matter_seen: false,
            content_seen: false,
        }
    }

    pub fn push(&mut self, line: &LineClass<'_>) -> Result<(), ParseError> {
        match &mut self.state {
            BlockState::FrontMatter { lines, .. } => {
                if FrontMatter::is_delimiter(line.trimmed) {
                    self.close_front_matter()?;
                } else {
                    lines.push(line.raw.to_string());
                }
                Ok(())
            }
            BlockState::Code { kind, lines, .. } => {
                if CodeFence::closes(*kind, line.trimmed) {
                    self.close_code();
                } else {
                    lines.push(line.raw.to_string());
                }
                Ok(())
            }
            BlockState::Table { rows, .. } => {
                if line.kind == LineKind::TableRow {
                    rows.push(line.trimmed.to_string());
                    Ok(())
                } else {
                    self.close_table()?;
                    self.push_normal(line)
                }
            }
            BlockState::Normal => self.push_normal(line),
        }
    }

    /// Closes whatever block is still open at end of input.
    pub fn finish(mut self) -> Result<(), ParseError> {
        match &self.state {
            BlockState::Normal => {}
            BlockState::FrontMatter { start_line, .. } => {
                return Err(ParseError::UnterminatedFrontMatter { line: *start_line });
            }
            BlockState::Code {
                start_line, name, ..
            } => {
                warn!("code block `{name}` opened on line {start_line} is never closed");
                self.close_code();
            }
            BlockState::Table { .. } => self.close_table()?,
        }
        if let Some(m) = self.pending.take() {
            debug!("dropping @{} macro at end of input", m.kind());
        }
        Ok(())
    }

    fn push_normal(&mut self, line: &LineClass<'_>) -> Result<(), ParseError> {
        match line.kind {
            LineKind::Blank => return Ok(()),
            LineKind::FrontMatterDelimiter if !self.front_matter_seen && !self.content_seen => {
                debug!("front matter opened on line {}", line.number);
                self.front_matter_seen = true;
                self.state = BlockState::FrontMatter {
                    start_line: line.number,
                    lines: Vec::new(),
                };
                return Ok(());
            }
            _ => {}
        }
        self.content_seen = true;

        match line.kind {
            LineKind::Heading { level, title } => {
                let args = self.take_args("Section");
                self.container = self.doc.append_section(self.container, level, title, args);
            }
            LineKind::Image { name, link } => {
                let args = self.take_args("Image");
                self.doc.append_image(self.container, name, link, args);
            }
            LineKind::TableRow => {
                self.state = BlockState::Table {
                    start_line: line.number,
                    rows: vec![line.trimmed.to_string()],
                };
            }
            LineKind::FenceOpen { kind, name } => {
                if name.is_empty() {
                    return Err(ParseError::CodeNameRequired { line: line.number });
                }
                self.state = BlockState::Code {
                    start_line: line.number,
                    kind,
                    name: name.to_string(),
                    lines: Vec::new(),
                };
            }
            LineKind::Macro => {
                let m = Macro::parse(line.trimmed).map_err(|e| ParseError::MalformedMacro {
                    line: line.number,
                    text: line.trimmed.to_string(),
                    reason: e.to_string(),
                })?;
                if let Some(old) = self.pending.replace(m) {
                    debug!("@{} macro replaced before use", old.kind());
                }
            }
            // A second `---`, or one after content, is ordinary text.
            LineKind::FrontMatterDelimiter | LineKind::Text => {
                let args = self.take_args("Paragraph");
                self.doc.append_paragraph(self.container, line.trimmed, args);
            }
            LineKind::Blank => {}
        }
        Ok(())
    }

    fn take_args(&mut self, node_name: &str) -> Option<MacroArgs> {
        self.pending.take()?.consume_for(node_name)
    }

    fn close_front_matter(&mut self) -> Result<(), ParseError> {
        let BlockState::FrontMatter { start_line, lines } =
            std::mem::replace(&mut self.state, BlockState::Normal)
        else {
            return Ok(());
        };
        let applied = self
            .doc
            .style_mut()
            .apply_yaml(&lines.join("\n"))
            .map_err(|source| ParseError::FrontMatter {
                line: start_line,
                source,
            })?;
        debug!(
            "front matter closed, {} style kind(s) overridden",
            applied.len()
        );
        Ok(())
    }

    fn close_code(&mut self) {
        let BlockState::Code { name, lines, .. } =
            std::mem::replace(&mut self.state, BlockState::Normal)
        else {
            return;
        };
        debug!("code block `{name}` closed with {} line(s)", lines.len());
        let args = self.take_args("Code");
        self.doc.append_code(self.container, &name, lines, args);
    }

    fn close_table(&mut self) -> Result<(), ParseError> {
        let BlockState::Table { start_line, rows } =
            std::mem::replace(&mut self.state, BlockState::Normal)
        else {
            return Ok(());
        };

        let args = self.take_args("Table");
        let name = match args.as_ref().and_then(|a| a.get("name")) {
            Some(MacroValue::Str(name)) if !name.is_empty() => name.clone(),
            Some(MacroValue::Int(n)) => n.to_string(),
            Some(MacroValue::Str(_)) | None => {
                return Err(ParseError::TableNameRequired { line: start_line });
            }
        };

        let mut lines = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (start_line + i, TableRow::cells(row)));
        let Some((_, head)) = lines.next() else {
            return Ok(());
        };
        let mut lines = lines.peekable();
        if lines.next_if(|(_, cells)| TableRow::is_delimiter(cells)).is_some() {
            debug!("table `{name}`: skipped delimiter row");
        }

        let mut data = Vec::new();
        for (line, cells) in lines {
            if cells.len() != head.len() {
                return Err(ParseError::RaggedTable {
                    line,
                    table: name,
                    expected: head.len(),
                    found: cells.len(),
                });
            }
            data.push(cells);
        }

        debug!(
            "table `{name}` closed: {} column(s), {} row(s)",
            head.len(),
            data.len()
        );
        self.doc
            .append_table(self.container, &name, &head, &data, args);
        Ok(())
    }
}
