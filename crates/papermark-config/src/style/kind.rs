use std::fmt;

use super::record::{
    Alignment, BlockAlignment, BorderCollapse, BorderStyle, DisplayMode, LineSpacing, StyleRecord,
};

/// Key of one style record.
///
/// Built-in kinds cover every styled node of the document model plus a few
/// renderer-facing kinds (labels, `base`, `all`). Extensions register
/// further kinds at runtime as [`StyleKind::Extension`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleKind {
    Base,
    Heading,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Paragraph,
    Image,
    ImageRef,
    ImageLabel,
    Table,
    TableLabel,
    TableRef,
    TableCell,
    TableHeadCell,
    Code,
    CodeLabel,
    CodeRef,
    All,
    CodeSpan,
    Extension(String),
}

impl StyleKind {
    /// Built-in kinds in registration order.
    pub const BUILTIN: [StyleKind; 22] = [
        StyleKind::Base,
        StyleKind::Heading,
        StyleKind::H1,
        StyleKind::H2,
        StyleKind::H3,
        StyleKind::H4,
        StyleKind::H5,
        StyleKind::H6,
        StyleKind::Paragraph,
        StyleKind::Image,
        StyleKind::ImageRef,
        StyleKind::ImageLabel,
        StyleKind::Table,
        StyleKind::TableRef,
        StyleKind::TableLabel,
        StyleKind::TableCell,
        StyleKind::TableHeadCell,
        StyleKind::Code,
        StyleKind::CodeLabel,
        StyleKind::CodeRef,
        StyleKind::All,
        StyleKind::CodeSpan,
    ];

    /// The key used for this kind in YAML overrides.
    pub fn key(&self) -> &str {
        match self {
            StyleKind::Base => "base",
            StyleKind::Heading => "heading",
            StyleKind::H1 => "h1",
            StyleKind::H2 => "h2",
            StyleKind::H3 => "h3",
            StyleKind::H4 => "h4",
            StyleKind::H5 => "h5",
            StyleKind::H6 => "h6",
            StyleKind::Paragraph => "paragraph",
            StyleKind::Image => "image",
            StyleKind::ImageRef => "imageRef",
            StyleKind::ImageLabel => "imageLabel",
            StyleKind::Table => "table",
            StyleKind::TableLabel => "tableLabel",
            StyleKind::TableRef => "tableRef",
            StyleKind::TableCell => "tableCell",
            StyleKind::TableHeadCell => "tableHeadCell",
            StyleKind::Code => "code",
            StyleKind::CodeLabel => "codeLabel",
            StyleKind::CodeRef => "codeRef",
            StyleKind::All => "all",
            StyleKind::CodeSpan => "codeSpan",
            StyleKind::Extension(key) => key,
        }
    }

    /// Heading kind for a section level (1-6).
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(StyleKind::H1),
            2 => Some(StyleKind::H2),
            3 => Some(StyleKind::H3),
            4 => Some(StyleKind::H4),
            5 => Some(StyleKind::H5),
            6 => Some(StyleKind::H6),
            _ => None,
        }
    }

    /// The built-in default record, `None` for extension kinds.
    pub fn builtin_default(&self) -> Option<StyleRecord> {
        let record = match self {
            StyleKind::Base => StyleRecord {
                font_size: Some(14),
                en_font: Some("Times New Roman".into()),
                cn_font: Some("宋体".into()),
                bold: Some(false),
                italic: Some(false),
                alignment: Some(Alignment::Justify),
                first_line_indent: Some(0),
                line_spacing_type: Some(LineSpacing::OneAndHalf),
                margin: Some("25pt 25pt".into()),
                padding: Some("0".into()),
                ..Default::default()
            },
            StyleKind::Heading => StyleRecord {
                font_size: Some(20),
                bold: Some(true),
                ..Default::default()
            },
            StyleKind::H1 => StyleRecord {
                font_size: Some(24),
                bold: Some(true),
                alignment: Some(Alignment::Center),
                format: Some("{text}".into()),
                ..Default::default()
            },
            StyleKind::H2 => format_only("{s1} {text}"),
            StyleKind::H3 => format_only("{s1}.{s2} {text}"),
            StyleKind::H4 => format_only("{s1}.{s2}.{s3} {text}"),
            StyleKind::H5 => format_only("{s1}.{s2}.{s3}.{s4} {text}"),
            StyleKind::H6 => format_only("{s1}.{s2}.{s3}.{s4}.{s5} {text}"),
            StyleKind::Paragraph => StyleRecord {
                first_line_indent: Some(2),
                ..Default::default()
            },
            StyleKind::Image => StyleRecord {
                block_alignment: Some(BlockAlignment::Center),
                display: Some(DisplayMode::Block),
                format: Some("图{gi} {text}".into()),
                ..Default::default()
            },
            StyleKind::ImageRef => format_only("图{gi}"),
            StyleKind::Table => StyleRecord {
                block_alignment: Some(BlockAlignment::Center),
                border_collapse: Some(BorderCollapse::Collapse),
                format: Some("表{gi} {text}".into()),
                ..bordered()
            },
            StyleKind::TableRef => format_only("表{gi}"),
            StyleKind::TableCell => bordered(),
            StyleKind::TableHeadCell => StyleRecord {
                bold: Some(true),
                ..bordered()
            },
            StyleKind::Code => StyleRecord {
                format: Some("代码{gi} {text}".into()),
                show_line_numbers: Some(false),
                ..bordered()
            },
            StyleKind::CodeRef => format_only("代码{gi}"),
            StyleKind::ImageLabel | StyleKind::TableLabel | StyleKind::CodeLabel => StyleRecord {
                alignment: Some(Alignment::Center),
                ..Default::default()
            },
            StyleKind::All => StyleRecord {
                margin: Some("0".into()),
                padding: Some("0".into()),
                ..Default::default()
            },
            StyleKind::CodeSpan => StyleRecord {
                background: Some("#e3e6e8".into()),
                ..Default::default()
            },
            StyleKind::Extension(_) => return None,
        };
        Some(record)
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn format_only(format: &str) -> StyleRecord {
    StyleRecord {
        format: Some(format.into()),
        ..Default::default()
    }
}

fn bordered() -> StyleRecord {
    StyleRecord {
        border_width: Some(1),
        border_style: Some(BorderStyle::Solid),
        border_color: Some("black".into()),
        ..Default::default()
    }
}
