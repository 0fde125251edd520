use crate::parsing::span::Span;

/// A parsed inline node with byte spans into its line.
///
/// Every variant except `Text` carries the `full` span including
/// delimiters and the `inner` span of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineNode {
    /// Plain text between other constructs.
    Text(Span),
    /// `\x`: `inner` is the escaped character.
    Escape { full: Span, inner: Span },
    /// `@image[[name]]`
    ImageRef { full: Span, inner: Span },
    /// `@table[[name]]`
    TableRef { full: Span, inner: Span },
    /// `@code[[name]]`
    CodeRef { full: Span, inner: Span },
    /// `@[[key]]`
    Citation { full: Span, inner: Span },
    /// `**text**`
    Bold { full: Span, inner: Span },
    /// `*text*`
    Italic { full: Span, inner: Span },
    /// `` `code` ``
    CodeSpan { full: Span, inner: Span },
}

impl InlineNode {
    /// The full span, delimiters included.
    pub fn span(&self) -> Span {
        match *self {
            InlineNode::Text(span) => span,
            InlineNode::Escape { full, .. }
            | InlineNode::ImageRef { full, .. }
            | InlineNode::TableRef { full, .. }
            | InlineNode::CodeRef { full, .. }
            | InlineNode::Citation { full, .. }
            | InlineNode::Bold { full, .. }
            | InlineNode::Italic { full, .. }
            | InlineNode::CodeSpan { full, .. } => full,
        }
    }
}
