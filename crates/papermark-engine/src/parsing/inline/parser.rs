use crate::error::RefKind;
use crate::parsing::span::Span;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, CrossRef, Emphasis, Escape},
    types::InlineNode,
};

/// Parses one line into a sequence of [`InlineNode`]s covering all of it.
///
/// Spans are byte offsets into `s`.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        let node = try_parse_escape(&mut cur)
            .or_else(|| try_parse_cross_ref(&mut cur))
            .or_else(|| try_parse_emphasis(&mut cur))
            .or_else(|| try_parse_code_span(&mut cur));
        match node {
            Some(node) => {
                flush_text(&mut out, text_start, node.span().start);
                text_start = node.span().end;
                out.push(node);
            }
            None => {
                cur.bump();
            }
        }
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

/// `\` plus one character. A trailing backslash is plain text.
fn try_parse_escape(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Escape::BACKSLASH) {
        return None;
    }
    let start = cur.pos();
    let mut probe = cur.clone();
    probe.bump();
    let escaped = probe.peek_char()?;
    let inner = Span {
        start: probe.pos(),
        end: probe.pos() + escaped.len_utf8(),
    };
    cur.bump_n(1 + escaped.len_utf8());
    Some(InlineNode::Escape {
        full: Span {
            start,
            end: inner.end,
        },
        inner,
    })
}

/// `@image[[..]]`, `@table[[..]]`, `@code[[..]]` or `@[[..]]`, closed by the
/// first `]]`.
fn try_parse_cross_ref(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let (opener, kind) = CrossRef::OPENERS
        .into_iter()
        .find(|(opener, _)| cur.starts_with(opener))?;

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(opener.len());
    let inner_start = cur.pos();
    cur.eat_until_seq(CrossRef::CLOSE);
    if !cur.starts_with(CrossRef::CLOSE) {
        *cur = saved;
        return None;
    }
    let inner = Span {
        start: inner_start,
        end: cur.pos(),
    };
    cur.bump_n(CrossRef::CLOSE.len());
    let full = Span {
        start,
        end: cur.pos(),
    };

    Some(match kind {
        Some(RefKind::Image) => InlineNode::ImageRef { full, inner },
        Some(RefKind::Table) => InlineNode::TableRef { full, inner },
        Some(RefKind::Code) => InlineNode::CodeRef { full, inner },
        None => InlineNode::Citation { full, inner },
    })
}

/// `**text**` or `*text*`, where `text` is non-empty and has no `*`.
fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Emphasis::STAR) {
        return None;
    }
    let strong = cur.starts_with(Emphasis::STRONG);
    let width = if strong { Emphasis::STRONG.len() } else { 1 };

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(width);
    let inner_start = cur.pos();
    cur.eat_until(Emphasis::STAR);
    let inner = Span {
        start: inner_start,
        end: cur.pos(),
    };

    let closed = if strong {
        cur.starts_with(Emphasis::STRONG)
    } else {
        cur.peek() == Some(Emphasis::STAR)
    };
    if inner.is_empty() || !closed {
        *cur = saved;
        return None;
    }
    cur.bump_n(width);
    let full = Span {
        start,
        end: cur.pos(),
    };

    Some(if strong {
        InlineNode::Bold { full, inner }
    } else {
        InlineNode::Italic { full, inner }
    })
}

/// `` `code` `` with non-empty content.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump();
    let inner_start = cur.pos();
    cur.eat_until(CodeSpan::TICK);
    let inner = Span {
        start: inner_start,
        end: cur.pos(),
    };

    if inner.is_empty() || cur.peek() != Some(CodeSpan::TICK) {
        *cur = saved;
        return None;
    }
    cur.bump();

    Some(InlineNode::CodeSpan {
        full: Span {
            start,
            end: cur.pos(),
        },
        inner,
    })
}
