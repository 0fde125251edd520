use papermark_config::StyleError;
use thiserror::Error;

/// Fatal problems found while parsing. Line numbers are 1-based.
///
/// Parsing is all-or-nothing: any of these aborts the whole document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed macro `{text}`: {reason}")]
    MalformedMacro {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("line {line}: invalid front matter: {source}")]
    FrontMatter {
        line: usize,
        #[source]
        source: StyleError,
    },

    #[error("line {line}: front matter is never closed with `---`")]
    UnterminatedFrontMatter { line: usize },

    #[error("line {line}: code block needs a name after the opening fence")]
    CodeNameRequired { line: usize },

    #[error("line {line}: table needs a name, e.g. `@table(name=\"results\")` before it")]
    TableNameRequired { line: usize },

    #[error("line {line}: table `{table}` row has {found} cells, expected {expected}")]
    RaggedTable {
        line: usize,
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("extension hook failed: {0}")]
    Hook(#[source] anyhow::Error),
}

/// Which name table a cross-reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Image,
    Table,
    Code,
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RefKind::Image => "image",
            RefKind::Table => "table",
            RefKind::Code => "code",
        })
    }
}

/// Problems that only surface once the complete tree is being rendered.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("no {kind} named `{name}` exists in this document")]
    UnresolvedReference { kind: RefKind, name: String },

    #[error("format `{template}` uses `{{{name}}}`, which is not available here")]
    UnknownPlaceholder { template: String, name: String },

    #[error("format `{template}` has an unbalanced `{{` or `}}`")]
    UnbalancedBraces { template: String },

    #[error("`{node}` has no `format` in its style")]
    MissingFormat { node: &'static str },
}
