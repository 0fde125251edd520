#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn delimiter(self) -> &'static str {
        match self {
            FenceKind::Backticks => CodeFence::BACKTICKS,
            FenceKind::Tildes => CodeFence::TILDES,
        }
    }
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// Recognizes an opening fence and splits off the block name, which is
    /// the trimmed rest of the line (possibly empty).
    pub fn open(trimmed: &str) -> Option<(FenceKind, &str)> {
        if let Some(rest) = trimmed.strip_prefix(Self::BACKTICKS) {
            Some((FenceKind::Backticks, rest.trim()))
        } else if let Some(rest) = trimmed.strip_prefix(Self::TILDES) {
            Some((FenceKind::Tildes, rest.trim()))
        } else {
            None
        }
    }

    /// Only a bare fence of the same kind closes a block.
    pub fn closes(kind: FenceKind, trimmed: &str) -> bool {
        trimmed == kind.delimiter()
    }
}
