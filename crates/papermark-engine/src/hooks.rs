//! Extension hooks run around [`Document::parse`](crate::Document::parse).
//!
//! Pre-parse hooks run before the first line is read, typically to register
//! style kinds that front matter may then override. Post-parse hooks see
//! the finished tree and citation list and may append derived content.
//! Both lists run in registration order; the first failing hook aborts the
//! parse.

use std::fmt;

use crate::document::Document;

pub type Hook = Box<dyn Fn(&mut Document) -> anyhow::Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    PreParse,
    PostParse,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookStage::PreParse => "pre-parse",
            HookStage::PostParse => "post-parse",
        })
    }
}

#[derive(Default)]
pub(crate) struct Hooks {
    pre_parse: Vec<Hook>,
    post_parse: Vec<Hook>,
}

impl Hooks {
    pub(crate) fn push(&mut self, stage: HookStage, hook: Hook) {
        self.list_mut(stage).push(hook);
    }

    pub(crate) fn list_mut(&mut self, stage: HookStage) -> &mut Vec<Hook> {
        match stage {
            HookStage::PreParse => &mut self.pre_parse,
            HookStage::PostParse => &mut self.post_parse,
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("pre_parse", &self.pre_parse.len())
            .field("post_parse", &self.post_parse.len())
            .finish()
    }
}
