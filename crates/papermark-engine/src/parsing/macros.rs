//! # Macro annotations
//!
//! A macro is a line of the form `@type(key=value,...)` (or `@type()`)
//! that attaches arguments to the block parsed right after it, provided
//! that block's node type matches `type` case-insensitively.
//!
//! Values are unsigned integers or single/double-quoted strings with
//! backslash escapes. A [`Macro`] is consumed by value, so its arguments
//! can reach at most one node.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use thiserror::Error;

const IDENT: &str = r"[a-zA-Z]+[a-zA-Z_-]*";
const VALUE: &str = r#""(?:\\.|[^\\"])*"|'(?:\\.|[^\\'])*'|\d+"#;

/// A single argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroValue {
    Int(u64),
    Str(String),
}

impl MacroValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MacroValue::Str(s) => Some(s),
            MacroValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            MacroValue::Int(n) => Some(*n),
            MacroValue::Str(_) => None,
        }
    }
}

impl fmt::Display for MacroValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroValue::Int(n) => write!(f, "{n}"),
            MacroValue::Str(s) => f.write_str(s),
        }
    }
}

pub type MacroArgs = BTreeMap<String, MacroValue>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MacroError {
    #[error("expected `@type(key=value,...)` with quoted strings or unsigned integers")]
    Syntax,
    #[error("integer `{0}` does not fit in 64 bits")]
    IntegerOverflow(String),
}

/// A parsed, not yet applied macro annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    kind: String,
    args: MacroArgs,
}

fn trigger_regex() -> &'static Regex {
    static TRIGGER: OnceLock<Regex> = OnceLock::new();
    TRIGGER.get_or_init(|| {
        Regex::new(&format!(r"^@{IDENT}\(.*\)$")).expect("Invalid macro trigger regex")
    })
}

fn macro_regex() -> &'static Regex {
    static MACRO: OnceLock<Regex> = OnceLock::new();
    MACRO.get_or_init(|| {
        let arg = format!("{IDENT}=(?:{VALUE})");
        Regex::new(&format!(
            r"^@(?P<kind>{IDENT})\((?P<args>{arg}(?:,{arg})*)?\)$"
        ))
        .expect("Invalid macro regex")
    })
}

fn arg_regex() -> &'static Regex {
    static ARG: OnceLock<Regex> = OnceLock::new();
    ARG.get_or_init(|| {
        Regex::new(&format!(r"(?P<key>{IDENT})=(?P<value>{VALUE})")).expect("Invalid arg regex")
    })
}

impl Macro {
    /// Whether a trimmed line is meant as a macro. Lines that pass this
    /// check but fail [`Macro::parse`] are errors, not paragraphs.
    pub fn is_macro_line(line: &str) -> bool {
        trigger_regex().is_match(line)
    }

    pub fn parse(line: &str) -> Result<Self, MacroError> {
        let caps = macro_regex().captures(line).ok_or(MacroError::Syntax)?;
        let kind = caps["kind"].to_string();

        let mut args = MacroArgs::new();
        if let Some(list) = caps.name("args") {
            for arg in arg_regex().captures_iter(list.as_str()) {
                let value = parse_value(&arg["value"])?;
                args.insert(arg["key"].to_string(), value);
            }
        }

        Ok(Self { kind, args })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn args(&self) -> &MacroArgs {
        &self.args
    }

    /// Whether this macro targets nodes named `node_name` (e.g. `"Table"`).
    pub fn applies_to(&self, node_name: &str) -> bool {
        self.kind.eq_ignore_ascii_case(node_name)
    }

    /// Takes the arguments out of the macro.
    pub fn consume(self) -> MacroArgs {
        self.args
    }

    /// Hands the arguments to a node named `node_name` if the macro targets
    /// it. A macro that does not match is dropped.
    pub fn consume_for(self, node_name: &str) -> Option<MacroArgs> {
        if self.applies_to(node_name) {
            Some(self.consume())
        } else {
            debug!(
                "dropping @{} macro: next block is a {}",
                self.kind, node_name
            );
            None
        }
    }
}

fn parse_value(raw: &str) -> Result<MacroValue, MacroError> {
    if let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
    {
        return Ok(MacroValue::Str(unescape(inner)));
    }
    raw.parse::<u64>()
        .map(MacroValue::Int)
        .map_err(|_| MacroError::IntegerOverflow(raw.to_string()))
}

/// Resolves backslash escapes. Unknown escapes are kept verbatim.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            '\\' | '\'' | '"' => out.push(next),
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(width).collect();
                let decoded = (digits.len() == width)
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => {
                        out.push(ch);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}
