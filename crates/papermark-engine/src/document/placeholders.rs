use std::collections::BTreeMap;

use crate::error::RenderError;

/// Named values for `format` strings such as `"{s1}.{s2} {text}"`.
///
/// - `s0`, `s1`, ...: numbers of the enclosing sections, keyed by level - 1
/// - `text`: the node's text or name
/// - `gi`: the node's own sequence number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: BTreeMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Instantiates `template`. `{{` and `}}` produce literal braces.
    pub fn format(&self, template: &str) -> Result<String, RenderError> {
        let unbalanced = || RenderError::UnbalancedBraces {
            template: template.to_string(),
        };

        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => return Err(unbalanced()),
                            Some(ch) => name.push(ch),
                        }
                    }
                    let value = self.get(&name).ok_or_else(|| RenderError::UnknownPlaceholder {
                        template: template.to_string(),
                        name: name.clone(),
                    })?;
                    out.push_str(value);
                }
                '}' => return Err(unbalanced()),
                _ => out.push(c),
            }
        }
        Ok(out)
    }
}
