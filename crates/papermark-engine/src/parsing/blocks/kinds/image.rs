use std::sync::OnceLock;

use regex::Regex;

/// A line holding nothing but `![name](link)`.
pub struct ImageLine;

impl ImageLine {
    pub fn parse(trimmed: &str) -> Option<(&str, &str)> {
        static IMAGE: OnceLock<Regex> = OnceLock::new();
        let re = IMAGE
            .get_or_init(|| Regex::new(r"^!\[([^\]]+)\]\(([^)]+)\)$").expect("Invalid image regex"));
        let caps = re.captures(trimmed)?;
        let name = caps.get(1)?.as_str();
        let link = caps.get(2)?.as_str();
        Some((name, link))
    }
}
