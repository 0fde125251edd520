use std::sync::OnceLock;

use regex::Regex;

/// A `|`-delimited table row.
pub struct TableRow;

impl TableRow {
    pub const PIPE: char = '|';

    pub fn is_row(trimmed: &str) -> bool {
        trimmed.len() >= 2 && trimmed.starts_with(Self::PIPE) && trimmed.ends_with(Self::PIPE)
    }

    /// Cell texts of a row, trimmed. The outer pipes are not cells.
    pub fn cells(trimmed: &str) -> Vec<String> {
        let inner = &trimmed[1..trimmed.len() - 1];
        inner
            .split(Self::PIPE)
            .map(|cell| cell.trim().to_string())
            .collect()
    }

    /// A `|---|:--:|` row separating the head from the data rows.
    pub fn is_delimiter(cells: &[String]) -> bool {
        static DELIM: OnceLock<Regex> = OnceLock::new();
        let re = DELIM.get_or_init(|| Regex::new(r"^:?-+:?$").expect("Invalid delimiter regex"));
        !cells.is_empty() && cells.iter().all(|c| re.is_match(c))
    }
}
