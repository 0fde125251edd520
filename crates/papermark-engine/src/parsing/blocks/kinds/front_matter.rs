/// YAML style overrides between two `---` lines at the top of the input.
pub struct FrontMatter;

impl FrontMatter {
    pub const DELIMITER: &'static str = "---";

    pub fn is_delimiter(trimmed: &str) -> bool {
        trimmed == Self::DELIMITER
    }
}
