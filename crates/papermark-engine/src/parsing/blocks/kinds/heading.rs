/// `#` to `######` followed by a space.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Returns the level and title text of a heading line.
    pub fn parse(trimmed: &str) -> Option<(u8, &str)> {
        let level = trimmed.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let title = trimmed[level..].strip_prefix(' ')?;
        Some((level as u8, title.trim()))
    }
}
