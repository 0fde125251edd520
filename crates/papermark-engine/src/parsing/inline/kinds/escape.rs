/// A backslash makes the next character literal.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';
}
