/// A cursor for byte-by-byte inline parsing of one line.
///
/// All delimiters are ASCII, so any position the parser stops at while
/// looking for a delimiter is a char boundary.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being parsed.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The char starting at the current position, if the cursor sits on a
    /// char boundary.
    pub fn peek_char(&self) -> Option<char> {
        self.s.get(self.i..)?.chars().next()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Advances until the current byte is `stop` or input ends.
    pub fn eat_until(&mut self, stop: u8) {
        while let Some(b) = self.peek() {
            if b == stop {
                break;
            }
            self.i += 1;
        }
    }

    /// Advances until the remaining input starts with `pat` or input ends.
    pub fn eat_until_seq(&mut self, pat: &[u8]) {
        while !self.eof() && !self.starts_with(pat) {
            self.i += 1;
        }
    }
}
