/// Inline code. Nothing inside it is parsed, and it must not be empty.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}
