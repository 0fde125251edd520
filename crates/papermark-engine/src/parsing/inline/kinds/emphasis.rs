/// Bold (`**text**`) and italic (`*text*`). Neither may be empty or
/// contain a `*`, so they never nest.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const STRONG: &'static [u8; 2] = b"**";
}
