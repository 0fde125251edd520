use crate::error::RefKind;

/// References to named blocks (`@image[[fig]]`) and citations (`@[[key]]`).
///
/// The name runs to the first `]]` and may be empty.
pub struct CrossRef;

impl CrossRef {
    pub const IMAGE: &'static [u8] = b"@image[[";
    pub const TABLE: &'static [u8] = b"@table[[";
    pub const CODE: &'static [u8] = b"@code[[";
    pub const CITATION: &'static [u8] = b"@[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";

    /// Openers in the order they are tried, `None` meaning a citation.
    pub const OPENERS: [(&'static [u8], Option<RefKind>); 4] = [
        (Self::IMAGE, Some(RefKind::Image)),
        (Self::TABLE, Some(RefKind::Table)),
        (Self::CODE, Some(RefKind::Code)),
        (Self::CITATION, None),
    ];
}
