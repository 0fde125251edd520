//! Line-level syntax of each block kind. Every delimiter the classifier
//! looks for is defined in one of these modules.

pub mod code_fence;
pub mod front_matter;
pub mod heading;
pub mod image;
pub mod table;

pub use code_fence::{CodeFence, FenceKind};
pub use front_matter::FrontMatter;
pub use heading::Heading;
pub use image::ImageLine;
pub use table::TableRow;
