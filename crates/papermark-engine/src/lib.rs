//! # papermark-engine
//!
//! Parses papermark markdown (numbered sections, captioned images, tables
//! and code blocks, cross-references, citations and `@type(...)` macros)
//! into a [`Document`] tree, and exposes the [`Render`] contract renderers
//! implement to turn that tree into an output format.
//!
//! ```
//! use papermark_engine::{Document, NodeKind};
//!
//! let mut doc = Document::new();
//! doc.parse("# Title\n\nSome **bold** text\n![fig](a.png)\n").unwrap();
//!
//! let image = doc.image("fig").unwrap();
//! assert_eq!(image.label().unwrap(), "图1 fig");
//! assert!(matches!(image.kind(), NodeKind::Image(i) if i.number == 1));
//! ```

pub mod document;
pub mod error;
pub mod hooks;
pub mod parsing;
pub mod plugins;
pub mod render;

pub use document::{Document, Node, NodeId, NodeKind, NodeRef, Placeholders};
pub use error::{ParseError, RefKind, RenderError};
pub use hooks::{Hook, HookStage};
pub use parsing::macros::{Macro, MacroArgs, MacroError, MacroValue};
pub use render::{Render, render};
