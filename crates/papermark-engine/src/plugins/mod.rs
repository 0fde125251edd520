//! Optional features built on the hook pipeline.

pub mod references;
