// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # diagram-writer
//!
//! Writes diagram output files derived from an already-generated Graphviz
//! dot description:
//! - `.dot` — the raw description, verbatim
//! - `.svg` — vector markup rendered from the description
//! - `.png` — raster image converted from the vector markup
//!
//! The crate is orchestration over three capabilities: an in-process
//! dot-to-SVG renderer (`layout-rs`), an SVG rasterizer (`resvg` + `image`),
//! and the filesystem. Output paths are resolved from a subject name, a
//! requested format and an optional output path that may name an existing
//! directory.
//!
//! ## Modules
//!
//! - [`writer`]: path resolution and the public write operations
//! - [`render`]: dot-to-SVG conversion and SVG rasterization
//! - [`error`]: the [`WriterError`] type

pub mod error;
pub mod render;
pub mod writer;

pub use error::{DotSyntaxError, WriterError};
pub use render::{convert_dot_to_svg, rasterize_svg};
pub use writer::{
    write_dot, write_output_files, write_png, write_solidity, write_svg, OutputFormat,
};
