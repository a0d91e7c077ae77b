//! Dot-to-SVG conversion and SVG rasterization.
//!
//! Converts a Graphviz dot description to SVG in-process using `layout-rs`,
//! and rasterizes SVG to PNG bytes using `resvg` with `image` for encoding.

use std::io::Cursor;
use std::sync::Arc;

use image::DynamicImage;
use layout::backends::svg::SVGWriter;
use layout::gv::{DotParser, GraphBuilder};
use resvg::usvg::fontdb;
use tracing::debug;

use crate::error::{DotSyntaxError, WriterError};

/// Convert a Graphviz dot description to an SVG string.
///
/// On a parse failure the raw dot text is echoed to stdout for diagnosis
/// before the error is returned.
///
/// # Errors
///
/// Returns [`WriterError::Conversion`] if the description is not valid dot
/// syntax; the source carries the parser's message.
pub fn convert_dot_to_svg(dot: &str) -> Result<String, WriterError> {
    debug!("about to convert dot to SVG");
    let mut parser = DotParser::new(dot);
    let graph = parser.process().map_err(|reason| {
        eprintln!("Failed to convert dot to SVG. {reason}");
        println!("{dot}");
        WriterError::conversion("dot to SVG", DotSyntaxError(reason))
    })?;

    let mut builder = GraphBuilder::new();
    builder.visit_graph(&graph);
    let mut visual = builder.get();
    let mut backend = SVGWriter::new();
    visual.do_it(false, false, false, &mut backend);
    Ok(backend.finalize())
}

/// Rasterize an SVG string to PNG bytes at its natural size.
///
/// # Errors
///
/// Returns [`WriterError::Conversion`] if the SVG cannot be parsed or the
/// rasterized pixels cannot be encoded as PNG.
pub fn rasterize_svg(svg: &str) -> Result<Vec<u8>, WriterError> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let opts = resvg::usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    };

    let tree = resvg::usvg::Tree::from_str(svg, &opts)
        .map_err(|err| WriterError::conversion("SVG to PNG", err))?;
    let size = tree.size();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let width = size.width().ceil() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let height = size.height().ceil() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        WriterError::conversion(
            "SVG to PNG",
            format!("failed to create pixmap {width}x{height}"),
        )
    })?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let rgba = pixmap.data().to_vec();
    let img_buf = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        WriterError::conversion("SVG to PNG", "failed to create image from pixmap data")
    })?;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(img_buf)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|err| WriterError::conversion("SVG to PNG", err))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_DOT: &str = "digraph G { a -> b; b -> c; }";

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
<rect x="2" y="2" width="16" height="16" fill="#336699"/>
</svg>"##;

    #[test]
    fn test_convert_valid_dot_returns_svg() {
        let svg = convert_dot_to_svg(SIMPLE_DOT).unwrap();
        assert!(!svg.is_empty());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_convert_invalid_dot_fails_with_parser_cause() {
        // Unbalanced brace.
        let err = convert_dot_to_svg("digraph G { a -> b").unwrap_err();
        match &err {
            WriterError::Conversion { source, .. } => {
                assert!(source.downcast_ref::<DotSyntaxError>().is_some());
            }
            other => panic!("expected conversion error, got {other:?}"),
        }
    }

    #[test]
    fn test_rasterize_svg_produces_png_bytes() {
        let png = rasterize_svg(SIMPLE_SVG).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn test_rasterize_rejects_malformed_svg() {
        let err = rasterize_svg("<svg").unwrap_err();
        assert!(matches!(err, WriterError::Conversion { .. }));
    }

    #[test]
    fn test_rendered_dot_rasterizes() {
        let svg = convert_dot_to_svg(SIMPLE_DOT).unwrap();
        let png = rasterize_svg(&svg).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
