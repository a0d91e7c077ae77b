//! Output file writing and path resolution.
//!
//! Takes an already-generated dot graph description and writes the requested
//! artifacts (dot text, SVG markup, PNG raster) to disk. Each operation is a
//! single attempt-or-fail sequence; failures wrap the underlying cause and
//! abort any remaining steps of a multi-format request.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::WriterError;
use crate::render::{convert_dot_to_svg, rasterize_svg};

/// Requested output format for [`write_output_files`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw dot description only.
    Dot,
    /// SVG vector image.
    #[default]
    Svg,
    /// PNG raster image.
    Png,
    /// Dot, SVG and PNG, each to its own file.
    All,
}

impl OutputFormat {
    /// Default filename extension used when resolving an output path.
    fn default_extension(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Png => "png",
            Self::Svg | Self::All => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dot => "dot",
            Self::Svg => "svg",
            Self::Png => "png",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(Self::Dot),
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "all" => Ok(Self::All),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Write the output files for a generated dot description.
///
/// `output_path` may be absent (default to `<cwd>/<subject_name>.<ext>`), an
/// existing directory (the default filename is placed inside it), or a file
/// path used verbatim. For [`OutputFormat::All`] the dot, SVG and PNG files
/// are written sequentially, each with its own extension derived from the
/// same base name; a failure aborts the remaining steps.
///
/// # Errors
///
/// Returns [`WriterError::Conversion`] if the dot description cannot be
/// rendered or rasterized, and [`WriterError::Write`] on filesystem failure.
pub fn write_output_files(
    dot: &str,
    subject_name: &str,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<(), WriterError> {
    let target = resolve_output_path(output_path, subject_name, format)?;

    if matches!(format, OutputFormat::Dot | OutputFormat::All) {
        let dot_target = match format {
            OutputFormat::Dot => target.clone(),
            _ => target.with_extension("dot"),
        };
        write_dot(dot, &dot_target)?;
        // No need to continue if only generating a dot file.
        if format == OutputFormat::Dot {
            return Ok(());
        }
    }

    let svg = convert_dot_to_svg(dot)?;
    if matches!(format, OutputFormat::Svg | OutputFormat::All) {
        // The svg extension wins over whatever the caller's path carried.
        write_svg(&svg, &target.with_extension("svg"), format)?;
    }
    if matches!(format, OutputFormat::Png | OutputFormat::All) {
        write_png(&svg, &target)?;
    }
    Ok(())
}

/// Resolve the target output path.
///
/// Tri-state existence check on `output_path`: an existing directory gets the
/// default filename appended, an existing file or an absent path is used
/// verbatim. Stat failures other than "not found" (e.g. permission denied)
/// propagate instead of being swallowed.
fn resolve_output_path(
    output_path: Option<&Path>,
    subject_name: &str,
    format: OutputFormat,
) -> Result<PathBuf, WriterError> {
    let file_name = format!("{subject_name}.{}", format.default_extension());
    let Some(path) = output_path else {
        let cwd = std::env::current_dir()
            .map_err(|err| WriterError::write("output file", &file_name, err))?;
        return Ok(cwd.join(file_name));
    };

    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(path.join(file_name)),
        Ok(_) => Ok(path.to_path_buf()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(err) => Err(WriterError::write("output file", path, err)),
    }
}

/// Write a dot description verbatim to `path`.
///
/// # Errors
///
/// Returns [`WriterError::Write`] wrapping the filesystem failure.
pub fn write_dot(dot: &str, path: &Path) -> Result<(), WriterError> {
    debug!(path = %path.display(), "about to write dot file");
    fs::write(path, dot).map_err(|err| WriterError::write("dot file", path, err))?;
    println!("Dot file written to {}", path.display());
    Ok(())
}

/// Write SVG markup to `path`, returning the path actually written.
///
/// When `format_hint` is [`OutputFormat::Png`] the extension is normalized to
/// `.svg` regardless of the path's extension; the directory component is
/// preserved, and a bare filename lands in the current directory.
///
/// # Errors
///
/// Returns [`WriterError::Write`] wrapping the filesystem failure.
pub fn write_svg(
    svg: &str,
    path: &Path,
    format_hint: OutputFormat,
) -> Result<PathBuf, WriterError> {
    let target = if format_hint == OutputFormat::Png {
        path.with_extension("svg")
    } else {
        path.to_path_buf()
    };
    debug!(path = %target.display(), "about to write SVG file");
    fs::write(&target, svg).map_err(|err| WriterError::write("SVG file", &target, err))?;
    println!("Generated svg file {}", target.display());
    Ok(target)
}

/// Rasterize SVG markup and write the PNG to the sibling `.png` path of
/// `path` (directory preserved; a bare filename lands in the current
/// directory).
///
/// # Errors
///
/// Returns [`WriterError::Conversion`] if rasterization fails, or
/// [`WriterError::Write`] if the filesystem write fails.
pub fn write_png(svg: &str, path: &Path) -> Result<(), WriterError> {
    let png_path = path.with_extension("png");
    debug!(path = %png_path.display(), "about to write png file");
    let png = rasterize_svg(svg)?;
    fs::write(&png_path, png).map_err(|err| WriterError::write("PNG file", &png_path, err))?;
    println!("Generated png file {}", png_path.display());
    Ok(())
}

/// Write source text to `filename`, appending a `.sol` extension unless the
/// name already ends in it.
///
/// # Errors
///
/// Returns [`WriterError::Write`] wrapping the filesystem failure.
pub fn write_solidity(code: &str, filename: &str) -> Result<(), WriterError> {
    let target = if Path::new(filename).extension().is_some_and(|ext| ext == "sol") {
        PathBuf::from(filename)
    } else {
        PathBuf::from(format!("{filename}.sol"))
    };
    debug!(path = %target.display(), "about to write Solidity file");
    fs::write(&target, code).map_err(|err| WriterError::write("Solidity file", &target, err))?;
    println!("Solidity written to {}", target.display());
    Ok(())
}
