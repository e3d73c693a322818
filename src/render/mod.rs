pub mod colors;
pub mod svg_export;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::layout::{Bounds, Rectangle};
use colors::ColorSettings;

/// Canvas and styling options for image output.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width (px)
    pub width: u32,
    /// Canvas height (px)
    pub height: u32,
    /// Border drawn around every rectangle (px)
    pub border: f64,
    /// Draw short labels inside rectangles that are large enough
    pub show_labels: bool,
    /// Smallest rectangle (px) that gets a label
    pub min_label_width: f64,
    pub min_label_height: f64,
    pub font_size: f64,
    pub colors: ColorSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            border: 1.0,
            show_labels: true,
            min_label_width: 40.0,
            min_label_height: 18.0,
            font_size: 12.0,
            colors: ColorSettings::default(),
        }
    }
}

/// Where rectangles go: the text form on stdout, or an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Text,
    Image(PathBuf),
}

impl OutputTarget {
    /// `-` selects the text form; anything else is an image path.
    pub fn parse(target: &str) -> Self {
        if target == "-" {
            OutputTarget::Text
        } else {
            OutputTarget::Image(PathBuf::from(target))
        }
    }
}

/// Write one `RECTANGLE x y w h label` line per rectangle.
pub fn write_text<W: Write>(rects: &[Rectangle], mut out: W) -> Result<()> {
    for rect in rects {
        writeln!(out, "{}", rect)?;
    }
    out.flush()?;
    Ok(())
}

/// Draw the treemap as an SVG image at `path`.
pub fn draw_rectangles(
    rects: &[Rectangle],
    bounds: Bounds,
    path: &Path,
    config: &RenderConfig,
) -> Result<()> {
    svg_export::write_svg(rects, bounds, path, config)
}
