use std::path::Path;

use anyhow::{Context, Result};
use svg::node::element::{Group, Rectangle as SvgRect, Text};
use svg::Document;

use super::colors::{rectangle_color, text_color};
use super::RenderConfig;
use crate::layout::{Bounds, Rectangle};

const BACKGROUND: &str = "#1c1c20";
const BORDER: &str = "#1c1c20";

/// Maps layout coordinates onto the canvas.
#[derive(Debug, Clone, Copy)]
struct Transform {
    ox: f64,
    oy: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    fn new(bounds: Bounds, config: &RenderConfig) -> Self {
        let scale = |canvas: u32, extent: f64| {
            if extent > 0.0 {
                canvas as f64 / extent
            } else {
                0.0
            }
        };
        Self {
            ox: bounds.x,
            oy: bounds.y,
            sx: scale(config.width, bounds.width),
            sy: scale(config.height, bounds.height),
        }
    }

    fn apply(&self, r: &Rectangle) -> (f64, f64, f64, f64) {
        (
            (r.x() - self.ox) * self.sx,
            (r.y() - self.oy) * self.sy,
            r.width() * self.sx,
            r.height() * self.sy,
        )
    }
}

/// Build the SVG document for a treemap laid out inside `bounds`.
pub fn render_document(rects: &[Rectangle], bounds: Bounds, config: &RenderConfig) -> Document {
    let transform = Transform::new(bounds, config);

    let mut shapes = Group::new().set("id", "treemap");
    let mut labels = Group::new()
        .set("id", "labels")
        .set("font-family", "sans-serif")
        .set("font-size", config.font_size);
    let mut label_count = 0usize;

    for rect in rects {
        let (x, y, w, h) = transform.apply(rect);
        if w <= 0.0 || h <= 0.0 {
            continue;
        }

        let fill = rectangle_color(rect.verbose_label(), &config.colors);
        shapes = shapes.add(
            SvgRect::new()
                .set("x", x)
                .set("y", y)
                .set("width", w)
                .set("height", h)
                .set("fill", fill.to_hex())
                .set("stroke", BORDER)
                .set("stroke-width", config.border)
                .set("data-label", rect.display_label()),
        );

        if !config.show_labels || w < config.min_label_width || h < config.min_label_height {
            continue;
        }
        let pad = 3.0;
        let text = truncate_label(rect.label(), w - pad * 2.0, config.font_size);
        if text.is_empty() {
            continue;
        }
        labels = labels.add(
            Text::new(text)
                .set("x", x + pad)
                .set("y", y + pad + config.font_size)
                .set("fill", text_color(fill).to_hex()),
        );
        label_count += 1;
    }

    tracing::debug!(
        "SVG scene: {} rectangles, {} labels",
        rects.len(),
        label_count
    );

    Document::new()
        .set("viewBox", format!("0 0 {} {}", config.width, config.height))
        .set("width", config.width as f64)
        .set("height", config.height as f64)
        .add(
            SvgRect::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", BACKGROUND),
        )
        .add(shapes)
        .add(labels)
}

/// Render `rects` and write the SVG file.
pub fn write_svg(
    rects: &[Rectangle],
    bounds: Bounds,
    path: &Path,
    config: &RenderConfig,
) -> Result<()> {
    let doc = render_document(rects, bounds, config);
    svg::save(path, &doc).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        "Wrote {}x{} treemap to {}",
        config.width,
        config.height,
        path.display()
    );
    Ok(())
}

fn truncate_label(name: &str, max_width: f64, font_size: f64) -> String {
    let approx_char_w = (font_size * 0.58).max(1.0);
    let max_chars = (max_width / approx_char_w) as usize;
    if max_chars < 3 {
        return String::new();
    }
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let keep = max_chars - 3;
    let truncated: String = name.chars().take(keep).collect();
    format!("{}...", truncated)
}
