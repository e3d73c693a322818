use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use slicemap::app::{build_treemap, TreemapRequest};
use slicemap::data::{self, CountTable};
use slicemap::render::colors::{mode_name, ColorMode};
use slicemap::render::{self, OutputTarget, RenderConfig};

/// Draw a slice-and-dice treemap of category counts
#[derive(Parser, Debug)]
#[command(name = "slicemap", author, version, about, long_about = None)]
struct Args {
    /// CSV file with category columns and a `count` column
    data: PathBuf,

    /// Comma-separated grouping categories, outermost first (default: all)
    #[arg(short, long, value_delimiter = ',')]
    categories: Option<Vec<String>>,

    /// Comma-separated labels whose subtrees are removed
    #[arg(short, long, value_delimiter = ',')]
    prune: Option<Vec<String>>,

    /// Output SVG path, or `-` to print rectangles as text
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Canvas width in pixels (image output)
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Canvas height in pixels (image output)
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// How rectangles are colored (image output)
    #[arg(long, value_enum, default_value_t = ColorMode::Category)]
    color_mode: ColorMode,

    /// Do not draw labels inside rectangles
    #[arg(long)]
    no_labels: bool,

    /// Print per-category totals of the data before laying it out
    #[arg(long)]
    summary: bool,

    /// Log level (off, error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn").add_directive(
            format!("slicemap={}", level)
                .parse::<Directive>()
                .with_context(|| format!("Invalid log level: {}", level))?,
        ),
    };

    // stdout carries the text form of the treemap
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn print_summary(table: &CountTable) -> Result<()> {
    eprintln!("{} records, total count {}", table.len(), table.total()?);
    for category in table.category_names() {
        eprintln!("[{}]", category);
        for (value, total) in table.column_totals(category)? {
            eprintln!("  {} : {}", value, total);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;
    tracing::debug!("Parsed arguments: {:?}", args);

    let table = data::load_count_data(&args.data)?;
    if args.summary {
        print_summary(&table)?;
    }

    let request = TreemapRequest {
        categories: args.categories,
        prune: args.prune,
        ..TreemapRequest::default()
    };
    let treemap = build_treemap(&table, &request)?;

    match OutputTarget::parse(&args.output) {
        OutputTarget::Text => render::write_text(&treemap.rects, io::stdout().lock())?,
        OutputTarget::Image(path) => {
            let mut config = RenderConfig {
                width: args.width,
                height: args.height,
                show_labels: !args.no_labels,
                ..RenderConfig::default()
            };
            config.colors.mode = args.color_mode;
            tracing::info!("Rendering with {} colors", mode_name(config.colors.mode));
            render::draw_rectangles(&treemap.rects, treemap.bounds, &path, &config)?;
        }
    }

    Ok(())
}
