/// Diagnostic tool to verify data → tree → layout pipeline
use std::path::PathBuf;

use anyhow::{Context, Result};
use slicemap::app::{build_treemap, TreemapRequest};
use slicemap::data;
use slicemap::layout::total_area;
use tracing_subscriber::filter::Directive;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slicemap=debug".parse::<Directive>()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let data_path = args
        .next()
        .map(PathBuf::from)
        .context("usage: debug-layout <data.csv> [category,category,...]")?;
    let categories = args
        .next()
        .map(|list| list.split(',').map(str::to_string).collect::<Vec<_>>());

    println!("=== DIAGNOSTIC: Data → Tree → Layout Pipeline ===");
    println!("Loading: {}", data_path.display());

    let table = data::load_count_data(&data_path)?;
    println!(
        "\n[1] Loaded {} records, total count {}",
        table.len(),
        table.total()?
    );
    println!("    Categories: {}", table.category_list());

    let request = TreemapRequest {
        categories,
        ..TreemapRequest::default()
    };
    let treemap = build_treemap(&table, &request)?;
    let tree = &treemap.tree;

    println!(
        "\n[2] Tree built: {} nodes, depth {}, {} leaves, root count {}",
        tree.len(),
        tree.depth(),
        tree.leaves().count(),
        tree.count_or_zero()
    );

    println!("\n[3] Top 10 children of root by count:");
    let mut root_children: Vec<_> = tree.children.iter().collect();
    root_children.sort_by_key(|c| std::cmp::Reverse(c.count_or_zero()));
    for (i, child) in root_children.iter().take(10).enumerate() {
        println!(
            "    [{}] '{}' - {} ({} children)",
            i,
            child.label,
            child.count_or_zero(),
            child.num_children()
        );
    }

    println!("\n[4] Layout computed: {} rectangles", treemap.rects.len());

    println!("\n[5] Top 10 largest rectangles by area:");
    let mut sorted_rects = treemap.rects.clone();
    sorted_rects.sort_by(|a, b| b.area().total_cmp(&a.area()));
    for (i, rect) in sorted_rects.iter().take(10).enumerate() {
        println!("    [{}] {:.4} - {}", i, rect.area(), rect);
    }

    println!("\n[6] Checking for anomalies:");
    let area_sum = total_area(&treemap.rects);
    let bounds_area = treemap.bounds.area();
    let empty = treemap.rects.iter().filter(|r| r.area() == 0.0).count();
    println!("    Total rect area: {:.6}", area_sum);
    println!("    Bounds area:     {:.6}", bounds_area);
    if bounds_area > 0.0 {
        println!("    Coverage: {:.2}%", area_sum / bounds_area * 100.0);
    }
    println!("    Zero-area rectangles: {}", empty);

    Ok(())
}
