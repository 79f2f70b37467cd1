mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use laservector::{raster, Params};
use std::fs;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !cli::is_supported_image(&cli.input) {
        log::warn!(
            "{} has an unrecognized extension, attempting to decode anyway",
            cli.input.display()
        );
    }

    let buffer = raster::load_image(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let raw_bytes: Vec<u8> = buffer
        .pixels
        .iter()
        .flat_map(|p| [p.r, p.g, p.b, p.a])
        .collect();

    let params = Params {
        detail_level: cli.detail_level,
        centerline_sensitivity: cli.centerline_sensitivity,
    };

    let result = laservector::process(&raw_bytes, buffer.width, buffer.height, &params)
        .context("conversion failed")?;

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;

    let stem = cli
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let full_path = cli.output_dir.join(format!("{stem}.full.svg"));
    let cut_path = cli.output_dir.join(format!("{stem}.cut.svg"));
    let engrave_path = cli.output_dir.join(format!("{stem}.engrave.svg"));

    fs::write(&full_path, &result.full)
        .with_context(|| format!("failed to write {}", full_path.display()))?;
    fs::write(&cut_path, &result.cut)
        .with_context(|| format!("failed to write {}", cut_path.display()))?;
    fs::write(&engrave_path, &result.engrave)
        .with_context(|| format!("failed to write {}", engrave_path.display()))?;

    log::info!(
        "wrote {}, {}, {}",
        full_path.display(),
        cut_path.display(),
        engrave_path.display()
    );

    if cli.stats_json {
        println!("{}", serde_json::to_string_pretty(&result.stats)?);
    } else {
        println!(
            "{} outline path(s), {} centerline path(s), {} total",
            result.stats.outline_count, result.stats.centerline_count, result.stats.total_paths
        );
    }

    Ok(())
}
