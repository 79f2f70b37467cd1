use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "laservector")]
#[command(about = "Convert a raster line-art image into laser cut/engrave SVG layers")]
#[command(version)]
pub struct Cli {
    /// Input raster image (PNG, JPEG, BMP, ...)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the three generated SVG layers
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Detail level 0-100: how much fine structure to keep (cubic falloff)
    #[arg(short = 'd', long, default_value_t = 50)]
    pub detail_level: u32,

    /// Centerline sensitivity 0-100: stroke-thickness split between cut and engrave
    #[arg(short = 'c', long, default_value_t = 50)]
    pub centerline_sensitivity: u32,

    /// Print the stats record as JSON to stdout instead of human-readable text
    #[arg(long)]
    pub stats_json: bool,
}

/// Check if a file extension is a supported raster image format.
pub fn is_supported_image(path: &std::path::Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        matches!(
            ext.to_lowercase().as_str(),
            "bmp" | "png" | "jpg" | "jpeg" | "gif" | "tiff" | "tif" | "webp"
        )
    } else {
        false
    }
}
