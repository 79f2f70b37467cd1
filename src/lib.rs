//! laservector - raster line art to laser-ready cut/engrave vectors
//!
//! Converts a raster image of line art into two vector layers: a *cut*
//! layer of closed outer contours and an *engrave* layer of
//! single-pixel-wide centerlines extracted from thick strokes. Unlike a
//! general-purpose raster tracer that emits paired boundary curves
//! around each stroke, this pipeline emits one polyline per stroke,
//! avoiding double-cut passes on thermal cutting machines.
//!
//! ## Pipeline
//!
//! - **Binarization** — RGBA → `{0,1}` mask with alpha handling
//! - **Morphology** — dilation, background flood-fill, silhouette mask
//! - **Region analysis** — 4-connected flood-fill into labelled regions
//! - **Contour tracing** — Moore-neighbour boundary walk
//! - **Skeletonization** — Zhang–Suen thinning to 1-pixel width
//! - **Skeleton tracing** — greedy chain extraction
//! - **Path optimization** — endpoint merging, smoothing, RDP, closure
//!
//! ## Example
//!
//! ```rust,no_run
//! use laservector::{process, Params};
//!
//! let width = 100;
//! let height = 100;
//! let pixels = vec![255u8; (width * height * 4) as usize];
//!
//! let result = process(&pixels, width, height, &Params::default())
//!     .expect("conversion failed");
//! println!("{} total paths", result.stats.total_paths);
//! ```

pub mod binarizer;
pub mod contour_tracer;
pub mod emitter;
pub mod error;
pub mod morphology;
pub mod path;
pub mod path_optimizer;
pub mod pipeline;
pub mod raster;
pub mod region_finder;
pub mod skeleton_tracer;
pub mod skeletonizer;

pub use error::CoreError;
pub use path::{OptimizedPath, PathKind, Point};
pub use pipeline::{Params, Stats};
pub use raster::PixelBuffer;

/// The three layer-tagged vector documents plus the statistics record
/// the core's external interface promises.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub full: String,
    pub cut: String,
    pub engrave: String,
    pub stats: Stats,
}

/// `process(buffer, width, height, params) → {full, cut, engrave, stats}`
/// — the core's single programmatic entry point.
pub fn process(
    buffer: &[u8],
    width: u32,
    height: u32,
    params: &Params,
) -> Result<ConversionResult, CoreError> {
    let output = pipeline::process(buffer, width, height, params)?;
    let padded_width = width + 2 * raster::PAD;
    let padded_height = height + 2 * raster::PAD;

    Ok(ConversionResult {
        full: emitter::emit(&output.full, padded_width, padded_height),
        cut: emitter::emit(&output.cut, padded_width, padded_height),
        engrave: emitter::emit(&output.engrave, padded_width, padded_height),
        stats: output.stats,
    })
}

/// Placeholder heuristic entry point: returns the documented default
/// `{50, 50}` regardless of image content.
pub fn suggest_params(buffer: &[u8]) -> Params {
    pipeline::suggest_params(buffer)
}
