//! Stage-ordered orchestration: silhouette, per-region detail dispatch,
//! and layer assembly.

use crate::binarizer::{self, BinaryMask};
use crate::contour_tracer;
use crate::error::CoreError;
use crate::morphology;
use crate::path::{OptimizedPath, PathKind};
use crate::path_optimizer::{self, CENTERLINE_MERGE_DISTANCE};
use crate::raster::{self, PixelBuffer};
use crate::region_finder::{self, Region};
use crate::skeleton_tracer;
use crate::skeletonizer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The only two tunables exposed at the core boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Params {
    pub detail_level: u32,
    pub centerline_sensitivity: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            detail_level: 50,
            centerline_sensitivity: 50,
        }
    }
}

/// `{outlineCount, centerlineCount, gapsDetected=0, totalPaths}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Stats {
    pub outline_count: usize,
    pub centerline_count: usize,
    pub gaps_detected: usize,
    pub total_paths: usize,
}

/// The three layer-tagged vector documents plus their statistics.
#[derive(Debug)]
pub struct ProcessOutput {
    pub full: Vec<OptimizedPath>,
    pub cut: Vec<OptimizedPath>,
    pub engrave: Vec<OptimizedPath>,
    pub stats: Stats,
}

/// Noise floor below which a raw region is dropped outright.
const REGION_NOISE_FLOOR: usize = 15;

/// `process(buffer, width, height, params)` — the core's one programmatic
/// entry point. Binarizes, pads, traces the silhouette, then — if
/// `detailLevel > 0` — classifies and traces every surviving region as an
/// outline or a centerline, and assembles the three layers.
pub fn process(
    buffer: &[u8],
    width: u32,
    height: u32,
    params: &Params,
) -> Result<ProcessOutput, CoreError> {
    let raw = PixelBuffer::from_raw(width, height, buffer)?;
    let padded = raster::pad_with_white(&raw);
    log::debug!(
        "padded {}x{} -> {}x{}",
        raw.width,
        raw.height,
        padded.width,
        padded.height
    );

    let binary = binarizer::binarize(&padded, binarizer::DEFAULT_THRESHOLD);
    let foreground = binary.cells.iter().filter(|&&v| v == 1).count();
    log::debug!(
        "binarized {}x{} at threshold {}: {foreground} foreground pixels",
        binary.width,
        binary.height,
        binarizer::DEFAULT_THRESHOLD
    );

    let mut outline_paths = Vec::new();
    let mut centerline_paths = Vec::new();

    if let Some(silhouette) = trace_silhouette(&binary) {
        outline_paths.push(silhouette);
    } else {
        log::warn!("no silhouette found — canvas appears entirely blank");
    }

    if params.detail_level > 0 {
        let (mut outlines, mut centerlines) = trace_details(&binary, params);
        outline_paths.append(&mut outlines);
        centerline_paths.append(&mut centerlines);
    }

    let stats = Stats {
        outline_count: outline_paths.len(),
        centerline_count: centerline_paths.len(),
        gaps_detected: 0,
        total_paths: outline_paths.len() + centerline_paths.len(),
    };

    let cut = outline_paths.clone();
    let engrave = centerline_paths.clone();
    let mut full = outline_paths;
    full.extend(centerline_paths);
    log::debug!(
        "assembled layers: cut={} engrave={} full={}",
        cut.len(),
        engrave.len(),
        full.len()
    );

    Ok(ProcessOutput {
        full,
        cut,
        engrave,
        stats,
    })
}

/// Placeholder heuristic entry point: always returns the documented
/// default, pending future content-aware suggestions.
pub fn suggest_params(_buffer: &[u8]) -> Params {
    Params::default()
}

/// Stage A: silhouette extraction. Picks the border walk of maximum
/// shoelace area among all candidates on the silhouette mask, so a
/// silhouette mask with disjoint blobs (e.g. small dilation radius)
/// still yields exactly one silhouette path.
fn trace_silhouette(binary: &BinaryMask) -> Option<OptimizedPath> {
    // A silhouette built from fewer raw foreground pixels than the noise
    // floor is degenerate — a single stray pixel dilates into a solid
    // little blob that would otherwise trace as a spurious cut path.
    let foreground_area = binary.cells.iter().filter(|&&v| v == 1).count();
    if foreground_area < REGION_NOISE_FLOOR {
        return None;
    }

    let silhouette_mask = morphology::silhouette_mask(binary, morphology::DEFAULT_DILATION);
    let pixels: Vec<(u32, u32)> = (0..silhouette_mask.height)
        .flat_map(|y| (0..silhouette_mask.width).map(move |x| (x, y)))
        .filter(|&(x, y)| silhouette_mask.get(x as i64, y as i64) == 1)
        .collect();
    log::debug!(
        "morphology: dilation radius {} -> silhouette mask with {} foreground pixels",
        morphology::DEFAULT_DILATION,
        pixels.len()
    );
    if pixels.is_empty() {
        return None;
    }

    let contours = contour_tracer::trace_contours(&silhouette_mask, &pixels);
    let best = contours
        .iter()
        .max_by(|a, b| {
            let area_a = polygon_area(a);
            let area_b = polygon_area(b);
            area_a.partial_cmp(&area_b).unwrap_or(std::cmp::Ordering::Equal)
        })
        .cloned();
    log::debug!(
        "silhouette trace: {} candidate contour(s), chosen area {:.1}px",
        contours.len(),
        best.as_deref().map(polygon_area).unwrap_or(0.0)
    );
    let best = best?;

    let mut optimized = path_optimizer::optimize_path(best, PathKind::Outline)?;
    optimized.is_closed = true;
    if let Some(&first) = optimized.points.first() {
        *optimized.points.last_mut().unwrap() = first;
    }
    Some(optimized)
}

fn polygon_area(points: &[crate::path::Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    area.abs() / 2.0
}

/// Stage B: enumerate regions, apply the noise floor and the
/// detail-level cutoff, then classify each survivor as thick (outline)
/// or thin (centerline). Surviving regions share no mutable state, so
/// the classification-and-trace step fans out across a worker pool;
/// the fan-out and the final concatenation both run over the regions
/// in their original discovery order, so parallel execution never
/// perturbs output order.
fn trace_details(
    binary: &BinaryMask,
    params: &Params,
) -> (Vec<OptimizedPath>, Vec<OptimizedPath>) {
    let mut regions = region_finder::find_regions(binary);
    log::debug!("region enumeration: {} raw regions found", regions.len());
    regions.retain(|r| r.area >= REGION_NOISE_FLOOR);

    if regions.is_empty() {
        log::warn!("no regions survived the noise floor");
        return (Vec::new(), Vec::new());
    }

    // Compute the cutoff from an area-sorted copy, but keep `regions` itself
    // in discovery order so the parallel fan-out below and the final
    // concatenation never depend on region area.
    let max_area = regions
        .iter()
        .map(|r| r.area)
        .max()
        .unwrap_or(0) as f64;
    let factor = ((100.0 - params.detail_level as f64) / 100.0).powi(3);
    let area_cutoff = max_area * factor * 0.02;
    regions.retain(|r| r.area as f64 >= area_cutoff);
    log::debug!(
        "{} regions survived detail-level cutoff ({area_cutoff:.1}px)",
        regions.len()
    );

    let fill_threshold = 2.0 + params.centerline_sensitivity as f64 * 3.0;

    let per_region: Vec<(Vec<OptimizedPath>, Vec<OptimizedPath>)> = regions
        .par_iter()
        .map(|region| classify_and_trace(binary, region, fill_threshold))
        .collect();

    let mut outlines = Vec::new();
    let mut centerlines = Vec::new();
    for (mut o, mut c) in per_region {
        outlines.append(&mut o);
        centerlines.append(&mut c);
    }
    log::debug!(
        "path optimization: {} outline(s), {} centerline(s) kept from {} regions",
        outlines.len(),
        centerlines.len(),
        regions.len()
    );
    (outlines, centerlines)
}

fn classify_and_trace(
    binary: &BinaryMask,
    region: &Region,
    fill_threshold: f64,
) -> (Vec<OptimizedPath>, Vec<OptimizedPath>) {
    if region.avg_width > fill_threshold {
        let contours = contour_tracer::trace_contours(binary, &region.pixels);
        let outlines = contours
            .into_iter()
            .filter_map(|c| path_optimizer::optimize_path(c, PathKind::Outline))
            .collect();
        (outlines, Vec::new())
    } else {
        let local_mask = region.to_local_mask(binary.width, binary.height);
        let skeleton = skeletonizer::skeletonize(&local_mask);
        let chains = skeleton_tracer::trace_chains(&skeleton);
        let merged = path_optimizer::merge_chains(chains, CENTERLINE_MERGE_DISTANCE);
        let centerlines = merged
            .into_iter()
            .filter_map(|c| path_optimizer::optimize_path(c, PathKind::Centerline))
            .collect();
        (Vec::new(), centerlines)
    }
}
