//! Polyline list → textual vector document.

use crate::path::{OptimizedPath, PathKind};
use crate::raster::PAD;

/// Pixels-per-millimetre derived from 96 DPI / 25.4mm-per-inch.
const PX_PER_MM: f64 = 3.7795;

const OUTLINE_COLOR: &str = "#00ff00";
const CENTERLINE_COLOR: &str = "#0000ff";
const STROKE_WIDTH: f64 = 2.0;

/// Emit a single vector document containing `paths`. Coordinates are
/// offset by `-P` to strip the white padding added before binarization,
/// and the document's declared size is `(W-2P, H-2P)` in both pixels
/// (the viewBox) and millimetres (the width/height attributes).
pub fn emit(paths: &[OptimizedPath], padded_width: u32, padded_height: u32) -> String {
    let unpadded_w = padded_width.saturating_sub(2 * PAD);
    let unpadded_h = padded_height.saturating_sub(2 * PAD);
    let width_mm = unpadded_w as f64 / PX_PER_MM;
    let height_mm = unpadded_h as f64 / PX_PER_MM;

    let mut doc = String::new();
    doc.push_str(&format!(
        r#"<svg width="{width_mm:.3}mm" height="{height_mm:.3}mm" viewBox="0 0 {unpadded_w} {unpadded_h}" xmlns="http://www.w3.org/2000/svg">"#
    ));
    doc.push('\n');
    doc.push_str("  <g>\n");

    for path in paths {
        let color = match path.kind {
            PathKind::Outline => OUTLINE_COLOR,
            PathKind::Centerline => CENTERLINE_COLOR,
        };
        let d = path_data(path);
        doc.push_str(&format!(
            r#"    <polyline d="{d}" stroke="{color}" stroke-width="{STROKE_WIDTH}" fill="none" stroke-linecap="round" stroke-linejoin="round"/>"#
        ));
        doc.push('\n');
    }

    doc.push_str("  </g>\n</svg>\n");
    log::debug!(
        "emission: {} path(s) into a {unpadded_w}x{unpadded_h} ({width_mm:.1}mm x {height_mm:.1}mm) document",
        paths.len()
    );
    doc
}

fn path_data(path: &OptimizedPath) -> String {
    let mut d = String::new();
    for (i, p) in path.points.iter().enumerate() {
        let x = p.x - PAD as f64;
        let y = p.y - PAD as f64;
        if i == 0 {
            d.push_str(&format!("M {x:.2},{y:.2}"));
        } else {
            d.push_str(&format!(" L {x:.2},{y:.2}"));
        }
    }
    if path.is_closed {
        d.push_str(" Z");
    }
    d
}
