//! Moore-neighbour boundary tracing.
//!
//! Walks the outer boundary of a foreground region using an 8-direction
//! clock and a "search from `(d+5) mod 8`" rule, so the walk can take
//! diagonal steps and hug single-pixel-wide strokes as well as filled
//! blobs.

use crate::binarizer::BinaryMask;
use crate::path::Point;

/// Safety bound against pathological inputs that would otherwise loop.
const MAX_STEPS: usize = 20_000;

/// Clockwise 8-neighbour offsets starting at north, indexed 0..8.
const DIRS: [(i64, i64); 8] = [
    (0, -1),  // 0 N
    (1, -1),  // 1 NE
    (1, 0),   // 2 E
    (1, 1),   // 3 SE
    (0, 1),   // 4 S
    (-1, 1),  // 5 SW
    (-1, 0),  // 6 W
    (-1, -1), // 7 NW
];

fn is_foreground(mask: &BinaryMask, x: i64, y: i64) -> bool {
    mask.get(x, y) == 1
}

/// A pixel is a border pixel iff it is foreground and at least one of
/// its four cardinal neighbours is background or outside the image.
fn is_border_pixel(mask: &BinaryMask, x: u32, y: u32) -> bool {
    if mask.get(x as i64, y as i64) != 1 {
        return false;
    }
    let (xi, yi) = (x as i64, y as i64);
    !is_foreground(mask, xi - 1, yi)
        || !is_foreground(mask, xi + 1, yi)
        || !is_foreground(mask, xi, yi - 1)
        || !is_foreground(mask, xi, yi + 1)
}

/// Walk the outer boundary of `pixels` within `mask`, starting from each
/// unvisited border pixel, producing one closed pixel polygon per walk.
/// Holes are not traced separately: this keeps output path count bounded and
/// treats holes as discontinuities in the engrave layer instead.
pub fn trace_contours(mask: &BinaryMask, pixels: &[(u32, u32)]) -> Vec<Vec<Point>> {
    let mut border_visited = std::collections::HashSet::new();
    let mut contours = Vec::new();

    for &(sx, sy) in pixels {
        if !is_border_pixel(mask, sx, sy) || border_visited.contains(&(sx, sy)) {
            continue;
        }

        let mut contour = Vec::new();
        let mut cx = sx as i64;
        let mut cy = sy as i64;
        let mut d: usize = 7;
        contour.push(Point::new(cx as f64, cy as f64));
        border_visited.insert((sx, sy));

        for _ in 0..MAX_STEPS {
            let search_start = (d + 5) % 8;
            let mut advanced = false;

            for i in 0..8 {
                let dir = (search_start + i) % 8;
                let (dx, dy) = DIRS[dir];
                let nx = cx + dx;
                let ny = cy + dy;
                if is_foreground(mask, nx, ny) {
                    cx = nx;
                    cy = ny;
                    d = dir;
                    advanced = true;
                    break;
                }
            }

            if !advanced {
                break;
            }
            if cx == sx as i64 && cy == sy as i64 {
                break;
            }
            contour.push(Point::new(cx as f64, cy as f64));
            if cx >= 0 && cy >= 0 {
                border_visited.insert((cx as u32, cy as u32));
            }
        }

        if contour.len() >= 3 {
            contours.push(contour);
        }
    }

    contours
}
