//! Zhang–Suen thinning to a 1-pixel-wide topological skeleton.

use crate::binarizer::BinaryMask;

/// Clockwise neighbour offsets starting at north (`p2`), matching the
/// classic Zhang–Suen numbering `p2..p9`.
const NEIGHBORS: [(i64, i64); 8] = [
    (0, -1),  // p2 N
    (1, -1),  // p3 NE
    (1, 0),   // p4 E
    (1, 1),   // p5 SE
    (0, 1),   // p6 S
    (-1, 1),  // p7 SW
    (-1, 0),  // p8 W
    (-1, -1), // p9 NW
];

fn neighbor_values(mask: &BinaryMask, x: u32, y: u32) -> [u8; 8] {
    let mut p = [0u8; 8];
    for (i, (dx, dy)) in NEIGHBORS.iter().enumerate() {
        p[i] = mask.get(x as i64 + dx, y as i64 + dy);
    }
    p
}

/// `B` = number of foreground neighbours; `A` = number of 0→1 transitions
/// walking the cyclic sequence `p2..p9,p2`.
fn black_neighbor_count_and_transitions(p: &[u8; 8]) -> (u32, u32) {
    let b: u32 = p.iter().map(|&v| v as u32).sum();
    let mut a = 0;
    for i in 0..8 {
        let cur = p[i];
        let next = p[(i + 1) % 8];
        if cur == 0 && next == 1 {
            a += 1;
        }
    }
    (b, a)
}

fn marked_for_deletion(p: &[u8; 8], subiteration: u8) -> bool {
    let (b, a) = black_neighbor_count_and_transitions(p);
    if !(2..=6).contains(&b) || a != 1 {
        return false;
    }
    // p[0]=p2, p[2]=p4, p[4]=p6, p[6]=p8
    let (p2, p4, p6, p8) = (p[0], p[2], p[4], p[6]);
    if subiteration == 1 {
        p2 * p4 * p6 == 0 && p4 * p6 * p8 == 0
    } else {
        p2 * p4 * p8 == 0 && p2 * p6 * p8 == 0
    }
}

/// Run one subiteration over the interior of the mask, returning the
/// pixels it would delete. Border rows/columns are never examined, since
/// their neighbourhoods aren't fully defined inside the mask.
fn subiteration_candidates(mask: &BinaryMask, subiteration: u8) -> Vec<(u32, u32)> {
    let mut candidates = Vec::new();
    if mask.width < 3 || mask.height < 3 {
        return candidates;
    }
    for y in 1..mask.height - 1 {
        for x in 1..mask.width - 1 {
            if mask.get(x as i64, y as i64) != 1 {
                continue;
            }
            let p = neighbor_values(mask, x, y);
            if marked_for_deletion(&p, subiteration) {
                candidates.push((x, y));
            }
        }
    }
    candidates
}

/// Thin `mask` to a 1-pixel skeleton. Already-thin input is left
/// unchanged: a unit-width mask has no pixel satisfying `2 <= B <= 6`
/// with `A = 1` simultaneously with the cross-product conditions, so
/// both subiterations find nothing to delete on the first pass.
pub fn skeletonize(mask: &BinaryMask) -> BinaryMask {
    let mut current = mask.clone();
    loop {
        let sub1 = subiteration_candidates(&current, 1);
        for &(x, y) in &sub1 {
            current.set(x, y, 0);
        }
        let sub2 = subiteration_candidates(&current, 2);
        for &(x, y) in &sub2 {
            current.set(x, y, 0);
        }
        if sub1.is_empty() && sub2.is_empty() {
            break;
        }
    }
    current
}
