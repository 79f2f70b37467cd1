//! Greedy chain extraction from a thinned skeleton mask.

use crate::binarizer::BinaryMask;
use crate::path::Point;

/// Fixed 8-neighbour scan order the tracer follows at every step.
const ORDER: [(i64, i64); 8] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
];

const MIN_CHAIN_LEN: usize = 3;

/// Scan row-major; for each unvisited skeleton pixel start a chain and
/// greedily extend it by always taking the first unvisited skeleton
/// neighbour in the fixed scan order. Branch points are left as breaks
/// between chains — the path optimizer's endpoint merge may reconnect
/// them later. Every skeleton pixel ends up in exactly one chain.
pub fn trace_chains(mask: &BinaryMask) -> Vec<Vec<Point>> {
    let w = mask.width as usize;
    let h = mask.height as usize;
    let mut visited = vec![false; w * h];
    let mut chains = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if visited[idx] || mask.cells[idx] != 1 {
                continue;
            }

            let mut chain = vec![Point::new(x as f64, y as f64)];
            visited[idx] = true;
            let (mut cx, mut cy) = (x as i64, y as i64);

            loop {
                let mut advanced = false;
                for &(dx, dy) in &ORDER {
                    let nx = cx + dx;
                    let ny = cy + dy;
                    if nx < 0 || ny < 0 || nx >= mask.width as i64 || ny >= mask.height as i64 {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if !visited[nidx] && mask.cells[nidx] == 1 {
                        visited[nidx] = true;
                        chain.push(Point::new(nx as f64, ny as f64));
                        cx = nx;
                        cy = ny;
                        advanced = true;
                        break;
                    }
                }
                if !advanced {
                    break;
                }
            }

            if chain.len() >= MIN_CHAIN_LEN {
                chains.push(chain);
            }
        }
    }

    chains
}
