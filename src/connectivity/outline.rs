//! Boundary tracing.
//!
//! Moore-neighbour tracing: walk clockwise around the current boundary pixel,
//! starting just after the last empty neighbour examined, and step onto the
//! first set neighbour found.

use crate::error::{MaskError, MaskResult};
use crate::models::{Bitmask, Point};

/// Neighbour offsets, clockwise with y growing downward, starting east.
const DIRS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const WEST: usize = 4;

/// One tracing step from `p`, whose empty backtrack neighbour lies in
/// direction `back`. Returns the next boundary pixel and its backtrack
/// direction, or `None` for an isolated pixel.
fn step(mask: &Bitmask, p: (i64, i64), back: usize) -> Option<((i64, i64), usize)> {
    for turn in 1..8 {
        let dir = (back + turn) % 8;
        let next = (p.0 + DIRS[dir].0, p.1 + DIRS[dir].1);
        if mask.get_or_unset(next.0, next.1) {
            // The neighbour examined just before `next`, seen from `next`.
            let next_back = if dir % 2 == 0 { (dir + 6) % 8 } else { (dir + 5) % 8 };
            return Some((next, next_back));
        }
    }
    None
}

impl Bitmask {
    /// Trace the boundary of the first connected component in raster order.
    ///
    /// The trace starts at the component's first raster pixel, runs clockwise
    /// and ends before it would repeat its opening step. Every `every`-th
    /// point is returned, starting with the first. A mask without set bits
    /// gives an empty list and an isolated pixel a single point.
    pub fn outline(&self, every: usize) -> MaskResult<Vec<Point>> {
        if every == 0 {
            return Err(MaskError::invalid_argument("outline step must be at least 1"));
        }
        let Some((sx, sy)) = self.iter_set().next() else {
            return Ok(Vec::new());
        };

        let start = (sx as i64, sy as i64);
        let mut trace = vec![start];
        let Some((second, mut back)) = step(self, start, WEST) else {
            return Ok(to_points(trace, every));
        };

        // Each (pixel, backtrack) state occurs at most once per lap.
        let limit = 8 * self.count() + 8;
        let mut current = second;
        while trace.len() <= limit {
            let Some((next, next_back)) = step(self, current, back) else {
                break;
            };
            if current == start && next == second {
                break;
            }
            trace.push(current);
            current = next;
            back = next_back;
        }
        Ok(to_points(trace, every))
    }
}

fn to_points(trace: Vec<(i64, i64)>, every: usize) -> Vec<Point> {
    trace
        .into_iter()
        .step_by(every)
        .map(|(x, y)| Point::new(x as i32, y as i32))
        .collect()
}
