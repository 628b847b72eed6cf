//! Waypoint decoding and straight-line rasterization.

use super::map::GridCoord;

/// Decode a raw candidate position into pixel waypoints.
///
/// Consecutive `(x, y)` pairs are scaled by `(cols - 1, rows - 1)` and
/// truncated toward zero. Components outside [0, 1] (possible with custom
/// search bounds) are clamped onto the map edge. A trailing unpaired
/// component is ignored.
#[must_use]
pub fn decode(raw: &[f64], rows: usize, cols: usize) -> Vec<GridCoord> {
    let max_x = cols.saturating_sub(1) as f64;
    let max_y = rows.saturating_sub(1) as f64;
    raw.chunks_exact(2)
        .map(|p| {
            let x = (p[0] * max_x).trunc().clamp(0.0, max_x);
            let y = (p[1] * max_y).trunc().clamp(0.0, max_y);
            GridCoord::new(x as i32, y as i32)
        })
        .collect()
}

/// Sample the segment `p1 -> p2` at `max(|dx|, |dy|) + 1` equally spaced
/// points, rounded to the nearest pixel (ties to even).
///
/// The first and last samples are exactly `p1` and `p2`, and consecutive
/// samples are never more than one pixel apart on either axis. Differences
/// are taken in `i64`, so any pair of `i32` pixels is accepted.
#[must_use]
pub fn rasterize(p1: GridCoord, p2: GridCoord) -> Vec<GridCoord> {
    let dx = i64::from(p2.x) - i64::from(p1.x);
    let dy = i64::from(p2.y) - i64::from(p1.y);
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return vec![p1];
    }

    let n = steps as f64;
    (0..=steps)
        .map(|i| {
            let t = i as f64 / n;
            let x = f64::from(p1.x) + dx as f64 * t;
            let y = f64::from(p1.y) + dy as f64 * t;
            GridCoord::new(x.round_ties_even() as i32, y.round_ties_even() as i32)
        })
        .collect()
}

/// Join `start -> waypoints... -> end` into one pixel path.
///
/// The shared endpoint between consecutive segments appears once.
#[must_use]
pub fn build_path(start: GridCoord, waypoints: &[GridCoord], end: GridCoord) -> Vec<GridCoord> {
    let mut path = vec![start];
    let mut prev = start;
    for &next in waypoints.iter().chain(std::iter::once(&end)) {
        path.extend(rasterize(prev, next).into_iter().skip(1));
        prev = next;
    }
    path
}
