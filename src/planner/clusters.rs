//! Obstacle-cluster extraction.
//!
//! Groups obstacle cells into 8-connected components and summarizes each by
//! its rounded centroid and pixel count. Runs in time linear in map area.

use log::debug;
use serde::{Deserialize, Serialize};

use super::map::{GridCoord, OccupancyMap};

/// A connected blob of obstacle cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleCluster {
    /// Integer-rounded mean of the member pixels
    pub centroid: GridCoord,
    /// Number of member pixels
    pub mass: usize,
}

/// Find all 8-connected obstacle clusters, in row-major order of their first
/// pixel.
///
/// ```
/// use swarmpath::planner::{extract_obstacle_clusters, OccupancyMap};
///
/// let map = OccupancyMap::parse_ascii("#...\n.#..\n...#").unwrap();
/// let clusters = extract_obstacle_clusters(&map);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].mass, 2);
/// ```
#[must_use]
pub fn extract_obstacle_clusters(map: &OccupancyMap) -> Vec<ObstacleCluster> {
    let (rows, cols) = (map.rows(), map.cols());
    let mut visited = vec![false; rows * cols];
    let mut clusters = Vec::new();
    let mut stack = Vec::new();

    for y in 0..rows {
        for x in 0..cols {
            let idx = y * cols + x;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            let seed = GridCoord::new(x as i32, y as i32);
            if !map.is_obstacle(seed) {
                continue;
            }

            let (mut mass, mut sum_x, mut sum_y) = (0usize, 0i64, 0i64);
            stack.push(seed);
            while let Some(cell) = stack.pop() {
                mass += 1;
                sum_x += i64::from(cell.x);
                sum_y += i64::from(cell.y);

                for n in cell.neighbors_8() {
                    if !map.contains(n) {
                        continue;
                    }
                    let n_idx = n.y as usize * cols + n.x as usize;
                    if visited[n_idx] {
                        continue;
                    }
                    // Free cells are marked too: each cell is inspected once.
                    visited[n_idx] = true;
                    if map.is_obstacle(n) {
                        stack.push(n);
                    }
                }
            }

            let m = mass as f64;
            clusters.push(ObstacleCluster {
                centroid: GridCoord::new(
                    (sum_x as f64 / m).round_ties_even() as i32,
                    (sum_y as f64 / m).round_ties_even() as i32,
                ),
                mass,
            });
        }
    }

    debug!(
        "[clusters] {} clusters from {} obstacle cells",
        clusters.len(),
        clusters.iter().map(|c| c.mass).sum::<usize>()
    );
    clusters
}
