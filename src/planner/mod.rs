//! Path planning on binary occupancy maps.
//!
//! A path from start to end is encoded as a few intermediate waypoints in
//! normalized `[0, 1]²` coordinates. A swarm search minimizes the cost of
//! the decoded pixel path:
//!
//! ```text
//! raw position ──decode──▶ waypoints ──build_path──▶ pixel path ──score──▶ cost
//! ```
//!
//! The cost is a normalized weighted sum of the obstacle violation count,
//! the path length and, optionally, a repulsion term from obstacle clusters.

mod clusters;
mod config;
mod cost;
mod facade;
mod map;
mod raster;

pub use clusters::{extract_obstacle_clusters, ObstacleCluster};
pub use config::{PlannerConfig, Strategy};
pub use cost::{repulsion, CostBreakdown, CostFunction, CostWeights, LengthMetric};
pub use facade::{PlannedPath, Planner};
pub use map::{GridCoord, OccupancyMap, DEFAULT_OBSTACLE};
pub use raster::{build_path, decode, rasterize};
