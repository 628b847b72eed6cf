//! Swarmpath: swarm-metaheuristic path planning on occupancy grids.
//!
//! A path between two pixels is encoded as a handful of intermediate
//! waypoints and optimized by one of three population-based strategies:
//! particle swarm, grey wolf, or a Lévy-flight bee colony.
//!
//! # Quick Start
//!
//! ```
//! use swarmpath::prelude::*;
//!
//! let map = OccupancyMap::parse_ascii(
//!     "..........\n\
//!      ..........\n\
//!      ....##....\n\
//!      ....##....\n\
//!      ..........",
//! )
//! .unwrap();
//!
//! let config = PlannerConfig::new()
//!     .with_strategy(Strategy::GreyWolf)
//!     .with_swarm(SwarmSettings::new().with_population(15).with_iterations(20).with_seed(42));
//!
//! let planner = Planner::new(map, config).unwrap();
//! let planned = planner.get_path(GridCoord::new(0, 2), GridCoord::new(9, 3)).unwrap();
//!
//! assert_eq!(planned.path[0], GridCoord::new(0, 2));
//! assert_eq!(*planned.path.last().unwrap(), GridCoord::new(9, 3));
//! ```
//!
//! # Modules
//!
//! - [`metaheuristics`]: Generic swarm loop and the PSO, GWO and ABC agents
//! - [`planner`]: Maps, path decoding, cost function and the planner facade
//! - [`error`]: Error type shared by both

pub mod error;
pub mod metaheuristics;
pub mod planner;
pub mod prelude;

pub use error::{PlannerError, Result};
