//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use swarmpath::prelude::*;
//! ```

pub use crate::error::{PlannerError, Result};
pub use crate::metaheuristics::{
    BeeColony, BeeParams, Bounds, GreyWolf, OptimizationResult, ParticleSwarm, PsoParams,
    SwarmSettings, WarmStart,
};
pub use crate::planner::{
    CostWeights, GridCoord, LengthMetric, OccupancyMap, PlannedPath, Planner, PlannerConfig,
    Strategy,
};
