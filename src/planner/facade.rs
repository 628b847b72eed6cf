//! Planner facade: binds a map and configuration, runs one swarm search per
//! query and decodes the winner into a pixel path.

use log::info;
use serde::{Deserialize, Serialize};

use super::clusters::{extract_obstacle_clusters, ObstacleCluster};
use super::config::{PlannerConfig, Strategy};
use super::cost::{CostBreakdown, CostFunction};
use super::map::{GridCoord, OccupancyMap};
use super::raster::build_path;
use crate::error::Result;
use crate::metaheuristics::{
    Bee, Coordinate, IterationCallback, OptimizationResult, Particle, SearchAgent, Swarm,
    SwarmSettings, WarmStart, Wolf,
};

/// Result of one planning query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPath {
    /// Pixel path from start to end inclusive
    pub path: Vec<GridCoord>,
    /// Decoded intermediate waypoints
    pub waypoints: Vec<GridCoord>,
    /// Raw winning position (usable as a warm start)
    pub solution: Vec<f64>,
    /// Weighted cost of the path
    pub cost: f64,
    /// Individual cost terms
    pub breakdown: CostBreakdown,
    /// Best-so-far cost per iteration (entry 0 is the initial population)
    pub history: Vec<f64>,
    /// Cost evaluations spent
    pub evaluations: usize,
}

impl PlannedPath {
    /// Whether no path pixel lies on an obstacle.
    #[must_use]
    pub fn is_collision_free(&self) -> bool {
        self.breakdown.violations == 0
    }

    /// Warm start for a follow-up query seeded from this result.
    #[must_use]
    pub fn warm_start(&self, radius: f64) -> WarmStart {
        WarmStart::new(self.solution.clone()).with_radius(radius)
    }
}

/// Swarm-optimization path planner over one occupancy map.
///
/// # Example
///
/// ```
/// use swarmpath::planner::{GridCoord, OccupancyMap, Planner, PlannerConfig};
/// use swarmpath::metaheuristics::SwarmSettings;
///
/// let map = OccupancyMap::free(10, 10).unwrap();
/// let config = PlannerConfig::new()
///     .with_swarm(SwarmSettings::new().with_population(10).with_iterations(10).with_seed(1));
/// let planner = Planner::new(map, config).unwrap();
///
/// let planned = planner.get_path(GridCoord::new(0, 0), GridCoord::new(9, 9)).unwrap();
/// assert_eq!(planned.path.first(), Some(&GridCoord::new(0, 0)));
/// assert_eq!(planned.path.last(), Some(&GridCoord::new(9, 9)));
/// assert!(planned.is_collision_free());
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    map: OccupancyMap,
    config: PlannerConfig,
    clusters: Vec<ObstacleCluster>,
}

impl Planner {
    /// Validate the configuration and precompute obstacle clusters when the
    /// cost uses them.
    pub fn new(map: OccupancyMap, config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let clusters = if config.weights.uses_repulsion() {
            extract_obstacle_clusters(&map)
        } else {
            Vec::new()
        };
        Ok(Self {
            map,
            config,
            clusters,
        })
    }

    /// The map being planned on.
    #[must_use]
    pub fn map(&self) -> &OccupancyMap {
        &self.map
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Obstacle clusters used by the repulsion term (empty when disabled).
    #[must_use]
    pub fn clusters(&self) -> &[ObstacleCluster] {
        &self.clusters
    }

    /// Plan a path from `start` to `end`.
    pub fn get_path(&self, start: GridCoord, end: GridCoord) -> Result<PlannedPath> {
        self.plan(start, end, None)
    }

    /// Plan a path, reporting `(iteration, best)` after every iteration.
    pub fn get_path_with_callback<'c>(
        &self,
        start: GridCoord,
        end: GridCoord,
        callback: impl FnMut(usize, &Coordinate) + 'c,
    ) -> Result<PlannedPath> {
        self.plan(start, end, Some(Box::new(callback)))
    }

    fn plan(
        &self,
        start: GridCoord,
        end: GridCoord,
        callback: Option<IterationCallback<'_>>,
    ) -> Result<PlannedPath> {
        let cost = CostFunction::with_clusters(
            &self.map,
            start,
            end,
            self.config.weights,
            self.config.length_metric,
            self.clusters.clone(),
        )?;
        let objective = |raw: &[f64]| cost.evaluate(raw);
        let settings = &self.config.swarm;

        let result = match self.config.strategy {
            Strategy::Pso(params) => run::<Particle>(settings, params, &objective, callback)?,
            Strategy::GreyWolf => run::<Wolf>(settings, (), &objective, callback)?,
            Strategy::Bee(params) => run::<Bee>(settings, params, &objective, callback)?,
        };

        let waypoints = cost.waypoints(result.solution());
        let path = build_path(start, &waypoints, end);
        let breakdown = cost.breakdown(&path);

        info!(
            "[planner] {} {} -> {}: {} pixels, {} violations, cost {:.4}",
            self.config.strategy.as_str(),
            start,
            end,
            path.len(),
            breakdown.violations,
            breakdown.total
        );

        Ok(PlannedPath {
            path,
            waypoints,
            cost: breakdown.total,
            breakdown,
            solution: result.best.into_position(),
            history: result.history,
            evaluations: result.evaluations,
        })
    }
}

fn run<'a, A: SearchAgent>(
    settings: &SwarmSettings,
    params: A::Params,
    objective: &'a dyn Fn(&[f64]) -> f64,
    callback: Option<IterationCallback<'a>>,
) -> Result<OptimizationResult> {
    let mut swarm = Swarm::<A>::new(settings, params, objective)?;
    if let Some(callback) = callback {
        swarm = swarm.with_callback(callback);
    }
    Ok(swarm.solve())
}
