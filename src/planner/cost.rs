//! Path cost: obstacle violations, length and optional obstacle repulsion.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use super::clusters::{extract_obstacle_clusters, ObstacleCluster};
use super::map::{GridCoord, OccupancyMap};
use super::raster::{build_path, decode};
use crate::error::{PlannerError, Result};

/// Smallest distance used in the repulsion term, so a path crossing a
/// centroid gets a large but finite penalty.
const MIN_REPULSION_DISTANCE: f64 = 0.5;

/// How path length is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthMetric {
    /// Orthogonal step = 1, diagonal step = √2.
    #[default]
    Steps,
    /// Sum of Euclidean distances between consecutive pixels.
    Euclidean,
}

impl LengthMetric {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "steps" | "step" | "octile" => Some(Self::Steps),
            "euclidean" | "euclid" => Some(Self::Euclidean),
            _ => None,
        }
    }

    /// Length of `path` under this metric.
    #[must_use]
    pub fn length(self, path: &[GridCoord]) -> f64 {
        path.windows(2)
            .map(|w| match self {
                Self::Steps => step_length(w[0], w[1]),
                Self::Euclidean => w[0].distance(w[1]),
            })
            .sum()
    }
}

fn step_length(a: GridCoord, b: GridCoord) -> f64 {
    if a == b {
        0.0
    } else if a.x == b.x || a.y == b.y {
        1.0
    } else {
        SQRT_2
    }
}

/// Relative weight of each cost term, normalized to sum to 1 when scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostWeights {
    /// Obstacle violations and path length.
    ViolationLength {
        /// Weight of the violation count
        violation: f64,
        /// Weight of the path length
        length: f64,
    },
    /// Violations, length and proximity to obstacle clusters.
    ViolationLengthRepulsion {
        /// Weight of the violation count
        violation: f64,
        /// Weight of the path length
        length: f64,
        /// Weight of the cluster repulsion
        repulsion: f64,
    },
}

impl Default for CostWeights {
    fn default() -> Self {
        Self::ViolationLength {
            violation: 0.9,
            length: 0.1,
        }
    }
}

impl CostWeights {
    /// Build from a 2- or 3-element tuple.
    ///
    /// ```
    /// use swarmpath::planner::CostWeights;
    ///
    /// let w = CostWeights::from_slice(&[3.0, 1.0]).unwrap();
    /// assert_eq!(w.normalized(), [0.75, 0.25, 0.0]);
    /// assert!(CostWeights::from_slice(&[1.0]).is_err());
    /// ```
    pub fn from_slice(weights: &[f64]) -> Result<Self> {
        let w = match *weights {
            [violation, length] => Self::ViolationLength { violation, length },
            [violation, length, repulsion] => Self::ViolationLengthRepulsion {
                violation,
                length,
                repulsion,
            },
            _ => {
                return Err(PlannerError::InvalidWeights(format!(
                    "expected 2 or 3 weights, got {}",
                    weights.len()
                )));
            }
        };
        w.validate()?;
        Ok(w)
    }

    /// Raw weights as `[violation, length, repulsion]`.
    #[must_use]
    pub fn raw(&self) -> [f64; 3] {
        match *self {
            Self::ViolationLength { violation, length } => [violation, length, 0.0],
            Self::ViolationLengthRepulsion {
                violation,
                length,
                repulsion,
            } => [violation, length, repulsion],
        }
    }

    /// Weights scaled to sum to 1.
    #[must_use]
    pub fn normalized(&self) -> [f64; 3] {
        let raw = self.raw();
        let total: f64 = raw.iter().sum();
        raw.map(|w| w / total)
    }

    /// Whether the repulsion term is enabled.
    #[must_use]
    pub fn uses_repulsion(&self) -> bool {
        matches!(self, Self::ViolationLengthRepulsion { .. })
    }

    /// Weights must be finite, non-negative and not all zero.
    pub fn validate(&self) -> Result<()> {
        let raw = self.raw();
        if raw.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PlannerError::InvalidWeights(format!(
                "weights must be finite and non-negative, got {raw:?}"
            )));
        }
        if raw.iter().sum::<f64>() <= 0.0 {
            return Err(PlannerError::InvalidWeights(
                "weights must not all be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unweighted cost terms of one path plus the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Path pixels lying on obstacles
    pub violations: usize,
    /// Path length under the configured metric
    pub length: f64,
    /// Cluster repulsion (0 when disabled)
    pub repulsion: f64,
    /// Normalized weighted sum
    pub total: f64,
}

/// Repulsion of `path` from `clusters`: Σ mass / min distance to centroid.
#[must_use]
pub fn repulsion(path: &[GridCoord], clusters: &[ObstacleCluster]) -> f64 {
    if path.is_empty() {
        return 0.0;
    }
    clusters
        .iter()
        .map(|cluster| {
            let nearest = path
                .iter()
                .map(|p| p.distance(cluster.centroid))
                .fold(f64::INFINITY, f64::min);
            cluster.mass as f64 / nearest.max(MIN_REPULSION_DISTANCE)
        })
        .sum()
}

/// Cost function for one start/end query on one map.
///
/// Decodes raw candidate positions into pixel paths and scores them.
#[derive(Debug, Clone)]
pub struct CostFunction<'m> {
    map: &'m OccupancyMap,
    start: GridCoord,
    end: GridCoord,
    weights: CostWeights,
    metric: LengthMetric,
    clusters: Vec<ObstacleCluster>,
}

impl<'m> CostFunction<'m> {
    /// Bind a map and endpoints. Obstacle clusters are extracted when the
    /// weights enable repulsion.
    pub fn new(
        map: &'m OccupancyMap,
        start: GridCoord,
        end: GridCoord,
        weights: CostWeights,
        metric: LengthMetric,
    ) -> Result<Self> {
        let clusters = if weights.uses_repulsion() {
            extract_obstacle_clusters(map)
        } else {
            Vec::new()
        };
        Self::with_clusters(map, start, end, weights, metric, clusters)
    }

    /// Bind a map and endpoints using clusters extracted earlier from the
    /// same map. The clusters are ignored unless the weights enable
    /// repulsion.
    pub fn with_clusters(
        map: &'m OccupancyMap,
        start: GridCoord,
        end: GridCoord,
        weights: CostWeights,
        metric: LengthMetric,
        clusters: Vec<ObstacleCluster>,
    ) -> Result<Self> {
        weights.validate()?;
        map.check_bounds(start)?;
        map.check_bounds(end)?;
        let clusters = if weights.uses_repulsion() {
            clusters
        } else {
            Vec::new()
        };
        Ok(Self {
            map,
            start,
            end,
            weights,
            metric,
            clusters,
        })
    }

    /// Clusters used by the repulsion term.
    #[must_use]
    pub fn clusters(&self) -> &[ObstacleCluster] {
        &self.clusters
    }

    /// Decode a raw position into waypoints.
    #[must_use]
    pub fn waypoints(&self, raw: &[f64]) -> Vec<GridCoord> {
        decode(raw, self.map.rows(), self.map.cols())
    }

    /// Decode a raw position into the full pixel path.
    #[must_use]
    pub fn decode_path(&self, raw: &[f64]) -> Vec<GridCoord> {
        build_path(self.start, &self.waypoints(raw), self.end)
    }

    /// Score a pixel path term by term.
    #[must_use]
    pub fn breakdown(&self, path: &[GridCoord]) -> CostBreakdown {
        let [w_violation, w_length, w_repulsion] = self.weights.normalized();
        let violations = path.iter().filter(|&&p| self.map.is_obstacle(p)).count();
        let length = self.metric.length(path);
        let repulsion = if self.weights.uses_repulsion() {
            repulsion(path, &self.clusters)
        } else {
            0.0
        };

        CostBreakdown {
            violations,
            length,
            repulsion,
            total: w_violation * violations as f64 + w_length * length + w_repulsion * repulsion,
        }
    }

    /// Scalar cost of a raw candidate position.
    #[must_use]
    pub fn evaluate(&self, raw: &[f64]) -> f64 {
        self.breakdown(&self.decode_path(raw)).total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn test_steps_metric() {
        let path = [c(0, 0), c(1, 0), c(2, 1), c(2, 1), c(2, 2)];
        let len = LengthMetric::Steps.length(&path);
        assert!((len - (2.0 + SQRT_2)).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean_metric() {
        let path = [c(0, 0), c(3, 4), c(3, 5)];
        assert!((LengthMetric::Euclidean.length(&path) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!(LengthMetric::parse("Steps"), Some(LengthMetric::Steps));
        assert_eq!(LengthMetric::parse("euclidean"), Some(LengthMetric::Euclidean));
        assert_eq!(LengthMetric::parse("manhattan"), None);
    }

    #[test]
    fn test_weights_validation() {
        assert!(CostWeights::from_slice(&[1.0, 2.0, 3.0, 4.0]).is_err());
        assert!(CostWeights::from_slice(&[0.0, 0.0]).is_err());
        assert!(CostWeights::from_slice(&[-1.0, 2.0]).is_err());
        assert!(CostWeights::from_slice(&[f64::NAN, 2.0]).is_err());
        let w = CostWeights::from_slice(&[2.0, 1.0, 1.0]).expect("valid");
        assert!(w.uses_repulsion());
        assert_eq!(w.normalized(), [0.5, 0.25, 0.25]);
    }

    #[test]
    fn test_breakdown_counts_violations() {
        let mut map = OccupancyMap::free(5, 5).expect("valid map");
        map.fill_rect(c(2, 0), c(2, 4));
        let weights = CostWeights::from_slice(&[1.0, 1.0]).expect("valid");
        let cost = CostFunction::new(&map, c(0, 2), c(4, 2), weights, LengthMetric::Steps)
            .expect("valid query");
        let path = build_path(c(0, 2), &[], c(4, 2));
        let b = cost.breakdown(&path);
        assert_eq!(b.violations, 1);
        assert!((b.length - 4.0).abs() < 1e-12);
        assert!((b.repulsion).abs() < 1e-12);
        assert!((b.total - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_repulsion_term() {
        let clusters = [ObstacleCluster {
            centroid: c(5, 5),
            mass: 10,
        }];
        let near = repulsion(&[c(5, 3)], &clusters);
        let far = repulsion(&[c(5, 0)], &clusters);
        assert!((near - 5.0).abs() < 1e-12);
        assert!((far - 2.0).abs() < 1e-12);
        // Crossing the centroid is finite.
        assert!((repulsion(&[c(5, 5)], &clusters) - 20.0).abs() < 1e-12);
        assert!(repulsion(&[], &clusters).abs() < 1e-12);
    }

    #[test]
    fn test_repulsion_enabled_only_with_three_weights() {
        let mut map = OccupancyMap::free(9, 9).expect("valid map");
        map.fill_rect(c(4, 4), c(4, 4));

        let two = CostWeights::from_slice(&[1.0, 1.0]).expect("valid");
        let f2 = CostFunction::new(&map, c(0, 0), c(8, 0), two, LengthMetric::Steps)
            .expect("valid query");
        assert!(f2.clusters().is_empty());

        let three = CostWeights::from_slice(&[1.0, 1.0, 1.0]).expect("valid");
        let f3 = CostFunction::new(&map, c(0, 0), c(8, 0), three, LengthMetric::Steps)
            .expect("valid query");
        assert_eq!(f3.clusters().len(), 1);
        let path = build_path(c(0, 0), &[], c(8, 0));
        assert!((f3.breakdown(&path).repulsion - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_out_of_bounds_endpoints() {
        let map = OccupancyMap::free(4, 4).expect("valid map");
        let w = CostWeights::default();
        assert!(matches!(
            CostFunction::new(&map, c(0, 0), c(4, 0), w, LengthMetric::Steps),
            Err(PlannerError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_evaluate_matches_breakdown() {
        let map = OccupancyMap::parse_ascii("....\n.##.\n....").expect("valid map");
        let cost = CostFunction::new(
            &map,
            c(0, 0),
            c(3, 2),
            CostWeights::default(),
            LengthMetric::Euclidean,
        )
        .expect("valid query");
        let raw = [0.5, 0.5];
        let path = cost.decode_path(&raw);
        assert_eq!(path.first(), Some(&c(0, 0)));
        assert_eq!(path.last(), Some(&c(3, 2)));
        assert!((cost.evaluate(&raw) - cost.breakdown(&path).total).abs() < 1e-12);
    }
}
