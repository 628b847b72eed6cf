//! Search-space and population settings shared by every swarm strategy.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Closed interval every position component is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower boundary (default: 0.0)
    pub lower: f64,
    /// Upper boundary (default: 1.0)
    pub upper: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl Bounds {
    /// Create a new boundary interval.
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Reject inverted or non-finite intervals, including ones whose width
    /// overflows `f64`.
    pub fn validate(&self) -> Result<()> {
        if !self.lower.is_finite()
            || !self.upper.is_finite()
            || self.lower > self.upper
            || !(self.upper - self.lower).is_finite()
        {
            return Err(PlannerError::InvalidBounds {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }

    /// Clip a single component.
    #[inline]
    #[must_use]
    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    /// Clip every component in place.
    pub fn clip_all(&self, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = self.clip(*v);
        }
    }

    /// Whether `value` lies inside the interval.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// A previously known solution used to seed a new search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarmStart {
    /// Seed position (length must equal the search dimension)
    pub position: Vec<f64>,
    /// Half-width of the uniform perturbation applied to the seed (default: 0.1)
    #[serde(default = "WarmStart::default_radius")]
    pub radius: f64,
}

impl WarmStart {
    /// Create a warm start with the default perturbation radius.
    #[must_use]
    pub fn new(position: Vec<f64>) -> Self {
        Self {
            position,
            radius: Self::default_radius(),
        }
    }

    /// Set the perturbation radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    fn default_radius() -> f64 {
        0.1
    }
}

/// Population-level settings for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmSettings {
    /// Number of agents (default: 30)
    pub population: usize,
    /// Fixed iteration budget (default: 30)
    pub iterations: usize,
    /// Number of intermediate waypoints; the search dimension is twice this (default: 3)
    pub points: usize,
    /// Component-wise boundary interval (default: [0, 1])
    pub bounds: Bounds,
    /// Random seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// Optional warm-start seed
    pub warm_start: Option<WarmStart>,
}

impl Default for SwarmSettings {
    fn default() -> Self {
        Self {
            population: 30,
            iterations: 30,
            points: 3,
            bounds: Bounds::default(),
            seed: None,
            warm_start: None,
        }
    }
}

impl SwarmSettings {
    /// Create settings with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population size.
    #[must_use]
    pub fn with_population(mut self, population: usize) -> Self {
        self.population = population;
        self
    }

    /// Set the iteration budget.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the waypoint count.
    #[must_use]
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Set the boundary interval.
    #[must_use]
    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Bounds::new(lower, upper);
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed the population from a known position.
    #[must_use]
    pub fn with_warm_start(mut self, warm_start: WarmStart) -> Self {
        self.warm_start = Some(warm_start);
        self
    }

    /// Search-space dimension (two coordinates per waypoint).
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.points * 2
    }

    /// Check the settings needed to build a population.
    ///
    /// The iteration count is not checked here: a zero budget simply returns
    /// the initial best.
    pub fn validate(&self) -> Result<()> {
        if self.population == 0 {
            return Err(PlannerError::hyperparameter("population", 0, "> 0"));
        }
        if self.points == 0 {
            return Err(PlannerError::hyperparameter("points", 0, "> 0"));
        }
        self.bounds.validate()?;

        if let Some(warm) = &self.warm_start {
            if warm.position.len() != self.dimension() {
                return Err(PlannerError::hyperparameter(
                    "warm_start.position",
                    format!("{} components", warm.position.len()),
                    &format!("{} components (2 per waypoint)", self.dimension()),
                ));
            }
            if !warm.radius.is_finite() || warm.radius < 0.0 {
                return Err(PlannerError::hyperparameter(
                    "warm_start.radius",
                    warm.radius,
                    ">= 0 and finite",
                ));
            }
        }
        Ok(())
    }
}
