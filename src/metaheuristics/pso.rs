//! Particle Swarm Optimization (PSO) agent.
//!
//! A memoryless variant: each particle keeps only its position and moves
//! toward the swarm's global best with a random per-component pull plus a
//! small uniform jitter.
//!
//! ```text
//! x' = x + c·r₁⊙(g − x) + j·(2r₂ − 1),   r₁, r₂ ~ U[0, 1)ᵈ
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995): Particle Swarm Optimization
//! - Yang (2010): Accelerated PSO in "Engineering Optimization"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, SearchContext, Seeding};
use super::swarm::{IterationState, SearchAgent, Swarm};
use crate::error::{PlannerError, Result};

/// PSO hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoParams {
    /// Attraction coefficient toward the global best (default: 1.5)
    pub attraction: f64,
    /// Half-width of the uniform jitter added to every component (default: 0.02)
    pub jitter: f64,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            attraction: 1.5,
            jitter: 0.02,
        }
    }
}

impl PsoParams {
    /// Set the attraction coefficient.
    #[must_use]
    pub fn with_attraction(mut self, attraction: f64) -> Self {
        self.attraction = attraction;
        self
    }

    /// Set the jitter half-width.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Both coefficients must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.attraction.is_finite() || self.attraction < 0.0 {
            return Err(PlannerError::hyperparameter(
                "attraction",
                self.attraction,
                ">= 0 and finite",
            ));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(PlannerError::hyperparameter(
                "jitter",
                self.jitter,
                ">= 0 and finite",
            ));
        }
        Ok(())
    }
}

/// One particle of the swarm.
#[derive(Debug, Clone)]
pub struct Particle {
    coordinate: Coordinate,
    params: PsoParams,
}

impl Particle {
    /// Move toward `global_best`.
    pub fn step_towards(&mut self, global_best: &[f64], ctx: &mut SearchContext<'_>) -> f64 {
        let PsoParams { attraction, jitter } = self.params;
        let rng = ctx.rng();
        let next: Vec<f64> = self
            .coordinate
            .position()
            .iter()
            .zip(global_best)
            .map(|(&x, &g)| {
                let pull = attraction * rng.gen::<f64>() * (g - x);
                let noise = jitter * (2.0 * rng.gen::<f64>() - 1.0);
                x + pull + noise
            })
            .collect();
        self.coordinate.set_position(next, ctx)
    }
}

impl SearchAgent for Particle {
    type Params = PsoParams;
    const LEADERS: usize = 1;
    const NAME: &'static str = "PSO";

    fn validate_params(params: &PsoParams) -> Result<()> {
        params.validate()
    }

    fn spawn(params: &PsoParams, seeding: Seeding, ctx: &mut SearchContext<'_>) -> Self {
        Self {
            coordinate: Coordinate::new(ctx, seeding),
            params: *params,
        }
    }

    fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    fn step(&mut self, state: &IterationState<'_>, ctx: &mut SearchContext<'_>) {
        self.step_towards(state.leaders[0].position(), ctx);
    }
}

/// Particle swarm problem.
pub type ParticleSwarm<'a> = Swarm<'a, Particle>;
