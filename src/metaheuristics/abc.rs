//! Bee colony agent with Lévy-flight foraging.
//!
//! Each bee performs a greedy local search around its food source using
//! [`levy_step`] perturbations. A bee whose source fails to improve for
//! `trials` consecutive attempts abandons it and becomes a scout: it is
//! re-seeded (from the warm start if one exists, otherwise uniformly).
//!
//! # References
//!
//! - Karaboga (2005): "An Idea Based on Honey Bee Swarm for Numerical Optimization"
//! - Yang & Deb (2009): "Cuckoo Search via Lévy Flights"

use log::trace;
use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, SearchContext, Seeding};
use super::levy::levy_step;
use super::swarm::{IterationState, SearchAgent, Swarm};
use crate::error::{PlannerError, Result};

/// Bee colony hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeeParams {
    /// Failed explorations before a scout reset (default: 3)
    pub trials: usize,
    /// Frequent small step length (default: 0.1)
    pub low_step: f64,
    /// Rare large step length (default: 0.4)
    pub high_step: f64,
    /// Probability of taking the large step (default: 0.1)
    pub high_step_prob: f64,
}

impl Default for BeeParams {
    fn default() -> Self {
        Self {
            trials: 3,
            low_step: 0.1,
            high_step: 0.4,
            high_step_prob: 0.1,
        }
    }
}

impl BeeParams {
    /// Set the trial limit.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set both step lengths.
    #[must_use]
    pub fn with_steps(mut self, low_step: f64, high_step: f64) -> Self {
        self.low_step = low_step;
        self.high_step = high_step;
        self
    }

    /// Set the large-step probability.
    #[must_use]
    pub fn with_high_step_prob(mut self, prob: f64) -> Self {
        self.high_step_prob = prob;
        self
    }

    /// Steps must be finite and non-negative; the probability must lie in [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, step) in [("low_step", self.low_step), ("high_step", self.high_step)] {
            if !step.is_finite() || step < 0.0 {
                return Err(PlannerError::hyperparameter(name, step, ">= 0 and finite"));
            }
        }
        if !(0.0..=1.0).contains(&self.high_step_prob) {
            return Err(PlannerError::hyperparameter(
                "high_step_prob",
                self.high_step_prob,
                "in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// A forager bee.
#[derive(Debug, Clone)]
pub struct Bee {
    coordinate: Coordinate,
    params: BeeParams,
    trials: usize,
    is_reset: bool,
}

impl Bee {
    /// Consecutive failed explorations.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// True after construction or a scout reset, false once an exploration
    /// has improved the source.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.is_reset
    }

    /// Try one Lévy-flight move and keep it only if strictly better.
    ///
    /// Returns whether the move was accepted.
    pub fn explore(&mut self, ctx: &mut SearchContext<'_>) -> bool {
        let BeeParams {
            low_step,
            high_step,
            high_step_prob,
            ..
        } = self.params;
        let delta = levy_step(
            self.coordinate.position(),
            low_step,
            high_step,
            high_step_prob,
            ctx.rng(),
        );

        let bounds = ctx.bounds();
        let candidate: Vec<f64> = self
            .coordinate
            .position()
            .iter()
            .zip(&delta)
            .map(|(x, d)| bounds.clip(x + d))
            .collect();
        let value = ctx.evaluate(&candidate);

        if value < self.coordinate.value() {
            self.coordinate.adopt(candidate, value);
            self.trials = 0;
            self.is_reset = false;
            true
        } else {
            self.trials += 1;
            false
        }
    }

    /// Abandon the source once the trial limit is reached.
    ///
    /// Returns whether a reset happened.
    pub fn reset(&mut self, ctx: &mut SearchContext<'_>) -> bool {
        if self.trials < self.params.trials {
            return false;
        }
        let seeding = Seeding::for_restart(ctx.has_warm_start());
        let value = self.coordinate.reinitialize(seeding, ctx);
        trace!(
            "[ABC] scout reset after {} failed trials, new value {:.6}",
            self.trials,
            value
        );
        self.trials = 0;
        self.is_reset = true;
        true
    }
}

impl SearchAgent for Bee {
    type Params = BeeParams;
    const LEADERS: usize = 1;
    const NAME: &'static str = "ABC";

    fn validate_params(params: &BeeParams) -> Result<()> {
        params.validate()
    }

    fn spawn(params: &BeeParams, seeding: Seeding, ctx: &mut SearchContext<'_>) -> Self {
        Self {
            coordinate: Coordinate::new(ctx, seeding),
            params: *params,
            trials: 0,
            is_reset: true,
        }
    }

    fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    fn step(&mut self, _state: &IterationState<'_>, ctx: &mut SearchContext<'_>) {
        self.explore(ctx);
        self.reset(ctx);
    }
}

/// Bee colony problem.
pub type BeeColony<'a> = Swarm<'a, Bee>;
