//! Grey Wolf Optimizer (GWO) agent.
//!
//! Every wolf is pulled toward the three best wolves of the previous
//! iteration (alpha, beta, delta). The control parameter `a` decays linearly
//! from 2 to 0 over the run: `|A| > 1` drives wolves away from the leaders
//! (exploration), `|A| < 1` encircles them (exploitation).
//!
//! ```text
//! for each leader L:  A = 2a·r₁ − a,  C = 2·r₂,  D = |C·L − x|,  Xₗ = L − A·D
//! x' = (X_alpha + X_beta + X_delta) / 3
//! ```
//!
//! # References
//!
//! - Mirjalili et al. (2014): "Grey Wolf Optimizer"

use rand::Rng;

use super::coordinate::{Coordinate, SearchContext, Seeding};
use super::swarm::{IterationState, SearchAgent, Swarm};

/// One wolf of the pack.
#[derive(Debug, Clone)]
pub struct Wolf {
    coordinate: Coordinate,
}

impl Wolf {
    /// Move toward the three leaders under control parameter `a_parameter`.
    pub fn hunt(
        &mut self,
        a_parameter: f64,
        alpha: &[f64],
        beta: &[f64],
        delta: &[f64],
        ctx: &mut SearchContext<'_>,
    ) -> f64 {
        let dim = self.coordinate.position().len();
        let mut next = vec![0.0; dim];

        for leader in [alpha, beta, delta] {
            let rng = ctx.rng();
            let r1: Vec<f64> = (0..dim).map(|_| rng.gen()).collect();
            let r2: Vec<f64> = (0..dim).map(|_| rng.gen()).collect();

            for (j, slot) in next.iter_mut().enumerate() {
                let a = 2.0 * a_parameter * r1[j] - a_parameter;
                let c = 2.0 * r2[j];
                let distance = (c * leader[j] - self.coordinate.position()[j]).abs();
                *slot += leader[j] - a * distance;
            }
        }

        for slot in &mut next {
            *slot /= 3.0;
        }
        self.coordinate.set_position(next, ctx)
    }
}

impl SearchAgent for Wolf {
    type Params = ();
    const LEADERS: usize = 3;
    const NAME: &'static str = "GWO";

    fn spawn(_params: &(), seeding: Seeding, ctx: &mut SearchContext<'_>) -> Self {
        Self {
            coordinate: Coordinate::new(ctx, seeding),
        }
    }

    fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// `a` decays linearly from 2 toward 0.
    fn control_parameter(iteration: usize, iterations: usize) -> f64 {
        if iterations == 0 {
            return 2.0;
        }
        2.0 - iteration as f64 * (2.0 / iterations as f64)
    }

    fn step(&mut self, state: &IterationState<'_>, ctx: &mut SearchContext<'_>) {
        let alpha = &state.leaders[0];
        let beta = state.leaders.get(1).unwrap_or(alpha);
        let delta = state.leaders.get(2).unwrap_or(alpha);
        self.hunt(
            state.control,
            alpha.position(),
            beta.position(),
            delta.position(),
            ctx,
        );
    }
}

/// Grey wolf problem.
pub type GreyWolf<'a> = Swarm<'a, Wolf>;
