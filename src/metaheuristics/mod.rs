//! Population-based metaheuristics over a bounded hypercube.
//!
//! Three interchangeable strategies share one optimization loop
//! ([`Swarm`]) and one candidate-solution type ([`Coordinate`]):
//!
//! - [`ParticleSwarm`] - particles pulled toward the global best
//! - [`GreyWolf`] - wolves encircling the three best wolves
//! - [`BeeColony`] - greedy Lévy-flight foraging with scout resets
//!
//! Every stochastic draw of a run comes from one seeded stream owned by the
//! loop, so a fixed seed reproduces a run bit for bit.
//!
//! # Example
//!
//! ```
//! use swarmpath::metaheuristics::{BeeColony, BeeParams, SwarmSettings};
//!
//! let objective = |x: &[f64]| x.iter().map(|v| (v - 0.5).powi(2)).sum::<f64>();
//! let settings = SwarmSettings::new().with_points(1).with_seed(7);
//!
//! let result = BeeColony::new(&settings, BeeParams::default(), &objective)
//!     .unwrap()
//!     .solve();
//! assert_eq!(result.solution().len(), 2);
//! assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
//! ```

mod abc;
mod coordinate;
mod gwo;
mod levy;
mod pso;
mod settings;
mod swarm;

pub use abc::{Bee, BeeColony, BeeParams};
pub use coordinate::{Coordinate, SearchContext, Seeding};
pub use gwo::{GreyWolf, Wolf};
pub use levy::levy_step;
pub use pso::{Particle, ParticleSwarm, PsoParams};
pub use settings::{Bounds, SwarmSettings, WarmStart};
pub use swarm::{IterationCallback, IterationState, OptimizationResult, SearchAgent, Swarm};

#[cfg(test)]
mod tests_swarm_contract;
