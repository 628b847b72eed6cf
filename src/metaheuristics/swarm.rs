//! Population-based optimization loop shared by every swarm strategy.
//!
//! # Algorithm
//!
//! ```text
//! 1. Build N agents on one seeded random stream
//! 2. Select the leader set (k best agents)
//! 3. Repeat for a fixed number of iterations:
//!    - compute the iteration's control parameter
//!    - step every agent against the frozen leader set
//!    - re-select leaders; snapshot the first one if it strictly beats best
//!    - report (iteration, best) to the callback
//! 4. Return the best snapshot
//! ```
//!
//! Leaders are snapshots taken at iteration boundaries, so no agent can see
//! another agent's position from the iteration in progress.

use log::{debug, info};

use super::coordinate::{Coordinate, SearchContext, Seeding};
use super::settings::SwarmSettings;
use crate::error::Result;

/// Read-only view of the population state handed to each agent's step.
#[derive(Debug, Clone, Copy)]
pub struct IterationState<'s> {
    /// Zero-based iteration index
    pub iteration: usize,
    /// Strategy-specific control parameter for this iteration
    pub control: f64,
    /// Leader snapshots, best first (never empty)
    pub leaders: &'s [Coordinate],
}

/// A population member with its own update rule.
///
/// The loop only relies on this capability set; it never inspects the
/// concrete agent type.
pub trait SearchAgent: Sized {
    /// Strategy hyperparameters, shared by every agent of a population.
    type Params: Clone;

    /// Size of the leader set handed to [`SearchAgent::step`].
    const LEADERS: usize;

    /// Human-readable strategy name.
    const NAME: &'static str;

    /// Check the hyperparameters before any agent is built.
    fn validate_params(_params: &Self::Params) -> Result<()> {
        Ok(())
    }

    /// Build an agent with the given starting position policy.
    fn spawn(params: &Self::Params, seeding: Seeding, ctx: &mut SearchContext<'_>) -> Self;

    /// The agent's candidate solution.
    fn coordinate(&self) -> &Coordinate;

    /// Control parameter for `iteration` out of `iterations`.
    fn control_parameter(_iteration: usize, _iterations: usize) -> f64 {
        0.0
    }

    /// Advance the agent by one iteration.
    fn step(&mut self, state: &IterationState<'_>, ctx: &mut SearchContext<'_>);
}

/// Observer invoked after every iteration with the iteration index and the
/// best candidate so far.
pub type IterationCallback<'a> = Box<dyn FnMut(usize, &Coordinate) + 'a>;

/// Outcome of one optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best candidate found (a snapshot, not a population member)
    pub best: Coordinate,
    /// Best-so-far value before the first iteration and after each one
    pub history: Vec<f64>,
    /// Number of cost evaluations
    pub evaluations: usize,
    /// Iterations executed
    pub iterations: usize,
}

impl OptimizationResult {
    /// Best position.
    #[must_use]
    pub fn solution(&self) -> &[f64] {
        self.best.position()
    }

    /// Best cost.
    #[must_use]
    pub fn objective_value(&self) -> f64 {
        self.best.value()
    }
}

/// Optimization loop over a population of `A` agents.
///
/// # Example
///
/// ```
/// use swarmpath::metaheuristics::{GreyWolf, SwarmSettings};
///
/// let sphere = |x: &[f64]| x.iter().map(|v| (v - 0.3).powi(2)).sum::<f64>();
/// let settings = SwarmSettings::new()
///     .with_population(20)
///     .with_iterations(50)
///     .with_points(2)
///     .with_seed(42);
///
/// let swarm = GreyWolf::new(&settings, (), &sphere).unwrap();
/// let result = swarm.solve();
/// assert!(result.objective_value() < 0.01);
/// ```
pub struct Swarm<'a, A: SearchAgent> {
    agents: Vec<A>,
    ctx: SearchContext<'a>,
    iterations: usize,
    callback: Option<IterationCallback<'a>>,
}

impl<A: SearchAgent> std::fmt::Debug for Swarm<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Swarm")
            .field("strategy", &A::NAME)
            .field("population", &self.agents.len())
            .field("iterations", &self.iterations)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

impl<'a, A: SearchAgent> Swarm<'a, A> {
    /// Build the population.
    ///
    /// When a warm start is configured the first agent starts exactly on it
    /// and every other agent starts on a perturbed copy.
    pub fn new(
        settings: &SwarmSettings,
        params: A::Params,
        objective: &'a dyn Fn(&[f64]) -> f64,
    ) -> Result<Self> {
        settings.validate()?;
        A::validate_params(&params)?;

        let mut ctx = SearchContext::new(settings, objective);
        let warm = ctx.has_warm_start();
        let agents = (0..settings.population)
            .map(|i| A::spawn(&params, Seeding::for_member(i, warm), &mut ctx))
            .collect();

        Ok(Self {
            agents,
            ctx,
            iterations: settings.iterations,
            callback: None,
        })
    }

    /// Register an iteration observer.
    #[must_use]
    pub fn with_callback(mut self, callback: impl FnMut(usize, &Coordinate) + 'a) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Current population.
    #[must_use]
    pub fn agents(&self) -> &[A] {
        &self.agents
    }

    /// Run the fixed iteration budget and return the best candidate found.
    pub fn solve(mut self) -> OptimizationResult {
        let mut leaders = select_leaders(&self.agents, A::LEADERS);
        let mut best = leaders[0].clone();
        let mut history = Vec::with_capacity(self.iterations + 1);
        history.push(best.value());

        for iteration in 0..self.iterations {
            let state = IterationState {
                iteration,
                control: A::control_parameter(iteration, self.iterations),
                leaders: &leaders,
            };

            for agent in &mut self.agents {
                agent.step(&state, &mut self.ctx);
            }

            leaders = select_leaders(&self.agents, A::LEADERS);
            if leaders[0].value() < best.value() {
                best = leaders[0].clone();
            }

            debug!(
                "[{}] iteration {}: current best {:.6}, overall best {:.6}",
                A::NAME,
                iteration,
                leaders[0].value(),
                best.value()
            );

            history.push(best.value());
            if let Some(callback) = self.callback.as_mut() {
                callback(iteration, &best);
            }
        }

        info!(
            "[{}] finished {} iterations: best {:.6} after {} evaluations",
            A::NAME,
            self.iterations,
            best.value(),
            self.ctx.evaluations()
        );

        OptimizationResult {
            best,
            history,
            evaluations: self.ctx.evaluations(),
            iterations: self.iterations,
        }
    }
}

/// Snapshot the `count` best agents, best first.
///
/// Ties keep population order. If the population is smaller than `count`
/// the leader set is padded with copies of the best agent.
fn select_leaders<A: SearchAgent>(agents: &[A], count: usize) -> Vec<Coordinate> {
    let mut order: Vec<usize> = (0..agents.len()).collect();
    order.sort_by(|&a, &b| agents[a].coordinate().cmp_value(agents[b].coordinate()));

    let count = count.max(1);
    let mut leaders: Vec<Coordinate> = order
        .iter()
        .take(count)
        .map(|&i| agents[i].coordinate().clone())
        .collect();
    while leaders.len() < count {
        leaders.push(leaders[0].clone());
    }
    leaders
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Agent that never moves; used to exercise the loop itself.
    struct Still {
        coordinate: Coordinate,
    }

    impl SearchAgent for Still {
        type Params = ();
        const LEADERS: usize = 3;
        const NAME: &'static str = "still";

        fn spawn(_: &(), seeding: Seeding, ctx: &mut SearchContext<'_>) -> Self {
            Self {
                coordinate: Coordinate::new(ctx, seeding),
            }
        }

        fn coordinate(&self) -> &Coordinate {
            &self.coordinate
        }

        fn step(&mut self, _: &IterationState<'_>, _: &mut SearchContext<'_>) {}
    }

    fn sum(x: &[f64]) -> f64 {
        x.iter().sum()
    }

    #[test]
    fn test_leaders_sorted_and_padded() {
        let settings = SwarmSettings::new().with_population(2).with_points(1).with_seed(4);
        let swarm = Swarm::<Still>::new(&settings, (), &sum).expect("valid settings");
        let leaders = select_leaders(swarm.agents(), 3);
        assert_eq!(leaders.len(), 3);
        assert!(leaders[0].value() <= leaders[1].value());
        assert!((leaders[2].value() - leaders[0].value()).abs() < 1e-15);
    }

    #[test]
    fn test_overflowing_bounds_rejected_before_sampling() {
        let settings = SwarmSettings::new()
            .with_bounds(-f64::MAX, f64::MAX)
            .with_seed(1);
        assert!(matches!(
            Swarm::<Still>::new(&settings, (), &sum),
            Err(crate::error::PlannerError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_zero_iterations_returns_initial_best() {
        let settings = SwarmSettings::new()
            .with_population(5)
            .with_iterations(0)
            .with_seed(8);
        let swarm = Swarm::<Still>::new(&settings, (), &sum).expect("valid settings");
        let initial_min = swarm
            .agents()
            .iter()
            .map(|a| a.coordinate().value())
            .fold(f64::INFINITY, f64::min);
        let result = swarm.solve();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.history.len(), 1);
        assert!((result.objective_value() - initial_min).abs() < 1e-15);
    }

    #[test]
    fn test_zero_population_rejected() {
        let settings = SwarmSettings::new().with_population(0);
        assert!(Swarm::<Still>::new(&settings, (), &sum).is_err());
    }

    #[test]
    fn test_callback_sees_every_iteration() {
        let settings = SwarmSettings::new()
            .with_population(4)
            .with_iterations(6)
            .with_seed(1);
        let mut seen = Vec::new();
        {
            let swarm = Swarm::<Still>::new(&settings, (), &sum)
                .expect("valid settings")
                .with_callback(|i, best| seen.push((i, best.value())));
            let _ = swarm.solve();
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(seen.iter().map(|s| s.0).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_evaluations_counted() {
        let settings = SwarmSettings::new()
            .with_population(7)
            .with_iterations(3)
            .with_seed(1);
        let result = Swarm::<Still>::new(&settings, (), &sum)
            .expect("valid settings")
            .solve();
        assert_eq!(result.evaluations, 7);
        assert_eq!(result.history.len(), 4);
    }
}
