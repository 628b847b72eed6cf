//! Candidate solutions and the shared search context.
//!
//! A [`Coordinate`] is a point in the bounded search hypercube together with
//! its cost. The only way to move a coordinate is [`Coordinate::set_position`],
//! which clips, re-evaluates and stores both halves at once, so a position and
//! its value can never be observed out of sync.

use std::cmp::Ordering;

use rand::prelude::*;

use super::settings::{Bounds, SwarmSettings, WarmStart};

/// How a coordinate obtains its starting position.
///
/// Chosen per agent by the population constructor instead of a flag shared
/// across the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// Uniform random position inside the bounds.
    FreshRandom,
    /// The warm-start position verbatim (clipped to bounds).
    WarmStartExact,
    /// The warm-start position plus a uniform offset within its radius.
    WarmStartPerturbed,
}

impl Seeding {
    /// Seeding for the `index`-th member of a freshly built population.
    ///
    /// Only the first member reuses the warm start exactly.
    #[must_use]
    pub fn for_member(index: usize, warm_start: bool) -> Self {
        match (warm_start, index) {
            (false, _) => Self::FreshRandom,
            (true, 0) => Self::WarmStartExact,
            (true, _) => Self::WarmStartPerturbed,
        }
    }

    /// Seeding for re-initialization of an existing member (e.g. a scout bee).
    #[must_use]
    pub fn for_restart(warm_start: bool) -> Self {
        if warm_start {
            Self::WarmStartPerturbed
        } else {
            Self::FreshRandom
        }
    }
}

/// Everything an agent needs from its environment: the shared random
/// stream, the cost function and the search-space description.
///
/// Every stochastic draw of a run goes through [`SearchContext::rng`], so a
/// fixed seed reproduces the run exactly.
pub struct SearchContext<'a> {
    rng: StdRng,
    objective: &'a dyn Fn(&[f64]) -> f64,
    bounds: Bounds,
    dimension: usize,
    warm_start: Option<WarmStart>,
    evaluations: usize,
}

impl std::fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("bounds", &self.bounds)
            .field("dimension", &self.dimension)
            .field("warm_start", &self.warm_start)
            .field("evaluations", &self.evaluations)
            .finish_non_exhaustive()
    }
}

impl<'a> SearchContext<'a> {
    /// Build a context from population settings.
    pub fn new(settings: &SwarmSettings, objective: &'a dyn Fn(&[f64]) -> f64) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            objective,
            bounds: settings.bounds,
            dimension: settings.dimension(),
            warm_start: settings.warm_start.clone(),
            evaluations: 0,
        }
    }

    /// The shared random stream.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Boundary interval.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Search-space dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether a warm start is configured.
    #[must_use]
    pub fn has_warm_start(&self) -> bool {
        self.warm_start.is_some()
    }

    /// Number of cost evaluations performed so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Evaluate the cost function and count the evaluation.
    pub fn evaluate(&mut self, position: &[f64]) -> f64 {
        self.evaluations += 1;
        (self.objective)(position)
    }

    /// Draw an initial position according to `seeding`.
    ///
    /// Warm-start seedings fall back to a fresh random draw when no warm
    /// start is configured.
    pub fn sample(&mut self, seeding: Seeding) -> Vec<f64> {
        let bounds = self.bounds;
        let mut position = match (&self.warm_start, seeding) {
            (Some(warm), Seeding::WarmStartExact) => warm.position.clone(),
            (Some(warm), Seeding::WarmStartPerturbed) => {
                let radius = warm.radius;
                warm.position
                    .iter()
                    .map(|&x| x + self.rng.gen_range(-radius..=radius))
                    .collect()
            }
            _ => (0..self.dimension)
                .map(|_| self.rng.gen_range(bounds.lower..=bounds.upper))
                .collect(),
        };
        bounds.clip_all(&mut position);
        position
    }
}

/// A candidate solution: a position and the cost evaluated at it.
#[derive(Debug, Clone)]
pub struct Coordinate {
    position: Vec<f64>,
    value: f64,
}

impl Coordinate {
    /// Create a coordinate seeded from the context.
    pub fn new(ctx: &mut SearchContext<'_>, seeding: Seeding) -> Self {
        let position = ctx.sample(seeding);
        Self::from_position(position, ctx)
    }

    /// Create a coordinate at an explicit position (clipped to bounds).
    pub fn from_position(mut position: Vec<f64>, ctx: &mut SearchContext<'_>) -> Self {
        ctx.bounds().clip_all(&mut position);
        let value = ctx.evaluate(&position);
        Self { position, value }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Cost at the current position.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move to `position`, clipping it to bounds and re-evaluating the cost.
    ///
    /// Returns the new value.
    pub fn set_position(&mut self, mut position: Vec<f64>, ctx: &mut SearchContext<'_>) -> f64 {
        ctx.bounds().clip_all(&mut position);
        self.value = ctx.evaluate(&position);
        self.position = position;
        self.value
    }

    /// Replace the position with an already evaluated one.
    ///
    /// Used for greedy acceptance, where the candidate was evaluated before
    /// the decision to adopt it. `position` must already be clipped.
    pub(crate) fn adopt(&mut self, position: Vec<f64>, value: f64) {
        self.position = position;
        self.value = value;
    }

    /// Draw a new starting position and re-evaluate.
    pub fn reinitialize(&mut self, seeding: Seeding, ctx: &mut SearchContext<'_>) -> f64 {
        let position = ctx.sample(seeding);
        self.set_position(position, ctx)
    }

    /// Consume the coordinate, returning its position.
    #[must_use]
    pub fn into_position(self) -> Vec<f64> {
        self.position
    }

    /// Total order on values (NaN sorts last).
    #[must_use]
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(x: &[f64]) -> f64 {
        x.iter().sum()
    }

    #[test]
    fn test_random_position_in_bounds() {
        let settings = SwarmSettings::new().with_points(4).with_seed(1);
        let mut ctx = SearchContext::new(&settings, &sum);
        let c = Coordinate::new(&mut ctx, Seeding::FreshRandom);
        assert_eq!(c.position().len(), 8);
        assert!(c.position().iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!((c.value() - sum(c.position())).abs() < 1e-12);
        assert_eq!(ctx.evaluations(), 1);
    }

    #[test]
    fn test_set_position_clips_and_updates_value() {
        let settings = SwarmSettings::new().with_points(1).with_seed(1);
        let mut ctx = SearchContext::new(&settings, &sum);
        let mut c = Coordinate::new(&mut ctx, Seeding::FreshRandom);
        let v = c.set_position(vec![2.0, -3.0], &mut ctx);
        assert_eq!(c.position(), &[1.0, 0.0]);
        assert!((v - 1.0).abs() < 1e-12);
        assert!((c.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compare_by_value_only() {
        let settings = SwarmSettings::new().with_points(1).with_seed(3);
        let mut ctx = SearchContext::new(&settings, &sum);
        let a = Coordinate::from_position(vec![0.2, 0.3], &mut ctx);
        let b = Coordinate::from_position(vec![0.4, 0.1], &mut ctx);
        let c = Coordinate::from_position(vec![0.9, 0.9], &mut ctx);
        assert!(a == b);
        assert!(a < c);
        assert_eq!(c.cmp_value(&a), Ordering::Greater);
    }

    #[test]
    fn test_seeding_selection() {
        assert_eq!(Seeding::for_member(0, false), Seeding::FreshRandom);
        assert_eq!(Seeding::for_member(0, true), Seeding::WarmStartExact);
        assert_eq!(Seeding::for_member(5, true), Seeding::WarmStartPerturbed);
        assert_eq!(Seeding::for_restart(true), Seeding::WarmStartPerturbed);
        assert_eq!(Seeding::for_restart(false), Seeding::FreshRandom);
    }

    #[test]
    fn test_warm_start_exact_and_perturbed() {
        let seed_pos = vec![0.5, 0.5, 0.25, 0.75];
        let settings = SwarmSettings::new()
            .with_points(2)
            .with_seed(9)
            .with_warm_start(WarmStart::new(seed_pos.clone()).with_radius(0.05));
        let mut ctx = SearchContext::new(&settings, &sum);

        let exact = Coordinate::new(&mut ctx, Seeding::WarmStartExact);
        assert_eq!(exact.position(), seed_pos.as_slice());

        let moved = Coordinate::new(&mut ctx, Seeding::WarmStartPerturbed);
        for (p, s) in moved.position().iter().zip(&seed_pos) {
            assert!((p - s).abs() <= 0.05 + 1e-12);
        }
    }

    #[test]
    fn test_warm_start_at_edge_stays_in_bounds() {
        let settings = SwarmSettings::new()
            .with_points(1)
            .with_seed(11)
            .with_warm_start(WarmStart::new(vec![1.0, 0.0]).with_radius(0.3));
        let mut ctx = SearchContext::new(&settings, &sum);
        for _ in 0..50 {
            let c = Coordinate::new(&mut ctx, Seeding::WarmStartPerturbed);
            assert!(c.position().iter().all(|&x| (0.0..=1.0).contains(&x)));
        }
    }

    #[test]
    fn test_warm_seeding_without_warm_start_falls_back() {
        let settings = SwarmSettings::new().with_points(2).with_seed(5);
        let mut ctx = SearchContext::new(&settings, &sum);
        let c = Coordinate::new(&mut ctx, Seeding::WarmStartExact);
        assert_eq!(c.position().len(), 4);
    }
}
