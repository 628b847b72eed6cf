// =========================================================================
// FALSIFY-SW: swarm loop contract
//
// Invariants every strategy must hold regardless of its update rule:
//   - cached value equals the objective at the current position
//   - leaders are read-only snapshots during an iteration
//   - strict improvement only: ties never replace the incumbent best
//   - callbacks observe iterations in order with the best-so-far snapshot
// =========================================================================

use std::cell::Cell;

use super::*;

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| (xi - 0.6).powi(2)).sum()
}

/// FALSIFY-SW-001: no stale value after any number of steps
#[test]
fn falsify_sw_001_no_stale_value() {
    let settings = SwarmSettings::new().with_points(2).with_seed(5);
    let mut ctx = SearchContext::new(&settings, &sphere);
    let mut particles: Vec<Particle> = (0..5)
        .map(|_| Particle::spawn(&PsoParams::default(), Seeding::FreshRandom, &mut ctx))
        .collect();
    let target = vec![0.6; 4];

    for _ in 0..10 {
        for p in &mut particles {
            p.step_towards(&target, &mut ctx);
            let c = p.coordinate();
            assert!(
                (c.value() - sphere(c.position())).abs() < 1e-15,
                "FALSIFIED SW-001: cached {} != objective {}",
                c.value(),
                sphere(c.position())
            );
        }
    }
}

/// FALSIFY-SW-002: a flat landscape never replaces the initial best
#[test]
fn falsify_sw_002_ties_keep_incumbent() {
    let flat = |_: &[f64]| 1.0;
    let settings = SwarmSettings::new()
        .with_population(6)
        .with_iterations(10)
        .with_seed(3);
    let swarm = GreyWolf::new(&settings, (), &flat).expect("valid");
    let first = swarm.agents()[0].coordinate().position().to_vec();
    let result = swarm.solve();

    assert_eq!(
        result.solution(),
        first.as_slice(),
        "FALSIFIED SW-002: equal-cost candidate replaced the incumbent best"
    );
}

/// FALSIFY-SW-003: callback receives the monotone best-so-far sequence
#[test]
fn falsify_sw_003_callback_best_is_monotone() {
    let settings = SwarmSettings::new()
        .with_population(10)
        .with_iterations(20)
        .with_seed(11);
    let last = Cell::new(f64::INFINITY);
    let calls = Cell::new(0usize);
    let swarm = BeeColony::new(&settings, BeeParams::default(), &sphere)
        .expect("valid")
        .with_callback(|iteration, best| {
            assert_eq!(iteration, calls.get(), "FALSIFIED SW-003: out of order");
            assert!(
                best.value() <= last.get(),
                "FALSIFIED SW-003: best rose from {} to {}",
                last.get(),
                best.value()
            );
            last.set(best.value());
            calls.set(calls.get() + 1);
        });
    let result = swarm.solve();

    assert_eq!(calls.get(), 20);
    assert!((last.get() - result.objective_value()).abs() < 1e-15);
}

/// FALSIFY-SW-004: returned best is a snapshot, not worse than any agent seen
#[test]
fn falsify_sw_004_best_beats_initial_population() {
    let settings = SwarmSettings::new()
        .with_population(8)
        .with_iterations(5)
        .with_seed(21);
    let swarm = ParticleSwarm::new(&settings, PsoParams::default(), &sphere).expect("valid");
    let initial_best = swarm
        .agents()
        .iter()
        .map(|p| p.coordinate().value())
        .fold(f64::INFINITY, f64::min);
    let result = swarm.solve();

    assert!(
        result.objective_value() <= initial_best,
        "FALSIFIED SW-004: final {} worse than initial {}",
        result.objective_value(),
        initial_best
    );
}
