//! Lévy-flight style perturbations.
//!
//! A two-level step mixture: most waypoints move by `low_step`, a few jump by
//! `high_step`. Directions are uniform on the unit circle.

use rand::Rng;

/// Generate a perturbation vector for `current`.
///
/// `current` is interpreted as consecutive `(x, y)` waypoint pairs. For every
/// pair one uniform draw selects the step magnitude (`high_step` when the draw
/// is `<= high_step_prob`, else `low_step`) and a second 2D draw selects the
/// direction. The result has the same length as `current` and is not clipped.
///
/// # Example
///
/// ```
/// use rand::prelude::*;
/// use swarmpath::metaheuristics::levy_step;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let delta = levy_step(&[0.5, 0.5, 0.2, 0.8], 0.1, 0.4, 0.1, &mut rng);
/// assert_eq!(delta.len(), 4);
/// ```
pub fn levy_step<R: Rng>(
    current: &[f64],
    low_step: f64,
    high_step: f64,
    high_step_prob: f64,
    rng: &mut R,
) -> Vec<f64> {
    let points = current.len() / 2;
    let mut delta = Vec::with_capacity(current.len());

    for _ in 0..points {
        let step = if rng.gen::<f64>() <= high_step_prob {
            high_step
        } else {
            low_step
        };

        let u = [rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)];
        let norm = f64::hypot(u[0], u[1]);
        if norm > 0.0 {
            delta.push(u[0] / norm * step);
            delta.push(u[1] / norm * step);
        } else {
            delta.push(0.0);
            delta.push(0.0);
        }
    }

    // Odd trailing component has no partner to form a waypoint.
    delta.resize(current.len(), 0.0);
    delta
}
