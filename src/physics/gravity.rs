//! Direct-summation Newtonian gravity.
//!
//! Every body's net force is recomputed from scratch against every other body,
//! O(n²) per tick, with no pairwise reuse. Coincident bodies are skipped rather
//! than dividing by zero.

use crate::components::Body;
use crate::physics::math::{Scalar, Vector};

/// Net force on one body and how many coincident neighbours were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceSample {
    pub force: Vector,
    pub coincident: usize,
}

/// Force that `source` exerts on `target`, pointing from `target` toward `source`.
///
/// Returns `None` when the two are at exactly the same position.
#[inline]
pub fn pairwise_force(
    target_position: Vector,
    target_mass: Scalar,
    source_position: Vector,
    source_mass: Scalar,
    g: Scalar,
) -> Option<Vector> {
    let offset = source_position - target_position;
    let distance_squared = offset.length_squared();

    if distance_squared == 0.0 {
        return None;
    }

    let magnitude = g * target_mass * source_mass / distance_squared;
    Some(offset / libm::sqrt(distance_squared) * magnitude)
}

/// Net gravitational force on `bodies[index]` from every other body in the slice.
pub fn net_force_on(index: usize, bodies: &[Body], g: Scalar) -> ForceSample {
    let target = &bodies[index];

    bodies
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .fold(ForceSample::default(), |mut sample, (_, source)| {
            match pairwise_force(
                target.position,
                target.mass(),
                source.position,
                source.mass(),
                g,
            ) {
                Some(force) => sample.force += force,
                None => sample.coincident += 1,
            }
            sample
        })
}

/// Overwrites the net force of every body from one consistent set of positions.
///
/// Returns the number of coincident pairs skipped. Each pair is seen from both
/// sides, so it is counted once.
pub fn accumulate_forces(bodies: &mut [Body], g: Scalar) -> usize {
    let samples: Vec<ForceSample> = (0..bodies.len())
        .map(|i| net_force_on(i, bodies, g))
        .collect();

    let mut coincident = 0;
    for (body, sample) in bodies.iter_mut().zip(samples) {
        body.set_net_force(sample.force);
        coincident += sample.coincident;
    }

    coincident / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(mass: Scalar, x: Scalar, y: Scalar) -> Body {
        Body::new(mass, Vector::new(x, y), Vector::ZERO).unwrap()
    }

    #[test]
    fn test_two_equal_bodies_unit_force() {
        let bodies = vec![body(10.0, 0.0, 0.0), body(10.0, 10.0, 0.0)];

        let sample = net_force_on(0, &bodies, 1.0);

        assert!((sample.force - Vector::new(1.0, 0.0)).length() < 1e-12);
        assert_eq!(sample.coincident, 0);
    }

    #[test]
    fn test_pairwise_force_points_toward_source() {
        let force = pairwise_force(Vector::ZERO, 1.0, Vector::new(0.0, -4.0), 16.0, 1.0).unwrap();

        assert!(force.y < 0.0);
        assert_eq!(force.x, 0.0);
        assert!((force.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_bodies_contribute_nothing() {
        let bodies = vec![body(5.0, 3.0, 3.0), body(7.0, 3.0, 3.0), body(1.0, 13.0, 3.0)];

        let sample = net_force_on(0, &bodies, 1.0);

        assert!(sample.force.is_finite());
        assert_eq!(sample.coincident, 1);
        // Only the third body pulls: 1 * 5 * 1 / 100
        assert!((sample.force - Vector::new(0.05, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_accumulate_overwrites_previous_force() {
        let mut bodies = vec![body(10.0, 0.0, 0.0), body(10.0, 10.0, 0.0)];
        bodies[0].set_net_force(Vector::new(100.0, 100.0));

        let coincident = accumulate_forces(&mut bodies, 1.0);

        assert_eq!(coincident, 0);
        assert!((bodies[0].net_force() - Vector::new(1.0, 0.0)).length() < 1e-12);
        assert!((bodies[1].net_force() - Vector::new(-1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_accumulate_counts_coincident_pairs_once() {
        let mut bodies = vec![body(1.0, 0.0, 0.0), body(1.0, 0.0, 0.0)];

        assert_eq!(accumulate_forces(&mut bodies, 1.0), 1);
        assert_eq!(bodies[0].net_force(), Vector::ZERO);
        assert_eq!(bodies[1].net_force(), Vector::ZERO);
    }

    #[test]
    fn test_zero_gravity_yields_zero_force() {
        let mut bodies = vec![body(10.0, 0.0, 0.0), body(10.0, 1.0, 0.0)];
        accumulate_forces(&mut bodies, 0.0);
        assert_eq!(bodies[0].net_force(), Vector::ZERO);
    }
}
