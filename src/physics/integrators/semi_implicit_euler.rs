//! Semi-implicit Euler integration method (symplectic Euler)

use super::Integrator;
use crate::physics::math::{Scalar, Vector};

/// Semi-implicit Euler integrator (also known as symplectic Euler)
///
/// First-order method that updates the velocity before the position, so the
/// position step already sees the new velocity. One call is one tick; there is
/// no sub-stepping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar) {
        // v(t+dt) = v(t) + a(t) * dt
        *velocity += acceleration * dt;

        // x(t+dt) = x(t) + v(t+dt) * dt
        *position += *velocity * dt;
    }

    fn name(&self) -> &str {
        "Semi-implicit Euler"
    }

    fn order(&self) -> usize {
        1
    }
}
