//! Numerical integration methods for the n-body simulation

use crate::physics::math::{Scalar, Vector};
use std::fmt::Debug;

pub mod semi_implicit_euler;

pub use semi_implicit_euler::SemiImplicitEuler;

/// Base trait for all integrators
pub trait Integrator: Debug + Send + Sync {
    /// Advance a single body's state by one time step
    ///
    /// # Arguments
    /// * `position` - Mutable reference to position
    /// * `velocity` - Mutable reference to velocity vector
    /// * `acceleration` - Acceleration from this tick's net force
    /// * `dt` - Time step
    fn step(&self, position: &mut Vector, velocity: &mut Vector, acceleration: Vector, dt: Scalar);

    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Get the order of this integrator
    fn order(&self) -> usize;
}
