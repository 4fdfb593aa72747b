//! Reflection of bodies off the edges of a rectangular world.

use crate::components::Body;
use crate::physics::math::{Scalar, Vector};
use serde::{Deserialize, Serialize};

/// Axis-aligned world `[0, x_max] × [0, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_max: Scalar,
    pub y_max: Scalar,
}

impl Bounds {
    pub fn new(x_max: Scalar, y_max: Scalar) -> Self {
        Self { x_max, y_max }
    }

    pub fn center(&self) -> Vector {
        Vector::new(self.x_max, self.y_max) * 0.5
    }

    pub fn contains(&self, point: Vector) -> bool {
        (0.0..=self.x_max).contains(&point.x) && (0.0..=self.y_max).contains(&point.y)
    }

    /// Mirrors a body that crossed an edge back inside and flips the matching
    /// velocity component. Each axis is handled on its own, upper edge first.
    pub fn reflect(&self, body: &mut Body) {
        reflect_axis(&mut body.position.x, &mut body.velocity.x, self.x_max);
        reflect_axis(&mut body.position.y, &mut body.velocity.y, self.y_max);
    }
}

#[inline]
fn reflect_axis(position: &mut Scalar, velocity: &mut Scalar, bound: Scalar) {
    if *position > bound {
        *position = 2.0 * bound - *position;
        *velocity = -*velocity;
    }
    if *position < 0.0 {
        *position = -*position;
        *velocity = -*velocity;
    }
}
