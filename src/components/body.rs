use crate::components::Trail;
use crate::error::SimulationError;
use crate::physics::math::{Scalar, Vector, radius_for_mass};
use crate::utils::color::{MID_GREY, WHITE};
use bevy::color::Srgba;
use serde::{Deserialize, Serialize};

/// Trail length used when a body is built without an explicit trail
pub const DEFAULT_TRAIL_CAPACITY: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyId(pub u32);

/// How the renderer should draw a body. Never consulted by the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Small pointed marker oriented along the velocity
    Arrow,
    /// Filled disc of the body's radius
    #[default]
    Planet,
}

/// A point mass with a derived radius and a bounded position history.
///
/// Mass is private so that the positive-mass invariant and the derived radius
/// can only change together, through construction or [`Body::absorb`].
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    mass: Scalar,
    radius: Scalar,
    pub position: Vector,
    pub velocity: Vector,
    net_force: Vector,
    shape: ShapeKind,
    pub color: Srgba,
    trail: Trail,
}

fn validate_mass(mass: Scalar) -> Result<Scalar, SimulationError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(SimulationError::InvalidMass { mass })
    }
}

impl Body {
    /// Creates a planet-shaped white body whose trail starts at `position`.
    pub fn new(mass: Scalar, position: Vector, velocity: Vector) -> Result<Self, SimulationError> {
        let mass = validate_mass(mass)?;
        let mut trail = Trail::new(DEFAULT_TRAIL_CAPACITY, MID_GREY);
        trail.record(position);

        Ok(Self {
            id: BodyId::default(),
            mass,
            radius: radius_for_mass(mass),
            position,
            velocity,
            net_force: Vector::ZERO,
            shape: ShapeKind::default(),
            color: WHITE,
            trail,
        })
    }

    pub fn with_id(mut self, id: BodyId) -> Self {
        self.id = id;
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_color(mut self, color: Srgba) -> Self {
        self.color = color;
        self
    }

    /// Replaces the trail with an empty one of the given size, seeded with the current position.
    pub fn with_trail(mut self, capacity: usize, color: Srgba) -> Self {
        self.trail = Trail::new(capacity, color);
        self.trail.record(self.position);
        self
    }

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: BodyId) {
        self.id = id;
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> Scalar {
        self.radius
    }

    /// Net force from the most recent tick
    #[inline]
    pub fn net_force(&self) -> Vector {
        self.net_force
    }

    pub(crate) fn set_net_force(&mut self, force: Vector) {
        self.net_force = force;
    }

    #[inline]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[inline]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn record_trail(&mut self) {
        self.trail.record(self.position);
    }

    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn distance_to(&self, other: &Body) -> Scalar {
        self.position.distance(other.position)
    }

    /// Fuses `other` into this body: masses add, velocity becomes the
    /// mass-weighted average, and the radius follows the new mass.
    ///
    /// Position, colour, shape and trail stay with this body.
    pub fn absorb(&mut self, other: &Body) -> Result<(), SimulationError> {
        let total_mass = validate_mass(self.mass + other.mass)?;

        self.velocity = (self.momentum() + other.momentum()) / total_mass;
        self.mass = total_mass;
        self.radius = radius_for_mass(total_mass);

        Ok(())
    }
}
