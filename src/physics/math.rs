use rand::Rng;

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and forces
pub type Vector = bevy::math::DVec2;

/// Integer 2D point used for trail history
pub type GridPoint = bevy::math::IVec2;

/// Radius derived from mass: the rounded cube root, never below one unit.
#[inline]
pub fn radius_for_mass(mass: Scalar) -> Scalar {
    libm::round(libm::cbrt(mass)).max(1.0)
}

/// Rounds a simulation-space position to the integer grid used by trails.
#[inline]
pub fn to_grid(position: Vector) -> GridPoint {
    position.round().as_ivec2()
}

/// Uniform integer position inside `[0, width] × [0, height]`, inclusive on both ends.
pub fn random_grid_position<R: Rng + ?Sized>(rng: &mut R, width: u32, height: u32) -> Vector {
    Vector::new(
        rng.random_range(0..=width) as Scalar,
        rng.random_range(0..=height) as Scalar,
    )
}

/// Velocity with each component drawn uniformly from `[-limit, limit]`.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, limit: Scalar) -> Vector {
    Vector::new(
        rng.random_range(-limit..=limit),
        rng.random_range(-limit..=limit),
    )
}
