//! Initial body layouts.
//!
//! Builders are plain functions over an explicit random source. Masses,
//! positions and velocities come from [`SharedRng`]; colours come from
//! [`RenderingRng`], so recolouring a scenario never changes its physics.
//! Bodies are numbered in creation order.

use crate::components::{Body, BodyId, ShapeKind};
use crate::error::SimulationError;
use crate::physics::math::{Scalar, Vector, random_grid_position, random_velocity};
use crate::resources::{RenderingRng, SharedRng};
use crate::utils::color::{self, BLUE, DARK_GREY, GOLD, GREEN, MID_GREY};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mass of the central body in the orbital scenario
pub const SUN_MASS: Scalar = 30_000.0;

/// Scales the orbital speed of orbiters around the sun
pub const ORBIT_SPEED_FACTOR: Scalar = 3.8;

const BINARY_STAR_MASS: Scalar = 4_000.0;
/// Distance of each star from the shared barycenter
const BINARY_STAR_OFFSET: Scalar = 150.0;
const SATELLITE_MASS: Scalar = 10.0;
const SATELLITE_ORBIT_RADIUS: Scalar = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Light arrows and a few heavier planets scattered at random
    #[default]
    RandomScatter,
    /// One heavy sun with orbiters on roughly circular paths
    Orbital,
    /// Two stars circling each other, each with two satellites
    Binary,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioKind::RandomScatter => "random scatter",
            ScenarioKind::Orbital => "orbital",
            ScenarioKind::Binary => "binary",
        };
        f.write_str(name)
    }
}

/// Everything a builder needs apart from its random sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParams {
    pub kind: ScenarioKind,
    pub width: u32,
    pub height: u32,
    pub gravitational_constant: Scalar,
    pub particle_count: usize,
    pub planet_count: usize,
    pub orbiter_count: usize,
}

/// Builds the scenario selected by `params.kind`.
pub fn build(
    params: &ScenarioParams,
    rng: &mut SharedRng,
    rendering_rng: &mut RenderingRng,
) -> Result<Vec<Body>, SimulationError> {
    match params.kind {
        ScenarioKind::RandomScatter => random_scatter(
            params.particle_count,
            params.planet_count,
            params.width,
            params.height,
            rng,
            rendering_rng,
        ),
        ScenarioKind::Orbital => orbital_system(
            params.orbiter_count,
            params.width,
            params.height,
            params.gravitational_constant,
            rng,
            rendering_rng,
        ),
        ScenarioKind::Binary => {
            binary_system(params.width, params.height, params.gravitational_constant)
        }
    }
}

fn numbered(mut bodies: Vec<Body>) -> Vec<Body> {
    for (index, body) in bodies.iter_mut().enumerate() {
        body.set_id(BodyId(index as u32));
    }
    bodies
}

/// Integer midpoint of the world, matching the grid positions bodies spawn on.
fn midpoint(width: u32, height: u32) -> Vector {
    Vector::new((width / 2) as Scalar, (height / 2) as Scalar)
}

/// `particle_count` light arrows followed by `planet_count` heavier planets.
pub fn random_scatter(
    particle_count: usize,
    planet_count: usize,
    width: u32,
    height: u32,
    rng: &mut SharedRng,
    rendering_rng: &mut RenderingRng,
) -> Result<Vec<Body>, SimulationError> {
    let mut bodies = Vec::with_capacity(particle_count + planet_count);

    for _ in 0..particle_count {
        let position = random_grid_position(&mut **rng, width, height);
        let mass = rng.random_range(1..=200) as Scalar;
        let velocity = random_velocity(&mut **rng, 2.0);

        bodies.push(
            Body::new(mass, position, velocity)?
                .with_shape(ShapeKind::Arrow)
                .with_color(color::random_vibrant(&mut **rendering_rng))
                .with_trail(30, MID_GREY),
        );
    }

    for _ in 0..planet_count {
        let position = random_grid_position(&mut **rng, width, height);
        let mass = rng.random_range(200..=1000) as Scalar;
        let velocity = random_velocity(&mut **rng, 1.0);

        bodies.push(
            Body::new(mass, position, velocity)?
                .with_shape(ShapeKind::Planet)
                .with_color(DARK_GREY)
                .with_trail(200, MID_GREY),
        );
    }

    Ok(numbered(bodies))
}

/// Orbital speed for a body of mass `mass` at `distance` from the sun.
fn orbit_speed(g: Scalar, mass: Scalar, distance: Scalar) -> Scalar {
    ORBIT_SPEED_FACTOR * libm::sqrt(g * (SUN_MASS + mass) / libm::sqrt(distance))
}

/// A resting sun at the world's midpoint and `orbiter_count` bodies moving
/// perpendicular to their line of sight to it.
///
/// A 0×0 world has no grid point besides the centre, so it is rejected when
/// any orbiters are requested.
pub fn orbital_system(
    orbiter_count: usize,
    width: u32,
    height: u32,
    g: Scalar,
    rng: &mut SharedRng,
    rendering_rng: &mut RenderingRng,
) -> Result<Vec<Body>, SimulationError> {
    if orbiter_count > 0 && width == 0 && height == 0 {
        return Err(SimulationError::DegenerateBounds { width, height });
    }

    let center = midpoint(width, height);
    let mut bodies = Vec::with_capacity(orbiter_count + 1);

    bodies.push(
        Body::new(SUN_MASS, center, Vector::ZERO)?
            .with_color(GOLD)
            .with_trail(50, MID_GREY),
    );

    for _ in 0..orbiter_count {
        let mut position = random_grid_position(&mut **rng, width, height);
        while position == center {
            position = random_grid_position(&mut **rng, width, height);
        }
        let mass = rng.random_range(1..=150) as Scalar;

        let to_sun = center - position;
        let distance = to_sun.length();
        let direction = to_sun / distance;
        let tangent = Vector::new(direction.y, -direction.x);
        let velocity = tangent * orbit_speed(g, mass, distance);

        let body_color = color::random_dull(&mut **rendering_rng);
        bodies.push(
            Body::new(mass, position, velocity)?
                .with_color(body_color)
                .with_trail(20, body_color),
        );
    }

    Ok(numbered(bodies))
}

/// Two equal stars on a shared circular orbit around the world's midpoint,
/// each carrying a pair of satellites. Fully determined by `g`.
pub fn binary_system(width: u32, height: u32, g: Scalar) -> Result<Vec<Body>, SimulationError> {
    let center = midpoint(width, height);
    // Equal masses 2d apart: G M² / (2d)² = M v² / d
    let star_speed = libm::sqrt(g * BINARY_STAR_MASS / (4.0 * BINARY_STAR_OFFSET));
    let satellite_speed = libm::sqrt(g * BINARY_STAR_MASS / SATELLITE_ORBIT_RADIUS);

    let mut bodies = Vec::with_capacity(6);

    for (side, satellite_color) in [(1.0, BLUE), (-1.0, GREEN)] {
        let star_position = center + Vector::new(side * BINARY_STAR_OFFSET, 0.0);
        let star_velocity = Vector::new(0.0, side * star_speed);

        bodies.push(
            Body::new(BINARY_STAR_MASS, star_position, star_velocity)?
                .with_color(GOLD)
                .with_trail(100, MID_GREY),
        );

        for orbit_side in [1.0, -1.0] {
            let offset = Vector::new(0.0, orbit_side * SATELLITE_ORBIT_RADIUS);
            let relative_velocity = Vector::new(-orbit_side * satellite_speed, 0.0);

            bodies.push(
                Body::new(
                    SATELLITE_MASS,
                    star_position + offset,
                    star_velocity + relative_velocity,
                )?
                .with_color(satellite_color)
                .with_trail(30, satellite_color),
            );
        }
    }

    Ok(numbered(bodies))
}
