//! The tick-driven simulation driver.
//!
//! [`Simulation`] owns the body collection and runs every tick in a fixed
//! order: merges, forces, integration, boundary reflection, then trails.
//! Pacing and rendering are left to the caller.

use crate::components::{Body, BodyId, ShapeKind};
use crate::config::{SimulationConfig, SpawnConfig};
use crate::error::SimulationError;
use crate::physics::collisions::{self, DEFAULT_MERGE_DISTANCE_FACTOR, Merge};
use crate::physics::gravity;
use crate::physics::integrators::{Integrator, SemiImplicitEuler};
use crate::physics::math::{Scalar, Vector};
use crate::physics::Bounds;
use crate::resources::{RenderingRng, SharedRng};
use crate::scenarios;
use crate::utils::color::{MID_GREY, RED};
use bevy::log::{debug, error, info, warn};
use std::collections::HashSet;

pub const DEFAULT_TIME_STEP: Scalar = 1.0;
pub const DEFAULT_TRAIL_UPDATE_INTERVAL: u64 = 4;

/// A slingshot gesture from the front end: drag from `start` to `end` while
/// holding for `hold_duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub start: Vector,
    pub end: Vector,
    pub hold_duration: Scalar,
    /// Screen pan at the time of the gesture, subtracted from `start`
    pub display_offset: Vector,
}

/// What happened during one call to [`Simulation::advance`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub merges: Vec<Merge>,
    /// Pairs of bodies at identical positions whose mutual force was skipped
    pub coincident_pairs: usize,
    pub body_count: usize,
}

#[derive(Debug)]
pub struct Simulation {
    bodies: Vec<Body>,
    gravitational_constant: Scalar,
    integrator: Box<dyn Integrator>,
    time_step: Scalar,
    merge_distance_factor: Scalar,
    bounds: Option<Bounds>,
    trail_update_interval: u64,
    spawn: SpawnConfig,
    next_id: u32,
}

impl Simulation {
    pub fn new(gravitational_constant: Scalar) -> Self {
        Self {
            bodies: Vec::new(),
            gravitational_constant,
            integrator: Box::new(SemiImplicitEuler),
            time_step: DEFAULT_TIME_STEP,
            merge_distance_factor: DEFAULT_MERGE_DISTANCE_FACTOR,
            bounds: None,
            trail_update_interval: DEFAULT_TRAIL_UPDATE_INTERVAL,
            spawn: SpawnConfig::default(),
            next_id: 0,
        }
    }

    /// Takes ownership of an existing collection. Ids are kept when they are
    /// unique and renumbered in storage order otherwise.
    pub fn from_bodies(gravitational_constant: Scalar, mut bodies: Vec<Body>) -> Self {
        let mut seen = HashSet::with_capacity(bodies.len());
        if !bodies.iter().all(|body| seen.insert(body.id())) {
            debug!("Renumbering {} bodies with duplicate ids", bodies.len());
            for (index, body) in bodies.iter_mut().enumerate() {
                body.set_id(BodyId(index as u32));
            }
        }

        let next_id = bodies
            .iter()
            .map(|body| body.id().0.saturating_add(1))
            .max()
            .unwrap_or(0);

        Self {
            bodies,
            next_id,
            ..Self::new(gravitational_constant)
        }
    }

    /// Seeds both random streams, builds the configured scenario and applies
    /// every physics setting.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        match config.to_toml_string() {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                warn!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        let seed = config.physics.initial_seed;
        let mut rng = SharedRng::from_optional_seed(seed);
        let mut rendering_rng = RenderingRng::from_optional_seed(seed);

        let params = config.scenario_params();
        let bodies = scenarios::build(&params, &mut rng, &mut rendering_rng)?;
        info!(
            "Built {} scenario with {} bodies",
            params.kind,
            bodies.len()
        );

        let mut simulation = Self::from_bodies(config.physics.gravitational_constant, bodies)
            .with_time_step(config.physics.time_step)
            .with_merge_distance_factor(config.physics.merge_distance_factor)
            .with_trail_update_interval(config.physics.trail_update_interval)
            .with_spawn_config(config.spawn.clone());

        if config.physics.boundary_reflection {
            simulation = simulation.with_bounds(Bounds::new(
                config.bounds.width as Scalar,
                config.bounds.height as Scalar,
            ));
        }

        info!(
            "Stepping with {} (order {}), dt = {}",
            simulation.integrator.name(),
            simulation.integrator.order(),
            simulation.time_step
        );

        Ok(simulation)
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_time_step(mut self, time_step: Scalar) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_merge_distance_factor(mut self, factor: Scalar) -> Self {
        self.merge_distance_factor = factor;
        self
    }

    /// Trails are recorded on iterations divisible by `interval`. Zero is treated as one.
    pub fn with_trail_update_interval(mut self, interval: u64) -> Self {
        self.trail_update_interval = interval.max(1);
        self
    }

    pub fn with_spawn_config(mut self, spawn: SpawnConfig) -> Self {
        self.spawn = spawn;
        self
    }

    /// Hands the collection back, ending the simulation.
    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    pub fn total_mass(&self) -> Scalar {
        self.bodies.iter().map(Body::mass).sum()
    }

    pub fn total_momentum(&self) -> Vector {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn total_kinetic_energy(&self) -> Scalar {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Mass-weighted mean position, or `None` for an empty simulation
    pub fn barycenter(&self) -> Option<Vector> {
        let total_mass = self.total_mass();
        if total_mass <= 0.0 {
            return None;
        }

        let weighted: Vector = self
            .bodies
            .iter()
            .map(|body| body.position * body.mass())
            .sum();
        Some(weighted / total_mass)
    }

    /// Runs one tick. On error the collection may be partially advanced and
    /// should not be stepped further.
    pub fn advance(&mut self, iteration: u64) -> Result<TickReport, SimulationError> {
        let merges = collisions::resolve_merges(&mut self.bodies, self.merge_distance_factor)?;
        if !merges.is_empty() {
            debug!(
                "Tick {}: {} merge(s), {} bodies remain",
                iteration,
                merges.len(),
                self.bodies.len()
            );
        }

        let coincident_pairs = gravity::accumulate_forces(&mut self.bodies, self.gravitational_constant);
        if coincident_pairs > 0 {
            debug!(
                "Tick {}: skipped force for {} coincident pair(s)",
                iteration, coincident_pairs
            );
        }

        let record_trail = iteration % self.trail_update_interval == 0;

        for body in &mut self.bodies {
            let acceleration = body.net_force() / body.mass();
            self.integrator.step(
                &mut body.position,
                &mut body.velocity,
                acceleration,
                self.time_step,
            );

            if let Some(bounds) = &self.bounds {
                bounds.reflect(body);
            }

            if record_trail {
                body.record_trail();
            }
        }

        self.validate()?;

        Ok(TickReport {
            merges,
            coincident_pairs,
            body_count: self.bodies.len(),
        })
    }

    fn validate(&self) -> Result<(), SimulationError> {
        for body in &self.bodies {
            if !body.position.is_finite() || !body.velocity.is_finite() {
                error!(
                    "Body {} left finite state: position {:?}, velocity {:?}",
                    body.id().0,
                    body.position,
                    body.velocity
                );
                return Err(SimulationError::NonFiniteState { id: body.id() });
            }
            if !(body.mass().is_finite() && body.mass() > 0.0) {
                error!("Body {} has invalid mass {}", body.id().0, body.mass());
                return Err(SimulationError::InvalidMass { mass: body.mass() });
            }
        }
        Ok(())
    }

    /// Adds a body from a slingshot gesture. It flies opposite to the drag and
    /// its mass grows with the hold duration.
    pub fn spawn(&mut self, request: SpawnRequest) -> Result<BodyId, SimulationError> {
        let mass = libm::pow(request.hold_duration, self.spawn.mass_exponent);
        if !(request.hold_duration > 0.0) {
            return Err(SimulationError::InvalidMass { mass });
        }

        let velocity = (request.start - request.end) * self.spawn.velocity_scale;
        let position = request.start - request.display_offset;
        let id = BodyId(self.next_id);

        let body = Body::new(mass, position, velocity)?
            .with_id(id)
            .with_shape(ShapeKind::Planet)
            .with_color(RED)
            .with_trail(self.spawn.trail_capacity, MID_GREY);

        debug!(
            "Spawned body {} with mass {:.2} at {:?}, velocity {:?}",
            id.0, mass, position, velocity
        );

        self.next_id = self.next_id.saturating_add(1);
        self.bodies.push(body);
        Ok(id)
    }
}
