//! Gravitas prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! to reduce import boilerplate.

// External crate re-exports
pub use bevy::color::Srgba;
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - Errors
pub use crate::error::{ConfigError, SimulationError};

// Internal re-exports - Resources
pub use crate::resources::{RenderingRng, SharedRng};

// Internal re-exports - Components
pub use crate::components::{Body, BodyId, ShapeKind, Trail};

// Internal re-exports - Physics
pub use crate::physics::math::{GridPoint, Scalar, Vector};
pub use crate::physics::{Bounds, Integrator, Merge, SemiImplicitEuler};

// Internal re-exports - Simulation
pub use crate::scenarios::{ScenarioKind, ScenarioParams};
pub use crate::simulation::{Simulation, SpawnRequest, TickReport};
