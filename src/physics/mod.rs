pub mod boundary;
pub mod collisions;
pub mod gravity;
pub mod integrators;
pub mod math;

pub use boundary::Bounds;
pub use collisions::{DEFAULT_MERGE_DISTANCE_FACTOR, Merge, MergePlan};
pub use integrators::{Integrator, SemiImplicitEuler};
