pub mod body;
pub mod trail;

pub use body::{Body, BodyId, DEFAULT_TRAIL_CAPACITY, ShapeKind};
pub use trail::Trail;
