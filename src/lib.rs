//! Gravitas library
//!
//! Deterministic core of a 2D point-mass gravity sandbox: bodies, pairwise
//! gravity, semi-implicit Euler integration, momentum-conserving mergers and
//! scenario builders. Rendering and input belong to the embedding front end.

pub mod components;
pub mod config;
pub mod error;
pub mod physics;
pub mod prelude;
pub mod resources;
pub mod scenarios;
pub mod simulation;
pub mod utils;
