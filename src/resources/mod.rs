use bevy::prelude::{Deref, DerefMut};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

/// Offset mixed into the seed for the rendering stream so it never mirrors physics
const RENDERING_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random source for physical quantities: positions, masses, velocities.
#[derive(Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

/// Random source for colours. Kept apart from [`SharedRng`] so colour choices
/// never shift the physics stream.
#[derive(Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct RenderingRng(pub ChaCha8Rng);

impl RenderingRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed ^ RENDERING_SEED_OFFSET))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }
}

impl Default for RenderingRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}
