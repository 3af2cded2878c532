mod particle;

pub use particle::{Electrode, FickianParticle};
