//! Concrete physics submodels for battery model assembly.
//!
//! Each submodel implements [`galvani_core::Submodel`], producing a bundle
//! of symbolic differential equations, initial conditions, boundary
//! conditions, and output variables that
//! [`Model::update`](galvani_core::Model::update) merges into a full cell
//! model.

pub mod submodels;

pub use submodels::{Electrode, FickianParticle};
