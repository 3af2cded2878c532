//! Core model container and well-posedness checking for the assembly of
//! electrochemical battery models.
//!
//! Physics submodels (see the `galvani-submodels` crate) produce bundles of
//! symbolic equations; [`Model::update`] merges them with duplicate
//! detection and [`Model::check_well_posedness`] verifies that the merged
//! PDAE system has exactly enough equations, initial conditions, and
//! boundary conditions to be handed to a discretizer and solver.

pub mod config;
pub mod errors;
pub mod model;
pub mod submodel;

mod validation;

pub use errors::{DomainError, ModelError, ModelResult};
pub use model::{BoundaryConditionMap, EquationMap, Model, SideConditions, VariableMap};
pub use submodel::{Submodel, SubmodelEquations};
