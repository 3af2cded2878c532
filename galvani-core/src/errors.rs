use galvani_expr::Domain;
use thiserror::Error;

/// Raised when an equation is assigned under a variable whose domain it does
/// not match.
///
/// The value's domain must equal the key variable's domain or be empty
/// (domain-agnostic). The check runs at assignment time, before any merging
/// or well-posedness validation.
#[derive(Error, Debug)]
#[error(
    "variable '{variable}' and its {slot} equation must have the same domain: \
     variable is on {variable_domain}, equation is on {equation_domain}"
)]
pub struct DomainError {
    pub variable: String,
    pub slot: &'static str,
    pub variable_domain: Domain,
    pub equation_domain: Domain,
}

/// Error type for model assembly and well-posedness validation.
///
/// All variants are construction-time failures: synchronous, fatal, and
/// propagated unchanged to the caller. A model that produced one must not be
/// handed to a discretizer.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("duplicate state variables across submodels: {0}")]
    DuplicateVariables(String),
    #[error(
        "model is underdetermined: {unaccounted} unknown(s) have no differential equation and \
         only {algebraic} algebraic equation(s) are available"
    )]
    Underdetermined { unaccounted: usize, algebraic: usize },
    #[error(
        "model is overdetermined: {algebraic} algebraic equation(s) for {unaccounted} \
         unmatched unknown(s)"
    )]
    Overdetermined { unaccounted: usize, algebraic: usize },
    #[error("no initial condition given for variable '{variable}'")]
    MissingInitialCondition { variable: String },
    #[error("no boundary condition given for variable '{variable}' with equation '{equation}'")]
    MissingBoundaryCondition { variable: String, equation: String },
}

/// Convenience type for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;
