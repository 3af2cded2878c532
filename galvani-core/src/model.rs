//! The model container: accumulates equations from submodels, merges them
//! with duplicate detection, and checks the assembled PDAE system for
//! well-posedness.

use std::collections::HashMap;
use std::ops::Index;

use log::{debug, warn};

use galvani_expr::{BoundarySide, Expr, Variable};

use crate::config::ModelDefaults;
use crate::errors::{DomainError, ModelError, ModelResult};
use crate::submodel::{Submodel, SubmodelEquations};
use crate::validation;

/// Mapping from state variable to expression: the governing equation
/// dState/dt = expression for `rhs`, the value at the start of integration
/// for initial conditions.
pub type EquationMap = HashMap<Variable, Expr>;

/// Per-side boundary expressions for one boundary-condition key.
pub type SideConditions = HashMap<BoundarySide, Expr>;

/// Mapping from a spatial expression to its per-side boundary conditions.
pub type BoundaryConditionMap = HashMap<Expr, SideConditions>;

/// Catalog of named derived and diagnostic quantities.
pub type VariableMap = HashMap<String, Expr>;

/// A symbolic PDAE system under assembly.
///
/// The container starts empty; submodels contribute equations through
/// [`update`](Model::update), and [`check_well_posedness`](Model::check_well_posedness)
/// verifies the merged system once assembly is finished. Assembly is
/// append-only: mappings are replaced or extended, never partially deleted.
///
/// The container also stores two solver-ready artifacts (concatenated rhs
/// and initial conditions) that a downstream discretizer deposits; they are
/// held opaquely and never computed here. Default parameter, geometry,
/// discretization, and solver configurations are injected by the caller via
/// [`with_defaults`](Model::with_defaults), not built eagerly.
#[derive(Debug)]
pub struct Model {
    name: String,
    rhs: EquationMap,
    algebraic: Vec<Expr>,
    initial_conditions: EquationMap,
    initial_conditions_ydot: EquationMap,
    boundary_conditions: BoundaryConditionMap,
    variables: VariableMap,
    concatenated_rhs: Option<Expr>,
    concatenated_initial_conditions: Option<Expr>,
    defaults: Option<ModelDefaults>,
}

impl Model {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            rhs: EquationMap::new(),
            algebraic: Vec::new(),
            initial_conditions: EquationMap::new(),
            initial_conditions_ydot: EquationMap::new(),
            boundary_conditions: BoundaryConditionMap::new(),
            variables: VariableMap::new(),
            concatenated_rhs: None,
            concatenated_initial_conditions: None,
            defaults: None,
        }
    }

    /// Attach ready-to-use default configurations for downstream stages.
    pub fn with_defaults(mut self, defaults: ModelDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn defaults(&self) -> Option<&ModelDefaults> {
        self.defaults.as_ref()
    }

    pub fn rhs(&self) -> &EquationMap {
        &self.rhs
    }

    pub fn algebraic(&self) -> &[Expr] {
        &self.algebraic
    }

    pub fn initial_conditions(&self) -> &EquationMap {
        &self.initial_conditions
    }

    pub fn initial_conditions_ydot(&self) -> &EquationMap {
        &self.initial_conditions_ydot
    }

    pub fn boundary_conditions(&self) -> &BoundaryConditionMap {
        &self.boundary_conditions
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    /// Replace the differential equations. Numeric scalars are promoted to
    /// constant expressions; each value's domain must equal its key
    /// variable's domain or be empty.
    pub fn set_rhs<I, V>(&mut self, entries: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (Variable, V)>,
        V: Into<Expr>,
    {
        self.rhs = validation::normalized_equations("rhs", entries)?;
        Ok(())
    }

    /// Replace the algebraic equations (each implicitly equal to zero).
    pub fn set_algebraic(&mut self, equations: Vec<Expr>) {
        self.algebraic = equations;
    }

    /// Replace the initial conditions. Same normalization and domain rule
    /// as [`set_rhs`](Model::set_rhs).
    pub fn set_initial_conditions<I, V>(&mut self, entries: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (Variable, V)>,
        V: Into<Expr>,
    {
        self.initial_conditions = validation::normalized_equations("initial_conditions", entries)?;
        Ok(())
    }

    /// Replace the initial time derivatives, used by DAE solvers. Same
    /// normalization and domain rule as [`set_rhs`](Model::set_rhs); not
    /// consulted by the well-posedness checks.
    pub fn set_initial_conditions_ydot<I, V>(&mut self, entries: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (Variable, V)>,
        V: Into<Expr>,
    {
        self.initial_conditions_ydot =
            validation::normalized_equations("initial_conditions_ydot", entries)?;
        Ok(())
    }

    /// Replace the boundary conditions. Scalar values are promoted per
    /// side. No domain check applies to this mapping.
    pub fn set_boundary_conditions<I, S, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Expr, S)>,
        S: IntoIterator<Item = (BoundarySide, V)>,
        V: Into<Expr>,
    {
        self.boundary_conditions = validation::normalized_boundary_conditions(entries);
    }

    /// Replace the catalog of named output variables.
    pub fn set_variables<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, Expr)>,
        S: Into<String>,
    {
        self.variables = entries
            .into_iter()
            .map(|(label, expression)| (label.into(), expression))
            .collect();
    }

    pub fn concatenated_rhs(&self) -> Option<&Expr> {
        self.concatenated_rhs.as_ref()
    }

    /// Store the discretizer-produced concatenated rhs artifact.
    pub fn set_concatenated_rhs(&mut self, expression: Expr) {
        self.concatenated_rhs = Some(expression);
    }

    pub fn concatenated_initial_conditions(&self) -> Option<&Expr> {
        self.concatenated_initial_conditions.as_ref()
    }

    /// Store the discretizer-produced concatenated initial conditions.
    pub fn set_concatenated_initial_conditions(&mut self, expression: Expr) {
        self.concatenated_initial_conditions = Some(expression);
    }

    /// Look up the differential equation keyed by a state variable.
    pub fn equation(&self, variable: &Variable) -> Option<&Expr> {
        self.rhs.get(variable)
    }

    /// Merge the equations of one or more submodels into this model, in
    /// argument order.
    ///
    /// Each submodel's differential equations must be keyed by state
    /// variables the model does not already own; a collision fails with
    /// [`ModelError::DuplicateVariables`] and leaves the already-merged
    /// submodels in place. Initial conditions, boundary conditions, and
    /// output variables merge key-wise, later submodels overwriting earlier
    /// entries on collision.
    pub fn update(&mut self, submodels: &[&dyn Submodel]) -> ModelResult<()> {
        for submodel in submodels {
            let bundle = submodel.equations()?;
            self.merge(submodel.name(), bundle)?;
        }
        Ok(())
    }

    fn merge(&mut self, submodel_name: &str, bundle: SubmodelEquations) -> ModelResult<()> {
        let mut duplicates: Vec<String> = bundle
            .rhs()
            .keys()
            .filter(|variable| self.rhs.contains_key(*variable))
            .map(|variable| variable.name().to_string())
            .collect();
        if !duplicates.is_empty() {
            duplicates.sort();
            return Err(ModelError::DuplicateVariables(duplicates.join(", ")));
        }

        let (rhs, initial_conditions, boundary_conditions, variables) = bundle.into_parts();
        debug!(
            "merging submodel '{}' into model '{}' ({} differential equation(s))",
            submodel_name,
            self.name,
            rhs.len()
        );

        self.rhs.extend(rhs);
        self.initial_conditions.extend(initial_conditions);
        self.boundary_conditions.extend(boundary_conditions);
        for (label, expression) in variables {
            if self.variables.contains_key(&label) {
                warn!(
                    "submodel '{}' redefines output variable '{}'",
                    submodel_name, label
                );
            }
            self.variables.insert(label, expression);
        }
        Ok(())
    }

    /// Verify that the assembled system is solvable in principle.
    ///
    /// Runs three checks in order and returns the first failure:
    /// determinacy (every referenced unknown is keyed by a differential
    /// equation or credited to an algebraic one), initial-condition
    /// completeness (one entry per differential equation), and
    /// boundary-condition completeness (every spatial-derivative equation's
    /// variable appears in some boundary-condition key).
    ///
    /// A model that fails here must not be handed to a discretizer.
    pub fn check_well_posedness(&self) -> ModelResult<()> {
        validation::check_determinacy(&self.rhs, &self.algebraic)?;
        validation::check_initial_conditions(&self.rhs, &self.initial_conditions)?;
        validation::check_boundary_conditions(&self.rhs, &self.boundary_conditions)?;
        debug!(
            "model '{}' is well posed: {} differential and {} algebraic equation(s)",
            self.name,
            self.rhs.len(),
            self.algebraic.len()
        );
        Ok(())
    }
}

/// Index a model by state variable to get its differential equation.
///
/// Panics if the variable keys no equation; use
/// [`Model::equation`] for a fallible lookup.
impl Index<&Variable> for Model {
    type Output = Expr;

    fn index(&self, variable: &Variable) -> &Expr {
        match self.rhs.get(variable) {
            Some(equation) => equation,
            None => panic!("no differential equation for variable '{}'", variable),
        }
    }
}
