//! The seam between physics submodels and the model container.

use galvani_expr::{BoundarySide, Expr, Variable};

use crate::errors::{DomainError, ModelResult};
use crate::model::{BoundaryConditionMap, EquationMap, VariableMap};
use crate::validation::{normalized_boundary_conditions, normalized_equations};

/// One composable piece of physics.
///
/// A submodel produces a [`SubmodelEquations`] bundle describing the
/// equations it contributes; [`Model::update`](crate::Model::update) merges
/// bundles from several submodels into one system.
///
/// Implementations must create each state variable once and reuse that same
/// instance (clones preserve identity) across the bundle's mappings. A
/// variable recreated per mapping would be a different entity, and the
/// assembled model would fail its well-posedness checks.
pub trait Submodel {
    /// Name used in logs and error context.
    fn name(&self) -> &str;

    /// Build the equations this submodel contributes.
    fn equations(&self) -> ModelResult<SubmodelEquations>;
}

/// The fixed-shape bundle a submodel hands to the container: differential
/// equations, initial conditions, boundary conditions, and named output
/// variables.
///
/// The setters apply the same normalization and validation as the model
/// container's own, so a bundle is well formed by construction when the
/// setters succeed.
#[derive(Debug, Clone, Default)]
pub struct SubmodelEquations {
    rhs: EquationMap,
    initial_conditions: EquationMap,
    boundary_conditions: BoundaryConditionMap,
    variables: VariableMap,
}

impl SubmodelEquations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the differential equations. Scalar values are promoted to
    /// constant expressions; each value's domain must match its key's or be
    /// empty.
    pub fn set_rhs<I, V>(&mut self, entries: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (Variable, V)>,
        V: Into<Expr>,
    {
        self.rhs = normalized_equations("rhs", entries)?;
        Ok(())
    }

    /// Replace the initial conditions. Same normalization and domain rule
    /// as [`set_rhs`](Self::set_rhs).
    pub fn set_initial_conditions<I, V>(&mut self, entries: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (Variable, V)>,
        V: Into<Expr>,
    {
        self.initial_conditions = normalized_equations("initial_conditions", entries)?;
        Ok(())
    }

    /// Replace the boundary conditions. Scalar values are promoted per
    /// side; no domain check applies.
    pub fn set_boundary_conditions<I, S, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Expr, S)>,
        S: IntoIterator<Item = (BoundarySide, V)>,
        V: Into<Expr>,
    {
        self.boundary_conditions = normalized_boundary_conditions(entries);
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

    pub fn rhs(&self) -> &EquationMap {
        &self.rhs
    }

    pub fn initial_conditions(&self) -> &EquationMap {
        &self.initial_conditions
    }

    pub fn boundary_conditions(&self) -> &BoundaryConditionMap {
        &self.boundary_conditions
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub(crate) fn into_parts(
        self,
    ) -> (EquationMap, EquationMap, BoundaryConditionMap, VariableMap) {
        (
            self.rhs,
            self.initial_conditions,
            self.boundary_conditions,
            self.variables,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvani_expr::Domain;

    #[test]
    fn bundle_setters_validate_domains() {
        let c = Variable::new("c", Domain::from("negative particle"));
        let wrong = Variable::new("q", Domain::from("positive particle"));

        let mut bundle = SubmodelEquations::new();
        bundle
            .set_rhs([(c.clone(), Expr::scalar(0.0))])
            .expect("scalar values are domain-agnostic");

        let err = bundle
            .set_rhs([(c.clone(), wrong.to_expr())])
            .expect_err("mismatched domains must be rejected");
        assert!(
            err.to_string().contains("must have the same domain"),
            "unexpected message: {}",
            err
        );
    }

    #[test]
    fn bundle_promotes_scalars_everywhere() {
        let c = Variable::scalar("soc");
        let mut bundle = SubmodelEquations::new();
        bundle.set_initial_conditions([(c.clone(), 0.5)]).unwrap();
        bundle.set_boundary_conditions([(c.to_expr(), [(BoundarySide::Left, 0.0)])]);

        let stored = &bundle.initial_conditions()[&c];
        assert_eq!(stored.as_scalar(), Some(0.5));

        let sides = bundle.boundary_conditions().values().next().unwrap();
        assert_eq!(sides[&BoundarySide::Left].as_scalar(), Some(0.0));
    }
}
