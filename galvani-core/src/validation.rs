//! Validation functions for model assembly and well-posedness checking.

use std::collections::HashSet;

use galvani_expr::{BoundarySide, Expr, ExprId, Variable};

use crate::errors::{DomainError, ModelError, ModelResult};
use crate::model::{BoundaryConditionMap, EquationMap, SideConditions};

/// Normalize and validate one equation mapping before it is stored.
///
/// Numeric scalars are promoted to constant expressions here, so callers
/// observe every stored value as expression-typed. Each pair must satisfy
/// the domain invariant: the value's domain equals the key variable's
/// domain, or the value is domain-agnostic.
pub(crate) fn normalized_equations<I, V>(
    slot: &'static str,
    entries: I,
) -> Result<EquationMap, DomainError>
where
    I: IntoIterator<Item = (Variable, V)>,
    V: Into<Expr>,
{
    let mut normalized = EquationMap::new();
    for (variable, value) in entries {
        let equation: Expr = value.into();
        if !(equation.domain() == variable.domain() || equation.domain().is_empty()) {
            return Err(DomainError {
                variable: variable.name().to_string(),
                slot,
                variable_domain: variable.domain().clone(),
                equation_domain: equation.domain().clone(),
            });
        }
        normalized.insert(variable, equation);
    }
    Ok(normalized)
}

/// Normalize a boundary-condition mapping: scalars are promoted per side.
///
/// Deliberately performs no domain check; boundary values legitimately live
/// on the edge of the key's region rather than the region itself.
pub(crate) fn normalized_boundary_conditions<I, S, V>(entries: I) -> BoundaryConditionMap
where
    I: IntoIterator<Item = (Expr, S)>,
    S: IntoIterator<Item = (BoundarySide, V)>,
    V: Into<Expr>,
{
    entries
        .into_iter()
        .map(|(key, sides)| {
            let sides: SideConditions = sides
                .into_iter()
                .map(|(side, value)| (side, value.into()))
                .collect();
            (key, sides)
        })
        .collect()
}

/// Determinacy check: count unknowns against equations.
///
/// Every state variable referenced anywhere in the differential or algebraic
/// equations must either key a differential equation or be credited to one
/// algebraic equation. This is a counting heuristic: it does not verify
/// which algebraic equation pins which unknown, so a system can pass while
/// still being structurally singular. The discretizer and solver catch that
/// case later.
pub(crate) fn check_determinacy(rhs: &EquationMap, algebraic: &[Expr]) -> ModelResult<()> {
    let mut referenced: HashSet<ExprId> = HashSet::new();
    for equation in rhs.values().chain(algebraic.iter()) {
        for node in equation.pre_order() {
            if let Some(variable) = node.as_state_variable() {
                referenced.insert(variable.id());
            }
        }
    }
    for variable in rhs.keys() {
        referenced.remove(&variable.id());
    }

    let unaccounted = referenced.len();
    if unaccounted > algebraic.len() {
        return Err(ModelError::Underdetermined {
            unaccounted,
            algebraic: algebraic.len(),
        });
    }
    if unaccounted < algebraic.len() {
        return Err(ModelError::Overdetermined {
            unaccounted,
            algebraic: algebraic.len(),
        });
    }
    Ok(())
}

/// Every differential equation must come with an initial condition for its
/// key variable. Lookup is identity-based, like every other comparison in
/// the crate: a same-named but distinct variable does not count.
pub(crate) fn check_initial_conditions(
    rhs: &EquationMap,
    initial_conditions: &EquationMap,
) -> ModelResult<()> {
    for variable in rhs.keys() {
        if !initial_conditions.contains_key(variable) {
            return Err(ModelError::MissingInitialCondition {
                variable: variable.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Every differential equation containing a spatial derivative needs its key
/// variable to appear inside at least one boundary-condition key. Equations
/// without spatial derivatives need no boundary condition and are skipped.
pub(crate) fn check_boundary_conditions(
    rhs: &EquationMap,
    boundary_conditions: &BoundaryConditionMap,
) -> ModelResult<()> {
    for (variable, equation) in rhs {
        if !equation.has_spatial_derivative() {
            continue;
        }
        let covered = boundary_conditions
            .keys()
            .any(|key| key.pre_order().any(|node| node.id() == variable.id()));
        if !covered {
            return Err(ModelError::MissingBoundaryCondition {
                variable: variable.name().to_string(),
                equation: equation.to_string(),
            });
        }
    }
    Ok(())
}
