//! Identity-bearing state variables.

use std::fmt;

use crate::domain::Domain;
use crate::expr::{next_id, Expr, ExprId};

/// A symbolic unknown of a PDAE system.
///
/// A variable is an entity, not a name: every call to [`Variable::new`]
/// creates a distinct identity, and two variables with the same name and
/// domain are still different unknowns. Equality and hashing use the id
/// alone, and cloning preserves it, which is what lets a variable serve as
/// a map key in one place and appear inside expression trees in another
/// while remaining the same entity.
#[derive(Debug, Clone)]
pub struct Variable {
    id: ExprId,
    name: String,
    domain: Domain,
}

impl Variable {
    /// Create a new state variable on the given spatial domain.
    pub fn new(name: impl Into<String>, domain: impl Into<Domain>) -> Self {
        Variable {
            id: next_id(),
            name: name.into(),
            domain: domain.into(),
        }
    }

    /// Create a new domain-agnostic state variable.
    pub fn scalar(name: impl Into<String>) -> Self {
        Variable::new(name, Domain::none())
    }

    pub fn id(&self) -> ExprId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Wrap this variable as an expression leaf sharing its id.
    pub fn to_expr(&self) -> Expr {
        Expr::state_variable(self.clone())
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<Variable> for Expr {
    fn from(variable: Variable) -> Self {
        Expr::state_variable(variable)
    }
}

impl From<&Variable> for Expr {
    fn from(variable: &Variable) -> Self {
        variable.to_expr()
    }
}
