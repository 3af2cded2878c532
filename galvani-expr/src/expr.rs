//! Expression tree nodes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{BoundarySide, Domain};
use crate::variable::Variable;

/// Stable identity of an expression node or state variable.
pub type ExprId = u64;

static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

pub(crate) fn next_id() -> ExprId {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// An immutable node of a symbolic expression tree.
///
/// Every node carries a process-wide unique id and the spatial [`Domain`] it
/// is defined over. Children are shared through [`Arc`], so cloning an
/// expression is cheap and trees can be embedded in several models at once.
///
/// Equality and hashing use the id alone: two nodes are equal exactly when
/// they are the same created entity, never because they happen to have the
/// same structure. Cloning preserves the id, and wrapping a [`Variable`]
/// reuses the variable's id, so identity survives embedding into trees.
#[derive(Debug, Clone)]
pub struct Expr {
    id: ExprId,
    kind: ExprKind,
    domain: Domain,
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Expr {}

impl std::hash::Hash for Expr {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The shape of an expression node.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Constant number, domain-agnostic.
    Scalar(f64),
    /// A state variable leaf. The node shares the variable's id.
    StateVariable(Variable),
    /// A named physical parameter, resolved by a parameter set downstream.
    Parameter(String),
    Add(Arc<Expr>, Arc<Expr>),
    Sub(Arc<Expr>, Arc<Expr>),
    Mul(Arc<Expr>, Arc<Expr>),
    Div(Arc<Expr>, Arc<Expr>),
    Neg(Arc<Expr>),
    /// Spatial gradient. Requires a boundary condition to be well posed.
    Gradient(Arc<Expr>),
    /// Spatial divergence. Requires a boundary condition to be well posed.
    Divergence(Arc<Expr>),
    /// A domain-agnostic child lifted onto the node's domain.
    Broadcast(Arc<Expr>),
    /// Evaluation of a spatial child at one boundary of its domain.
    BoundaryValue {
        child: Arc<Expr>,
        side: BoundarySide,
    },
    /// Ordered concatenation of expressions over adjacent regions, the shape
    /// a discretizer produces for the solver-ready artifacts.
    Concatenation(Vec<Arc<Expr>>),
}

impl Expr {
    fn new(kind: ExprKind, domain: Domain) -> Self {
        Expr {
            id: next_id(),
            kind,
            domain,
        }
    }

    pub fn id(&self) -> ExprId {
        self.id
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Create a constant number expression.
    pub fn scalar(value: f64) -> Self {
        Expr::new(ExprKind::Scalar(value), Domain::none())
    }

    /// Create a named parameter expression.
    pub fn parameter(name: impl Into<String>) -> Self {
        Expr::new(ExprKind::Parameter(name.into()), Domain::none())
    }

    /// Wrap a state variable as an expression leaf.
    ///
    /// The leaf reuses the variable's id, so identity-based lookups treat
    /// the wrapped and unwrapped forms as the same entity.
    pub fn state_variable(variable: Variable) -> Self {
        let domain = variable.domain().clone();
        Expr {
            id: variable.id(),
            kind: ExprKind::StateVariable(variable),
            domain,
        }
    }

    /// Return the constant value if this node is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match &self.kind {
            ExprKind::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Return the underlying variable if this node is a state-variable leaf.
    pub fn as_state_variable(&self) -> Option<&Variable> {
        match &self.kind {
            ExprKind::StateVariable(variable) => Some(variable),
            _ => None,
        }
    }

    /// Whether any node in the tree is a spatial-derivative operator
    /// (gradient or divergence). Equations for which this holds need a
    /// boundary condition to be well posed.
    pub fn has_spatial_derivative(&self) -> bool {
        self.pre_order()
            .any(|node| matches!(node.kind(), ExprKind::Gradient(_) | ExprKind::Divergence(_)))
    }

    fn combined_domain(lhs: &Expr, rhs: &Expr, operation: &str) -> Domain {
        match lhs.domain().combine(rhs.domain()) {
            Some(domain) => domain,
            None => panic!(
                "cannot {} expressions on mismatched domains {} and {}",
                operation,
                lhs.domain(),
                rhs.domain()
            ),
        }
    }

    /// Create an addition node.
    ///
    /// # Panics
    ///
    /// Panics if both operands have non-empty, different domains.
    pub fn add_expr(lhs: Expr, rhs: Expr) -> Self {
        let domain = Expr::combined_domain(&lhs, &rhs, "add");
        Expr::new(ExprKind::Add(Arc::new(lhs), Arc::new(rhs)), domain)
    }

    /// Create a subtraction node.
    ///
    /// # Panics
    ///
    /// Panics if both operands have non-empty, different domains.
    pub fn sub_expr(lhs: Expr, rhs: Expr) -> Self {
        let domain = Expr::combined_domain(&lhs, &rhs, "subtract");
        Expr::new(ExprKind::Sub(Arc::new(lhs), Arc::new(rhs)), domain)
    }

    /// Create a multiplication node.
    ///
    /// # Panics
    ///
    /// Panics if both operands have non-empty, different domains.
    pub fn mul_expr(lhs: Expr, rhs: Expr) -> Self {
        let domain = Expr::combined_domain(&lhs, &rhs, "multiply");
        Expr::new(ExprKind::Mul(Arc::new(lhs), Arc::new(rhs)), domain)
    }

    /// Create a division node.
    ///
    /// # Panics
    ///
    /// Panics if both operands have non-empty, different domains.
    pub fn div_expr(lhs: Expr, rhs: Expr) -> Self {
        let domain = Expr::combined_domain(&lhs, &rhs, "divide");
        Expr::new(ExprKind::Div(Arc::new(lhs), Arc::new(rhs)), domain)
    }

    /// Create a negation node.
    pub fn neg_expr(operand: Expr) -> Self {
        let domain = operand.domain().clone();
        Expr::new(ExprKind::Neg(Arc::new(operand)), domain)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::scalar(value)
    }
}

/// Spatial gradient of an expression.
///
/// # Panics
///
/// Panics if the operand's domain is empty; a gradient only makes sense for
/// a quantity defined over a spatial region.
pub fn grad(operand: impl Into<Expr>) -> Expr {
    let operand = operand.into();
    if operand.domain().is_empty() {
        panic!("cannot take the gradient of '{}' with an empty domain", operand);
    }
    let domain = operand.domain().clone();
    Expr::new(ExprKind::Gradient(Arc::new(operand)), domain)
}

/// Spatial divergence of an expression.
///
/// # Panics
///
/// Panics if the operand's domain is empty.
pub fn div(operand: impl Into<Expr>) -> Expr {
    let operand = operand.into();
    if operand.domain().is_empty() {
        panic!(
            "cannot take the divergence of '{}' with an empty domain",
            operand
        );
    }
    let domain = operand.domain().clone();
    Expr::new(ExprKind::Divergence(Arc::new(operand)), domain)
}

/// Lift a domain-agnostic expression onto a spatial domain.
///
/// # Panics
///
/// Panics if the child already has a non-empty domain.
pub fn broadcast(child: impl Into<Expr>, domain: impl Into<Domain>) -> Expr {
    let child = child.into();
    if !child.domain().is_empty() {
        panic!(
            "cannot broadcast '{}': it is already defined on {}",
            child,
            child.domain()
        );
    }
    Expr::new(ExprKind::Broadcast(Arc::new(child)), domain.into())
}

/// Evaluate a spatial expression at one boundary of its domain, producing a
/// domain-agnostic quantity (e.g. a surface concentration).
///
/// # Panics
///
/// Panics if the child's domain is empty; a scalar has no boundary.
pub fn boundary_value(child: impl Into<Expr>, side: BoundarySide) -> Expr {
    let child = child.into();
    if child.domain().is_empty() {
        panic!(
            "cannot take the boundary value of '{}' with an empty domain",
            child
        );
    }
    Expr::new(
        ExprKind::BoundaryValue {
            child: Arc::new(child),
            side,
        },
        Domain::none(),
    )
}

/// Concatenate expressions over adjacent regions. The result's domain is the
/// ordered chain of the children's regions.
pub fn concatenation(children: impl IntoIterator<Item = Expr>) -> Expr {
    let children: Vec<Arc<Expr>> = children.into_iter().map(Arc::new).collect();
    let regions: Vec<String> = children
        .iter()
        .flat_map(|child| child.domain().regions().iter().cloned())
        .collect();
    Expr::new(ExprKind::Concatenation(children), Domain::from(regions))
}
