//! Infix rendering of expression trees, used by log and error messages.

use std::fmt;

use crate::expr::{Expr, ExprKind};

// Operands that read unambiguously without parentheses: leaves and
// call-style nodes.
fn is_atom(expr: &Expr) -> bool {
    matches!(
        expr.kind(),
        ExprKind::Scalar(_)
            | ExprKind::StateVariable(_)
            | ExprKind::Parameter(_)
            | ExprKind::Gradient(_)
            | ExprKind::Divergence(_)
            | ExprKind::Broadcast(_)
            | ExprKind::BoundaryValue { .. }
            | ExprKind::Concatenation(_)
    )
}

fn fmt_operand(expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if matches!(expr.kind(), ExprKind::Add(..) | ExprKind::Sub(..)) {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Scalar(value) => {
                if value.fract() == 0.0 && value.abs() < 1e10 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{}", value)
                }
            }
            ExprKind::StateVariable(variable) => write!(f, "{}", variable.name()),
            ExprKind::Parameter(name) => write!(f, "{}", name),
            ExprKind::Add(lhs, rhs) => write!(f, "{} + {}", lhs, rhs),
            ExprKind::Sub(lhs, rhs) => {
                write!(f, "{} - ", lhs)?;
                // Keep grouping readable: a - (b + c), not a - b + c.
                if matches!(rhs.kind(), ExprKind::Add(..) | ExprKind::Sub(..)) {
                    write!(f, "({})", rhs)
                } else {
                    write!(f, "{}", rhs)
                }
            }
            ExprKind::Mul(lhs, rhs) => {
                fmt_operand(lhs, f)?;
                write!(f, " * ")?;
                fmt_operand(rhs, f)
            }
            ExprKind::Div(lhs, rhs) => {
                fmt_operand(lhs, f)?;
                write!(f, " / ")?;
                if is_atom(rhs) {
                    write!(f, "{}", rhs)
                } else {
                    write!(f, "({})", rhs)
                }
            }
            ExprKind::Neg(child) => {
                if is_atom(child) {
                    write!(f, "-{}", child)
                } else {
                    write!(f, "-({})", child)
                }
            }
            ExprKind::Gradient(child) => write!(f, "grad({})", child),
            ExprKind::Divergence(child) => write!(f, "div({})", child),
            ExprKind::Broadcast(child) => {
                write!(f, "broadcast({}, {})", child, self.domain())
            }
            ExprKind::BoundaryValue { child, side } => {
                write!(f, "boundary_value({}, {})", child, side)
            }
            ExprKind::Concatenation(children) => {
                write!(f, "concatenation(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
