//! Arithmetic operator overloads for expressions and variables.
//!
//! All combinations of [`Expr`], [`Variable`], and `f64` are supported on
//! both sides of `+`, `-`, `*`, and `/`. Operands are consumed; clone
//! explicitly when a variable or expression is reused. Domain mismatches
//! panic, as documented on the underlying constructors.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::expr::Expr;
use crate::variable::Variable;

// Generates the four binary operator impls for one (lhs, rhs) type pair,
// given conversions of each side into Expr.
macro_rules! impl_expr_ops {
    ($lhs:ty, $rhs:ty, $to_lhs:expr, $to_rhs:expr) => {
        impl Add<$rhs> for $lhs {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                Expr::add_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
        impl Sub<$rhs> for $lhs {
            type Output = Expr;
            fn sub(self, rhs: $rhs) -> Expr {
                Expr::sub_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
        impl Mul<$rhs> for $lhs {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                Expr::mul_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
        impl Div<$rhs> for $lhs {
            type Output = Expr;
            fn div(self, rhs: $rhs) -> Expr {
                Expr::div_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
    };
}

impl_expr_ops!(Expr, Expr, |s: Expr| s, |r: Expr| r);
impl_expr_ops!(Expr, Variable, |s: Expr| s, |r: Variable| r.to_expr());
impl_expr_ops!(Expr, f64, |s: Expr| s, |r: f64| Expr::scalar(r));

impl_expr_ops!(Variable, Variable, |s: Variable| s.to_expr(), |r: Variable| r.to_expr());
impl_expr_ops!(Variable, Expr, |s: Variable| s.to_expr(), |r: Expr| r);
impl_expr_ops!(Variable, f64, |s: Variable| s.to_expr(), |r: f64| Expr::scalar(r));

impl_expr_ops!(f64, Expr, |s: f64| Expr::scalar(s), |r: Expr| r);
impl_expr_ops!(f64, Variable, |s: f64| Expr::scalar(s), |r: Variable| r.to_expr());

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::neg_expr(self)
    }
}

impl Neg for Variable {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::neg_expr(self.to_expr())
    }
}
