//! Pre-order traversal of expression trees.

use crate::expr::{Expr, ExprKind};

impl Expr {
    /// Walk the tree in pre-order: each node before its children, children
    /// left to right.
    ///
    /// The iterator is lazy and borrows the tree, so traversal can be
    /// restarted at any time by calling `pre_order` again, and short-circuit
    /// searches (`any`, `find`) stop without visiting the rest of the tree.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// Lazy pre-order iterator over the nodes of an expression tree.
pub struct PreOrder<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Children are pushed right to left so the leftmost comes off first.
        match node.kind() {
            ExprKind::Scalar(_) | ExprKind::StateVariable(_) | ExprKind::Parameter(_) => {}
            ExprKind::Add(lhs, rhs)
            | ExprKind::Sub(lhs, rhs)
            | ExprKind::Mul(lhs, rhs)
            | ExprKind::Div(lhs, rhs) => {
                self.stack.push(rhs);
                self.stack.push(lhs);
            }
            ExprKind::Neg(child)
            | ExprKind::Gradient(child)
            | ExprKind::Divergence(child)
            | ExprKind::Broadcast(child) => {
                self.stack.push(child);
            }
            ExprKind::BoundaryValue { child, .. } => {
                self.stack.push(child);
            }
            ExprKind::Concatenation(children) => {
                for child in children.iter().rev() {
                    self.stack.push(child);
                }
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::expr::grad;
    use crate::variable::Variable;

    fn label(node: &Expr) -> String {
        match node.kind() {
            ExprKind::Scalar(value) => format!("{}", value),
            ExprKind::StateVariable(v) => v.name().to_string(),
            ExprKind::Parameter(name) => name.clone(),
            ExprKind::Add(..) => "+".to_string(),
            ExprKind::Sub(..) => "-".to_string(),
            ExprKind::Mul(..) => "*".to_string(),
            ExprKind::Div(..) => "/".to_string(),
            ExprKind::Neg(..) => "neg".to_string(),
            ExprKind::Gradient(..) => "grad".to_string(),
            ExprKind::Divergence(..) => "div".to_string(),
            ExprKind::Broadcast(..) => "broadcast".to_string(),
            ExprKind::BoundaryValue { .. } => "boundary".to_string(),
            ExprKind::Concatenation(..) => "concat".to_string(),
        }
    }

    #[test]
    fn visits_parent_before_children_left_to_right() {
        let x = Variable::scalar("x");
        let y = Variable::scalar("y");
        // (x + 2) * y
        let tree = Expr::mul_expr(Expr::add_expr(x.to_expr(), Expr::scalar(2.0)), y.to_expr());

        let order: Vec<String> = tree.pre_order().map(label).collect();
        assert_eq!(order, ["*", "+", "x", "2", "y"]);
    }

    #[test]
    fn traversal_is_restartable() {
        let c = Variable::new("c", Domain::from("negative particle"));
        let tree = grad(c);

        let first: Vec<_> = tree.pre_order().map(|n| n.id()).collect();
        let second: Vec<_> = tree.pre_order().map(|n| n.id()).collect();
        assert_eq!(first, second, "restarting must replay the same sequence");
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn short_circuit_search_finds_embedded_variables() {
        let c = Variable::new("c", Domain::from("separator"));
        let tree = Expr::mul_expr(Expr::parameter("D"), grad(c.clone()));

        assert!(tree
            .pre_order()
            .any(|node| node.as_state_variable() == Some(&c)));

        let other = Variable::new("c", Domain::from("separator"));
        assert!(
            !tree
                .pre_order()
                .any(|node| node.as_state_variable() == Some(&other)),
            "a same-named but distinct variable must not match"
        );
    }

    #[test]
    fn node_count_matches_tree_size() {
        let x = Variable::scalar("x");
        let tree = Expr::div_expr(
            Expr::sub_expr(x.to_expr(), Expr::scalar(1.0)),
            Expr::scalar(4.0),
        );
        assert_eq!(tree.pre_order().count(), 5);
    }
}
