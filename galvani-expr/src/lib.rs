//! Immutable symbolic expression trees with spatial domain tags.
//!
//! This crate supplies the expression layer the model-construction engine
//! builds on: identity-bearing [`Variable`]s, [`Expr`] trees with cheap
//! `Arc`-shared children, pre-order traversal, arithmetic operator
//! overloading, and the spatial operators ([`grad`], [`div`],
//! [`broadcast`], [`boundary_value`]) that battery models are written in.
//!
//! Equality of variables and expressions is identity (a stable id), never
//! structure: the same rule applies to map keys, duplicate detection, and
//! traversal matching everywhere downstream.

mod display;
mod domain;
mod expr;
mod ops;
mod traverse;
mod variable;

pub use domain::{BoundarySide, Domain};
pub use expr::{boundary_value, broadcast, concatenation, div, grad, Expr, ExprId, ExprKind};
pub use traverse::PreOrder;
pub use variable::Variable;
