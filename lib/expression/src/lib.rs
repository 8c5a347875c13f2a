use std::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumDiscriminants, EnumString};

pub use error::EvalError;
pub use eval::{checked_evaluate, evaluate, evaluate_iterative, Evaluator, Overflow, Strategy};
pub use fold::{fold_iterative, fold_recursive, Fold};
pub use render::{normalize, render, render_iterative};

mod error;
mod eval;
mod fold;
mod render;

/// An integer arithmetic expression.
///
/// Every consumer in this crate matches on all five variants without a
/// wildcard arm, so adding a variant fails to compile until each is updated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, EnumDiscriminants)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "type", content = "value")]
#[strum_discriminants(name(ExpressionKind), derive(Hash, AsRefStr, Display, EnumString))]
#[strum_discriminants(strum(serialize_all = "snake_case"))]
pub enum Expression {
    Constant(i32),
    Negate(Box<Expression>),
    Exponent(Box<Expression>, i32),
    Addition(Box<Expression>, Box<Expression>),
    Multiplication(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn constant(value: i32) -> Expression {
        Expression::Constant(value)
    }

    pub fn negate(operand: Expression) -> Expression {
        Expression::Negate(Box::new(operand))
    }

    pub fn exponent(base: Expression, exponent: i32) -> Expression {
        Expression::Exponent(Box::new(base), exponent)
    }

    pub fn addition(left: Expression, right: Expression) -> Expression {
        Expression::Addition(Box::new(left), Box::new(right))
    }

    pub fn multiplication(left: Expression, right: Expression) -> Expression {
        Expression::Multiplication(Box::new(left), Box::new(right))
    }

    /// Raises this expression to `exponent`, the builder form of [`Expression::exponent`]
    pub fn pow(self, exponent: i32) -> Expression {
        Expression::exponent(self, exponent)
    }

    pub fn kind(&self) -> ExpressionKind {
        self.into()
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        fold::infallible(fold_iterative(&mut NodeCount, self))
    }

    /// Length of the longest root-to-leaf path, a lone constant has depth 1
    pub fn depth(&self) -> usize {
        fold::infallible(fold_iterative(&mut Depth, self))
    }

    fn detach_children(&mut self, into: &mut Vec<Expression>) {
        match self {
            Expression::Constant(_) => {}
            Expression::Negate(operand) | Expression::Exponent(operand, _) => detach(operand, into),
            Expression::Addition(left, right) | Expression::Multiplication(left, right) => {
                detach(left, into);
                detach(right, into);
            }
        }
    }
}

// Moves the child out of its box, leaving a leaf behind so the box itself
// is freed without recursing
fn detach(slot: &mut Box<Expression>, into: &mut Vec<Expression>) {
    if let Expression::Constant(_) = **slot {
        return;
    }
    into.push(std::mem::replace(&mut **slot, Expression::Constant(0)));
}

// Children are released from a heap stack so that dropping a deep tree does
// not recurse once per level
impl Drop for Expression {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(mut child) = detached.pop() {
            child.detach_children(&mut detached);
        }
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::Constant(value)
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Self::Output {
        Expression::negate(self)
    }
}

macro_rules! op {
    ( $t: ident, $f: ident, $build: ident ) => {
        impl $t for Expression {
            type Output = Expression;

            fn $f(self, rhs: Self) -> Self::Output {
                Expression::$build(self, rhs)
            }
        }
    };
}

op!(Add, add, addition);
op!(Mul, mul, multiplication);

struct NodeCount;

impl Fold for NodeCount {
    type Output = usize;
    type Error = std::convert::Infallible;

    fn constant(&mut self, _: i32) -> Result<usize, Self::Error> {
        Ok(1)
    }

    fn negate(&mut self, operand: usize) -> Result<usize, Self::Error> {
        Ok(operand + 1)
    }

    fn exponent(&mut self, base: usize, _: i32) -> Result<usize, Self::Error> {
        Ok(base + 1)
    }

    fn addition(&mut self, left: usize, right: usize) -> Result<usize, Self::Error> {
        Ok(left + right + 1)
    }

    fn multiplication(&mut self, left: usize, right: usize) -> Result<usize, Self::Error> {
        Ok(left + right + 1)
    }
}

struct Depth;

impl Fold for Depth {
    type Output = usize;
    type Error = std::convert::Infallible;

    fn constant(&mut self, _: i32) -> Result<usize, Self::Error> {
        Ok(1)
    }

    fn negate(&mut self, operand: usize) -> Result<usize, Self::Error> {
        Ok(operand + 1)
    }

    fn exponent(&mut self, base: usize, _: i32) -> Result<usize, Self::Error> {
        Ok(base + 1)
    }

    fn addition(&mut self, left: usize, right: usize) -> Result<usize, Self::Error> {
        Ok(left.max(right) + 1)
    }

    fn multiplication(&mut self, left: usize, right: usize) -> Result<usize, Self::Error> {
        Ok(left.max(right) + 1)
    }
}
