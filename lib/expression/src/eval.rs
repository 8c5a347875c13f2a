use std::convert::Infallible;

use log::debug;
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::fold::{fold_iterative, fold_recursive, infallible, Fold};
use crate::{EvalError, Expression, ExpressionKind};

/// How integer overflow is handled while evaluating
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Overflow {
    /// Two's complement wrapping, exponents saturate at the `i32` bounds
    Wrapping,
    /// Any result outside the `i32` range is an [`EvalError::Overflow`]
    Checked,
}

impl Default for Overflow {
    fn default() -> Self {
        Overflow::Wrapping
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    Recursive,
    /// Uses an explicit stack, for trees too deep to recurse over
    Iterative,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Recursive
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Evaluator {
    pub strategy: Strategy,
    pub overflow: Overflow,
}

impl Evaluator {
    pub fn new(strategy: Strategy, overflow: Overflow) -> Evaluator {
        Evaluator { strategy, overflow }
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<i32, EvalError> {
        let result = match (self.overflow, self.strategy) {
            (Overflow::Wrapping, Strategy::Recursive) => Ok(evaluate(expr)),
            (Overflow::Wrapping, Strategy::Iterative) => Ok(evaluate_iterative(expr)),
            (Overflow::Checked, Strategy::Recursive) => fold_recursive(&mut CheckedArithmetic, expr),
            (Overflow::Checked, Strategy::Iterative) => fold_iterative(&mut CheckedArithmetic, expr),
        };

        if let Err(e) = &result {
            debug!(
                "{} evaluation of {} expression failed: {}",
                self.strategy.as_ref(),
                expr.kind(),
                e
            );
        }
        result
    }
}

/// Evaluates `expr` recursively, wrapping on overflow.
///
/// Exponents are computed as `f64::powf` and narrowed with `as i32`, which
/// truncates toward zero and saturates at `i32::MIN` and `i32::MAX`. So
/// `2 ^ 31` is `i32::MAX` rather than the wrapped `i32::MIN`, `2 ^ -1` is 0
/// and `0 ^ -1` is `i32::MAX`. `0 ^ 0` is 1.
pub fn evaluate(expr: &Expression) -> i32 {
    infallible(fold_recursive(&mut WrappingArithmetic, expr))
}

/// Same result as [`evaluate`] without recursing on the call stack
pub fn evaluate_iterative(expr: &Expression) -> i32 {
    infallible(fold_iterative(&mut WrappingArithmetic, expr))
}

/// Evaluates `expr` recursively, failing where [`evaluate`] would wrap or saturate
pub fn checked_evaluate(expr: &Expression) -> Result<i32, EvalError> {
    fold_recursive(&mut CheckedArithmetic, expr)
}

fn real_pow(base: i32, exponent: i32) -> f64 {
    f64::from(base).powf(f64::from(exponent))
}

struct WrappingArithmetic;

impl Fold for WrappingArithmetic {
    type Output = i32;
    type Error = Infallible;

    fn constant(&mut self, value: i32) -> Result<i32, Infallible> {
        Ok(value)
    }

    fn negate(&mut self, operand: i32) -> Result<i32, Infallible> {
        Ok(operand.wrapping_neg())
    }

    fn exponent(&mut self, base: i32, exponent: i32) -> Result<i32, Infallible> {
        Ok(real_pow(base, exponent) as i32)
    }

    fn addition(&mut self, left: i32, right: i32) -> Result<i32, Infallible> {
        Ok(left.wrapping_add(right))
    }

    fn multiplication(&mut self, left: i32, right: i32) -> Result<i32, Infallible> {
        Ok(left.wrapping_mul(right))
    }
}

struct CheckedArithmetic;

impl Fold for CheckedArithmetic {
    type Output = i32;
    type Error = EvalError;

    fn constant(&mut self, value: i32) -> Result<i32, EvalError> {
        Ok(value)
    }

    fn negate(&mut self, operand: i32) -> Result<i32, EvalError> {
        operand
            .checked_neg()
            .ok_or(EvalError::Overflow(ExpressionKind::Negate))
    }

    fn exponent(&mut self, base: i32, exponent: i32) -> Result<i32, EvalError> {
        let truncated = real_pow(base, exponent).trunc();
        // Also rejects NaN and infinities
        if truncated >= f64::from(i32::MIN) && truncated <= f64::from(i32::MAX) {
            Ok(truncated as i32)
        } else {
            Err(EvalError::Overflow(ExpressionKind::Exponent))
        }
    }

    fn addition(&mut self, left: i32, right: i32) -> Result<i32, EvalError> {
        left.checked_add(right)
            .ok_or(EvalError::Overflow(ExpressionKind::Addition))
    }

    fn multiplication(&mut self, left: i32, right: i32) -> Result<i32, EvalError> {
        left.checked_mul(right)
            .ok_or(EvalError::Overflow(ExpressionKind::Multiplication))
    }
}
