use std::convert::Infallible;

use crate::Expression;

/// A bottom-up computation over an [`Expression`], one method per variant.
///
/// Children are folded before their parent, left before right. Adding a
/// variant to [`Expression`] adds a method here, so every implementation
/// has to be extended alongside it.
pub trait Fold {
    type Output;
    type Error;

    fn constant(&mut self, value: i32) -> Result<Self::Output, Self::Error>;

    fn negate(&mut self, operand: Self::Output) -> Result<Self::Output, Self::Error>;

    fn exponent(&mut self, base: Self::Output, exponent: i32)
        -> Result<Self::Output, Self::Error>;

    fn addition(
        &mut self,
        left: Self::Output,
        right: Self::Output,
    ) -> Result<Self::Output, Self::Error>;

    fn multiplication(
        &mut self,
        left: Self::Output,
        right: Self::Output,
    ) -> Result<Self::Output, Self::Error>;
}

/// Folds `expr` using the call stack, which grows with the depth of the tree
pub fn fold_recursive<F: Fold>(folder: &mut F, expr: &Expression) -> Result<F::Output, F::Error> {
    match expr {
        Expression::Constant(value) => folder.constant(*value),
        Expression::Negate(operand) => {
            let operand = fold_recursive(folder, operand)?;
            folder.negate(operand)
        }
        Expression::Exponent(base, exponent) => {
            let base = fold_recursive(folder, base)?;
            folder.exponent(base, *exponent)
        }
        Expression::Addition(left, right) => {
            let left = fold_recursive(folder, left)?;
            let right = fold_recursive(folder, right)?;
            folder.addition(left, right)
        }
        Expression::Multiplication(left, right) => {
            let left = fold_recursive(folder, left)?;
            let right = fold_recursive(folder, right)?;
            folder.multiplication(left, right)
        }
    }
}

enum Step<'a> {
    Visit(&'a Expression),
    Negate,
    Exponent(i32),
    Addition,
    Multiplication,
}

/// Folds `expr` with heap-allocated work and operand stacks.
///
/// Produces the same result as [`fold_recursive`], calling the folder in the
/// same order, but its call stack usage is independent of tree depth.
pub fn fold_iterative<F: Fold>(folder: &mut F, expr: &Expression) -> Result<F::Output, F::Error> {
    let mut steps = vec![Step::Visit(expr)];
    let mut operands: Vec<F::Output> = Vec::new();

    while let Some(step) = steps.pop() {
        let value = match step {
            Step::Visit(expr) => match expr {
                Expression::Constant(value) => folder.constant(*value)?,
                Expression::Negate(operand) => {
                    steps.push(Step::Negate);
                    steps.push(Step::Visit(operand));
                    continue;
                }
                Expression::Exponent(base, exponent) => {
                    steps.push(Step::Exponent(*exponent));
                    steps.push(Step::Visit(base));
                    continue;
                }
                Expression::Addition(left, right) => {
                    steps.push(Step::Addition);
                    steps.push(Step::Visit(right));
                    steps.push(Step::Visit(left));
                    continue;
                }
                Expression::Multiplication(left, right) => {
                    steps.push(Step::Multiplication);
                    steps.push(Step::Visit(right));
                    steps.push(Step::Visit(left));
                    continue;
                }
            },
            Step::Negate => {
                let operand = pop(&mut operands);
                folder.negate(operand)?
            }
            Step::Exponent(exponent) => {
                let base = pop(&mut operands);
                folder.exponent(base, exponent)?
            }
            Step::Addition => {
                let right = pop(&mut operands);
                let left = pop(&mut operands);
                folder.addition(left, right)?
            }
            Step::Multiplication => {
                let right = pop(&mut operands);
                let left = pop(&mut operands);
                folder.multiplication(left, right)?
            }
        };
        operands.push(value);
    }

    Ok(pop(&mut operands))
}

// Every operator step is scheduled after the visits that produce its operands
fn pop<T>(operands: &mut Vec<T>) -> T {
    operands.pop().expect("operand stack underflow")
}

pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records the order in which the folder is invoked
    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Fold for Trace {
        type Output = ();
        type Error = Infallible;

        fn constant(&mut self, value: i32) -> Result<(), Infallible> {
            self.0.push(value.to_string());
            Ok(())
        }

        fn negate(&mut self, _: ()) -> Result<(), Infallible> {
            self.0.push("neg".to_string());
            Ok(())
        }

        fn exponent(&mut self, _: (), exponent: i32) -> Result<(), Infallible> {
            self.0.push(format!("^{}", exponent));
            Ok(())
        }

        fn addition(&mut self, _: (), _: ()) -> Result<(), Infallible> {
            self.0.push("+".to_string());
            Ok(())
        }

        fn multiplication(&mut self, _: (), _: ()) -> Result<(), Infallible> {
            self.0.push("*".to_string());
            Ok(())
        }
    }

    /// Fails on the first constant above a threshold
    struct Limit(i32);

    impl Fold for Limit {
        type Output = i32;
        type Error = i32;

        fn constant(&mut self, value: i32) -> Result<i32, i32> {
            if value > self.0 {
                Err(value)
            } else {
                Ok(value)
            }
        }

        fn negate(&mut self, operand: i32) -> Result<i32, i32> {
            Ok(-operand)
        }

        fn exponent(&mut self, base: i32, _: i32) -> Result<i32, i32> {
            Ok(base)
        }

        fn addition(&mut self, left: i32, right: i32) -> Result<i32, i32> {
            Ok(left + right)
        }

        fn multiplication(&mut self, left: i32, right: i32) -> Result<i32, i32> {
            Ok(left * right)
        }
    }

    fn sample() -> Expression {
        (-Expression::from(3) + Expression::from(4).pow(2)) * 5.into()
    }

    #[test]
    fn test_post_order() {
        let mut recursive = Trace::default();
        let mut iterative = Trace::default();

        infallible(fold_recursive(&mut recursive, &sample()));
        infallible(fold_iterative(&mut iterative, &sample()));

        let expected = vec!["3", "neg", "4", "^2", "+", "5", "*"];
        assert_eq!(recursive.0, expected);
        assert_eq!(iterative.0, expected);
    }

    #[test]
    fn test_first_error_wins() {
        let expr = Expression::addition(
            Expression::multiplication(1.into(), 7.into()),
            Expression::negate(9.into()),
        );

        assert_eq!(fold_recursive(&mut Limit(5), &expr), Err(7));
        assert_eq!(fold_iterative(&mut Limit(5), &expr), Err(7));
        assert_eq!(fold_recursive(&mut Limit(10), &expr), Ok(-2));
        assert_eq!(fold_iterative(&mut Limit(10), &expr), Ok(-2));
    }
}
