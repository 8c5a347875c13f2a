use expression::Expression;

/// `(((2 + 4) * -1) ^ 2) + 1`, built bottom-up
pub fn expression() -> Expression {
    let two = Expression::constant(2);
    let four = Expression::constant(4);
    let neg_one = Expression::negate(Expression::constant(1));
    let sum = Expression::addition(two, four);
    let product = Expression::multiplication(sum, neg_one);
    let squared = Expression::exponent(product, 2);
    Expression::addition(squared, Expression::constant(1))
}

#[cfg(test)]
mod tests {
    use expression::{evaluate, normalize, render};

    use super::*;

    #[test]
    fn test_sample() {
        let expr = expression();

        assert_eq!(evaluate(&expr), 37);
        assert_eq!(
            normalize(&render(&expr)),
            "( ( ( 2 + 4 ) * - 1 ) ^ 2 + 1 )"
        );
        assert_eq!(expr.size(), 9);
    }
}
