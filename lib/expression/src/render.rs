use std::fmt;

use itertools::Itertools;

use crate::Expression;

// Each node pads itself with spaces and every addition and multiplication
// is parenthesized, e.g. `2 + 4` renders as " ( 2  +  4 ) "
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(value) => write!(f, " {} ", value),
            Expression::Negate(operand) => write!(f, " -{} ", operand),
            Expression::Exponent(base, exponent) => write!(f, " {} ^ {}", base, exponent),
            Expression::Addition(left, right) => write!(f, " ({} + {}) ", left, right),
            Expression::Multiplication(left, right) => write!(f, " ({} * {}) ", left, right),
        }
    }
}

pub fn render(expr: &Expression) -> String {
    expr.to_string()
}

enum Piece<'a> {
    Node(&'a Expression),
    Text(&'static str),
    Exponent(i32),
}

/// Same output as [`render`] without recursing on the call stack
pub fn render_iterative(expr: &Expression) -> String {
    let mut out = String::new();
    let mut pieces = vec![Piece::Node(expr)];

    // Pieces are pushed in reverse so they pop in output order
    while let Some(piece) = pieces.pop() {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Exponent(exponent) => {
                out.push_str(" ^ ");
                out.push_str(&exponent.to_string());
            }
            Piece::Node(expr) => match expr {
                Expression::Constant(value) => {
                    out.push(' ');
                    out.push_str(&value.to_string());
                    out.push(' ');
                }
                Expression::Negate(operand) => {
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Node(operand));
                    out.push_str(" -");
                }
                Expression::Exponent(base, exponent) => {
                    pieces.push(Piece::Exponent(*exponent));
                    pieces.push(Piece::Node(base));
                    out.push(' ');
                }
                Expression::Addition(left, right) => {
                    pieces.push(Piece::Text(") "));
                    pieces.push(Piece::Node(right));
                    pieces.push(Piece::Text(" + "));
                    pieces.push(Piece::Node(left));
                    out.push_str(" (");
                }
                Expression::Multiplication(left, right) => {
                    pieces.push(Piece::Text(") "));
                    pieces.push(Piece::Node(right));
                    pieces.push(Piece::Text(" * "));
                    pieces.push(Piece::Node(left));
                    out.push_str(" (");
                }
            },
        }
    }
    out
}

/// Collapses the padding of a rendered expression to single spaces
pub fn normalize(rendered: &str) -> String {
    rendered.split_whitespace().join(" ")
}
