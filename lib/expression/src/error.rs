use derive_more::Display;

use crate::ExpressionKind;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[display(fmt = "Overflow evaluating {}", _0)]
    Overflow(ExpressionKind),
}

impl std::error::Error for EvalError {}

impl EvalError {
    /// The kind of node whose result did not fit in an `i32`
    pub fn kind(&self) -> ExpressionKind {
        match self {
            EvalError::Overflow(kind) => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            EvalError::Overflow(ExpressionKind::Multiplication).to_string(),
            "Overflow evaluating multiplication"
        );
        assert_eq!(
            EvalError::Overflow(ExpressionKind::Exponent).kind(),
            ExpressionKind::Exponent
        );
    }
}
