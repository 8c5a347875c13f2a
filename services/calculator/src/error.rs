use std::convert::Infallible;

use derive_more::Display;

use expression::EvalError;
use telemetry::IsErr;

#[derive(Debug, Display)]
pub enum CalculatorError {
    #[display(fmt = "Evaluation Error: {}", _0)]
    Evaluation(EvalError),

    #[display(fmt = "Serialization Error: {}", _0)]
    SerializeError(String),

    #[display(fmt = "Telemetry Error: {}", _0)]
    TelemetryError(String),
}

impl std::error::Error for CalculatorError {}

impl From<EvalError> for CalculatorError {
    fn from(e: EvalError) -> Self {
        CalculatorError::Evaluation(e)
    }
}

impl From<serde_json::Error> for CalculatorError {
    fn from(e: serde_json::Error) -> Self {
        CalculatorError::SerializeError(e.to_string())
    }
}

impl From<Box<dyn std::error::Error>> for CalculatorError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        CalculatorError::TelemetryError(e.to_string())
    }
}

impl From<Infallible> for CalculatorError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

// An overflowing expression is a property of the input, not a fault
impl IsErr for CalculatorError {
    fn is_err(&self) -> bool {
        !matches!(self, CalculatorError::Evaluation(_))
    }
}
