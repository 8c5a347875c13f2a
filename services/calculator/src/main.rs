#[macro_use]
extern crate lazy_static;

use std::convert::Infallible;

use figment::Figment;
use log::{debug, info};

use expression::{render, Expression};
use telemetry::Measure;

use crate::config::Config;
use crate::error::CalculatorError;

mod config;
mod error;
mod sample;

lazy_static! {
    static ref EVALUATE_MEASURE: Measure = Measure::new("calculator", "evaluate");
    static ref RENDER_MEASURE: Measure = Measure::new("calculator", "render");
}

fn report(config: &Config, expr: &Expression) -> Result<String, CalculatorError> {
    let rendered = RENDER_MEASURE.record(|| Ok::<_, Infallible>(render(expr)))?;
    let value = EVALUATE_MEASURE.record(|| {
        config
            .evaluation
            .evaluate(expr)
            .map_err(CalculatorError::from)
    })?;

    let mut out = format!("{} = {}\n", rendered, value);
    if config.output.json {
        out.push_str(&serde_json::to_string(expr)?);
        out.push('\n');
    }
    if config.output.metrics {
        out.push_str(&telemetry::encode()?);
    }
    Ok(out)
}

fn run(figment: Figment) -> Result<String, Box<dyn std::error::Error>> {
    let config: Config = figment.extract()?;
    info!("Loaded config: {:?}", config);

    let expr = sample::expression();
    debug!(
        "Built expression with {} nodes and depth {}",
        expr.size(),
        expr.depth()
    );

    let out = report(&config, &expr)?;
    debug!(
        "evaluate: {} calls, {} failures",
        EVALUATE_MEASURE.calls(),
        EVALUATE_MEASURE.failures()
    );
    Ok(out)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out = run(config::figment())?;
    print!("{}", out);
    Ok(())
}
