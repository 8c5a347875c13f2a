use figment::{providers::Env, Figment};
use serde::Deserialize;

use expression::Evaluator;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Also print the expression tree as JSON
    pub json: bool,
    /// Also print the Prometheus metrics
    pub metrics: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub evaluation: Evaluator,
    pub output: OutputConfig,
}

// APP_EVALUATION_STRATEGY=iterative sets evaluation.strategy
pub fn figment() -> Figment {
    Figment::new().merge(Env::prefixed("APP_").map(|s| s.as_str().replacen('_', ".", 1).into()))
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use expression::{Overflow, Strategy};

    use super::*;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_| {
            let config: Config = figment().extract()?;

            assert_eq!(config.evaluation, Evaluator::default());
            assert!(!config.output.json);
            assert!(!config.output.metrics);
            Ok(())
        });
    }

    #[test]
    fn test_env() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_EVALUATION_STRATEGY", "iterative");
            jail.set_env("APP_EVALUATION_OVERFLOW", "checked");
            jail.set_env("APP_OUTPUT_METRICS", "true");

            let config: Config = figment().extract()?;

            assert_eq!(
                config.evaluation,
                Evaluator::new(Strategy::Iterative, Overflow::Checked)
            );
            assert!(config.output.metrics);
            assert!(!config.output.json);
            Ok(())
        });
    }

    #[test]
    fn test_partial_env() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_EVALUATION_OVERFLOW", "checked");

            let config: Config = figment().extract()?;

            assert_eq!(config.evaluation.strategy, Strategy::Recursive);
            assert_eq!(config.evaluation.overflow, Overflow::Checked);
            Ok(())
        });
    }

    #[test]
    fn test_invalid() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_EVALUATION_OVERFLOW", "saturating");

            assert!(figment().extract::<Config>().is_err());
            Ok(())
        });
    }
}
