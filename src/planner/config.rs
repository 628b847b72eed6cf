//! Planner configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::cost::{CostWeights, LengthMetric};
use crate::error::{PlannerError, Result};
use crate::metaheuristics::{BeeParams, PsoParams, SwarmSettings};

/// Search strategy and its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Particle swarm
    Pso(PsoParams),
    /// Grey wolf pack
    #[default]
    GreyWolf,
    /// Lévy-flight bee colony
    Bee(BeeParams),
}

impl Strategy {
    /// Get string name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pso(_) => "pso",
            Self::GreyWolf => "gwo",
            Self::Bee(_) => "abc",
        }
    }

    /// Parse from string, with default hyperparameters.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pso" | "particle" | "particleswarm" => Some(Self::Pso(PsoParams::default())),
            "gwo" | "wolf" | "greywolf" | "grey_wolf" => Some(Self::GreyWolf),
            "abc" | "bee" | "bees" | "beecolony" => Some(Self::Bee(BeeParams::default())),
            _ => None,
        }
    }
}

/// Everything needed to plan on a map except the endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Cost term weights (default: violation 0.9, length 0.1)
    pub weights: CostWeights,
    /// Length metric (default: step counting)
    pub length_metric: LengthMetric,
    /// Search strategy (default: grey wolf)
    pub strategy: Strategy,
    /// Population, iterations, bounds, seed and warm start
    pub swarm: SwarmSettings,
}

impl PlannerConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cost weights.
    #[must_use]
    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the length metric.
    #[must_use]
    pub fn with_length_metric(mut self, metric: LengthMetric) -> Self {
        self.length_metric = metric;
        self
    }

    /// Set the strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the swarm settings.
    #[must_use]
    pub fn with_swarm(mut self, swarm: SwarmSettings) -> Self {
        self.swarm = swarm;
        self
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that cannot run a meaningful search.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.swarm.validate()?;
        if self.swarm.iterations == 0 {
            return Err(PlannerError::hyperparameter("iterations", 0, "> 0"));
        }
        match &self.strategy {
            Strategy::Pso(p) => p.validate(),
            Strategy::GreyWolf => Ok(()),
            Strategy::Bee(b) => b.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = PlannerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.strategy, Strategy::GreyWolf);
        assert_eq!(cfg.length_metric, LengthMetric::Steps);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!(Strategy::parse("GWO"), Some(Strategy::GreyWolf));
        assert!(matches!(Strategy::parse("pso"), Some(Strategy::Pso(_))));
        assert!(matches!(Strategy::parse("bee"), Some(Strategy::Bee(_))));
        assert_eq!(Strategy::parse("ants"), None);
        assert_eq!(Strategy::parse("abc").map(|s| s.as_str()), Some("abc"));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let cfg = PlannerConfig::new().with_swarm(SwarmSettings::new().with_iterations(0));
        assert!(matches!(
            cfg.validate(),
            Err(PlannerError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_invalid_strategy_params_rejected() {
        let cfg = PlannerConfig::new()
            .with_strategy(Strategy::Bee(BeeParams::default().with_high_step_prob(2.0)));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = PlannerConfig::new()
            .with_strategy(Strategy::Bee(BeeParams::default().with_trials(5)))
            .with_weights(CostWeights::ViolationLengthRepulsion {
                violation: 0.8,
                length: 0.1,
                repulsion: 0.1,
            })
            .with_length_metric(LengthMetric::Euclidean)
            .with_swarm(SwarmSettings::new().with_seed(3));
        let json = cfg.to_json().expect("serializable");
        let back = PlannerConfig::from_json(&json).expect("parsable");
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = PlannerConfig::from_json(
            r#"{"strategy": {"kind": "pso", "attraction": 2.0}, "swarm": {"iterations": 12}}"#,
        )
        .expect("parsable");
        match cfg.strategy {
            Strategy::Pso(p) => {
                assert!((p.attraction - 2.0).abs() < 1e-12);
                assert!((p.jitter - 0.02).abs() < 1e-12);
            }
            other => panic!("unexpected strategy {other:?}"),
        }
        assert_eq!(cfg.swarm.iterations, 12);
        assert_eq!(cfg.swarm.population, 30);
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        assert!(matches!(
            PlannerConfig::from_json("{not json"),
            Err(PlannerError::Serialization(_))
        ));
    }
}
