//! Engine settings.
//!
//! Every setting has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! seed_fallback = 0.10
//! price_tolerance = 1e-9
//! max_newton_iterations = 50
//! max_bisection_iterations = 200
//! yield_floor = -0.99
//! yield_cap = 10.0
//! max_clamp_hits = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use yieldlab_bonds::pricing::{
    YieldSolver, DEFAULT_PRICE_TOLERANCE, DEFAULT_SEED, DEFAULT_YIELD_BOUNDS, MAX_PRICE_TOLERANCE,
};

use crate::error::{AnalyticsError, ConfigIssue, EngineResult};

const MAX_ITERATION_CAP: u32 = 10_000;

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Solver settings of the analytics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Newton seed when the bond has no current coupon rate (decimal).
    #[serde(default = "default_seed_fallback")]
    pub seed_fallback: f64,

    /// Price tolerance per 100 face.
    #[serde(default = "default_price_tolerance")]
    pub price_tolerance: f64,

    /// Newton iteration budget before the bisection fallback.
    #[serde(default = "default_max_newton_iterations")]
    pub max_newton_iterations: u32,

    /// Bisection iteration cap.
    #[serde(default = "default_max_bisection_iterations")]
    pub max_bisection_iterations: u32,

    /// Lowest yield the solver considers (decimal).
    #[serde(default = "default_yield_floor")]
    pub yield_floor: f64,

    /// Highest yield the solver considers (decimal).
    #[serde(default = "default_yield_cap")]
    pub yield_cap: f64,

    /// Boundary clamps Newton tolerates before falling back.
    #[serde(default = "default_max_clamp_hits")]
    pub max_clamp_hits: u32,
}

fn default_seed_fallback() -> f64 {
    DEFAULT_SEED
}

fn default_price_tolerance() -> f64 {
    DEFAULT_PRICE_TOLERANCE
}

fn default_max_newton_iterations() -> u32 {
    50
}

fn default_max_bisection_iterations() -> u32 {
    200
}

fn default_yield_floor() -> f64 {
    DEFAULT_YIELD_BOUNDS.0
}

fn default_yield_cap() -> f64 {
    DEFAULT_YIELD_BOUNDS.1
}

fn default_max_clamp_hits() -> u32 {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_fallback: default_seed_fallback(),
            price_tolerance: default_price_tolerance(),
            max_newton_iterations: default_max_newton_iterations(),
            max_bisection_iterations: default_max_bisection_iterations(),
            yield_floor: default_yield_floor(),
            yield_cap: default_yield_cap(),
            max_clamp_hits: default_max_clamp_hits(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates settings from a TOML document.
    pub fn from_toml_str(toml_str: &str) -> EngineResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| AnalyticsError::config_load("<toml>", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| AnalyticsError::config_load(&name, e))?;
        let config: Self = toml::from_str(&text).map_err(|e| AnalyticsError::config_load(&name, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the settings as TOML.
    pub fn to_toml_string(&self) -> EngineResult<String> {
        toml::to_string(self).map_err(|e| AnalyticsError::config_load("<toml>", e))
    }

    /// Builder method to set the price tolerance.
    pub fn with_price_tolerance(mut self, tolerance: f64) -> Self {
        self.price_tolerance = tolerance;
        self
    }

    /// Builder method to set the yield domain.
    pub fn with_yield_bounds(mut self, floor: f64, cap: f64) -> Self {
        self.yield_floor = floor;
        self.yield_cap = cap;
        self
    }

    /// Every rule the settings break; empty when valid.
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !(self.price_tolerance > 0.0 && self.price_tolerance <= MAX_PRICE_TOLERANCE) {
            issues.push(ConfigIssue::new(
                "price_tolerance",
                format!("must be in (0, {MAX_PRICE_TOLERANCE}], got {}", self.price_tolerance),
            ));
        }

        for (field, value) in [
            ("max_newton_iterations", self.max_newton_iterations),
            ("max_bisection_iterations", self.max_bisection_iterations),
        ] {
            if value == 0 || value > MAX_ITERATION_CAP {
                issues.push(ConfigIssue::new(
                    field,
                    format!("must be between 1 and {MAX_ITERATION_CAP}, got {value}"),
                ));
            }
        }

        if self.max_clamp_hits == 0 {
            issues.push(ConfigIssue::new("max_clamp_hits", "must be at least 1"));
        }

        // Annual compounding needs 1 + y > 0 everywhere in the domain.
        if !(self.yield_floor.is_finite() && self.yield_floor > -1.0) {
            issues.push(ConfigIssue::new(
                "yield_floor",
                format!("must be greater than -1, got {}", self.yield_floor),
            ));
        }
        if !(self.yield_cap.is_finite() && self.yield_cap > self.yield_floor) {
            issues.push(ConfigIssue::new(
                "yield_cap",
                format!(
                    "must be finite and above yield_floor {}, got {}",
                    self.yield_floor, self.yield_cap
                ),
            ));
        }

        if !(self.seed_fallback >= self.yield_floor && self.seed_fallback <= self.yield_cap) {
            issues.push(ConfigIssue::new(
                "seed_fallback",
                format!(
                    "must lie in [{}, {}], got {}",
                    self.yield_floor, self.yield_cap, self.seed_fallback
                ),
            ));
        }

        issues
    }

    /// Checks every rule.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::Config` listing every broken rule.
    pub fn validate(&self) -> EngineResult<()> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(AnalyticsError::Config { issues })
        }
    }

    /// Yield solver configured from these settings.
    pub fn yield_solver(&self) -> YieldSolver {
        YieldSolver::new()
            .with_tolerance(self.price_tolerance)
            .with_max_iterations(self.max_newton_iterations)
            .with_max_bisection_iterations(self.max_bisection_iterations)
            .with_max_clamp_hits(self.max_clamp_hits)
            .with_bounds(self.yield_floor, self.yield_cap)
            .with_seed_fallback(self.seed_fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_newton_iterations, 50);
        assert_eq!(config.yield_floor, -0.99);
        assert_eq!(config.yield_cap, 10.0);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            price_tolerance = 1e-7
            max_newton_iterations = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.price_tolerance, 1e-7);
        assert_eq!(config.max_newton_iterations, 20);
        assert_eq!(config.max_clamp_hits, 3);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = EngineConfig::from_toml_str("price_tolerence = 1e-7").unwrap_err();
        assert!(matches!(err, AnalyticsError::ConfigLoad { .. }));
    }

    #[test]
    fn test_validation_collects_every_issue() {
        let config = EngineConfig {
            price_tolerance: 0.01,
            max_newton_iterations: 0,
            yield_floor: -1.5,
            ..EngineConfig::default()
        };
        let fields: Vec<String> = config.issues().into_iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec!["price_tolerance", "max_newton_iterations", "yield_floor"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert!(matches!(config.validate(), Err(AnalyticsError::Config { .. })));
    }

    #[test]
    fn test_inverted_bounds() {
        let config = EngineConfig::default().with_yield_bounds(0.5, 0.1);
        let fields: Vec<String> = config.issues().into_iter().map(|i| i.field).collect();
        assert!(fields.contains(&"yield_cap".to_string()));
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = EngineConfig::default().with_price_tolerance(1e-8);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes()).unwrap();

        let loaded = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/yieldlab.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/yieldlab.toml"));
    }

    #[test]
    fn test_solver_picks_up_settings() {
        let solver = EngineConfig::default()
            .with_price_tolerance(1e-6)
            .with_yield_bounds(-0.5, 2.0)
            .yield_solver();
        assert_eq!(solver.tolerance(), 1e-6);
        assert_eq!(solver.bounds(), (-0.5, 2.0));
    }
}
