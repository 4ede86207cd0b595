// Configuration for A/B latency comparison
//
// Four knobs drive the whole analysis: the confidence level shared by the
// interval estimator and the t-test, the interval-width gate, the (not yet
// enforced) regression budget, and the histogram resolution.

use crate::error::{AbError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for an A/B comparison
///
/// # Example
/// ```
/// use abstats::comparison::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.confidence, 0.999); // 99.9% confidence
/// assert_eq!(config.histogram_buckets, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Target confidence level in (0, 1)
    ///
    /// Used twice: as the coverage of each group's confidence interval, and
    /// as `1 - alpha` for Welch's t-test.
    ///
    /// - 0.999 (default): a change must be significant at p < 0.001
    /// - 0.99: looser, catches smaller shifts with more false positives
    pub confidence: f64,

    /// Maximum confidence interval half-width as a fraction of the mean
    ///
    /// A run whose own measurement noise exceeds this fraction cannot
    /// support a regression conclusion and fails the variance check.
    ///
    /// Default: 0.10 (interval within 10% of μ)
    pub max_interval_percent: f64,

    /// Maximum allowed regression as a fraction of the baseline mean
    ///
    /// Carried and validated, but not applied as a gate: the mean check is
    /// decided by significance alone.
    ///
    /// Default: 0.02
    pub max_regression: f64,

    /// Number of histogram buckets in the report (>= 2)
    pub histogram_buckets: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence: 0.999,
            max_interval_percent: 0.10,
            max_regression: 0.02,
            histogram_buckets: 15,
        }
    }
}

impl AnalysisConfig {
    /// Create a strict configuration (fewer false positives, tighter noise gate)
    pub fn strict() -> Self {
        Self {
            confidence: 0.9999,
            max_interval_percent: 0.05,
            ..Self::default()
        }
    }

    /// Create a permissive configuration (more sensitive, tolerates noisy runs)
    pub fn permissive() -> Self {
        Self {
            confidence: 0.99,
            max_interval_percent: 0.20,
            ..Self::default()
        }
    }

    /// Significance level (alpha) used by the mean check
    pub fn significance_level(&self) -> f64 {
        1.0 - self.confidence
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(AbError::InvalidConfig(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }

        if !(self.max_interval_percent > 0.0 && self.max_interval_percent <= 1.0) {
            return Err(AbError::InvalidConfig(format!(
                "max_interval_percent must be in (0, 1], got {}",
                self.max_interval_percent
            )));
        }

        if !(self.max_regression > 0.0 && self.max_regression <= 1.0) {
            return Err(AbError::InvalidConfig(format!(
                "max_regression must be in (0, 1], got {}",
                self.max_regression
            )));
        }

        if self.histogram_buckets < 2 {
            return Err(AbError::InvalidConfig(format!(
                "histogram_buckets must be >= 2, got {}",
                self.histogram_buckets
            )));
        }

        Ok(())
    }

    /// Parse a configuration from TOML, filling omitted keys with defaults
    ///
    /// ```
    /// use abstats::comparison::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::from_toml_str("confidence = 0.99").unwrap();
    /// assert_eq!(config.confidence, 0.99);
    /// assert_eq!(config.histogram_buckets, 15);
    /// ```
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.confidence, 0.999);
        assert_eq!(config.max_interval_percent, 0.10);
        assert_eq!(config.max_regression, 0.02);
        assert_eq!(config.histogram_buckets, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = AnalysisConfig::strict();
        assert_eq!(config.confidence, 0.9999);
        assert_eq!(config.max_interval_percent, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_permissive_config() {
        let config = AnalysisConfig::permissive();
        assert_eq!(config.confidence, 0.99);
        assert_eq!(config.max_interval_percent, 0.20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_significance_level() {
        let config = AnalysisConfig::default();
        assert!((config.significance_level() - 0.001).abs() < 1e-12);
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_confidence() {
        let mut config = AnalysisConfig::default();
        config.confidence = 1.0;
        assert!(config.validate().is_err());

        config.confidence = 0.0;
        assert!(config.validate().is_err());

        config.confidence = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_max_interval_percent() {
        let mut config = AnalysisConfig::default();
        config.max_interval_percent = 0.0;
        assert!(config.validate().is_err());

        config.max_interval_percent = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_max_regression() {
        let mut config = AnalysisConfig::default();
        config.max_regression = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_histogram_buckets() {
        let mut config = AnalysisConfig::default();
        config.histogram_buckets = 1;
        assert!(matches!(
            config.validate(),
            Err(AbError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml_str_full() {
        let toml = r#"
            confidence = 0.95
            max_interval_percent = 0.25
            max_regression = 0.05
            histogram_buckets = 20
        "#;
        let config = AnalysisConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.confidence, 0.95);
        assert_eq!(config.max_interval_percent, 0.25);
        assert_eq!(config.max_regression, 0.05);
        assert_eq!(config.histogram_buckets, 20);
    }

    #[test]
    fn test_from_toml_str_rejects_invalid_values() {
        assert!(AnalysisConfig::from_toml_str("histogram_buckets = 1").is_err());
        assert!(AnalysisConfig::from_toml_str("confidence = \"high\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abstats.toml");
        fs::write(&path, "confidence = 0.99\nhistogram_buckets = 10\n").unwrap();

        let config = AnalysisConfig::from_file(&path).unwrap();
        assert_eq!(config.confidence, 0.99);
        assert_eq!(config.histogram_buckets, 10);
    }

    #[test]
    fn test_from_file_missing() {
        assert!(AnalysisConfig::from_file("/nonexistent/abstats.toml").is_err());
    }
}
