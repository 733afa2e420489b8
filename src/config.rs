//! Scoring configuration: per-dimension classification thresholds and the
//! composite weighting scheme.
//!
//! Everything here is plain data. Substituting different interval bounds,
//! penalties, or weights never touches the classifier or the composer, it
//! only changes what they are fed.

use crate::core::Interval;
use crate::errors::MetricsError;
use crate::limits::Limits;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Classification thresholds, one [`Limits`] per metric dimension.
///
/// Defaults carry the canonical bounds. All dimensions use the deduction
/// policy unless configured otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thresholds {
    #[serde(default = "default_cyclomatic_limits")]
    pub cyclomatic: Limits,

    #[serde(default = "default_cognitive_limits")]
    pub cognitive: Limits,

    #[serde(default = "default_file_loc_limits")]
    pub file_loc: Limits,

    #[serde(default = "default_function_loc_limits")]
    pub function_loc: Limits,

    #[serde(default = "default_cohesion_limits")]
    pub cohesion: Limits,

    #[serde(default = "default_duplicate_lines_limits")]
    pub duplicate_lines: Limits,

    #[serde(default = "default_docstring_coverage_limits")]
    pub docstring_coverage: Limits,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cyclomatic: default_cyclomatic_limits(),
            cognitive: default_cognitive_limits(),
            file_loc: default_file_loc_limits(),
            function_loc: default_function_loc_limits(),
            cohesion: default_cohesion_limits(),
            duplicate_lines: default_duplicate_lines_limits(),
            docstring_coverage: default_docstring_coverage_limits(),
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), String> {
        for (name, limits) in self.dimensions() {
            limits.validate(name)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> [(&'static str, &Limits); 7] {
        [
            ("cyclomatic", &self.cyclomatic),
            ("cognitive", &self.cognitive),
            ("file_loc", &self.file_loc),
            ("function_loc", &self.function_loc),
            ("cohesion", &self.cohesion),
            ("duplicate_lines", &self.duplicate_lines),
            ("docstring_coverage", &self.docstring_coverage),
        ]
    }
}

pub fn default_cyclomatic_limits() -> Limits {
    Limits::new(
        Interval::closed(1.0, 10.0),
        Interval::left_open(10.0, 20.0),
        Interval::open(20.0, 50.0),
    )
}

pub fn default_cognitive_limits() -> Limits {
    Limits::new(
        Interval::closed(0.0, 15.0),
        Interval::left_open(0.0, 25.0),
        Interval::left_open(0.0, 50.0),
    )
}

pub fn default_file_loc_limits() -> Limits {
    Limits::new(
        Interval::closed(20.0, 400.0),
        Interval::closed(0.0, 1000.0),
        Interval::closed(0.0, 2000.0),
    )
}

pub fn default_function_loc_limits() -> Limits {
    Limits::new(
        Interval::closed(1.0, 20.0),
        Interval::closed(1.0, 50.0),
        Interval::closed(1.0, 500.0),
    )
}

pub fn default_cohesion_limits() -> Limits {
    Limits::new(
        Interval::closed(75.0, 100.0),
        Interval::closed(20.0, 100.0),
        Interval::closed(0.0, 100.0),
    )
}

pub fn default_duplicate_lines_limits() -> Limits {
    Limits::new(
        Interval::closed(0.0, 0.0),
        Interval::closed(0.0, 20.0),
        Interval::closed(0.0, 100.0),
    )
}

pub fn default_docstring_coverage_limits() -> Limits {
    Limits::new(
        Interval::closed(70.0, 100.0),
        Interval::closed(40.0, 100.0),
        Interval::closed(0.0, 100.0),
    )
}

/// Weights combining the four sub-scores into the composite index.
///
/// The shipped scheme is the equal 0.25 split. Earlier unequal schemes
/// (0.15/0.5/0.15/0.2, and a variant folding duplicate lines in separately
/// at 0.07/0.08) are superseded and intentionally not selectable presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MiWeights {
    /// Weight for the size/volume sub-score (0.0-1.0)
    #[serde(default = "default_volume_weight")]
    pub volume: f64,

    /// Weight for the complexity sub-score (0.0-1.0)
    #[serde(default = "default_complexity_weight")]
    pub complexity: f64,

    /// Weight for the redundancy/dependence sub-score (0.0-1.0)
    #[serde(default = "default_redundancy_weight")]
    pub redundancy: f64,

    /// Weight for the coverage sub-score (0.0-1.0)
    #[serde(default = "default_coverage_weight")]
    pub coverage: f64,
}

impl Default for MiWeights {
    fn default() -> Self {
        Self {
            volume: default_volume_weight(),
            complexity: default_complexity_weight(),
            redundancy: default_redundancy_weight(),
            coverage: default_coverage_weight(),
        }
    }
}

impl MiWeights {
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Validate that each weight is in range and all sum to 1.0, with a
    /// small tolerance for floating point.
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.volume, "volume")?;
        Self::validate_weight(self.complexity, "complexity")?;
        Self::validate_weight(self.redundancy, "redundancy")?;
        Self::validate_weight(self.coverage, "coverage")?;

        let sum = self.volume + self.complexity + self.redundancy + self.coverage;
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "maintainability weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }
        Ok(())
    }

    /// Weighted combination of the four sub-scores.
    pub fn combine(&self, volume: f64, complexity: f64, redundancy: f64, coverage: f64) -> f64 {
        self.volume * volume
            + self.complexity * complexity
            + self.redundancy * redundancy
            + self.coverage * coverage
    }
}

pub fn default_volume_weight() -> f64 {
    0.25
}
pub fn default_complexity_weight() -> f64 {
    0.25
}
pub fn default_redundancy_weight() -> f64 {
    0.25
}
pub fn default_coverage_weight() -> f64 {
    0.25
}

/// Complete engine configuration: thresholds plus composite weights.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MiConfig {
    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub weights: MiWeights,
}

impl MiConfig {
    pub fn validate(&self) -> Result<(), MetricsError> {
        self.thresholds.validate().map_err(MetricsError::Config)?;
        self.weights.validate().map_err(MetricsError::Config)?;
        Ok(())
    }

    /// Parse and validate configuration from TOML contents.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: MiConfig =
            toml::from_str(contents).context("failed to parse maintainability config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded maintainability config from {}", path.display());
        Ok(config)
    }
}
