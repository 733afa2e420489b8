//! Maintainability index composition.
//!
//! Combines per-dimension classifier scores into one bounded index at file
//! and package scope. All intermediate math runs on unrounded values;
//! rounding to two decimals happens once, when the [`MiStats`] result is
//! built for the reporting boundary.

use crate::config::{MiConfig, Thresholds};
use crate::errors::MetricsError;
use serde::{Deserialize, Serialize};

/// Composite index plus its four sub-scores for one file or package.
///
/// Values are rounded to two decimals for display. Consumers must not
/// re-derive scores from them; the precision loss is intentional and only
/// exists at this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MiStats {
    pub mi: f64,
    pub loc: f64,
    pub complexity: f64,
    pub redundancy: f64,
    pub coverage: f64,
}

impl MiStats {
    fn new(mi: f64, loc: f64, complexity: f64, redundancy: f64, coverage: f64) -> Self {
        Self {
            mi: round2(mi),
            loc: round2(loc),
            complexity: round2(complexity),
            redundancy: round2(redundancy),
            coverage: round2(coverage),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn as_samples(values: &[u64]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

/// Linear decay toward 0 as total logical LOC approaches 50,000.
pub fn package_size_penalty(total_loc: u64) -> f64 {
    (1.0 - total_loc as f64 / 50_000.0).max(0.0)
}

/// Package-scope size sub-score: half the total-LOC penalty, half the
/// stricter of the per-file and per-function LOC distributions.
pub fn volume_package(
    total_loc: u64,
    file_locs: &[u64],
    function_locs: &[u64],
    thresholds: &Thresholds,
) -> Result<f64, MetricsError> {
    let file_score = thresholds.file_loc.score(&as_samples(file_locs))?;
    let function_score = thresholds.function_loc.score(&as_samples(function_locs))?;
    Ok(0.5 * package_size_penalty(total_loc) + 0.5 * file_score.min(function_score))
}

/// File-scope size sub-score.
///
/// Without function-level samples the file's own LOC carries the score
/// alone; a file with no LOC datum at all scores 1.0 like any other empty
/// dimension.
pub fn volume_file(
    total_loc: Option<u64>,
    function_locs: &[u64],
    thresholds: &Thresholds,
) -> Result<f64, MetricsError> {
    let file_samples: Vec<f64> = total_loc.map(|n| vec![n as f64]).unwrap_or_default();
    let file_score = thresholds.file_loc.score(&file_samples)?;
    if function_locs.is_empty() {
        return Ok(file_score);
    }
    let function_score = thresholds.function_loc.score(&as_samples(function_locs))?;
    Ok(0.5 * file_score + 0.5 * function_score)
}

/// Complexity sub-score: the stricter of the two measures dominates, so
/// complexity is only good when cyclomatic and cognitive agree.
pub fn complexity(
    cyclomatic: &[f64],
    cognitive: &[f64],
    thresholds: &Thresholds,
) -> Result<f64, MetricsError> {
    let cyclomatic_score = thresholds.cyclomatic.score(cyclomatic)?;
    let cognitive_score = thresholds.cognitive.score(cognitive)?;
    Ok(cyclomatic_score.min(cognitive_score))
}

/// Package-scope redundancy sub-score. Duplicate-line data shares the
/// weight with cohesion when present; otherwise cohesion stands alone.
pub fn redundancy_package(
    duplicate_lines: &[f64],
    cohesion: &[f64],
    thresholds: &Thresholds,
) -> Result<f64, MetricsError> {
    let cohesion_score = thresholds.cohesion.score(cohesion)?;
    if duplicate_lines.is_empty() {
        return Ok(cohesion_score);
    }
    let duplicate_score = thresholds.duplicate_lines.score(duplicate_lines)?;
    Ok(0.5 * duplicate_score + 0.5 * cohesion_score)
}

/// File-scope redundancy sub-score: cohesion alone, duplicate-line counts
/// carry no meaning within a single file.
pub fn redundancy_file(cohesion: &[f64], thresholds: &Thresholds) -> Result<f64, MetricsError> {
    thresholds.cohesion.score(cohesion)
}

/// Coverage sub-score: direct linear mapping of the aggregate percentage,
/// no classification tiers.
pub fn coverage(percent: f64) -> Result<f64, MetricsError> {
    if !percent.is_finite() {
        return Err(MetricsError::MalformedSample { value: percent });
    }
    if !(0.0..=100.0).contains(&percent) {
        return Err(MetricsError::CoverageOutOfRange { value: percent });
    }
    Ok(percent / 100.0)
}

/// Compute the composite index and sub-scores for one file.
#[allow(clippy::too_many_arguments)]
pub fn mi_file_stats(
    total_loc: Option<u64>,
    function_locs: &[u64],
    cyclomatic: &[f64],
    cognitive: &[f64],
    cohesion: &[f64],
    coverage_percent: f64,
    config: &MiConfig,
) -> Result<MiStats, MetricsError> {
    let loc_score = volume_file(total_loc, function_locs, &config.thresholds)?;
    let complexity_score = complexity(cyclomatic, cognitive, &config.thresholds)?;
    let redundancy_score = redundancy_file(cohesion, &config.thresholds)?;
    let coverage_score = coverage(coverage_percent)?;

    let mi = config
        .weights
        .combine(loc_score, complexity_score, redundancy_score, coverage_score);
    Ok(MiStats::new(
        mi,
        loc_score,
        complexity_score,
        redundancy_score,
        coverage_score,
    ))
}

/// File-scope composite index alone.
#[allow(clippy::too_many_arguments)]
pub fn mi_file(
    total_loc: Option<u64>,
    function_locs: &[u64],
    cyclomatic: &[f64],
    cognitive: &[f64],
    cohesion: &[f64],
    coverage_percent: f64,
    config: &MiConfig,
) -> Result<f64, MetricsError> {
    Ok(mi_file_stats(
        total_loc,
        function_locs,
        cyclomatic,
        cognitive,
        cohesion,
        coverage_percent,
        config,
    )?
    .mi)
}

/// Compute the composite index and sub-scores for a whole package.
#[allow(clippy::too_many_arguments)]
pub fn mi_package_stats(
    total_loc: u64,
    file_locs: &[u64],
    function_locs: &[u64],
    cyclomatic: &[f64],
    cognitive: &[f64],
    duplicate_lines: &[f64],
    cohesion: &[f64],
    coverage_percent: f64,
    config: &MiConfig,
) -> Result<MiStats, MetricsError> {
    let loc_score = volume_package(total_loc, file_locs, function_locs, &config.thresholds)?;
    let complexity_score = complexity(cyclomatic, cognitive, &config.thresholds)?;
    let redundancy_score = redundancy_package(duplicate_lines, cohesion, &config.thresholds)?;
    let coverage_score = coverage(coverage_percent)?;

    let mi = config
        .weights
        .combine(loc_score, complexity_score, redundancy_score, coverage_score);
    Ok(MiStats::new(
        mi,
        loc_score,
        complexity_score,
        redundancy_score,
        coverage_score,
    ))
}

/// Package-scope composite index alone.
#[allow(clippy::too_many_arguments)]
pub fn mi_package(
    total_loc: u64,
    file_locs: &[u64],
    function_locs: &[u64],
    cyclomatic: &[f64],
    cognitive: &[f64],
    duplicate_lines: &[f64],
    cohesion: &[f64],
    coverage_percent: f64,
    config: &MiConfig,
) -> Result<f64, MetricsError> {
    Ok(mi_package_stats(
        total_loc,
        file_locs,
        function_locs,
        cyclomatic,
        cognitive,
        duplicate_lines,
        cohesion,
        coverage_percent,
        config,
    )?
    .mi)
}
