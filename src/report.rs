//! Package report assembly: per-file maintainability plus the package
//! rollup, from per-dimension sample maps keyed by file identifier.

use crate::config::MiConfig;
use crate::errors::MetricsError;
use crate::mi::{mi_file_stats, mi_package_stats, MiStats};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Raw samples for one package, keyed by file identifier per dimension.
///
/// The maps need not agree on which files exist. A file missing from a map
/// simply has no data for that dimension and scores 1.0 there; a file with
/// no docstring figure counts as fully documented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSamples {
    /// Lines of code per file.
    pub file_loc: HashMap<String, u64>,
    /// Function lengths per file.
    pub function_loc: HashMap<String, Vec<u64>>,
    /// Cyclomatic complexity samples per file, one per measured block.
    pub cyclomatic: HashMap<String, Vec<f64>>,
    /// Cognitive complexity samples per file.
    pub cognitive: HashMap<String, Vec<f64>>,
    /// Class cohesion percentages per file.
    pub cohesion: HashMap<String, Vec<f64>>,
    /// Docstring coverage percentage per file.
    pub docstring_coverage: HashMap<String, f64>,
    /// Duplicate-line samples for the whole package; may be empty.
    pub duplicate_lines: Vec<f64>,
    /// Aggregate test coverage percentage for the package.
    pub coverage_percent: f64,
}

impl Default for PackageSamples {
    fn default() -> Self {
        Self {
            file_loc: HashMap::new(),
            function_loc: HashMap::new(),
            cyclomatic: HashMap::new(),
            cognitive: HashMap::new(),
            cohesion: HashMap::new(),
            docstring_coverage: HashMap::new(),
            duplicate_lines: Vec::new(),
            // Absent coverage evidence counts as full coverage, consistent
            // with every other empty dimension.
            coverage_percent: 100.0,
        }
    }
}

impl PackageSamples {
    /// Union of file identifiers across all per-file dimensions, sorted.
    pub fn file_names(&self) -> Vec<String> {
        let mut names: BTreeSet<&String> = BTreeSet::new();
        names.extend(self.file_loc.keys());
        names.extend(self.function_loc.keys());
        names.extend(self.cyclomatic.keys());
        names.extend(self.cognitive.keys());
        names.extend(self.cohesion.keys());
        names.extend(self.docstring_coverage.keys());
        names.into_iter().cloned().collect()
    }

    fn samples_for<'a>(map: &'a HashMap<String, Vec<f64>>, file: &str) -> &'a [f64] {
        map.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    fn function_locs_for<'a>(&'a self, file: &str) -> &'a [u64] {
        self.function_loc.get(file).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Maintainability of one file within the package report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileMi {
    pub file: String,
    pub stats: MiStats,
}

/// Package rollup plus every file's breakdown, worst file first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageReport {
    pub package: MiStats,
    pub files: im::Vector<FileMi>,
}

/// Score every known file and the package as a whole.
///
/// Files are scored independently and in parallel; the result order never
/// depends on scheduling because the ranking sorts by score ascending with
/// file name as the tie breaker.
pub fn package_report(
    samples: &PackageSamples,
    config: &MiConfig,
) -> Result<PackageReport, MetricsError> {
    let names = samples.file_names();
    log::debug!("scoring maintainability for {} files", names.len());

    let mut files: Vec<FileMi> = names
        .par_iter()
        .map(|file| -> Result<FileMi, MetricsError> {
            let stats = mi_file_stats(
                samples.file_loc.get(file).copied(),
                samples.function_locs_for(file),
                PackageSamples::samples_for(&samples.cyclomatic, file),
                PackageSamples::samples_for(&samples.cognitive, file),
                PackageSamples::samples_for(&samples.cohesion, file),
                samples.docstring_coverage.get(file).copied().unwrap_or(100.0),
                config,
            )?;
            Ok(FileMi {
                file: file.clone(),
                stats,
            })
        })
        .collect::<Result<Vec<_>, MetricsError>>()?;

    files.sort_by(|a, b| {
        a.stats
            .mi
            .partial_cmp(&b.stats.mi)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.file.cmp(&b.file))
    });

    let package = package_rollup(samples, config)?;
    Ok(PackageReport {
        package,
        files: files.into_iter().collect(),
    })
}

fn package_rollup(
    samples: &PackageSamples,
    config: &MiConfig,
) -> Result<MiStats, MetricsError> {
    let file_locs: Vec<u64> = samples.file_loc.values().copied().collect();
    let total_loc: u64 = file_locs.iter().sum();
    let function_locs: Vec<u64> = samples
        .function_loc
        .values()
        .flat_map(|v| v.iter().copied())
        .collect();
    let cyclomatic: Vec<f64> = flatten(&samples.cyclomatic);
    let cognitive: Vec<f64> = flatten(&samples.cognitive);
    let cohesion: Vec<f64> = flatten(&samples.cohesion);

    mi_package_stats(
        total_loc,
        &file_locs,
        &function_locs,
        &cyclomatic,
        &cognitive,
        &samples.duplicate_lines,
        &cohesion,
        samples.coverage_percent,
        config,
    )
}

fn flatten(map: &HashMap<String, Vec<f64>>) -> Vec<f64> {
    map.values().flat_map(|v| v.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_file_samples() -> PackageSamples {
        let mut samples = PackageSamples::default();
        samples.file_loc.insert("a.py".to_string(), 120);
        samples
            .cyclomatic
            .insert("a.py".to_string(), vec![5.0, 8.0]);
        samples.coverage_percent = 90.0;
        samples
    }

    #[test]
    fn file_names_is_the_union_across_dimensions() {
        let mut samples = PackageSamples::default();
        samples.file_loc.insert("a.py".to_string(), 100);
        samples.cyclomatic.insert("b.py".to_string(), vec![3.0]);
        samples.cohesion.insert("c.py".to_string(), vec![80.0]);
        samples.docstring_coverage.insert("d.py".to_string(), 50.0);

        assert_eq!(samples.file_names(), vec!["a.py", "b.py", "c.py", "d.py"]);
    }

    #[test]
    fn report_covers_every_known_file() {
        let samples = one_file_samples();
        let report = package_report(&samples, &MiConfig::default()).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].file, "a.py");
    }

    #[test]
    fn file_known_only_to_one_dimension_still_scores() {
        let mut samples = one_file_samples();
        // b.py appears only in the cohesion map.
        samples.cohesion.insert("b.py".to_string(), vec![10.0]);

        let report = package_report(&samples, &MiConfig::default()).unwrap();
        assert_eq!(report.files.len(), 2);

        let b = report.files.iter().find(|f| f.file == "b.py").unwrap();
        // Cohesion of 10% is bad (score 0), every other dimension is
        // missing data and scores perfect.
        assert_eq!(b.stats.redundancy, 0.0);
        assert_eq!(b.stats.loc, 1.0);
        assert_eq!(b.stats.complexity, 1.0);
        assert_eq!(b.stats.coverage, 1.0);
    }

    #[test]
    fn files_rank_worst_first() {
        let mut samples = PackageSamples::default();
        samples.file_loc.insert("clean.py".to_string(), 100);
        samples.file_loc.insert("messy.py".to_string(), 100);
        samples
            .cyclomatic
            .insert("messy.py".to_string(), vec![30.0, 35.0]);

        let report = package_report(&samples, &MiConfig::default()).unwrap();
        assert_eq!(report.files[0].file, "messy.py");
        assert_eq!(report.files[1].file, "clean.py");
    }

    #[test]
    fn tied_files_rank_by_name() {
        let mut samples = PackageSamples::default();
        samples.file_loc.insert("b.py".to_string(), 100);
        samples.file_loc.insert("a.py".to_string(), 100);

        let report = package_report(&samples, &MiConfig::default()).unwrap();
        assert_eq!(report.files[0].file, "a.py");
        assert_eq!(report.files[1].file, "b.py");
    }

    #[test]
    fn empty_package_reports_perfect_maintainability() {
        let samples = PackageSamples::default();
        let report = package_report(&samples, &MiConfig::default()).unwrap();
        assert!(report.files.is_empty());
        assert_eq!(report.package.mi, 1.0);
    }

    #[test]
    fn malformed_sample_fails_the_whole_report() {
        let mut samples = one_file_samples();
        samples
            .cyclomatic
            .insert("broken.py".to_string(), vec![f64::NAN]);
        assert!(package_report(&samples, &MiConfig::default()).is_err());
    }

    #[test]
    fn package_rollup_flattens_per_file_samples() {
        let mut samples = PackageSamples::default();
        samples.file_loc.insert("a.py".to_string(), 100);
        samples.file_loc.insert("b.py".to_string(), 200);
        samples.cyclomatic.insert("a.py".to_string(), vec![5.0]);
        samples.cyclomatic.insert("b.py".to_string(), vec![60.0]);

        let report = package_report(&samples, &MiConfig::default()).unwrap();
        // The dead sample in b.py zeroes the package complexity score even
        // though a.py on its own is fine.
        assert_eq!(report.package.complexity, 0.0);
    }
}
