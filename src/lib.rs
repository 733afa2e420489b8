// Export modules for library usage
pub mod config;
pub mod core;
pub mod errors;
pub mod limits;
pub mod mi;
pub mod report;

// Re-export commonly used types
pub use crate::config::{MiConfig, MiWeights, Thresholds};
pub use crate::core::{Interval, Stats, Tier};
pub use crate::errors::MetricsError;
pub use crate::limits::{EvalPolicy, Limits};
pub use crate::mi::{
    mi_file, mi_file_stats, mi_package, mi_package_stats, package_size_penalty, MiStats,
};
pub use crate::report::{package_report, FileMi, PackageReport, PackageSamples};
