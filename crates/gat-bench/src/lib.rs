//! # gat-bench: Benchmark Result Analysis
//!
//! Turns the per-case CSV files written by GAT's benchmark runners into
//! summary statistics and reports.
//!
//! ## Pipeline
//!
//! - [`loader`]: CSV rows to typed [`BenchmarkRecord`]s, with lenient numeric coercion
//! - [`store`]: named, ordered record sets ([`SuiteResultSet`])
//! - [`stats`]: filter sets, order statistics and [`SummaryStatistics`]
//! - [`suite`]: the three benchmark suites (PGLib, PFDelta, OPFData) run by one driver
//! - [`methods`]: DC-OPF / SOCP / AC-OPF side-by-side comparison
//! - [`render`]: console and LaTeX output from the same statistics
//!
//! Supporting pieces: [`baseline`] (reference objectives from the PGLib
//! `BASELINE.md`), [`compare`] (before/after runs) and [`config`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use gat_bench::{run_all, AnalysisConfig, ConsoleRenderer, ReportRenderer};
//!
//! let config = AnalysisConfig::default();
//! let reports = run_all(Path::new("results"), &config, None).unwrap();
//! print!("{}", ConsoleRenderer::new(&config).render_suites(&reports));
//! ```

pub mod baseline;
pub mod compare;
pub mod config;
pub mod error;
pub mod loader;
pub mod methods;
pub mod record;
pub mod render;
pub mod stats;
pub mod store;
pub mod suite;

pub use baseline::{
    apply_baselines, extract_baseline_file, load_baseline_objectives, load_optional_baselines,
    normalize_case_name,
};
pub use compare::{compare_runs, CaseComparison, ComparisonStats, StatusChange};
pub use config::AnalysisConfig;
pub use error::{BenchError, BenchResult};
pub use loader::{load_optional, load_records, read_records};
pub use methods::{compare_methods, MethodOutcome, MethodReport};
pub use record::{BenchmarkRecord, ContingencyType};
pub use render::{ConsoleRenderer, LatexRenderer, ReportRenderer};
pub use stats::{summarize, Distribution, Metric, SummarySpec, SummaryStatistics};
pub use store::SuiteResultSet;
pub use suite::{run_all, run_suite, SuiteKind, SuiteOutcome, SuiteReport};
