//! Side-by-side comparison of solver methods (DC-OPF, SOCP, AC-OPF) run on
//! the same PGLib cases.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::baseline::apply_baselines;
use crate::config::AnalysisConfig;
use crate::error::BenchResult;
use crate::loader::load_optional;
use crate::record::BenchmarkRecord;
use crate::stats::{
    summarize, FilterSet, Metric, MetricSpec, RecordFilter, SummarySpec, SummaryStatistics,
};
use crate::store::SuiteResultSet;

/// Number of leading records echoed per method.
pub const SAMPLE_CASES: usize = 5;

/// Per-method outcome of a comparison run.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutcome {
    Missing,
    Loaded {
        /// Rows read from the file
        loaded: usize,
        /// First rows in file order
        samples: Vec<BenchmarkRecord>,
        stats: SummaryStatistics,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodReport {
    pub method: String,
    pub path: PathBuf,
    pub outcome: MethodOutcome,
}

impl MethodReport {
    /// Statistics for the summary tables; `None` for missing or empty files.
    pub fn stats(&self) -> Option<&SummaryStatistics> {
        match &self.outcome {
            MethodOutcome::Loaded { stats, .. } if !stats.is_empty() => Some(stats),
            _ => None,
        }
    }
}

/// Metrics reported for every method.
pub fn method_summary_spec() -> SummarySpec {
    SummarySpec::default()
        .metric(MetricSpec::new(Metric::SolveTime, FilterSet::converged()))
        .metric(MetricSpec::new(Metric::Iterations, FilterSet::converged()))
        .metric(MetricSpec::new(
            Metric::GapPct,
            FilterSet::converged().and(RecordFilter::HasBaseline),
        ))
        .with_violations()
}

/// Load and summarize one method's result file.
pub fn analyze_method(
    method: &str,
    path: &Path,
    config: &AnalysisConfig,
    baselines: Option<&HashMap<String, f64>>,
) -> BenchResult<MethodReport> {
    let outcome = match load_optional(path)? {
        None => MethodOutcome::Missing,
        Some(mut records) => {
            if let Some(baselines) = baselines {
                apply_baselines(&mut records, baselines);
            }
            let set = SuiteResultSet::new(method, records);
            let stats = summarize(method, &set, &method_summary_spec(), config);
            MethodOutcome::Loaded {
                loaded: set.len(),
                samples: set.head(SAMPLE_CASES).to_vec(),
                stats,
            }
        }
    };
    Ok(MethodReport {
        method: method.to_string(),
        path: path.to_path_buf(),
        outcome,
    })
}

/// Analyze every configured method in order.
pub fn compare_methods(
    results_dir: &Path,
    config: &AnalysisConfig,
    baselines: Option<&HashMap<String, f64>>,
) -> BenchResult<Vec<MethodReport>> {
    config
        .files
        .methods
        .iter()
        .map(|(method, file)| analyze_method(method, &results_dir.join(file), config, baselines))
        .collect()
}
