//! Benchmark suite drivers.
//!
//! All suites run the same pipeline: locate the result files, load them,
//! group them, summarize each group. What differs per suite (file naming,
//! grouping, which metrics apply) is described by [`SuiteKind`], and
//! [`run_suite`] is the single driver that executes the pipeline.
//!
//! Absent files never fail a run; a suite with no data is reported as
//! [`SuiteOutcome::Missing`] or [`SuiteOutcome::Empty`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::baseline::apply_baselines;
use crate::config::AnalysisConfig;
use crate::error::BenchResult;
use crate::loader::load_optional;
use crate::record::ContingencyType;
use crate::stats::{
    summarize, FilterSet, Metric, MetricSpec, RecordFilter, SummarySpec, SummaryStatistics,
};
use crate::store::SuiteResultSet;

/// The three benchmark suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteKind {
    /// PGLib-OPF: one file covering every network, with baselines
    FullNetwork,
    /// PFDelta: cases × contingency classes, one file per combination
    ContingencySweep,
    /// OPFData: many samples of a single AC-OPF case
    SingleCaseAc,
}

/// One file feeding a suite group.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contingency: Option<ContingencyType>,
}

/// Files whose records are summarized together.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceGroup {
    pub key: String,
    pub files: Vec<SourceFile>,
}

impl SuiteKind {
    /// Suites in report order.
    pub const ALL: [SuiteKind; 3] = [
        SuiteKind::FullNetwork,
        SuiteKind::ContingencySweep,
        SuiteKind::SingleCaseAc,
    ];

    /// Dataset name used in short summaries.
    pub fn short_name(self) -> &'static str {
        match self {
            SuiteKind::FullNetwork => "PGLib",
            SuiteKind::ContingencySweep => "PFDelta",
            SuiteKind::SingleCaseAc => "OPFData",
        }
    }

    pub fn title(self, config: &AnalysisConfig) -> String {
        match self {
            SuiteKind::FullNetwork => "PGLib-OPF Benchmark Results".to_string(),
            SuiteKind::ContingencySweep => "PFDelta Power Flow Benchmark Results".to_string(),
            SuiteKind::SingleCaseAc => format!(
                "OPFData AC-OPF Benchmark Results ({})",
                config.files.single_case_name
            ),
        }
    }

    /// Whether the suite has a baseline concept at all.
    pub fn reports_gap(self) -> bool {
        !matches!(self, SuiteKind::ContingencySweep)
    }

    /// Sweep suites report a cross-group total.
    pub fn has_overall(self) -> bool {
        matches!(self, SuiteKind::ContingencySweep)
    }

    /// Files to load, grouped as they are summarized.
    pub fn sources(self, results_dir: &Path, config: &AnalysisConfig) -> Vec<SourceGroup> {
        let single = |key: &str, file: &str| {
            vec![SourceGroup {
                key: key.to_string(),
                files: vec![SourceFile {
                    path: results_dir.join(file),
                    contingency: None,
                }],
            }]
        };
        match self {
            SuiteKind::FullNetwork => single("pglib", &config.files.full_network),
            SuiteKind::SingleCaseAc => {
                single(&config.files.single_case_name, &config.files.single_case)
            }
            SuiteKind::ContingencySweep => config
                .files
                .sweep_cases
                .iter()
                .map(|case| SourceGroup {
                    key: case.clone(),
                    files: ContingencyType::ALL
                        .iter()
                        .map(|&kind| SourceFile {
                            path: results_dir.join(sweep_file_name(
                                &config.files.sweep_prefix,
                                case,
                                kind,
                            )),
                            contingency: Some(kind),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Where to point the reader when nothing was found.
    pub fn location(self, results_dir: &Path, config: &AnalysisConfig) -> PathBuf {
        match self {
            SuiteKind::FullNetwork => results_dir.join(&config.files.full_network),
            SuiteKind::SingleCaseAc => results_dir.join(&config.files.single_case),
            SuiteKind::ContingencySweep => results_dir.to_path_buf(),
        }
    }

    /// Metrics computed for each group (and the sweep total).
    pub fn summary_spec(self, config: &AnalysisConfig) -> SummarySpec {
        let solve_time = MetricSpec::new(Metric::SolveTime, FilterSet::converged());
        match self {
            SuiteKind::FullNetwork => SummarySpec::default()
                .metric(solve_time)
                .metric(MetricSpec::new(
                    Metric::GapPct,
                    FilterSet::converged()
                        .and(RecordFilter::HasObjective)
                        .and(RecordFilter::HasBaseline),
                ))
                .with_size_buckets(),
            SuiteKind::ContingencySweep => SummarySpec::default().metric(solve_time),
            SuiteKind::SingleCaseAc => {
                let tail = &config.percentiles.tail;
                SummarySpec::default()
                    .metric(solve_time.with_percentiles(tail))
                    .metric(
                        MetricSpec::new(Metric::GapPct, FilterSet::converged())
                            .with_percentiles(tail),
                    )
            }
        }
    }
}

/// `pfdelta_case30_n1.csv`
pub fn sweep_file_name(prefix: &str, case: &str, kind: ContingencyType) -> String {
    format!("{prefix}_{case}_{}.csv", kind.file_tag())
}

/// Result of running one suite.
#[derive(Debug, Clone, PartialEq)]
pub enum SuiteOutcome {
    /// No input file exists
    Missing { location: PathBuf },
    /// Input files exist but hold no records
    Empty { location: PathBuf },
    Summarized {
        /// One entry per group with at least one record, in plan order
        groups: Vec<SummaryStatistics>,
        /// Cross-group total for suites that report one
        overall: Option<SummaryStatistics>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuiteReport {
    pub kind: SuiteKind,
    pub title: String,
    pub outcome: SuiteOutcome,
}

impl SuiteReport {
    /// The statistics that represent the whole suite: the overall total when
    /// there is one, otherwise the single group.
    pub fn headline(&self) -> Option<&SummaryStatistics> {
        match &self.outcome {
            SuiteOutcome::Summarized { overall: Some(o), .. } => Some(o),
            SuiteOutcome::Summarized { groups, .. } => groups.first(),
            _ => None,
        }
    }
}

/// Run one suite against a results directory.
///
/// `baselines` fills missing reference objectives before summarizing.
pub fn run_suite(
    kind: SuiteKind,
    results_dir: &Path,
    config: &AnalysisConfig,
    baselines: Option<&HashMap<String, f64>>,
) -> BenchResult<SuiteReport> {
    let spec = kind.summary_spec(config);
    let location = kind.location(results_dir, config);

    let mut any_file = false;
    let mut loaded = Vec::new();
    for group in kind.sources(results_dir, config) {
        let mut parts = Vec::new();
        for source in &group.files {
            let Some(mut records) = load_optional(&source.path)? else {
                continue;
            };
            any_file = true;
            if let Some(baselines) = baselines {
                apply_baselines(&mut records, baselines);
            }
            let part = SuiteResultSet::new(source.path.display().to_string(), records);
            parts.push(match source.contingency {
                Some(c) => part.with_contingency(c),
                None => part,
            });
        }
        let set = SuiteResultSet::merged(group.key, parts);
        if !set.is_empty() {
            loaded.push(set);
        }
    }

    let outcome = if loaded.is_empty() {
        if any_file {
            SuiteOutcome::Empty { location }
        } else {
            info!(suite = kind.short_name(), "no result files found");
            SuiteOutcome::Missing { location }
        }
    } else {
        let groups = loaded
            .iter()
            .map(|set| summarize(set.label(), set, &spec, config))
            .collect();
        let overall = kind.has_overall().then(|| {
            summarize(
                "Total",
                loaded.iter().flat_map(|set| set.iter()),
                &spec,
                config,
            )
        });
        SuiteOutcome::Summarized { groups, overall }
    };

    Ok(SuiteReport {
        kind,
        title: kind.title(config),
        outcome,
    })
}

/// Run every suite in report order.
pub fn run_all(
    results_dir: &Path,
    config: &AnalysisConfig,
    baselines: Option<&HashMap<String, f64>>,
) -> BenchResult<Vec<SuiteReport>> {
    SuiteKind::ALL
        .iter()
        .map(|&kind| run_suite(kind, results_dir, config, baselines))
        .collect()
}
