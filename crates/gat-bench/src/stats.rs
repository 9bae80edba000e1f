//! Statistics engine for benchmark result sets.
//!
//! Everything here is a pure function of borrowed records and an
//! [`AnalysisConfig`]. The headline entry point is [`summarize`], which
//! applies a declarative filter set per metric and returns a read-only
//! [`SummaryStatistics`] snapshot.
//!
//! ## Order statistics
//!
//! Medians and percentiles index into the ascending-sorted sample without
//! interpolation:
//!
//! - median = `sorted[n / 2]` (the upper median for even `n`)
//! - percentile `p` = `sorted[floor(n * p / 100)]`, clamped to the last element

use crate::config::{AnalysisConfig, SizeBucketBounds, ViolationThresholds};
use crate::record::BenchmarkRecord;

/// A single record predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFilter {
    /// `converged == true`
    Converged,
    /// `baseline_objective > 0`
    HasBaseline,
    /// `objective_value > 0`
    HasObjective,
}

impl RecordFilter {
    pub fn matches(self, record: &BenchmarkRecord) -> bool {
        match self {
            RecordFilter::Converged => record.converged,
            RecordFilter::HasBaseline => record.has_baseline(),
            RecordFilter::HasObjective => record.has_objective(),
        }
    }
}

/// Conjunction of predicates. The empty set accepts every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet(Vec<RecordFilter>);

impl FilterSet {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn converged() -> Self {
        Self(vec![RecordFilter::Converged])
    }

    pub fn and(mut self, filter: RecordFilter) -> Self {
        if !self.0.contains(&filter) {
            self.0.push(filter);
        }
        self
    }

    pub fn matches(&self, record: &BenchmarkRecord) -> bool {
        self.0.iter().all(|f| f.matches(record))
    }

    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a BenchmarkRecord>
    where
        I: IntoIterator<Item = &'a BenchmarkRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Numeric field a distribution can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    SolveTime,
    Iterations,
    /// `objective_gap_rel` scaled to percent
    GapPct,
    VmViolation,
    GenViolation,
    BranchViolation,
}

impl Metric {
    pub fn extract(self, record: &BenchmarkRecord) -> f64 {
        match self {
            Metric::SolveTime => record.solve_time_ms,
            Metric::Iterations => f64::from(record.iterations),
            Metric::GapPct => record.objective_gap_rel * 100.0,
            Metric::VmViolation => record.max_vm_violation_pu,
            Metric::GenViolation => record.max_gen_p_violation_mw,
            Metric::BranchViolation => record.max_branch_flow_violation_mva,
        }
    }

    /// Report label, e.g. `Solve time`.
    pub fn label(self) -> &'static str {
        match self {
            Metric::SolveTime => "Solve time",
            Metric::Iterations => "Iterations",
            Metric::GapPct => "Objective gap",
            Metric::VmViolation => "Vm violation",
            Metric::GenViolation => "Gen P violation",
            Metric::BranchViolation => "Branch flow violation",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::SolveTime => "ms",
            Metric::GapPct => "%",
            Metric::VmViolation => "pu",
            Metric::GenViolation => "MW",
            Metric::BranchViolation => "MVA",
            Metric::Iterations => "",
        }
    }
}

/// Which metric to summarize, over which subset, with which tail percentiles.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSpec {
    pub metric: Metric,
    pub filters: FilterSet,
    pub percentiles: Vec<f64>,
}

impl MetricSpec {
    pub fn new(metric: Metric, filters: FilterSet) -> Self {
        Self {
            metric,
            filters,
            percentiles: Vec::new(),
        }
    }

    pub fn with_percentiles(mut self, percentiles: &[f64]) -> Self {
        self.percentiles = percentiles.to_vec();
        self
    }
}

/// What [`summarize`] should compute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummarySpec {
    pub metrics: Vec<MetricSpec>,
    pub violations: bool,
    pub size_buckets: bool,
}

impl SummarySpec {
    pub fn metric(mut self, spec: MetricSpec) -> Self {
        self.metrics.push(spec);
        self
    }

    pub fn with_violations(mut self) -> Self {
        self.violations = true;
        self
    }

    pub fn with_size_buckets(mut self) -> Self {
        self.size_buckets = true;
        self
    }
}

/// Distribution of one metric over a non-empty subset.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// (p, value) in the order requested
    pub percentiles: Vec<(f64, f64)>,
}

impl Distribution {
    /// Build from raw samples; `None` when there are none.
    pub fn from_values(values: Vec<f64>, percentiles: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        let median = median(&sorted)?;
        let tails = percentiles
            .iter()
            .filter_map(|&p| percentile(&sorted, p).map(|v| (p, v)))
            .collect();
        Some(Self {
            count: sorted.len(),
            mean: mean(&sorted)?,
            median,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            percentiles: tails,
        })
    }

    pub fn percentile(&self, p: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(q, _)| *q == p)
            .map(|(_, v)| *v)
    }
}

/// Sort ascending. NaN sorts after every number instead of panicking.
pub fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Upper median of an ascending-sorted slice: `sorted[n / 2]`.
pub fn median(sorted: &[f64]) -> Option<f64> {
    sorted.get(sorted.len() / 2).copied()
}

/// Non-interpolated percentile of an ascending-sorted slice:
/// `sorted[floor(n * p / 100)]`, clamped to the valid index range.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let raw = (n as f64 * p / 100.0).floor();
    let idx = if raw.is_nan() || raw < 0.0 {
        0
    } else {
        (raw as usize).min(n - 1)
    };
    Some(sorted[idx])
}

/// Number of values strictly above `threshold`.
pub fn count_exceeding<I>(values: I, threshold: f64) -> usize
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().filter(|v| *v > threshold).count()
}

/// Worst-case constraint violations over converged records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViolationSummary {
    pub vm_max_pu: f64,
    pub gen_max_mw: f64,
    pub branch_max_mva: f64,
    pub cases_with_vm_violation: usize,
    pub cases_with_branch_violation: usize,
}

/// Violation maxima and threshold counts. Empty input yields all zeros.
pub fn violation_summary(
    records: &[&BenchmarkRecord],
    thresholds: &ViolationThresholds,
) -> ViolationSummary {
    let max_of = |metric: Metric| {
        records
            .iter()
            .map(|r| metric.extract(r))
            .fold(0.0_f64, f64::max)
    };
    ViolationSummary {
        vm_max_pu: max_of(Metric::VmViolation),
        gen_max_mw: max_of(Metric::GenViolation),
        branch_max_mva: max_of(Metric::BranchViolation),
        cases_with_vm_violation: count_exceeding(
            records.iter().map(|r| r.max_vm_violation_pu),
            thresholds.vm_violation_pu,
        ),
        cases_with_branch_violation: count_exceeding(
            records.iter().map(|r| r.max_branch_flow_violation_mva),
            thresholds.branch_violation_mva,
        ),
    }
}

/// Network size class by bus count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 3] = [SizeBucket::Small, SizeBucket::Medium, SizeBucket::Large];

    pub fn classify(num_buses: usize, bounds: &SizeBucketBounds) -> Self {
        if num_buses < bounds.small_max_buses {
            SizeBucket::Small
        } else if num_buses < bounds.medium_max_buses {
            SizeBucket::Medium
        } else {
            SizeBucket::Large
        }
    }

    pub fn label(self, bounds: &SizeBucketBounds) -> String {
        match self {
            SizeBucket::Small => format!("small (<{} buses)", bounds.small_max_buses),
            SizeBucket::Medium => format!(
                "medium ({}-{} buses)",
                bounds.small_max_buses, bounds.medium_max_buses
            ),
            SizeBucket::Large => format!("large (>={} buses)", bounds.medium_max_buses),
        }
    }
}

/// Mean solve time of one non-empty size bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTiming {
    pub bucket: SizeBucket,
    pub cases: usize,
    pub mean_solve_time_ms: f64,
}

/// Partition records by size and average their solve times.
///
/// Buckets without members are omitted.
pub fn size_buckets(records: &[&BenchmarkRecord], bounds: &SizeBucketBounds) -> Vec<BucketTiming> {
    SizeBucket::ALL
        .iter()
        .filter_map(|&bucket| {
            let times: Vec<f64> = records
                .iter()
                .filter(|r| SizeBucket::classify(r.num_buses, bounds) == bucket)
                .map(|r| r.solve_time_ms)
                .collect();
            mean(&times).map(|mean_solve_time_ms| BucketTiming {
                bucket,
                cases: times.len(),
                mean_solve_time_ms,
            })
        })
        .collect()
}

/// The case holding the largest value of some metric.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExtreme {
    pub case_name: String,
    pub value: f64,
}

fn max_case(records: &[&BenchmarkRecord], metric: Metric) -> Option<CaseExtreme> {
    records
        .iter()
        .map(|r| (metric.extract(r), r))
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(value, r)| CaseExtreme {
            case_name: r.case_name.clone(),
            value,
        })
}

/// Distribution of one metric; `None` when its filtered subset is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub metric: Metric,
    pub distribution: Option<Distribution>,
}

/// Read-only summary of one suite, case group or method.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub key: String,
    pub total: usize,
    pub converged: usize,
    pub metrics: Vec<MetricSummary>,
    pub violations: Option<ViolationSummary>,
    pub size_buckets: Vec<BucketTiming>,
    /// Slowest converged case
    pub slowest_case: Option<CaseExtreme>,
    /// Largest gap among converged cases with a baseline
    pub worst_gap_case: Option<CaseExtreme>,
}

impl SummaryStatistics {
    /// Converged share in percent; `None` for an empty set.
    pub fn convergence_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.converged as f64 / self.total as f64 * 100.0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// First distribution computed for `metric`.
    pub fn metric(&self, metric: Metric) -> Option<&Distribution> {
        self.metrics
            .iter()
            .find(|m| m.metric == metric)
            .and_then(|m| m.distribution.as_ref())
    }
}

/// Summarize a record subset.
///
/// Convergence counts use every record; each metric uses only the records
/// passing its own filter set. Violations and size buckets use converged
/// records.
pub fn summarize<'a, I>(
    key: impl Into<String>,
    records: I,
    spec: &SummarySpec,
    config: &AnalysisConfig,
) -> SummaryStatistics
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let all: Vec<&BenchmarkRecord> = records.into_iter().collect();
    let converged = FilterSet::converged().apply(all.iter().copied());

    let metrics = spec
        .metrics
        .iter()
        .map(|ms| {
            let values = ms
                .filters
                .apply(all.iter().copied())
                .into_iter()
                .map(|r| ms.metric.extract(r))
                .collect();
            MetricSummary {
                metric: ms.metric,
                distribution: Distribution::from_values(values, &ms.percentiles),
            }
        })
        .collect();

    let with_baseline = FilterSet::converged()
        .and(RecordFilter::HasBaseline)
        .apply(all.iter().copied());

    SummaryStatistics {
        key: key.into(),
        total: all.len(),
        converged: converged.len(),
        metrics,
        violations: spec
            .violations
            .then(|| violation_summary(&converged, &config.thresholds)),
        size_buckets: if spec.size_buckets {
            size_buckets(&converged, &config.buckets)
        } else {
            Vec::new()
        },
        slowest_case: max_case(&converged, Metric::SolveTime),
        worst_gap_case: max_case(&with_baseline, Metric::GapPct),
    }
}
