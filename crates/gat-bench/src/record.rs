//! Benchmark record type and the coercion rules used to build it.
//!
//! Benchmark CSVs are research artifacts written by several solver front-ends
//! with slightly different column sets. Numeric fields therefore go through
//! named coercion functions that never fail: an unparsable or absent value
//! becomes the default instead of aborting the load.

use std::fmt;

/// Contingency class of a sweep-suite record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContingencyType {
    /// Intact network (N)
    Base,
    /// Single outage (N-1)
    N1,
    /// Double outage (N-2)
    N2,
}

impl ContingencyType {
    /// All classes in sweep order.
    pub const ALL: [ContingencyType; 3] =
        [ContingencyType::Base, ContingencyType::N1, ContingencyType::N2];

    /// Tag used in sweep file names (`pfdelta_case30_n1.csv`).
    pub fn file_tag(self) -> &'static str {
        match self {
            ContingencyType::Base => "n",
            ContingencyType::N1 => "n1",
            ContingencyType::N2 => "n2",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ContingencyType::Base => "base",
            ContingencyType::N1 => "N-1",
            ContingencyType::N2 => "N-2",
        }
    }

    /// Parse a file tag or label, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "n" | "base" | "n-0" => Some(ContingencyType::Base),
            "n1" | "n-1" => Some(ContingencyType::N1),
            "n2" | "n-2" => Some(ContingencyType::N2),
            _ => None,
        }
    }
}

impl fmt::Display for ContingencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One solver run on one test case.
///
/// Records with `converged == false` only guarantee that their timing,
/// objective and violation fields are non-negative or zero; filter on
/// `converged` before using them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BenchmarkRecord {
    pub case_name: String,
    pub contingency: Option<ContingencyType>,
    pub num_buses: usize,
    pub num_branches: usize,
    pub num_gens: usize,
    pub converged: bool,
    pub iterations: u32,
    pub load_time_ms: f64,
    pub solve_time_ms: f64,
    pub total_time_ms: f64,
    /// Values <= 0 mean "not computed"
    pub objective_value: f64,
    /// Values <= 0 mean "no baseline available"
    pub baseline_objective: f64,
    pub objective_gap_abs: f64,
    pub objective_gap_rel: f64,
    pub max_vm_violation_pu: f64,
    pub max_gen_p_violation_mw: f64,
    pub max_branch_flow_violation_mva: f64,
}

impl BenchmarkRecord {
    /// True when the solver reported a usable objective.
    pub fn has_objective(&self) -> bool {
        self.objective_value > 0.0
    }

    /// True when a reference objective is available for this case.
    pub fn has_baseline(&self) -> bool {
        self.baseline_objective > 0.0
    }
}

/// Convert a text field to `f64`, falling back to `default`.
///
/// Surrounding whitespace is ignored. Absent, empty and unparsable values all
/// yield `default`; this is the error-suppression policy for bulk result data.
pub fn safe_float(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(default)
}

/// Convert a text field to a non-negative count, falling back to `default`.
///
/// Accepts integer text directly and float text (`"14.0"`) by truncation.
/// Negative, non-finite and unparsable values yield `default`.
pub fn safe_count(raw: Option<&str>, default: u64) -> u64 {
    let Some(text) = raw.map(str::trim) else {
        return default;
    };
    if let Ok(n) = text.parse::<u64>() {
        return n;
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u64,
        _ => default,
    }
}

/// Parse the `converged` flag: lowercased text equal to `"true"`.
///
/// Anything else, including an absent field, is `false`.
pub fn parse_converged(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| s.to_lowercase() == "true")
}
