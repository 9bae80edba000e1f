//! Comparison of two runs of the same benchmark (before/after a change).

use std::collections::{HashMap, HashSet};

use crate::record::BenchmarkRecord;

/// Status change between two benchmark runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Case now passes (was failing)
    NowPasses,
    /// Case now fails (was passing)
    NowFails,
    /// No status change
    NoChange,
}

/// Comparison result for a single case
#[derive(Debug, Clone, PartialEq)]
pub struct CaseComparison {
    pub case_name: String,
    pub status_change: StatusChange,
    pub before_converged: bool,
    pub after_converged: bool,
    pub solve_time_delta_ms: Option<f64>,
    pub solve_time_delta_pct: Option<f64>,
    pub objective_delta: Option<f64>,
    pub objective_delta_pct: Option<f64>,
}

/// Aggregate comparison statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonStats {
    /// Fractions in [0, 1]
    pub before_pass_rate: f64,
    pub after_pass_rate: f64,
    pub cases_now_passing: Vec<String>,
    pub cases_now_failing: Vec<String>,
    pub avg_solve_time_delta_pct: Option<f64>,
}

fn pass_rate(records: &[BenchmarkRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().filter(|r| r.converged).count() as f64 / records.len() as f64
}

fn relative_pct(delta: f64, base: f64, min_base: f64) -> f64 {
    if base.abs() > min_base {
        delta / base * 100.0
    } else {
        0.0
    }
}

/// Compare two benchmark runs case by case.
///
/// Cases present in only one run are ignored. When a case name repeats
/// within a run, its first row is used. Output is sorted by case name.
pub fn compare_runs(
    before: &[BenchmarkRecord],
    after: &[BenchmarkRecord],
) -> (Vec<CaseComparison>, ComparisonStats) {
    let mut before_map: HashMap<&str, &BenchmarkRecord> = HashMap::new();
    for record in before {
        before_map.entry(record.case_name.as_str()).or_insert(record);
    }

    let mut comparisons: Vec<CaseComparison> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for after_row in after {
        let name = after_row.case_name.as_str();
        if !seen.insert(name) {
            continue;
        }
        let Some(before_row) = before_map.get(name) else {
            continue;
        };

        let status_change = match (before_row.converged, after_row.converged) {
            (false, true) => StatusChange::NowPasses,
            (true, false) => StatusChange::NowFails,
            _ => StatusChange::NoChange,
        };

        let both = before_row.converged && after_row.converged;
        let time_delta = both.then(|| after_row.solve_time_ms - before_row.solve_time_ms);
        let objective_delta = both.then(|| after_row.objective_value - before_row.objective_value);

        comparisons.push(CaseComparison {
            case_name: name.to_string(),
            status_change,
            before_converged: before_row.converged,
            after_converged: after_row.converged,
            solve_time_delta_ms: time_delta,
            solve_time_delta_pct: time_delta
                .map(|d| relative_pct(d, before_row.solve_time_ms, 0.0)),
            objective_delta,
            objective_delta_pct: objective_delta
                .map(|d| relative_pct(d, before_row.objective_value, 1e-6)),
        });
    }

    comparisons.sort_by(|a, b| a.case_name.cmp(&b.case_name));

    let names_with = |change: StatusChange| -> Vec<String> {
        comparisons
            .iter()
            .filter(|c| c.status_change == change)
            .map(|c| c.case_name.clone())
            .collect()
    };
    let time_deltas: Vec<f64> = comparisons
        .iter()
        .filter_map(|c| c.solve_time_delta_pct)
        .collect();

    let stats = ComparisonStats {
        before_pass_rate: pass_rate(before),
        after_pass_rate: pass_rate(after),
        cases_now_passing: names_with(StatusChange::NowPasses),
        cases_now_failing: names_with(StatusChange::NowFails),
        avg_solve_time_delta_pct: crate::stats::mean(&time_deltas),
    };

    (comparisons, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(name: &str, converged: bool, solve_time: f64, objective: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            case_name: name.to_string(),
            load_time_ms: 1.0,
            solve_time_ms: solve_time,
            total_time_ms: solve_time + 1.0,
            converged,
            iterations: 10,
            num_buses: 14,
            num_branches: 20,
            num_gens: 5,
            objective_value: objective,
            baseline_objective: objective,
            ..Default::default()
        }
    }

    #[test]
    fn test_compare_detects_new_pass() {
        let before = vec![
            make_row("case14", false, 0.0, 0.0),
            make_row("case30", true, 100.0, 1000.0),
        ];
        let after = vec![
            make_row("case14", true, 50.0, 500.0),
            make_row("case30", true, 90.0, 1000.0),
        ];

        let (comparisons, stats) = compare_runs(&before, &after);

        assert_eq!(stats.cases_now_passing, vec!["case14"]);
        assert!(stats.cases_now_failing.is_empty());
        let case14 = comparisons
            .iter()
            .find(|c| c.case_name == "case14")
            .unwrap();
        assert_eq!(case14.status_change, StatusChange::NowPasses);
        assert!(case14.solve_time_delta_ms.is_none());
    }

    #[test]
    fn test_compare_detects_regression() {
        let before = vec![make_row("case14", true, 50.0, 500.0)];
        let after = vec![make_row("case14", false, 0.0, 0.0)];

        let (_, stats) = compare_runs(&before, &after);

        assert!(stats.cases_now_passing.is_empty());
        assert_eq!(stats.cases_now_failing, vec!["case14"]);
        assert!(stats.avg_solve_time_delta_pct.is_none());
    }

    #[test]
    fn test_compare_computes_time_delta() {
        let before = vec![make_row("case14", true, 100.0, 1000.0)];
        let after = vec![make_row("case14", true, 80.0, 1000.0)];

        let (comparisons, stats) = compare_runs(&before, &after);

        let case14 = &comparisons[0];
        assert!((case14.solve_time_delta_ms.unwrap() - (-20.0)).abs() < 0.1);
        assert!((case14.solve_time_delta_pct.unwrap() - (-20.0)).abs() < 0.1);
        assert_eq!(case14.objective_delta_pct, Some(0.0));
        assert!((stats.avg_solve_time_delta_pct.unwrap() - (-20.0)).abs() < 0.1);
    }

    #[test]
    fn test_compare_pass_rate_and_ordering() {
        let before = vec![
            make_row("case30", false, 0.0, 0.0),
            make_row("case14", true, 50.0, 500.0),
            make_row("case5", true, 5.0, 50.0),
        ];
        let after = vec![
            make_row("case30", true, 100.0, 1000.0),
            make_row("case14", true, 50.0, 500.0),
        ];

        let (comparisons, stats) = compare_runs(&before, &after);

        assert!((stats.before_pass_rate - 2.0 / 3.0).abs() < 0.001);
        assert!((stats.after_pass_rate - 1.0).abs() < 0.001);
        let names: Vec<&str> = comparisons.iter().map(|c| c.case_name.as_str()).collect();
        assert_eq!(names, vec!["case14", "case30"]);
    }
}
