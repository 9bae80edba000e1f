//! Human-readable console output.

use crate::compare::{CaseComparison, ComparisonStats};
use crate::config::{AnalysisConfig, SizeBucketBounds};
use crate::methods::{MethodOutcome, MethodReport};
use crate::record::BenchmarkRecord;
use crate::stats::{Metric, SummaryStatistics};
use crate::suite::{SuiteKind, SuiteOutcome, SuiteReport};

use super::{fmt_conv, fmt_opt, truncate, ReportRenderer, PLACEHOLDER};

const SECTION_RULE: usize = 60;
const METHOD_RULE: usize = 40;
const TABLE_RULE: usize = 80;
/// Inner width of boxed tables (between the border and its padding)
const BOX_INNER: usize = 75;

/// Which secondary line follows a median/mean line.
#[derive(Debug, Clone, Copy)]
enum Detail {
    Range,
    Tails,
}

/// Fixed-width text renderer.
#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    buckets: SizeBucketBounds,
}

fn banner(title: &str, width: usize) -> String {
    let rule = "=".repeat(width);
    format!("\n{rule}\n{title}\n{rule}\n")
}

fn rate_pct(stats: &SummaryStatistics) -> String {
    fmt_opt(stats.convergence_rate(), 1)
}

fn with_unit(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}{unit}"),
        None => PLACEHOLDER.to_string(),
    }
}

fn distribution_lines(stats: &SummaryStatistics, metric: Metric, detail: Detail) -> String {
    let (label, unit) = (metric.label(), metric.unit());
    let Some(d) = stats.metric(metric) else {
        return format!("{label}: {PLACEHOLDER}\n");
    };
    let mut out = format!(
        "{label}: median={:.2}{unit}, mean={:.2}{unit}\n",
        d.median, d.mean
    );
    match detail {
        Detail::Range => {
            out.push_str(&format!("  Min={:.2}{unit}, Max={:.2}{unit}\n", d.min, d.max));
        }
        Detail::Tails if !d.percentiles.is_empty() => {
            let tails: Vec<String> = d
                .percentiles
                .iter()
                .map(|(p, v)| format!("P{p}={v:.2}{unit}"))
                .collect();
            out.push_str(&format!("  {}\n", tails.join(", ")));
        }
        Detail::Tails => {}
    }
    out
}

fn boxed(content: &str) -> String {
    format!("│ {:<width$} │\n", content, width = BOX_INNER)
}

fn box_rule(left: char, right: char) -> String {
    format!("{left}{}{right}\n", "─".repeat(BOX_INNER + 2))
}

impl ConsoleRenderer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            buckets: config.buckets,
        }
    }

    /// One suite section. Unavailable suites print a single notice line.
    pub fn render_suite(&self, report: &SuiteReport) -> String {
        let name = report.kind.short_name();
        match &report.outcome {
            SuiteOutcome::Missing { location } if report.kind.has_overall() => {
                format!("\n{name}: no result files found in {}\n", location.display())
            }
            SuiteOutcome::Missing { location } => {
                format!("\n{name} results not found: {}\n", location.display())
            }
            SuiteOutcome::Empty { location } => {
                format!("\n{name} results contain no records: {}\n", location.display())
            }
            SuiteOutcome::Summarized { groups, overall } => {
                let mut out = banner(&report.title, SECTION_RULE);
                match report.kind {
                    SuiteKind::FullNetwork => {
                        if let Some(stats) = groups.first() {
                            out.push_str(&self.full_network(stats));
                        }
                    }
                    SuiteKind::SingleCaseAc => {
                        if let Some(stats) = groups.first() {
                            out.push_str(&self.single_case(stats));
                        }
                    }
                    SuiteKind::ContingencySweep => {
                        out.push_str(&self.sweep(groups, overall.as_ref()));
                    }
                }
                out
            }
        }
    }

    fn convergence(stats: &SummaryStatistics) -> String {
        format!("\nConvergence: {} ({}%)\n", fmt_conv(stats), rate_pct(stats))
    }

    fn full_network(&self, stats: &SummaryStatistics) -> String {
        let mut out = Self::convergence(stats);
        out.push_str(&distribution_lines(stats, Metric::SolveTime, Detail::Range));
        out.push_str(&distribution_lines(stats, Metric::GapPct, Detail::Range));
        if !stats.size_buckets.is_empty() {
            out.push_str("\nBy network size:\n");
            for bucket in &stats.size_buckets {
                out.push_str(&format!(
                    "  {}: {} cases, avg {:.2}ms\n",
                    bucket.bucket.label(&self.buckets),
                    bucket.cases,
                    bucket.mean_solve_time_ms
                ));
            }
        }
        out
    }

    fn single_case(&self, stats: &SummaryStatistics) -> String {
        let mut out = Self::convergence(stats);
        out.push_str(&distribution_lines(stats, Metric::SolveTime, Detail::Tails));
        out.push_str(&distribution_lines(stats, Metric::GapPct, Detail::Tails));
        out
    }

    fn sweep(&self, groups: &[SummaryStatistics], overall: Option<&SummaryStatistics>) -> String {
        let mut out = String::new();
        for stats in groups {
            out.push_str(&format!(
                "\n{}: {} converged ({}%)\n",
                stats.key,
                fmt_conv(stats),
                rate_pct(stats)
            ));
            out.push_str(&format!(
                "  Avg solve time: {}\n",
                with_unit(stats.metric(Metric::SolveTime).map(|d| d.mean), 2, "ms")
            ));
        }
        if let Some(total) = overall {
            out.push_str(&format!("\nTotal: {} ({}%)\n", fmt_conv(total), rate_pct(total)));
            let line = match total.metric(Metric::SolveTime) {
                Some(d) => format!("median={:.2}ms, mean={:.2}ms", d.median, d.mean),
                None => PLACEHOLDER.to_string(),
            };
            out.push_str(&format!("Overall solve time: {line}\n"));
        }
        out
    }

    /// One summary line per available suite, ahead of the LaTeX table.
    pub fn render_table_data(&self, reports: &[SuiteReport]) -> String {
        let mut out = String::new();
        for report in reports {
            let Some(stats) = report.headline() else {
                continue;
            };
            let name = report.kind.short_name();
            if report.kind.reports_gap() {
                out.push_str(&format!(
                    "{name}: {} conv, median={}, gap={}\n",
                    fmt_conv(stats),
                    with_unit(stats.metric(Metric::SolveTime).map(|d| d.median), 2, "ms"),
                    with_unit(stats.metric(Metric::GapPct).map(|d| d.median), 2, "%"),
                ));
            } else {
                out.push_str(&format!(
                    "{name}: {} conv ({}%)\n",
                    fmt_conv(stats),
                    rate_pct(stats)
                ));
            }
        }
        out
    }

    /// Loading notice and sample rows for one method.
    pub fn render_method_details(&self, report: &MethodReport) -> String {
        match &report.outcome {
            MethodOutcome::Missing => format!(
                "\n{}: File not found ({})\n",
                report.method,
                report.path.display()
            ),
            MethodOutcome::Loaded {
                loaded, samples, ..
            } => {
                let mut out = format!("\n{}\n", "=".repeat(METHOD_RULE));
                out.push_str(&format!(
                    "Loading {} results from {}\n",
                    report.method,
                    report.path.display()
                ));
                out.push_str(&format!("Loaded {loaded} results\n"));
                out.push_str(&format!("\nSample cases (first {}):\n", samples.len()));
                for r in samples {
                    let gap = if r.has_baseline() {
                        format!("{:.3}%", r.objective_gap_rel * 100.0)
                    } else {
                        "N/A".to_string()
                    };
                    out.push_str(&format!(
                        "  {}: obj={:.2}, gap={}, time={:.1}ms\n",
                        r.case_name, r.objective_value, gap, r.solve_time_ms
                    ));
                }
                out
            }
        }
    }

    /// Per-case table for a single result file.
    pub fn render_case_table(
        &self,
        records: &[BenchmarkRecord],
        stats: &SummaryStatistics,
    ) -> String {
        let mut out = box_rule('╭', '╮');
        out.push_str(&boxed("Benchmark Summary"));
        out.push_str(&box_rule('├', '┤'));
        out.push_str(&boxed(&format!(
            "Pass Rate: {} ({}%)",
            fmt_conv(stats),
            rate_pct(stats)
        )));
        let slowest = match &stats.slowest_case {
            Some(c) => format!("{:.1}ms ({})", c.value, truncate(&c.case_name, 30)),
            None => PLACEHOLDER.to_string(),
        };
        out.push_str(&boxed(&format!(
            "Avg Solve Time: {}  │  Max: {}",
            with_unit(stats.metric(Metric::SolveTime).map(|d| d.mean), 1, "ms"),
            slowest
        )));
        if let (Some(gap), Some(worst)) = (stats.metric(Metric::GapPct), &stats.worst_gap_case) {
            out.push_str(&boxed(&format!(
                "Avg Gap to Baseline: {:.2}%  │  Max: {:.2}% ({})",
                gap.mean,
                worst.value,
                truncate(&worst.case_name, 30)
            )));
        }
        out.push_str(&box_rule('├', '┤'));
        out.push_str(&format!(
            "│ {:<21} │{:^8}│{:>9} │{:>7} │{:>8} │{:>13} │\n",
            "Case", "Status", "Time(ms)", "Gap(%)", "Vm Viol", "Branch Viol"
        ));
        out.push_str(&format!(
            "├{}┼{}┼{}┼{}┼{}┼{}┤\n",
            "─".repeat(23),
            "─".repeat(8),
            "─".repeat(10),
            "─".repeat(8),
            "─".repeat(9),
            "─".repeat(14)
        ));
        for r in records {
            let (status, time, vm, branch) = if r.converged {
                (
                    "✓",
                    format!("{:.1}", r.solve_time_ms),
                    format!("{:.3}", r.max_vm_violation_pu),
                    format!("{:.3}", r.max_branch_flow_violation_mva),
                )
            } else {
                (
                    "✗",
                    "(fail)".to_string(),
                    PLACEHOLDER.to_string(),
                    PLACEHOLDER.to_string(),
                )
            };
            let gap = if r.converged && r.has_baseline() {
                format!("{:.2}%", r.objective_gap_rel * 100.0)
            } else {
                PLACEHOLDER.to_string()
            };
            out.push_str(&format!(
                "│ {:<21} │{:^8}│{:>9} │{:>7} │{:>8} │{:>13} │\n",
                truncate(&r.case_name, 21),
                status,
                time,
                gap,
                vm,
                branch
            ));
        }
        out.push_str(&box_rule('╰', '╯'));
        out
    }

    /// Before/after comparison of two runs.
    pub fn render_run_comparison(
        &self,
        comparisons: &[CaseComparison],
        stats: &ComparisonStats,
        before_name: &str,
        after_name: &str,
    ) -> String {
        let mut out = box_rule('╭', '╮');
        out.push_str(&boxed(&format!(
            "Benchmark Comparison: {} → {}",
            truncate(before_name, 25),
            truncate(after_name, 25)
        )));
        out.push_str(&box_rule('├', '┤'));
        out.push_str(&boxed(&format!(
            "Pass Rate: {:.1}% → {:.1}% ({:+.1}%)",
            stats.before_pass_rate * 100.0,
            stats.after_pass_rate * 100.0,
            (stats.after_pass_rate - stats.before_pass_rate) * 100.0
        )));

        if !stats.cases_now_passing.is_empty() || !stats.cases_now_failing.is_empty() {
            out.push_str(&boxed("Status Changes:"));
            for case in &stats.cases_now_passing {
                out.push_str(&boxed(&format!(
                    "  ✗→✓  {} (now converges!)",
                    truncate(case, 40)
                )));
            }
            for case in &stats.cases_now_failing {
                out.push_str(&boxed(&format!("  ✓→✗  {} (regression!)", truncate(case, 40))));
            }
        }

        let timed: Vec<&CaseComparison> = comparisons
            .iter()
            .filter(|c| c.solve_time_delta_ms.is_some())
            .collect();
        if !timed.is_empty() {
            out.push_str(&boxed("Solve Time Changes:"));
            for c in timed {
                out.push_str(&boxed(&format!(
                    "  {:<40} {:>+10.2}ms ({})",
                    truncate(&c.case_name, 40),
                    c.solve_time_delta_ms.unwrap_or_default(),
                    match c.solve_time_delta_pct {
                        Some(p) => format!("{p:+.1}%"),
                        None => PLACEHOLDER.to_string(),
                    }
                )));
            }
        }

        if let Some(avg_delta) = stats.avg_solve_time_delta_pct {
            let direction = if avg_delta < 0.0 { "faster" } else { "slower" };
            out.push_str(&boxed(&format!(
                "Avg Performance: {avg_delta:+.1}% ({direction})"
            )));
        }

        out.push_str(&box_rule('╰', '╯'));
        out
    }
}

impl ReportRenderer for ConsoleRenderer {
    fn render_suites(&self, reports: &[SuiteReport]) -> String {
        reports.iter().map(|r| self.render_suite(r)).collect()
    }

    fn render_methods(&self, methods: &[&SummaryStatistics]) -> String {
        let mut out = banner("SUMMARY STATISTICS", TABLE_RULE);
        out.push_str(&format!(
            "{:<10} {:<8} {:<8} {:<12} {:<12} {:<10} {:<10}\n",
            "Method", "Conv.", "Rate%", "Obj Gap%", "Time(ms)", "VM Viol", "Flow Viol"
        ));
        out.push_str(&format!("{}\n", "-".repeat(TABLE_RULE)));
        for stats in methods {
            let violations = stats.violations;
            out.push_str(&format!(
                "{:<10} {:>3}/{:<4} {:>6}% {:>10}% {:>10} {:>9} {:>10}\n",
                stats.key,
                stats.converged,
                stats.total,
                rate_pct(stats),
                fmt_opt(stats.metric(Metric::GapPct).map(|d| d.mean), 4),
                fmt_opt(stats.metric(Metric::SolveTime).map(|d| d.mean), 2),
                fmt_opt(violations.map(|v| v.vm_max_pu), 4),
                fmt_opt(violations.map(|v| v.branch_max_mva), 2),
            ));
        }
        out.push_str(&format!("{}\n", "=".repeat(TABLE_RULE)));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{summarize, FilterSet, MetricSpec, SummarySpec};
    use std::path::PathBuf;

    fn record(
        name: &str,
        converged: bool,
        solve: f64,
        gap_rel: f64,
        buses: usize,
    ) -> BenchmarkRecord {
        BenchmarkRecord {
            case_name: name.to_string(),
            converged,
            solve_time_ms: solve,
            num_buses: buses,
            objective_value: if converged { 100.0 } else { 0.0 },
            baseline_objective: if converged { 100.0 } else { 0.0 },
            objective_gap_rel: gap_rel,
            ..Default::default()
        }
    }

    fn full_network_report(records: &[BenchmarkRecord]) -> SuiteReport {
        let config = AnalysisConfig::default();
        let spec = SuiteKind::FullNetwork.summary_spec(&config);
        SuiteReport {
            kind: SuiteKind::FullNetwork,
            title: SuiteKind::FullNetwork.title(&config),
            outcome: SuiteOutcome::Summarized {
                groups: vec![summarize("pglib", records, &spec, &config)],
                overall: None,
            },
        }
    }

    #[test]
    fn test_full_network_section() {
        let records = vec![
            record("case14", true, 10.0, 0.05, 14),
            record("case30", true, 30.0, 0.15, 30),
            record("case118", false, 0.0, 0.0, 118),
        ];
        let renderer = ConsoleRenderer::new(&AnalysisConfig::default());
        let text = renderer.render_suite(&full_network_report(&records));

        assert!(text.contains("PGLib-OPF Benchmark Results"));
        assert!(text.contains("Convergence: 2/3 (66.7%)"));
        assert!(text.contains("Solve time: median=30.00ms, mean=20.00ms"));
        assert!(text.contains("Min=10.00ms, Max=30.00ms"));
        assert!(text.contains("Objective gap: median=15.00%"));
        assert!(text.contains("small (<500 buses): 2 cases, avg 20.00ms"));
        assert!(!text.contains("medium"));
    }

    #[test]
    fn test_empty_subset_prints_placeholder() {
        let records = vec![record("case118", false, 0.0, 0.0, 118)];
        let renderer = ConsoleRenderer::new(&AnalysisConfig::default());
        let text = renderer.render_suite(&full_network_report(&records));

        assert!(text.contains("Convergence: 0/1 (0.0%)"));
        assert!(text.contains("Solve time: --"));
        assert!(text.contains("Objective gap: --"));
        assert!(!text.contains("By network size"));
    }

    #[test]
    fn test_missing_suite_notice() {
        let report = SuiteReport {
            kind: SuiteKind::SingleCaseAc,
            title: "unused".into(),
            outcome: SuiteOutcome::Missing {
                location: PathBuf::from("results/opfdata_case118.csv"),
            },
        };
        let text = ConsoleRenderer::new(&AnalysisConfig::default()).render_suite(&report);
        assert!(text.contains("OPFData results not found: results/opfdata_case118.csv"));
    }

    #[test]
    fn test_missing_sweep_notice() {
        let report = SuiteReport {
            kind: SuiteKind::ContingencySweep,
            title: "unused".into(),
            outcome: SuiteOutcome::Missing {
                location: PathBuf::from("results"),
            },
        };
        let text = ConsoleRenderer::new(&AnalysisConfig::default()).render_suite(&report);
        assert!(text.contains("PFDelta: no result files found in results"));
    }

    #[test]
    fn test_method_table_rows_and_placeholders() {
        let config = AnalysisConfig::default();
        let spec = crate::methods::method_summary_spec();
        let records = vec![record("case5", true, 4.0, 0.001, 5)];
        let with_data = summarize("AC-OPF", &records, &spec, &config);
        let failing = vec![record("case5", false, 0.0, 0.0, 5)];
        let without = summarize("DC-OPF", &failing, &spec, &config);

        let text = ConsoleRenderer::new(&config).render_methods(&[&with_data, &without]);
        assert!(text.contains("SUMMARY STATISTICS"));
        assert!(text.contains("AC-OPF       1/1     100.0%     0.1000%       4.00"));
        assert!(text.contains("DC-OPF       0/1       0.0%         --%"));
    }

    #[test]
    fn test_case_table_rows_align() {
        let records = vec![
            record("pglib_opf_case14_ieee", true, 67.0, 0.0039, 14),
            record("pglib_opf_case2869_pegase_long_name", false, 0.0, 0.0, 2869),
        ];
        let config = AnalysisConfig::default();
        let spec = SummarySpec::default()
            .metric(MetricSpec::new(Metric::SolveTime, FilterSet::converged()))
            .metric(MetricSpec::new(
                Metric::GapPct,
                FilterSet::converged().and(crate::stats::RecordFilter::HasBaseline),
            ));
        let stats = summarize("run", &records, &spec, &config);
        let table = ConsoleRenderer::new(&config).render_case_table(&records, &stats);

        assert!(table.contains("Pass Rate: 1/2 (50.0%)"));
        assert!(table.contains("✓"));
        assert!(table.contains("✗"));
        assert!(table.contains("(fail)"));
        assert!(table.contains("0.39%"));
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "ragged table: {widths:?}");
    }
}
