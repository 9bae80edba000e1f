//! LaTeX `table` blocks (booktabs rules).

use crate::stats::{Metric, SummaryStatistics};
use crate::suite::SuiteReport;

use super::{fmt_conv, fmt_opt, ReportRenderer};

/// Renders the same statistics as the console renderer as LaTeX markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexRenderer;

/// Escape characters that are special in LaTeX text mode.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(ch),
        }
    }
    out
}

fn table(caption: &str, label: &str, columns: &str, header: &str, rows: &[String]) -> String {
    let mut out = String::new();
    out.push_str("\\begin{table}[h]\n");
    out.push_str("\\centering\n");
    out.push_str(&format!("\\caption{{{caption}}}\n"));
    out.push_str(&format!("\\label{{{label}}}\n"));
    out.push_str(&format!("\\begin{{tabular}}{{{columns}}}\n"));
    out.push_str("\\toprule\n");
    out.push_str(&format!("{header} \\\\\n"));
    out.push_str("\\midrule\n");
    for row in rows {
        out.push_str(&format!("{row} \\\\\n"));
    }
    out.push_str("\\bottomrule\n");
    out.push_str("\\end{tabular}\n");
    out.push_str("\\end{table}\n");
    out
}

impl ReportRenderer for LatexRenderer {
    /// One row per suite with data; unavailable suites are left out.
    fn render_suites(&self, reports: &[SuiteReport]) -> String {
        let rows: Vec<String> = reports
            .iter()
            .filter_map(|report| {
                let stats = report.headline()?;
                let gap = if report.kind.reports_gap() {
                    fmt_opt(stats.metric(Metric::GapPct).map(|d| d.median), 2)
                } else {
                    super::PLACEHOLDER.to_string()
                };
                Some(format!(
                    "{} & {} & {} & {} & {}",
                    escape(report.kind.short_name()),
                    fmt_conv(stats),
                    fmt_opt(stats.convergence_rate(), 1),
                    fmt_opt(stats.metric(Metric::SolveTime).map(|d| d.median), 2),
                    gap
                ))
            })
            .collect();
        table(
            "Benchmark Suite Summary",
            "tab:benchmarks",
            "lrrrr",
            "Dataset & Conv. & Rate (\\%) & Median time (ms) & Median gap (\\%)",
            &rows,
        )
    }

    fn render_methods(&self, methods: &[&SummaryStatistics]) -> String {
        let rows: Vec<String> = methods
            .iter()
            .map(|stats| {
                format!(
                    "{} & {} & {} & {} & {} & {}",
                    escape(&stats.key),
                    fmt_conv(stats),
                    fmt_opt(stats.metric(Metric::GapPct).map(|d| d.mean), 3),
                    fmt_opt(stats.metric(Metric::SolveTime).map(|d| d.mean), 1),
                    fmt_opt(stats.violations.map(|v| v.vm_max_pu), 4),
                    fmt_opt(stats.violations.map(|v| v.branch_max_mva), 2),
                )
            })
            .collect();
        let mut out = String::from("\n% LaTeX table for paper\n");
        out.push_str(&table(
            "PGLib-OPF Validation Results",
            "tab:validation",
            "lrrrrr",
            "Method & Conv. & Gap (\\%) & Time (ms) & VM Viol & Flow Viol",
            &rows,
        ));
        out
    }
}
