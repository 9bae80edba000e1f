//! Text renderers for benchmark statistics.
//!
//! Renderers only format numbers that [`crate::stats`] already computed, so
//! console and LaTeX output can never disagree on a value. Absent metrics
//! (empty subsets) render as [`PLACEHOLDER`].

pub mod console;
pub mod latex;

pub use console::ConsoleRenderer;
pub use latex::LatexRenderer;

use crate::stats::SummaryStatistics;
use crate::suite::SuiteReport;

/// Printed in place of a metric computed over zero records.
pub const PLACEHOLDER: &str = "--";

/// One output format for suite and method summaries.
pub trait ReportRenderer {
    /// Render the suites in the order given.
    fn render_suites(&self, reports: &[SuiteReport]) -> String;

    /// Render one row per method, in the order given.
    fn render_methods(&self, methods: &[&SummaryStatistics]) -> String;
}

/// Format an optional value with fixed decimals, or the placeholder.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// `converged/total`
pub fn fmt_conv(stats: &SummaryStatistics) -> String {
    format!("{}/{}", stats.converged, stats.total)
}

/// Shorten to `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        s.to_string()
    }
}
