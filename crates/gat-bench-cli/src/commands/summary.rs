use anyhow::{Context, Result};
use gat_bench::stats::{FilterSet, MetricSpec, RecordFilter};
use gat_bench::{
    apply_baselines, load_records, summarize, AnalysisConfig, ConsoleRenderer, Metric, SummarySpec,
};
use std::path::Path;

use super::{display_name, load_baselines};

fn case_summary_spec() -> SummarySpec {
    SummarySpec::default()
        .metric(MetricSpec::new(Metric::SolveTime, FilterSet::converged()))
        .metric(MetricSpec::new(
            Metric::GapPct,
            FilterSet::converged().and(RecordFilter::HasBaseline),
        ))
}

pub fn handle(csv_path: &Path, baseline: Option<&Path>, config: &AnalysisConfig) -> Result<()> {
    let mut records = load_records(csv_path)
        .with_context(|| format!("Failed to open benchmark CSV: {}", csv_path.display()))?;
    if let Some(baselines) = load_baselines(baseline)? {
        apply_baselines(&mut records, &baselines);
    }

    let stats = summarize(display_name(csv_path), &records, &case_summary_spec(), config);
    let table = ConsoleRenderer::new(config).render_case_table(&records, &stats);
    print!("{table}");
    Ok(())
}
