use anyhow::{Context, Result};
use gat_bench::{compare_runs, load_records, AnalysisConfig, ConsoleRenderer};
use std::path::Path;

use super::display_name;

pub fn handle(before_csv: &Path, after_csv: &Path, config: &AnalysisConfig) -> Result<()> {
    let before = load_records(before_csv)
        .with_context(|| format!("Failed to open benchmark CSV: {}", before_csv.display()))?;
    let after = load_records(after_csv)
        .with_context(|| format!("Failed to open benchmark CSV: {}", after_csv.display()))?;

    let (comparisons, stats) = compare_runs(&before, &after);

    let table = ConsoleRenderer::new(config).render_run_comparison(
        &comparisons,
        &stats,
        &display_name(before_csv),
        &display_name(after_csv),
    );
    print!("{table}");
    Ok(())
}
