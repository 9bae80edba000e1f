use anyhow::{Context, Result};
use gat_bench::extract_baseline_file;
use std::path::Path;

pub fn handle(baseline_md: &Path, output_csv: &Path) -> Result<()> {
    let count = extract_baseline_file(baseline_md, output_csv)
        .with_context(|| format!("extracting baselines from {}", baseline_md.display()))?;
    println!(
        "Extracted {count} baseline objectives to {}",
        output_csv.display()
    );
    Ok(())
}
