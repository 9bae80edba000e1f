use anyhow::Result;
use gat_bench::{run_all, AnalysisConfig, ConsoleRenderer, LatexRenderer, ReportRenderer};
use std::path::Path;

use super::load_baselines;

pub fn handle(results_dir: &Path, baseline: Option<&Path>, config: &AnalysisConfig) -> Result<()> {
    let baselines = load_baselines(baseline)?;
    let reports = run_all(results_dir, config, baselines.as_ref())?;
    let console = ConsoleRenderer::new(config);

    println!("Benchmark Analysis");
    println!("Results directory: {}", results_dir.display());
    print!("{}", console.render_suites(&reports));

    let rule = "=".repeat(60);
    println!("\n{rule}\nLaTeX Table Data\n{rule}\n");
    print!("{}", console.render_table_data(&reports));
    if reports.iter().any(|r| r.headline().is_some()) {
        println!();
        print!("{}", LatexRenderer.render_suites(&reports));
    }
    Ok(())
}
