use anyhow::Result;
use gat_bench::{
    compare_methods, AnalysisConfig, ConsoleRenderer, LatexRenderer, MethodReport, ReportRenderer,
    SummaryStatistics,
};
use std::path::Path;

use super::load_baselines;

pub fn handle(results_dir: &Path, baseline: Option<&Path>, config: &AnalysisConfig) -> Result<()> {
    let baselines = load_baselines(baseline)?;
    let reports = compare_methods(results_dir, config, baselines.as_ref())?;
    let console = ConsoleRenderer::new(config);

    for report in &reports {
        print!("{}", console.render_method_details(report));
    }

    let stats: Vec<&SummaryStatistics> = reports.iter().filter_map(MethodReport::stats).collect();
    print!("{}", console.render_methods(&stats));
    print!("{}", LatexRenderer.render_methods(&stats));
    Ok(())
}
