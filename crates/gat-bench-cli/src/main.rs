use clap::Parser;
use gat_bench::AnalysisConfig;
use gat_bench_cli::cli::{Cli, Commands};
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AnalysisConfig::load_or_default(cli.config.as_deref())?;
    debug!(?config, "analysis settings");

    match &cli.command {
        Commands::Analyze {
            results_dir,
            baseline,
        } => commands::analyze::handle(results_dir, baseline.as_deref(), &config),
        Commands::Methods {
            results_dir,
            baseline,
        } => commands::methods::handle(results_dir, baseline.as_deref(), &config),
        Commands::Summary { csv, baseline } => {
            commands::summary::handle(csv, baseline.as_deref(), &config)
        }
        Commands::Compare { before, after } => commands::compare::handle(before, after, &config),
        Commands::Baseline {
            baseline_md,
            output_csv,
        } => commands::baseline::handle(baseline_md, output_csv),
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {e}");
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
