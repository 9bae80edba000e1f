use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Analyze GAT benchmark result files", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: tracing::Level,

    /// Analysis settings (TOML); built-in defaults when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize the PGLib, PFDelta and OPFData suites in a results directory
    Analyze {
        /// Directory holding the suite CSV files
        #[arg(default_value = "results")]
        results_dir: PathBuf,
        /// Baseline CSV (case_name,ac_objective) filling missing reference objectives
        #[arg(long)]
        baseline: Option<PathBuf>,
    },
    /// Compare DC-OPF, SOCP and AC-OPF results on the same cases
    Methods {
        /// Directory holding the per-method CSV files
        #[arg(default_value = "results")]
        results_dir: PathBuf,
        /// Baseline CSV (case_name,ac_objective) filling missing reference objectives
        #[arg(long)]
        baseline: Option<PathBuf>,
    },
    /// Per-case summary of one result file
    Summary {
        /// Benchmark result CSV
        csv: PathBuf,
        /// Baseline CSV (case_name,ac_objective) filling missing reference objectives
        #[arg(long)]
        baseline: Option<PathBuf>,
    },
    /// Compare two runs of the same benchmark
    Compare {
        /// Result CSV of the earlier run
        before: PathBuf,
        /// Result CSV of the later run
        after: PathBuf,
    },
    /// Extract reference objectives from the PGLib-OPF BASELINE.md
    Baseline {
        /// Markdown file with the baseline results table
        #[arg(default_value = "data/pglib-opf/BASELINE.md")]
        baseline_md: PathBuf,
        /// Destination CSV
        #[arg(default_value = "data/pglib-opf/baseline.csv")]
        output_csv: PathBuf,
    },
}
