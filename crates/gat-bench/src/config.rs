//! Analysis configuration.
//!
//! Every knob the statistics engine and suite drivers use lives here, with
//! defaults matching the published reports. A TOML file may override any
//! subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BenchResult;

/// Top-level analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub thresholds: ViolationThresholds,
    #[serde(default)]
    pub buckets: SizeBucketBounds,
    #[serde(default)]
    pub percentiles: PercentileConfig,
    #[serde(default)]
    pub files: FileConfig,
}

/// Tolerances above which a constraint violation is counted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViolationThresholds {
    /// Voltage magnitude (p.u.)
    #[serde(default = "default_vm_threshold")]
    pub vm_violation_pu: f64,
    /// Branch flow (MVA)
    #[serde(default = "default_branch_threshold")]
    pub branch_violation_mva: f64,
}

impl Default for ViolationThresholds {
    fn default() -> Self {
        Self {
            vm_violation_pu: default_vm_threshold(),
            branch_violation_mva: default_branch_threshold(),
        }
    }
}

fn default_vm_threshold() -> f64 {
    1e-6
}

fn default_branch_threshold() -> f64 {
    1e-3
}

/// Bus-count boundaries for network size buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBucketBounds {
    /// Networks below this many buses are "small"
    #[serde(default = "default_small_max")]
    pub small_max_buses: usize,
    /// Networks below this many buses (and not small) are "medium"
    #[serde(default = "default_medium_max")]
    pub medium_max_buses: usize,
}

impl Default for SizeBucketBounds {
    fn default() -> Self {
        Self {
            small_max_buses: default_small_max(),
            medium_max_buses: default_medium_max(),
        }
    }
}

fn default_small_max() -> usize {
    500
}

fn default_medium_max() -> usize {
    2000
}

/// Percentiles reported alongside the median
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileConfig {
    #[serde(default = "default_tail")]
    pub tail: Vec<f64>,
}

impl Default for PercentileConfig {
    fn default() -> Self {
        Self {
            tail: default_tail(),
        }
    }
}

fn default_tail() -> Vec<f64> {
    vec![10.0, 90.0]
}

/// Result file naming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Full-network suite file
    #[serde(default = "default_full_network")]
    pub full_network: String,
    /// Single-case AC suite file
    #[serde(default = "default_single_case")]
    pub single_case: String,
    /// Display name of the single case
    #[serde(default = "default_single_case_name")]
    pub single_case_name: String,
    /// Sweep files are `<prefix>_<case>_<tag>.csv`
    #[serde(default = "default_sweep_prefix")]
    pub sweep_prefix: String,
    #[serde(default = "default_sweep_cases")]
    pub sweep_cases: Vec<String>,
    /// Ordered (method name, file name) pairs for method comparison
    #[serde(default = "default_methods")]
    pub methods: Vec<(String, String)>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            full_network: default_full_network(),
            single_case: default_single_case(),
            single_case_name: default_single_case_name(),
            sweep_prefix: default_sweep_prefix(),
            sweep_cases: default_sweep_cases(),
            methods: default_methods(),
        }
    }
}

fn default_full_network() -> String {
    "pglib_full.csv".to_string()
}

fn default_single_case() -> String {
    "opfdata_case118.csv".to_string()
}

fn default_single_case_name() -> String {
    "case118".to_string()
}

fn default_sweep_prefix() -> String {
    "pfdelta".to_string()
}

fn default_sweep_cases() -> Vec<String> {
    ["case30", "case57", "case118"].map(String::from).to_vec()
}

fn default_methods() -> Vec<(String, String)> {
    [
        ("DC-OPF", "pglib_dc.csv"),
        ("SOCP", "pglib_socp.csv"),
        ("AC-OPF", "pglib_ac.csv"),
    ]
    .iter()
    .map(|(m, f)| (m.to_string(), f.to_string()))
    .collect()
}

impl AnalysisConfig {
    /// Parse a TOML document; missing sections and fields take defaults.
    pub fn from_toml_str(contents: &str) -> BenchResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> BenchResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_published_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.thresholds.vm_violation_pu, 1e-6);
        assert_eq!(config.thresholds.branch_violation_mva, 1e-3);
        assert_eq!(config.buckets.small_max_buses, 500);
        assert_eq!(config.buckets.medium_max_buses, 2000);
        assert_eq!(config.percentiles.tail, vec![10.0, 90.0]);
        assert_eq!(config.files.methods[0].0, "DC-OPF");
        assert_eq!(config.files.sweep_cases.len(), 3);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = AnalysisConfig::from_toml_str(
            r#"
[thresholds]
vm_violation_pu = 1e-4

[files]
methods = [["AC-OPF", "ac.csv"]]
"#,
        )
        .unwrap();
        assert_eq!(config.thresholds.vm_violation_pu, 1e-4);
        assert_eq!(config.thresholds.branch_violation_mva, 1e-3);
        assert_eq!(config.files.methods, vec![("AC-OPF".into(), "ac.csv".into())]);
        assert_eq!(config.files.full_network, "pglib_full.csv");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_load_from_file_and_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[buckets]\nsmall_max_buses = 100").unwrap();
        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.buckets.small_max_buses, 100);

        assert!(AnalysisConfig::from_toml_str("[buckets\n").is_err());
        assert!(AnalysisConfig::load_or_default(None).is_ok());
    }
}
