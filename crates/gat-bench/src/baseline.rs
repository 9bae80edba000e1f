//! Reference objective values.
//!
//! PGLib publishes its reference costs in a markdown table (`BASELINE.md`).
//! [`extract_baseline_objectives`] scrapes the AC column into a map, and
//! [`write_baseline_csv`] stores it as the two-column CSV that
//! [`load_baseline_objectives`] reads back when joining results.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{BenchError, BenchResult};
use crate::record::BenchmarkRecord;

/// `| case_name | nodes | edges | DC cost | AC cost |`
const BASELINE_ROW_PATTERN: &str = r"(?i)\|\s*(pglib_opf_case\d+[a-z_]*)\s*\|\s*\d+\s*\|\s*\d+\s*\|\s*[\d.e+\-]+\s*\|\s*([\d.e+\-]+)\s*\|";

/// Header written by [`write_baseline_csv`].
pub const BASELINE_CSV_HEADER: [&str; 2] = ["case_name", "ac_objective"];

fn baseline_row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BASELINE_ROW_PATTERN).expect("baseline row pattern is valid"))
}

/// Parse one markdown table row into `(case_name, ac_objective)`.
pub fn parse_baseline_row(line: &str) -> Option<(String, f64)> {
    let caps = baseline_row_regex().captures(line)?;
    let case_name = caps.get(1)?.as_str().to_string();
    match caps.get(2)?.as_str().parse::<f64>() {
        Ok(ac) => Some((case_name, ac)),
        Err(_) => {
            debug!(case = %case_name, "unparsable AC objective in baseline row");
            None
        }
    }
}

/// Extract `case_name → AC objective` from a baseline markdown document.
///
/// Later rows for the same case overwrite earlier ones.
pub fn extract_baseline_objectives(markdown: &str) -> BTreeMap<String, f64> {
    markdown.lines().filter_map(parse_baseline_row).collect()
}

/// Write baseline objectives as CSV, sorted by case name.
///
/// Values keep a decimal point (`17551.0`) so the file reads back as floats
/// in every tool.
pub fn write_baseline_csv<W: Write>(
    objectives: &BTreeMap<String, f64>,
    writer: W,
) -> BenchResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BASELINE_CSV_HEADER)?;
    for (case_name, objective) in objectives {
        let value = format!("{objective:?}");
        csv_writer.write_record([case_name.as_str(), value.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Extract from `markdown_path` and write the CSV to `output_path`.
///
/// Returns the number of objectives written.
pub fn extract_baseline_file(markdown_path: &Path, output_path: &Path) -> BenchResult<usize> {
    let markdown = std::fs::read_to_string(markdown_path)?;
    let objectives = extract_baseline_objectives(&markdown);
    if let Some(parent) = output_path.parent() {
        if parent != Path::new("") {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    write_baseline_csv(&objectives, file)?;
    Ok(objectives.len())
}

/// Read baseline objective values from CSV.
///
/// Expected format:
/// ```csv
/// case_name,ac_objective
/// pglib_opf_case5_pjm,17551.89
/// pglib_opf_case14_ieee,8081.53
/// ```
/// Keys are stored normalized (see [`normalize_case_name`]).
pub fn read_baseline_objectives<R: Read>(source: R) -> BenchResult<HashMap<String, f64>> {
    let mut map = HashMap::new();
    let mut reader = csv::Reader::from_reader(source);

    for result in reader.records() {
        let record = result?;
        let case_name = record
            .get(0)
            .ok_or_else(|| BenchError::Parse("missing case_name column".into()))?;
        let objective: f64 = record
            .get(1)
            .ok_or_else(|| BenchError::Parse("missing objective column".into()))?
            .trim()
            .parse()
            .map_err(|_| BenchError::Parse(format!("parsing objective for {case_name}")))?;
        map.insert(normalize_case_name(case_name), objective);
    }

    Ok(map)
}

/// Load baseline objective values from a CSV file.
pub fn load_baseline_objectives(path: &Path) -> BenchResult<HashMap<String, f64>> {
    read_baseline_objectives(File::open(path)?)
}

/// Load a baseline file that may be absent.
///
/// Returns `Ok(None)` when the file does not exist; unreadable or malformed
/// files are still errors.
pub fn load_optional_baselines(path: &Path) -> BenchResult<Option<HashMap<String, f64>>> {
    match File::open(path) {
        Ok(file) => read_baseline_objectives(file).map(Some),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "baseline file not found; gaps use recorded baselines");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Normalize case name for matching (strip extensions, lowercase)
pub fn normalize_case_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .trim_end_matches(".m")
        .trim_end_matches(".json")
        .to_string()
}

/// Fill missing baselines from a reference map and recompute gaps.
///
/// Records that already carry a baseline are left alone. Gaps are only
/// recomputed when the record has a positive objective. Returns the number of
/// records updated.
pub fn apply_baselines(records: &mut [BenchmarkRecord], baselines: &HashMap<String, f64>) -> usize {
    let mut updated = 0;
    for record in records.iter_mut().filter(|r| !r.has_baseline()) {
        let Some(&reference) = baselines.get(&normalize_case_name(&record.case_name)) else {
            continue;
        };
        if reference <= 0.0 {
            continue;
        }
        record.baseline_objective = reference;
        if record.has_objective() {
            let gap_abs = (record.objective_value - reference).abs();
            record.objective_gap_abs = gap_abs;
            record.objective_gap_rel = if reference.abs() > 1e-10 {
                gap_abs / reference.abs()
            } else {
                0.0
            };
        }
        updated += 1;
    }
    updated
}
