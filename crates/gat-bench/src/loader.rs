//! CSV loading for benchmark result files.
//!
//! Rows are read with a flexible reader and converted field by field through
//! the schema below, so a short row or a garbled number degrades to defaults
//! instead of failing the whole file.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::ByteRecord;
use tracing::{debug, info};

use crate::error::BenchResult;
use crate::record::{parse_converged, safe_count, safe_float, BenchmarkRecord, ContingencyType};

/// How a raw text field is turned into a typed value, and where it lands.
#[derive(Clone, Copy)]
pub enum Coercion {
    /// Trimmed text (empty when absent)
    Text(fn(&mut BenchmarkRecord, String)),
    /// [`safe_float`] with default 0.0
    Float(fn(&mut BenchmarkRecord, f64)),
    /// [`safe_count`] with default 0
    Count(fn(&mut BenchmarkRecord, u64)),
    /// [`parse_converged`]
    Flag(fn(&mut BenchmarkRecord, bool)),
}

impl Coercion {
    /// Coerce `raw` and store it in `record`. Never fails.
    pub fn apply(self, raw: Option<&str>, record: &mut BenchmarkRecord) {
        match self {
            Coercion::Text(set) => {
                set(record, raw.map(|s| s.trim().to_string()).unwrap_or_default())
            }
            Coercion::Float(set) => set(record, safe_float(raw, 0.0)),
            Coercion::Count(set) => set(record, safe_count(raw, 0)),
            Coercion::Flag(set) => set(record, parse_converged(raw)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Coercion::Text(_) => "text",
            Coercion::Float(_) => "float",
            Coercion::Count(_) => "count",
            Coercion::Flag(_) => "flag",
        }
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// One expected column of a result file.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub coercion: Coercion,
}

const fn field(name: &'static str, coercion: Coercion) -> FieldSpec {
    FieldSpec { name, coercion }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn clamp_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Columns written by the GAT benchmark commands.
pub const BENCHMARK_SCHEMA: &[FieldSpec] = &[
    field("case_name", Coercion::Text(|r, v| r.case_name = v)),
    field("load_time_ms", Coercion::Float(|r, v| r.load_time_ms = v)),
    field("solve_time_ms", Coercion::Float(|r, v| r.solve_time_ms = v)),
    field("total_time_ms", Coercion::Float(|r, v| r.total_time_ms = v)),
    field("converged", Coercion::Flag(|r, v| r.converged = v)),
    field("iterations", Coercion::Count(|r, v| r.iterations = clamp_u32(v))),
    field("num_buses", Coercion::Count(|r, v| r.num_buses = clamp_usize(v))),
    field("num_branches", Coercion::Count(|r, v| r.num_branches = clamp_usize(v))),
    field("num_gens", Coercion::Count(|r, v| r.num_gens = clamp_usize(v))),
    field("objective_value", Coercion::Float(|r, v| r.objective_value = v)),
    field("baseline_objective", Coercion::Float(|r, v| r.baseline_objective = v)),
    field("objective_gap_abs", Coercion::Float(|r, v| r.objective_gap_abs = v)),
    field("objective_gap_rel", Coercion::Float(|r, v| r.objective_gap_rel = v)),
    field("max_vm_violation_pu", Coercion::Float(|r, v| r.max_vm_violation_pu = v)),
    field("max_gen_p_violation_mw", Coercion::Float(|r, v| r.max_gen_p_violation_mw = v)),
    field(
        "max_branch_flow_violation_mva",
        Coercion::Float(|r, v| r.max_branch_flow_violation_mva = v),
    ),
];

/// Column used as the case identifier when `case_name` is absent (OPFData).
const CASE_NAME_FALLBACK: &str = "sample_id";
const CONTINGENCY_COLUMN: &str = "contingency_type";

/// Header name → column position.
struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new(headers: &ByteRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (String::from_utf8_lossy(name).trim().to_string(), i))
            .collect();
        Self { positions }
    }

    fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Field text; `None` when the column or cell is absent or not UTF-8.
    fn get<'r>(&self, row: &'r ByteRecord, name: &str) -> Option<&'r str> {
        self.positions
            .get(name)
            .and_then(|&i| row.get(i))
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    fn missing(&self, schema: &[FieldSpec]) -> Vec<&'static str> {
        schema
            .iter()
            .filter(|f| !self.contains(f.name))
            .map(|f| f.name)
            .collect()
    }
}

/// Convert one row through `schema`.
fn row_to_record(index: &HeaderIndex, row: &ByteRecord, schema: &[FieldSpec]) -> BenchmarkRecord {
    let mut record = BenchmarkRecord::default();
    for spec in schema {
        spec.coercion.apply(index.get(row, spec.name), &mut record);
    }
    if !index.contains("case_name") {
        record.case_name = index
            .get(row, CASE_NAME_FALLBACK)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
    }
    record.contingency = index
        .get(row, CONTINGENCY_COLUMN)
        .and_then(ContingencyType::parse);
    record
}

/// Read benchmark records from any CSV source, preserving row order.
///
/// Fields are decoded individually, so a cell that is not valid UTF-8 takes
/// its default like any other unparsable value.
pub fn read_records<R: Read>(source: R) -> BenchResult<Vec<BenchmarkRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);
    let index = HeaderIndex::new(reader.byte_headers()?);

    let missing = index.missing(BENCHMARK_SCHEMA);
    if !missing.is_empty() {
        debug!(columns = ?missing, "result file lacks columns; using defaults");
    }

    let mut records = Vec::new();
    for row in reader.byte_records() {
        records.push(row_to_record(&index, &row?, BENCHMARK_SCHEMA));
    }
    Ok(records)
}

/// Load benchmark records from a CSV file.
pub fn load_records(path: &Path) -> BenchResult<Vec<BenchmarkRecord>> {
    let file = File::open(path)?;
    read_records(file)
}

/// Load a result file that may legitimately be absent.
///
/// Returns `Ok(None)` when the file does not exist; every other failure
/// (permissions, a directory in place of the file, broken CSV) is an error.
pub fn load_optional(path: &Path) -> BenchResult<Option<Vec<BenchmarkRecord>>> {
    match File::open(path) {
        Ok(file) => {
            let records = read_records(file)?;
            debug!(path = %path.display(), rows = records.len(), "loaded result file");
            Ok(Some(records))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "result file not found; skipping");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
