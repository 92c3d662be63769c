//! Tab-delimited data ingest.
//!
//! Each non-empty line is one observation. Fields are separated by tabs; the
//! first field is x and the last field is y (any fields in between are
//! ignored). Both are parsed as `f64`.
//!
//! Design goals:
//! - **Strict records**: a malformed line aborts the load with its line number
//! - **Deterministic behavior**: points keep their input order
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::info;

use crate::domain::Dataset;
use crate::error::AppError;

/// Load a dataset from a tab-delimited file.
///
/// The file handle is owned by the reader and closed when it goes out of
/// scope, including on parse errors.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open data file '{}': {e}", path.display())))?;

    let dataset = parse_dataset(file)
        .map_err(|e| AppError::input(format!("Invalid data file '{}': {}", path.display(), e.message())))?;

    info!("loaded {} points from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Parse a dataset from any reader.
pub fn parse_dataset<R: Read>(input: R) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| AppError::input(format!("read error: {e}")))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let (x, y) = parse_record(&record).map_err(|msg| AppError::input(format!("line {line}: {msg}")))?;
        xs.push(x);
        ys.push(y);
    }

    if xs.is_empty() {
        return Err(AppError::input("no data records found"));
    }

    Dataset::from_columns(xs, ys).ok_or_else(|| AppError::input("x and y columns differ in length"))
}

fn parse_record(record: &StringRecord) -> Result<(f64, f64), String> {
    let fields = strip_edge_fields(record);
    if fields.len() < 2 {
        return Err(format!(
            "expected at least 2 tab-separated fields, found {}",
            fields.len()
        ));
    }

    let x = parse_field(fields[0], "x")?;
    let y = parse_field(fields[fields.len() - 1], "y")?;
    Ok((x, y))
}

/// Drop empty fields at either end of a record, so a leading or trailing tab
/// behaves like surrounding whitespace. Interior empty fields are kept.
fn strip_edge_fields(record: &StringRecord) -> Vec<&str> {
    let fields: Vec<&str> = record.iter().collect();
    let Some(start) = fields.iter().position(|f| !f.is_empty()) else {
        return Vec::new();
    };
    let end = fields.iter().rposition(|f| !f.is_empty()).map_or(start, |i| i + 1);
    fields[start..end].to_vec()
}

fn parse_field(raw: &str, name: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|e| format!("invalid {name} value '{raw}': {e}"))
}
