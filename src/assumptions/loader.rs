//! CSV-based assumption loader
//!
//! Reads `name,value` override rows from data/assumptions.csv

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ensure_finite, Result};

/// Default path to the assumptions override file
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions.csv";

#[derive(Debug, Deserialize)]
struct OverrideRow {
    name: String,
    value: f64,
}

/// Load `(name, value)` overrides from a CSV file
pub fn load_overrides(path: &Path) -> Result<Vec<(String, f64)>> {
    let file = File::open(path)?;
    load_overrides_from_reader(file)
}

/// Load overrides from any reader. Lines starting with `#` are ignored.
pub fn load_overrides_from_reader<R: Read>(reader: R) -> Result<Vec<(String, f64)>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut overrides = Vec::new();
    for result in csv_reader.deserialize() {
        let row: OverrideRow = result?;
        ensure_finite(&row.name, row.value)?;
        overrides.push((row.name, row.value));
    }

    Ok(overrides)
}
