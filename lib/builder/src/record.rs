//! Tabular records and CSV loading

use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One row of the source table, column name to raw cell text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Render the given columns as `"a | b | c"`, skipping absent ones
    pub fn summary(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .filter_map(|c| self.get(c).map(|v| format!("{c}: {v}")))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Load every row of a headered CSV file
///
/// # Errors
/// Returns error if the file cannot be opened or a row cannot be read
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

/// Read records from any CSV source
pub fn read_records<R: std::io::Read>(source: R) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        records.push(Record::new(fields));
    }
    Ok(records)
}

/// Fail unless every column in `required` appears in at least one record
pub fn require_columns(records: &[Record], required: &[&str]) -> Result<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    for column in required {
        if !records.iter().any(|r| r.get(column).is_some()) {
            return Err(BuildError::MissingColumn {
                column: column.to_string(),
                available: first.columns().map(str::to_string).collect(),
            });
        }
    }
    Ok(())
}

/// Fail unless at least one column in `candidates` appears in some record
pub fn require_any_column(records: &[Record], candidates: &[&str]) -> Result<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    if candidates
        .iter()
        .any(|c| records.iter().any(|r| r.get(c).is_some()))
    {
        return Ok(());
    }
    Err(BuildError::MissingColumn {
        column: candidates.join(", "),
        available: first.columns().map(str::to_string).collect(),
    })
}
