//! Car dataset access for the dataset & visualization view.
//!
//! The CSV is read from disk on every call; nothing is cached between visits.

pub mod chart;
pub mod stats;

pub use chart::{price_charts, LineChart};
pub use stats::{describe, ColumnSummary};

use crate::error::EstimatorError;
use crate::types::car::CarRecord;
use csv::StringRecord;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};

/// Maximum characters shown per table cell
const MAX_CELL_WIDTH: usize = 16;

/// A loaded dataset: raw records for display plus typed rows for charts
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: StringRecord,
    records: Vec<StringRecord>,
    cars: Vec<CarRecord>,
}

/// Load the dataset at `path`.
///
/// A missing file is `DatasetMissing`; every other failure is `DatasetMalformed`.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, EstimatorError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => EstimatorError::DatasetMissing {
            path: path.to_path_buf(),
        },
        _ => EstimatorError::DatasetMalformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let dataset = Dataset::from_reader(file).map_err(|reason| EstimatorError::DatasetMalformed {
        path: path.to_path_buf(),
        reason,
    })?;

    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.headers().len(),
        "Dataset loaded"
    );

    Ok(dataset)
}

impl Dataset {
    /// Parse a dataset from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, String> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = reader.headers().map_err(|e| e.to_string())?.clone();
        for column in CarRecord::REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(format!("missing required column `{}`", column));
            }
        }

        let mut records = Vec::new();
        let mut cars = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| e.to_string())?;
            let car: CarRecord = record
                .deserialize(Some(&headers))
                .map_err(|e| format!("row {}: {}", index + 1, e))?;
            records.push(record);
            cars.push(car);
        }

        if records.is_empty() {
            return Err("dataset contains no rows".to_string());
        }

        debug!(rows = records.len(), "Parsed dataset records");

        Ok(Self {
            headers,
            records,
            cars,
        })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    /// Typed rows carrying the model variables and price
    pub fn cars(&self) -> &[CarRecord] {
        &self.cars
    }

    /// Raw values of one column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(
            self.records
                .iter()
                .map(|r| r.get(index).unwrap_or(""))
                .collect(),
        )
    }

    /// Render the headers and up to `max_rows` records as aligned text
    pub fn render_table(&self, max_rows: usize) -> String {
        let shown = self.records.len().min(max_rows);

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(shown + 1);
        rows.push(self.headers.iter().map(truncate_cell).collect());
        for record in self.records.iter().take(shown) {
            rows.push(record.iter().map(truncate_cell).collect());
        }

        let mut table = render_rows(&rows);
        table.push_str(&format!("{} of {} rows\n", shown, self.records.len()));
        table
    }
}

fn truncate_cell(value: &str) -> String {
    if value.chars().count() > MAX_CELL_WIDTH {
        let mut cell: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
        cell.push('~');
        cell
    } else {
        value.to_string()
    }
}

/// Lay out rows in columns padded to the widest cell. The first row is the header.
pub(crate) fn render_rows(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (line, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:>width$}", cell, width = widths[i]))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');

        if line == 0 {
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out
}
