//! Descriptive statistics over the numeric columns of a dataset

use super::{render_rows, Dataset};

/// Statistic names in display order
pub const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Summary of one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); `NaN` for a single value
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarize a non-empty slice of values
    pub fn from_values(column: &str, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            column: column.to_string(),
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }

    /// Values in [`STATISTICS`] order
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Quantile of sorted data with linear interpolation between closest ranks
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Summarize every column whose non-empty values all parse as numbers.
///
/// Empty cells are missing values: they are left out of the summary and
/// `count` reports only the filled rows.
pub fn describe(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .headers()
        .iter()
        .filter_map(|name| {
            let values: Option<Vec<f64>> = dataset
                .column(name)?
                .iter()
                .filter(|raw| !raw.is_empty())
                .map(|raw| raw.parse::<f64>().ok())
                .collect();
            ColumnSummary::from_values(name, &values?)
        })
        .collect()
}

/// Render summaries with one row per statistic and one column per dataset column
pub fn render_summary(summaries: &[ColumnSummary]) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(STATISTICS.len() + 1);

    let mut header = vec![String::new()];
    header.extend(summaries.iter().map(|s| s.column.clone()));
    rows.push(header);

    for (i, statistic) in STATISTICS.iter().enumerate() {
        let mut row = vec![statistic.to_string()];
        row.extend(summaries.iter().map(|s| format_stat(s.values()[i])));
        rows.push(row);
    }

    render_rows(&rows)
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}
