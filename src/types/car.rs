//! Car attribute data structures

use serde::Deserialize;
use thiserror::Error;

/// The three independent variables a price estimate is made from.
///
/// Values are expected to be finite and non-negative; [`PredictionInput::parse_field`]
/// is the boundary that enforces it for interactive entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionInput {
    /// Highway fuel economy (miles per gallon)
    pub highwaympg: f64,
    /// Curb weight (pounds)
    pub curbweight: f64,
    /// Engine power (hp)
    pub horsepower: f64,
}

/// Rejected interactive entry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("value must be a finite number")]
    NotFinite,
    #[error("value must be at least 0, got {0}")]
    Negative(f64),
}

impl PredictionInput {
    /// Create a new prediction input
    pub fn new(highwaympg: f64, curbweight: f64, horsepower: f64) -> Self {
        Self {
            highwaympg,
            curbweight,
            horsepower,
        }
    }

    /// Parse one entered field.
    ///
    /// Blank entry means the minimum value, 0.
    pub fn parse_field(raw: &str) -> Result<f64, InputError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(0.0);
        }

        let value: f64 = raw
            .parse()
            .map_err(|_| InputError::NotANumber(raw.to_string()))?;

        if !value.is_finite() {
            return Err(InputError::NotFinite);
        }
        if value < 0.0 {
            return Err(InputError::Negative(value));
        }
        Ok(value)
    }
}

/// One row of the car dataset.
///
/// Only the columns used for statistics and charts are typed; the CSV may carry
/// any number of other columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarRecord {
    pub highwaympg: f64,
    pub curbweight: f64,
    pub horsepower: f64,
    pub price: f64,
}

impl CarRecord {
    /// Column names every dataset must provide
    pub const REQUIRED_COLUMNS: [&'static str; 4] =
        ["highwaympg", "curbweight", "horsepower", "price"];
}
