//! Type definitions for the car price estimator

pub mod car;
pub mod estimate;

pub use car::{CarRecord, InputError, PredictionInput};
pub use estimate::{format_currency, PriceEstimate};
