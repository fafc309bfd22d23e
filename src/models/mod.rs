//! ML model inference components

pub mod inference;
pub mod loader;

pub use inference::{PredictionOutcome, PredictionService};
pub use loader::{ModelLoader, OnnxRegressor};

/// One model input row: `[highwaympg, curbweight, horsepower]`
pub type FeatureRow = [f64; 3];

/// A pre-trained regression model.
///
/// Implementations are read-only from the caller's point of view and return
/// exactly one prediction per input row.
pub trait PriceModel: Send + Sync {
    /// Model name used in logs
    fn name(&self) -> &str;

    /// Predict one price per row
    fn predict(&self, rows: &[FeatureRow]) -> anyhow::Result<Vec<f64>>;
}
