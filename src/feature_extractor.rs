//! Feature extraction for car price model inference.
//!
//! The regression model was trained on three columns in a fixed order; this
//! module is the only place that order is written down.

use crate::models::FeatureRow;
use crate::types::car::PredictionInput;

/// Number of features the model expects per row
pub const FEATURE_COUNT: usize = 3;

/// Feature extractor that turns prediction inputs into model rows.
///
/// Features are extracted in the exact order expected by the ONNX model:
/// `highwaympg`, `curbweight`, `horsepower`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the feature row for one input. Values pass through unchanged.
    pub fn extract(&self, input: &PredictionInput) -> FeatureRow {
        [input.highwaympg, input.curbweight, input.horsepower]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching training column order).
    pub fn feature_names(&self) -> [&'static str; FEATURE_COUNT] {
        ["highwaympg", "curbweight", "horsepower"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order() {
        let extractor = FeatureExtractor::new();
        let input = PredictionInput::new(27.0, 2548.0, 111.0);

        let row = extractor.extract(&input);

        assert_eq!(row, [27.0, 2548.0, 111.0]);
        assert_eq!(row.len(), extractor.feature_count());
    }

    #[test]
    fn test_feature_names_match_row() {
        let extractor = FeatureExtractor::new();
        assert_eq!(
            extractor.feature_names(),
            ["highwaympg", "curbweight", "horsepower"]
        );
    }

    #[test]
    fn test_zero_input_passes_through() {
        let extractor = FeatureExtractor::new();
        let row = extractor.extract(&PredictionInput::new(0.0, 0.0, 0.0));
        assert_eq!(row, [0.0, 0.0, 0.0]);
    }
}
