//! Price prediction service

use crate::error::EstimatorError;
use crate::feature_extractor::FeatureExtractor;
use crate::models::PriceModel;
use crate::types::car::PredictionInput;
use crate::types::estimate::PriceEstimate;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error};

/// User-facing result of one predict action
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(PriceEstimate),
    Failure(String),
}

impl PredictionOutcome {
    /// Text shown to the user
    pub fn message(&self) -> String {
        match self {
            PredictionOutcome::Success(estimate) => {
                format!("Predicted car price: {}", estimate.formatted)
            }
            PredictionOutcome::Failure(cause) => {
                format!("An error occurred while predicting: {}", cause)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success(_))
    }
}

/// Single-row price estimation over a shared, read-only model.
///
/// Holds no per-call state; any number of calls can follow a failed one.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn PriceModel>,
    extractor: FeatureExtractor,
    currency_prefix: String,
}

impl PredictionService {
    /// Create a service over a loaded model
    pub fn new(model: Arc<dyn PriceModel>, currency_prefix: impl Into<String>) -> Self {
        Self {
            model,
            extractor: FeatureExtractor::new(),
            currency_prefix: currency_prefix.into(),
        }
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Estimate the price for one input.
    ///
    /// Inputs are not range-checked here. Any model error, panic, empty or
    /// non-finite output becomes `PredictionFailed`.
    pub fn predict(&self, input: &PredictionInput) -> Result<PriceEstimate, EstimatorError> {
        let row = self.extractor.extract(input);

        let predictions = panic::catch_unwind(AssertUnwindSafe(|| self.model.predict(&[row])))
            .map_err(|payload| EstimatorError::PredictionFailed(panic_message(payload)))?
            .map_err(|e| EstimatorError::PredictionFailed(format!("{e:#}")))?;

        let price = predictions.first().copied().ok_or_else(|| {
            EstimatorError::PredictionFailed("model returned no predictions".to_string())
        })?;

        if !price.is_finite() {
            return Err(EstimatorError::PredictionFailed(format!(
                "model returned a non-finite price ({})",
                price
            )));
        }

        debug!(
            model = %self.model.name(),
            features = ?row,
            price = price,
            "Prediction complete"
        );

        Ok(PriceEstimate::new(price, &self.currency_prefix))
    }

    /// Run a prediction and convert the result into user-facing text
    pub fn estimate(&self, input: &PredictionInput) -> PredictionOutcome {
        match self.predict(input) {
            Ok(estimate) => PredictionOutcome::Success(estimate),
            Err(e) => {
                error!(model = %self.model.name(), error = %e, kind = e.kind(), "Prediction failed");
                PredictionOutcome::Failure(e.to_string())
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("model panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("model panicked: {}", message)
    } else {
        "model panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureRow;
    use std::sync::Mutex;

    /// Linear stand-in for the trained regressor
    struct LinearModel {
        seen: Mutex<Vec<Vec<FeatureRow>>>,
    }

    impl LinearModel {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl PriceModel for LinearModel {
        fn name(&self) -> &str {
            "linear"
        }

        fn predict(&self, rows: &[FeatureRow]) -> anyhow::Result<Vec<f64>> {
            self.seen.lock().unwrap().push(rows.to_vec());
            Ok(rows
                .iter()
                .map(|r| -120.0 * r[0] + 6.5 * r[1] + 80.25 * r[2] + 1000.0)
                .collect())
        }
    }

    /// Fails on one fixed input, answers everything else
    struct FlakyModel;

    impl PriceModel for FlakyModel {
        fn name(&self) -> &str {
            "flaky"
        }

        fn predict(&self, rows: &[FeatureRow]) -> anyhow::Result<Vec<f64>> {
            if rows[0] == [13.0, 13.0, 13.0] {
                anyhow::bail!("X has 3 features, but model is expecting 4 features as input");
            }
            Ok(vec![15000.0])
        }
    }

    struct FixedModel(Vec<f64>);

    impl PriceModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _rows: &[FeatureRow]) -> anyhow::Result<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    struct PanickingModel;

    impl PriceModel for PanickingModel {
        fn name(&self) -> &str {
            "panicking"
        }

        fn predict(&self, rows: &[FeatureRow]) -> anyhow::Result<Vec<f64>> {
            if rows[0][2] > 1000.0 {
                panic!("index out of bounds");
            }
            Ok(vec![rows[0][2]])
        }
    }

    /// Holds its state behind a lock the way `OnnxRegressor` holds its session
    struct LockedModel {
        runs: Mutex<u32>,
    }

    impl PriceModel for LockedModel {
        fn name(&self) -> &str {
            "locked"
        }

        fn predict(&self, rows: &[FeatureRow]) -> anyhow::Result<Vec<f64>> {
            let mut runs = crate::models::loader::lock_recovering(&self.runs, self.name());
            *runs += 1;
            if rows[0][2] > 1000.0 {
                panic!("runtime aborted mid-run");
            }
            Ok(vec![rows[0][2]])
        }
    }

    #[test]
    fn test_single_row_in_feature_order() {
        let model = Arc::new(LinearModel::new());
        let service = PredictionService::new(model.clone(), "Rp");

        let estimate = service
            .predict(&PredictionInput::new(27.0, 2548.0, 111.0))
            .unwrap();

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![[27.0, 2548.0, 111.0]]);
        assert!(estimate.price.is_finite());
        assert!(estimate.formatted.starts_with("Rp "));
    }

    #[test]
    fn test_zero_input_accepted() {
        let model = Arc::new(LinearModel::new());
        let service = PredictionService::new(model.clone(), "Rp");

        let estimate = service.predict(&PredictionInput::new(0.0, 0.0, 0.0)).unwrap();

        assert_eq!(model.seen.lock().unwrap()[0], vec![[0.0, 0.0, 0.0]]);
        assert_eq!(estimate.formatted, "Rp 1,000");
    }

    #[test]
    fn test_deterministic_output() {
        let service = PredictionService::new(Arc::new(LinearModel::new()), "Rp");
        let input = PredictionInput::new(30.0, 2337.0, 102.0);

        let first = service.estimate(&input).message();
        let second = service.estimate(&input).message();

        assert_eq!(first, second);
    }

    #[test]
    fn test_finite_for_non_negative_grid() {
        let service = PredictionService::new(Arc::new(LinearModel::new()), "Rp");
        for h in [0.0, 16.0, 54.0] {
            for c in [0.0, 1488.0, 4066.0] {
                for p in [0.0, 48.0, 288.0] {
                    let estimate = service.predict(&PredictionInput::new(h, c, p)).unwrap();
                    assert!(estimate.price.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_failure_reported_then_recovers() {
        let service = PredictionService::new(Arc::new(FlakyModel), "Rp");

        let failed = service.estimate(&PredictionInput::new(13.0, 13.0, 13.0));
        assert!(!failed.is_success());
        assert!(failed
            .message()
            .contains("X has 3 features, but model is expecting 4 features as input"));

        let recovered = service.estimate(&PredictionInput::new(27.0, 2548.0, 111.0));
        assert_eq!(
            recovered,
            PredictionOutcome::Success(PriceEstimate::new(15000.0, "Rp"))
        );
        assert_eq!(recovered.message(), "Predicted car price: Rp 15,000");
    }

    #[test]
    fn test_panic_is_contained() {
        let service = PredictionService::new(Arc::new(PanickingModel), "Rp");

        let err = service
            .predict(&PredictionInput::new(1.0, 1.0, 5000.0))
            .unwrap_err();
        assert!(matches!(err, EstimatorError::PredictionFailed(_)));
        assert!(err.to_string().contains("index out of bounds"));

        let estimate = service.predict(&PredictionInput::new(1.0, 1.0, 95.0)).unwrap();
        assert_eq!(estimate.formatted, "Rp 95");
    }

    #[test]
    fn test_panic_while_locked_does_not_wedge_later_calls() {
        let model = Arc::new(LockedModel { runs: Mutex::new(0) });
        let service = PredictionService::new(model.clone(), "Rp");

        let failed = service.estimate(&PredictionInput::new(1.0, 1.0, 5000.0));
        assert!(!failed.is_success());
        assert!(model.runs.is_poisoned());

        let recovered = service.estimate(&PredictionInput::new(1.0, 1.0, 150.0));
        assert_eq!(recovered.message(), "Predicted car price: Rp 150");
        assert_eq!(*model.runs.lock().unwrap_or_else(|p| p.into_inner()), 2);
    }

    #[test]
    fn test_empty_and_non_finite_output() {
        let empty = PredictionService::new(Arc::new(FixedModel(vec![])), "Rp");
        let err = empty.predict(&PredictionInput::new(1.0, 2.0, 3.0)).unwrap_err();
        assert!(err.to_string().contains("no predictions"));

        let nan = PredictionService::new(Arc::new(FixedModel(vec![f64::NAN])), "Rp");
        let err = nan.predict(&PredictionInput::new(1.0, 2.0, 3.0)).unwrap_err();
        assert!(matches!(err, EstimatorError::PredictionFailed(_)));
    }

    #[test]
    fn test_first_prediction_is_used() {
        let service = PredictionService::new(Arc::new(FixedModel(vec![12345.678, 1.0])), "Rp");
        let outcome = service.estimate(&PredictionInput::new(1.0, 2.0, 3.0));
        assert_eq!(outcome.message(), "Predicted car price: Rp 12,346");
    }
}
