//! Application wiring: configuration plus the resident model

use crate::config::AppConfig;
use crate::error::EstimatorError;
use crate::models::{ModelLoader, PredictionService, PriceModel};
use std::sync::Arc;
use tracing::{error, info};

/// Everything the views need, built once at startup
pub struct App {
    pub config: AppConfig,
    pub service: PredictionService,
}

impl App {
    /// Load the model named in `config`.
    ///
    /// Fails with `ArtifactMissing` or `ArtifactCorrupt`; callers must not
    /// serve any view after such a failure.
    pub fn bootstrap(config: AppConfig) -> Result<Self, EstimatorError> {
        let loader = ModelLoader::with_threads(config.model.onnx_threads);
        let model = loader.load(&config.model.path).map_err(|e| {
            error!(path = %config.model.path.display(), error = %e, kind = e.kind(), "Model artifact unavailable");
            e
        })?;

        info!(model = %model.name(), "Model resident");
        Ok(Self::with_model(config, Arc::new(model)))
    }

    /// Build the application around an already-loaded model
    pub fn with_model(config: AppConfig, model: Arc<dyn PriceModel>) -> Self {
        let service = PredictionService::new(model, config.display.currency_prefix.clone());
        Self { config, service }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_without_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.model.path = dir.path().join("car_price_model.onnx");

        let err = App::bootstrap(config).err().unwrap();

        assert!(matches!(err, EstimatorError::ArtifactMissing { .. }));
        assert!(err.is_fatal());
    }
}
