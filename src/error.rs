//! Error kinds surfaced by the estimator

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the application distinguishes.
///
/// Artifact and config errors are fatal at startup. Dataset errors stay inside
/// the dataset view and prediction errors inside a single predict action.
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("model artifact not found at {}", path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("model artifact at {} could not be loaded: {reason}", path.display())]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error("dataset file {} not found", path.display())]
    DatasetMissing { path: PathBuf },

    #[error("dataset file {} could not be read: {reason}", path.display())]
    DatasetMalformed { path: PathBuf, reason: String },

    #[error("{0}")]
    PredictionFailed(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EstimatorError {
    /// Whether the process can keep serving views after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EstimatorError::ArtifactMissing { .. }
                | EstimatorError::ArtifactCorrupt { .. }
                | EstimatorError::Config(_)
        )
    }

    /// Short kind name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            EstimatorError::ArtifactMissing { .. } => "artifact_missing",
            EstimatorError::ArtifactCorrupt { .. } => "artifact_corrupt",
            EstimatorError::DatasetMissing { .. } => "dataset_missing",
            EstimatorError::DatasetMalformed { .. } => "dataset_malformed",
            EstimatorError::PredictionFailed(_) => "prediction_failed",
            EstimatorError::Config(_) => "config",
        }
    }
}
