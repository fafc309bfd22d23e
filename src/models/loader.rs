//! ONNX model loader

use crate::error::EstimatorError;
use crate::feature_extractor::FEATURE_COUNT;
use crate::models::{FeatureRow, PriceModel};
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Regression model backed by an ONNX Runtime session
pub struct OnnxRegressor {
    /// Model name (file stem)
    name: String,
    /// ONNX Runtime session; running it needs exclusive access
    session: Mutex<Session>,
    /// Input name for the feature tensor
    input_name: String,
    /// Output name for the predicted prices
    output_name: String,
}

impl OnnxRegressor {
    /// Input tensor name discovered at load time
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Output tensor name discovered at load time
    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}

impl PriceModel for OnnxRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        // Prepare input tensor - shape [rows, 3]
        let shape = vec![rows.len() as i64, FEATURE_COUNT as i64];
        let data: Vec<f32> = rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| v as f32))
            .collect();
        let input_tensor =
            Tensor::from_array((shape, data)).context("Failed to create input tensor")?;

        let mut session = lock_recovering(&self.session, &self.name);

        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        let output = match outputs.get(&self.output_name) {
            Some(output) => output,
            None => anyhow::bail!("model produced no `{}` output", self.output_name),
        };

        let (shape, values) = output
            .try_extract_tensor::<f32>()
            .context("model output is not a float tensor")?;

        debug!(model = %self.name, shape = ?shape, "Extracted predictions");

        if values.len() != rows.len() {
            anyhow::bail!(
                "model returned {} predictions for {} rows",
                values.len(),
                rows.len()
            );
        }

        Ok(values.iter().map(|&v| v as f64).collect())
    }
}

/// Lock `mutex`, taking the guard back if an earlier holder panicked
pub(crate) fn lock_recovering<'a, T>(mutex: &'a Mutex<T>, model: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned: PoisonError<MutexGuard<'a, T>>| {
        warn!(model = %model, "Recovering model lock after an earlier panic");
        poisoned.into_inner()
    })
}

/// Map a failed metadata lookup on the artifact path to an error kind
fn artifact_io_error(path: &Path, err: io::Error) -> EstimatorError {
    match err.kind() {
        io::ErrorKind::NotFound => EstimatorError::ArtifactMissing {
            path: path.to_path_buf(),
        },
        _ => EstimatorError::ArtifactCorrupt {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    }
}

/// Loader for the ONNX price model
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load the model artifact.
    ///
    /// The file is read once. A missing file is `ArtifactMissing`; anything the
    /// runtime rejects is `ArtifactCorrupt`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<OnnxRegressor, EstimatorError> {
        let path = path.as_ref();

        let metadata = std::fs::metadata(path).map_err(|e| artifact_io_error(path, e))?;
        if !metadata.is_file() {
            return Err(EstimatorError::ArtifactMissing {
                path: path.to_path_buf(),
            });
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());

        info!(model = %name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let corrupt = |reason: String| EstimatorError::ArtifactCorrupt {
            path: path.to_path_buf(),
            reason,
        };

        let session = self
            .build_session(path)
            .map_err(|e| corrupt(format!("{e:#}")))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| corrupt("model graph declares no inputs".to_string()))?;

        let output_name = session
            .outputs
            .iter()
            .find(|o| {
                let name = o.name.to_lowercase();
                name.contains("variable") || name.contains("output") || name.contains("predict")
            })
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| corrupt("model graph declares no outputs".to_string()))?;

        info!(
            model = %name,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(OnnxRegressor {
            name,
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }

    fn build_session(&self, path: &Path) -> Result<Session> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;
        Ok(session)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
