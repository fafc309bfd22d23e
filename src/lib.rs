//! Car Price Estimator Library
//!
//! Estimates a car's price from highway fuel economy, curb weight and
//! horsepower with a pre-trained ONNX regression model, and presents the
//! reference dataset with descriptive statistics and charts.

pub mod app;
pub mod config;
pub mod dataset;
pub mod error;
pub mod feature_extractor;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod session;
pub mod types;
pub mod views;

pub use app::App;
pub use config::AppConfig;
pub use error::EstimatorError;
pub use feature_extractor::FeatureExtractor;
pub use models::{PredictionService, PriceModel};
pub use session::Session;
pub use types::{estimate::PriceEstimate, car::PredictionInput};
pub use views::View;
