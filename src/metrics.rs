//! Session statistics for the estimator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Counters and latency samples for one interactive session
pub struct SessionMetrics {
    /// Successful predictions
    pub predictions: AtomicU64,
    /// Failed predictions
    pub prediction_failures: AtomicU64,
    /// Visits to the dataset view
    pub dataset_views: AtomicU64,
    /// Dataset visits that ended in an error message
    pub dataset_failures: AtomicU64,
    /// Prediction times (in microseconds)
    prediction_times: RwLock<Vec<u64>>,
    /// Start time for the session duration
    start_time: Instant,
}

impl SessionMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions: AtomicU64::new(0),
            prediction_failures: AtomicU64::new(0),
            dataset_views: AtomicU64::new(0),
            dataset_failures: AtomicU64::new(0),
            prediction_times: RwLock::new(Vec::new()),
            start_time: Instant::now(),
        }
    }

    /// Record one predict action
    pub fn record_prediction(&self, elapsed: Duration, success: bool) {
        if success {
            self.predictions.fetch_add(1, Ordering::Relaxed);
        } else {
            self.prediction_failures.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.prediction_times.write() {
            times.push(elapsed.as_micros() as u64);
            // Keep only last 1000
            if times.len() > 1000 {
                times.drain(0..500);
            }
        }
    }

    /// Record one visit to the dataset view
    pub fn record_dataset_view(&self, success: bool) {
        self.dataset_views.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.dataset_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get prediction latency statistics
    pub fn get_latency_stats(&self) -> LatencyStats {
        let times = match self.prediction_times.read() {
            Ok(times) => times,
            Err(_) => return LatencyStats::default(),
        };
        if times.is_empty() {
            return LatencyStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        LatencyStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[((count as f64 * 0.95) as usize).min(count - 1)],
            max_us: sorted[count - 1],
        }
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let predictions = self.predictions.load(Ordering::Relaxed);
        let failures = self.prediction_failures.load(Ordering::Relaxed);
        let dataset_views = self.dataset_views.load(Ordering::Relaxed);
        let dataset_failures = self.dataset_failures.load(Ordering::Relaxed);
        let latency = self.get_latency_stats();

        info!(
            session_secs = self.start_time.elapsed().as_secs(),
            predictions,
            prediction_failures = failures,
            dataset_views,
            dataset_failures,
            "Session summary"
        );
        if latency.count > 0 {
            info!(
                "Prediction time (μs): mean={} p50={} p95={} max={} (calls={})",
                latency.mean_us, latency.p50_us, latency.p95_us, latency.max_us, latency.count
            );
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Prediction latency statistics
#[derive(Debug, Default, PartialEq)]
pub struct LatencyStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub max_us: u64,
}
