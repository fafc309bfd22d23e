//! Car Price Estimator - Main Entry Point
//!
//! Loads the regression model once, then serves the interactive menu on
//! stdin/stdout until the user quits.

use anyhow::Result;
use car_price_estimator::{config::AppConfig, logging, App, Session};
use std::io;
use tracing::info;

fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    logging::init(&config.logging)?;

    info!("Starting Car Price Estimator");
    info!(
        model = %config.model.path.display(),
        dataset = %config.dataset.path.display(),
        "Configuration loaded successfully"
    );

    // A missing or unreadable model ends the process here
    let app = App::bootstrap(config)?;

    let stdin = io::stdin();
    let mut session = Session::new(&app, stdin.lock(), io::stdout().lock());
    session.run()?;

    info!("Car Price Estimator shutting down");
    Ok(())
}
