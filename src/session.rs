//! Interactive session loop.
//!
//! Reads menu selections and predict inputs line by line and writes every view
//! as text. Each action runs to completion before the next line is read.

use crate::app::App;
use crate::metrics::SessionMetrics;
use crate::types::car::PredictionInput;
use crate::views::{self, View};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, info};

/// Labels of the three predict inputs, in feature order
const INPUT_LABELS: [&str; 3] = ["Highway-mpg", "Curbweight", "Horsepower"];

/// One user's session over a line-oriented input and a text output
pub struct Session<'a, R, W> {
    app: &'a App,
    input: R,
    output: W,
    selected: View,
    metrics: SessionMetrics,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(app: &'a App, input: R, output: W) -> Self {
        Self {
            app,
            input,
            output,
            selected: View::default(),
            metrics: SessionMetrics::new(),
        }
    }

    /// Currently selected view
    pub fn selected(&self) -> View {
        self.selected
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> Result<()> {
        info!(model = %self.app.service.model_name(), "Session started");

        loop {
            self.write_menu()?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };

            let selection = line.trim();
            if selection.is_empty() {
                continue;
            }
            if matches!(selection.to_lowercase().as_str(), "q" | "quit" | "exit") {
                break;
            }

            match View::from_selection(selection) {
                Some(view) => {
                    self.selected = view;
                    if !self.show(view)? {
                        break;
                    }
                }
                None => {
                    writeln!(self.output, "Unknown mode `{}`.\n", selection)?;
                }
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        self.metrics.print_summary();
        Ok(())
    }

    /// Dispatch one view. Returns false when input ended inside the view.
    fn show(&mut self, view: View) -> Result<bool> {
        debug!(view = ?view, "View selected");

        let rendered = views::render(view, self.app);
        self.output.write_all(rendered.text.as_bytes())?;

        match view {
            View::Predict => return self.predict(),
            View::Dataset => self.metrics.record_dataset_view(rendered.ok),
            View::Home | View::About => {}
        }

        writeln!(self.output)?;
        Ok(true)
    }

    /// Read the three inputs and run one prediction
    fn predict(&mut self) -> Result<bool> {
        let mut values = [0.0; 3];
        for (value, label) in values.iter_mut().zip(INPUT_LABELS) {
            match self.prompt_value(label)? {
                Some(v) => *value = v,
                None => return Ok(false),
            }
        }

        let input = PredictionInput::new(values[0], values[1], values[2]);
        let start = Instant::now();
        let outcome = self.app.service.estimate(&input);
        self.metrics.record_prediction(start.elapsed(), outcome.is_success());

        let marker = if outcome.is_success() { "OK" } else { "ERROR" };
        writeln!(self.output, "\n{}: {}\n", marker, outcome.message())?;
        Ok(true)
    }

    /// Prompt until an acceptable value is entered. `None` when input ends.
    fn prompt_value(&mut self, label: &str) -> Result<Option<f64>> {
        loop {
            write!(self.output, "{} (min 0) [0]: ", label)?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };

            match PredictionInput::parse_field(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "Invalid {}: {}. Try again.", label, e)?,
            }
        }
    }

    fn write_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Application Navigation")?;
        for (i, view) in View::ALL.iter().enumerate() {
            let marker = if *view == self.selected { '>' } else { ' ' };
            writeln!(self.output, "{} {}) {}", marker, i + 1, view)?;
        }
        write!(self.output, "  q) Quit\nSelect a mode: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}
