//! The four application views and their text renderers

use crate::app::App;
use crate::dataset::{self, stats};
use crate::error::EstimatorError;
use std::fmt;
use tracing::warn;

/// One of the mutually exclusive application modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Predict,
    Dataset,
    About,
}

impl View {
    /// All views in menu order
    pub const ALL: [View; 4] = [View::Home, View::Predict, View::Dataset, View::About];

    /// Menu title
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Predict => "Car Price Prediction",
            View::Dataset => "Dataset & Visualization",
            View::About => "About",
        }
    }

    /// Resolve a menu entry: its number (`1`..`4`) or a case-insensitive name
    pub fn from_selection(selection: &str) -> Option<View> {
        let selection = selection.trim().to_lowercase();
        if let Ok(number) = selection.parse::<usize>() {
            return number.checked_sub(1).and_then(|i| View::ALL.get(i)).copied();
        }
        match selection.as_str() {
            "home" => Some(View::Home),
            "predict" | "prediction" => Some(View::Predict),
            "dataset" | "visualization" => Some(View::Dataset),
            "about" => Some(View::About),
            _ => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Render a non-interactive view.
///
/// The predict view only renders its heading here; its inputs are read by the session.
pub fn render(view: View, app: &App) -> Rendered {
    match view {
        View::Home => Rendered::ok(render_home(app)),
        View::Predict => Rendered::ok(heading(
            "Car Price Prediction",
            "Enter the independent variables to estimate a car price",
        )),
        View::Dataset => render_dataset(app),
        View::About => Rendered::ok(render_about(app)),
    }
}

/// Text produced by a view, and whether it rendered without an error message
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub ok: bool,
}

impl Rendered {
    fn ok(text: String) -> Self {
        Self { text, ok: true }
    }

    fn error(text: String) -> Self {
        Self { text, ok: false }
    }
}

fn heading(title: &str, subtitle: &str) -> String {
    format!("{}\n{}\n{}\n\n", title, "=".repeat(title.len()), subtitle)
}

fn render_home(app: &App) -> String {
    let mut out = heading(
        "Welcome to the Car Price Prediction App",
        "This application lets you:",
    );
    out.push_str(
        "  - Predict a car price from Highway-mpg, Curbweight and Horsepower.\n\
         \x20 - Browse the full car dataset with charts and descriptive statistics.\n\n\
         Pick a mode from the menu to get started.\n",
    );
    out.push_str(&format!("[image: {}]\n", app.config.display.home_image.display()));
    out
}

fn render_dataset(app: &App) -> Rendered {
    let path = &app.config.dataset.path;
    let mut out = heading("Car Dataset and Visualization", "");

    let dataset = match dataset::load_dataset(path) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!(path = %path.display(), error = %e, kind = e.kind(), "Dataset view unavailable");
            let message = match e {
                EstimatorError::DatasetMissing { .. } => format!(
                    "Dataset file `{}` was not found. Make sure it has been placed in the expected directory.",
                    path.display()
                ),
                other => format!("An error occurred while processing the dataset: {}", other),
            };
            out.push_str(&format!("ERROR: {}\n", message));
            return Rendered::error(out);
        }
    };

    out.push_str("Dataset Table\n-------------\n");
    out.push_str(&dataset.render_table(app.config.dataset.preview_rows));

    out.push_str("\nDescriptive Statistics\n----------------------\n");
    out.push_str(&stats::render_summary(&stats::describe(&dataset)));

    for chart in dataset::price_charts(&dataset) {
        out.push('\n');
        out.push_str(&chart.render());
    }

    Rendered::ok(out)
}

fn render_about(app: &App) -> String {
    let mut out = heading(
        "About",
        "Car Price Prediction estimates the price of a car with a machine learning model",
    );
    out.push_str(
        "based on these parameters:\n\
         \x20 - Highway-mpg\n\
         \x20 - Curbweight\n\
         \x20 - Horsepower\n\n\
         Main features:\n\
         \x20 - Real-time car price prediction\n\
         \x20 - Dataset charts\n\
         \x20 - Dataset table and descriptive statistics\n\n",
    );
    out.push_str(&format!(
        "Make sure the model `{}` and the dataset `{}` are present before use.\n\n",
        app.config.model.path.display(),
        app.config.dataset.path.display()
    ));
    out.push_str("For further help, please contact the application developer.\n");
    out.push_str("Developed by: Niken Setyo N\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::dataset::tests::SAMPLE_CSV;
    use crate::models::{FeatureRow, PriceModel};
    use std::sync::Arc;

    struct ConstantModel;

    impl PriceModel for ConstantModel {
        fn name(&self) -> &str {
            "constant"
        }

        fn predict(&self, rows: &[FeatureRow]) -> anyhow::Result<Vec<f64>> {
            Ok(vec![10000.0; rows.len()])
        }
    }

    fn app_with_dataset(path: std::path::PathBuf) -> App {
        let mut config = AppConfig::default();
        config.dataset.path = path;
        App::with_model(config, Arc::new(ConstantModel))
    }

    #[test]
    fn test_from_selection() {
        assert_eq!(View::from_selection("1"), Some(View::Home));
        assert_eq!(View::from_selection(" 2 "), Some(View::Predict));
        assert_eq!(View::from_selection("4"), Some(View::About));
        assert_eq!(View::from_selection("Dataset"), Some(View::Dataset));
        assert_eq!(View::from_selection("0"), None);
        assert_eq!(View::from_selection("5"), None);
        assert_eq!(View::from_selection("settings"), None);
    }

    #[test]
    fn test_static_views() {
        let app = app_with_dataset("CarPrice.csv".into());

        let home = render(View::Home, &app);
        assert!(home.ok);
        assert!(home.text.contains("[image: car.jpg]"));

        let about = render(View::About, &app);
        assert!(about.text.contains("Highway-mpg"));
        assert!(about.text.contains("Developed by"));
    }

    #[test]
    fn test_dataset_view_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with_dataset(dir.path().join("CarPrice.csv"));

        let rendered = render(View::Dataset, &app);

        assert!(!rendered.ok);
        assert!(rendered.text.contains("was not found"));
    }

    #[test]
    fn test_dataset_view_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CarPrice.csv");
        std::fs::write(&path, "highwaympg,price\n27,13495\n").unwrap();
        let app = app_with_dataset(path);

        let rendered = render(View::Dataset, &app);

        assert!(!rendered.ok);
        assert!(rendered.text.contains("error occurred while processing the dataset"));
        assert!(rendered.text.contains("curbweight"));
    }

    #[test]
    fn test_dataset_view_renders_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CarPrice.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let app = app_with_dataset(path);

        let rendered = render(View::Dataset, &app);

        assert!(rendered.ok);
        assert!(rendered.text.contains("Dataset Table"));
        assert!(rendered.text.contains("4 of 4 rows"));
        assert!(rendered.text.contains("Descriptive Statistics"));
        assert!(rendered.text.contains("Highway-mpg vs Car Price"));
        assert!(rendered.text.contains("Curbweight vs Car Price"));
        assert!(rendered.text.contains("Horsepower vs Car Price"));
    }
}
