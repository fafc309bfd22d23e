//! Line charts of each model variable against price

use super::Dataset;
use crate::types::car::CarRecord;

/// Plot area size in characters
const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 12;

/// A two-series line chart: one x variable against price
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Points sorted by x
    pub points: Vec<(f64, f64)>,
}

impl LineChart {
    /// Build a chart from `(x, y)` points, sorting them by x
    pub fn new(title: &str, x_label: &str, y_label: &str, mut points: Vec<(f64, f64)>) -> Self {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            points,
        }
    }

    /// Render the chart as a fixed-size text plot.
    ///
    /// Consecutive points are joined by vertical runs so the line reads
    /// left to right.
    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.title);
        if self.points.is_empty() {
            out.push_str("(no data)\n");
            return out;
        }

        let (x_min, x_max) = bounds(self.points.iter().map(|p| p.0));
        let (y_min, y_max) = bounds(self.points.iter().map(|p| p.1));

        let mut grid = vec![vec![' '; PLOT_WIDTH]; PLOT_HEIGHT];
        let mut previous: Option<(usize, usize)> = None;
        for &(x, y) in &self.points {
            let col = scale(x, x_min, x_max, PLOT_WIDTH);
            let row = PLOT_HEIGHT - 1 - scale(y, y_min, y_max, PLOT_HEIGHT);

            if let Some((prev_col, prev_row)) = previous {
                if prev_col == col || prev_col + 1 == col {
                    let (top, bottom) = (prev_row.min(row), prev_row.max(row));
                    for r in top..=bottom {
                        if grid[r][col] == ' ' {
                            grid[r][col] = '|';
                        }
                    }
                }
            }
            grid[row][col] = '*';
            previous = Some((col, row));
        }

        let y_top = format!("{:.0}", y_max);
        let y_bottom = format!("{:.0}", y_min);
        let margin = y_top.len().max(y_bottom.len());

        out.push_str(&format!("{:>margin$} {}\n", "", self.y_label, margin = margin));
        for (i, line) in grid.iter().enumerate() {
            let label = match i {
                0 => y_top.as_str(),
                _ if i == PLOT_HEIGHT - 1 => y_bottom.as_str(),
                _ => "",
            };
            let line: String = line.iter().collect();
            out.push_str(&format!("{:>margin$} |{}\n", label, line.trim_end(), margin = margin));
        }
        out.push_str(&format!(
            "{:>margin$} +{}\n",
            "",
            "-".repeat(PLOT_WIDTH),
            margin = margin
        ));

        let x_left = format!("{}", x_min);
        let x_right = format!("{}", x_max);
        let gap = PLOT_WIDTH.saturating_sub(x_left.len() + x_right.len());
        out.push_str(&format!(
            "{:>margin$}  {}{}{}\n",
            "",
            x_left,
            " ".repeat(gap),
            x_right,
            margin = margin
        ));
        out.push_str(&format!(
            "{:>margin$}  {:^width$}\n",
            "",
            self.x_label,
            margin = margin,
            width = PLOT_WIDTH
        ));
        out
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Map `value` in `[min, max]` onto `0..cells`
fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max <= min {
        return 0;
    }
    let position = (value - min) / (max - min) * (cells - 1) as f64;
    (position.round() as usize).min(cells - 1)
}

/// The three charts of the dataset view: each model variable against price
pub fn price_charts(dataset: &Dataset) -> Vec<LineChart> {
    let series: [(&str, &str, fn(&CarRecord) -> f64); 3] = [
        ("Highway-mpg vs Car Price", "Highway-mpg", |c: &CarRecord| c.highwaympg),
        ("Curbweight vs Car Price", "Curbweight", |c: &CarRecord| c.curbweight),
        ("Horsepower vs Car Price", "Horsepower", |c: &CarRecord| c.horsepower),
    ];

    series
        .iter()
        .map(|(title, x_label, x_of)| {
            let points = dataset.cars().iter().map(|c| (x_of(c), c.price)).collect();
            LineChart::new(title, x_label, "Car Price", points)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::SAMPLE_CSV;

    #[test]
    fn test_price_charts() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let charts = price_charts(&dataset);

        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].title, "Highway-mpg vs Car Price");
        assert_eq!(charts[2].x_label, "Horsepower");

        for chart in &charts {
            assert_eq!(chart.points.len(), dataset.len());
            assert!(chart.points.windows(2).all(|w| w[0].0 <= w[1].0));
        }

        // Curbweight sorted ascending: 2337 first
        assert_eq!(charts[1].points[0], (2337.0, 13950.0));
    }

    #[test]
    fn test_render_marks_extremes() {
        let chart = LineChart::new(
            "Horsepower vs Car Price",
            "Horsepower",
            "Car Price",
            vec![(200.0, 30000.0), (50.0, 6000.0), (120.0, 15000.0)],
        );

        let rendered = chart.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Horsepower vs Car Price");
        assert!(lines[2].starts_with("30000 |"));
        assert!(lines[2].ends_with('*'));
        assert!(lines[PLOT_HEIGHT + 1].starts_with(" 6000 |*"));
        assert!(rendered.contains("50"));
        assert!(rendered.contains("200"));
    }

    #[test]
    fn test_render_single_point_and_empty() {
        let single = LineChart::new("t", "x", "y", vec![(1.0, 1.0)]);
        assert!(single.render().contains('*'));

        let empty = LineChart::new("t", "x", "y", vec![]);
        assert!(empty.render().contains("(no data)"));
    }
}
