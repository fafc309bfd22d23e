//! Sample Dataset Generator
//!
//! Writes a synthetic `CarPrice.csv` so the dataset view can be tried without
//! the real data. Values follow rough real-world relationships: heavier, more
//! powerful cars cost more and get fewer miles per gallon.

use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;
use std::io;
use tracing::info;

/// Car generator for sample data
struct CarGenerator {
    rng: rand::rngs::ThreadRng,
    car_counter: u64,
}

/// One generated row, in `CarPrice.csv` column order
#[derive(Debug, Serialize)]
struct SampleCar {
    #[serde(rename = "car_ID")]
    car_id: u64,
    #[serde(rename = "CarName")]
    name: String,
    #[serde(rename = "fueltype")]
    fuel_type: &'static str,
    highwaympg: u32,
    curbweight: u32,
    horsepower: u32,
    price: f64,
}

impl CarGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            car_counter: 0,
        }
    }

    /// Generate an economy car
    fn generate_economy(&mut self) -> SampleCar {
        self.car_counter += 1;
        let curbweight = self.rng.gen_range(1700..2400);
        let horsepower = self.rng.gen_range(48..100);
        self.build(curbweight, horsepower)
    }

    /// Generate a luxury or performance car
    fn generate_premium(&mut self) -> SampleCar {
        self.car_counter += 1;
        let curbweight = self.rng.gen_range(2700..4100);
        let horsepower = self.rng.gen_range(120..290);
        self.build(curbweight, horsepower)
    }

    fn build(&mut self, curbweight: u32, horsepower: u32) -> SampleCar {
        let highwaympg = (60.0 - curbweight as f64 / 160.0 - horsepower as f64 / 25.0
            + self.rng.gen_range(-2.0..2.0))
        .clamp(16.0, 54.0) as u32;

        let price = (-7500.0 + 4.2 * curbweight as f64 + 90.0 * horsepower as f64
            - 60.0 * highwaympg as f64
            + self.rng.gen_range(-1500.0..1500.0))
        .max(5000.0)
        .round();

        let make = self.random_choice(&["toyota", "honda", "mazda", "nissan", "bmw", "audi", "volvo"]);
        let model = self.random_choice(&["corolla", "civic", "glc", "sentra", "320i", "100ls", "244dl"]);

        SampleCar {
            car_id: self.car_counter,
            name: format!("{} {}", make, model),
            fuel_type: self.random_choice(&["gas", "gas", "gas", "diesel"]),
            highwaympg,
            curbweight,
            horsepower,
            price,
        }
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

/// Write `cars` as CSV with a header row
fn write_cars<W: io::Write>(writer: W, cars: impl IntoIterator<Item = SampleCar>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for car in cars {
        writer.serialize(&car)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_dataset=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let output = args.get(1).map(|s| s.as_str()).unwrap_or("CarPrice.csv");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(205);
    let premium_rate: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.3);

    info!(output = %output, count = count, premium_rate = premium_rate, "Generating sample dataset");

    let file = std::fs::File::create(output).with_context(|| format!("Failed to create {}", output))?;

    let mut generator = CarGenerator::new();
    let mut rng = rand::thread_rng();
    let mut premium_count = 0;

    let cars = (0..count).map(|_| {
        if rng.gen_bool(premium_rate.clamp(0.0, 1.0)) {
            premium_count += 1;
            generator.generate_premium()
        } else {
            generator.generate_economy()
        }
    });
    write_cars(io::BufWriter::new(file), cars)
        .with_context(|| format!("Failed to write {}", output))?;

    info!(
        "Completed! Wrote {} cars ({} economy, {} premium) to {}",
        count,
        count - premium_count,
        premium_count,
        output
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_price_estimator::dataset::Dataset;

    #[test]
    fn test_output_loads_as_dataset() {
        let mut generator = CarGenerator::new();
        let cars: Vec<SampleCar> = (0..20)
            .map(|i| {
                if i % 3 == 0 {
                    generator.generate_premium()
                } else {
                    generator.generate_economy()
                }
            })
            .collect();

        let mut buffer = Vec::new();
        write_cars(&mut buffer, cars).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("car_ID,CarName,fueltype,highwaympg,curbweight,horsepower,price\n"));

        let dataset = Dataset::from_reader(text.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 20);
        assert!(dataset.cars().iter().all(|c| c.price >= 5000.0));
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let car = SampleCar {
            car_id: 1,
            name: "toyota corolla, wagon".to_string(),
            fuel_type: "gas",
            highwaympg: 30,
            curbweight: 2300,
            horsepower: 90,
            price: 9500.0,
        };

        let mut buffer = Vec::new();
        write_cars(&mut buffer, [car]).unwrap();

        let dataset = Dataset::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(dataset.column("CarName").unwrap(), ["toyota corolla, wagon"]);
        assert_eq!(dataset.column("horsepower").unwrap(), ["90"]);
    }
}
