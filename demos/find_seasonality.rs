//! Seasonality detection example.
//!
//! Run with: cargo run --example find_seasonality

use acfperiod::detection::{AcfMethod, PeakSelection};
use acfperiod::synthetic::{generate_seasonal_series, white_noise, SyntheticConfig};
use acfperiod::{SeasonalityConfig, SeasonalityDetector, SeasonalityError};

fn main() -> Result<(), SeasonalityError> {
    println!("=== Seasonality Detection Example ===\n");

    // 1. Noisy seasonal series
    println!("--- Noisy Seasonal Series ---");

    let season_length = 10;
    let config = SyntheticConfig::new(season_length, 500).with_seed(2024);
    let series = generate_seasonal_series(&config)?;

    println!(
        "Generated: {} observations, 15 + 10*sin(2*pi*t/{}) + N(0, 2)",
        series.len(),
        season_length
    );

    let detector = SeasonalityDetector::new(SeasonalityConfig::default().with_max_lag(30));
    let result = detector.detect(&series)?;

    match result.period {
        Some(period) => println!(
            "Detected seasonality period: {} data points (True: {})",
            period, season_length
        ),
        None => println!("No seasonality detected within the given range of lags."),
    }
    if let Some(strength) = result.strength {
        println!("  ACF at period: {:.4}", strength);
    }

    println!("\nAutocorrelation (first 12 lags):");
    for (lag, value) in result.acf.iter().enumerate().skip(1).take(12) {
        println!("  lag {:>2}: {:>7.4}", lag, value);
    }

    // 2. White noise
    println!("\n--- White Noise ---");

    let noise = white_noise(2000, 1.0, 7)?;
    let result = detector.detect(&noise)?;
    println!("Detected: {:?}", result.period);

    // 3. Harmonics: global maximum vs first local peak
    println!("\n--- Global Maximum vs First Local Peak ---");

    let harmonic: Vec<f64> = (0..400)
        .map(|t| {
            let alternating = if t % 2 == 0 { 1.0 } else { -1.0 };
            (2.0 * std::f64::consts::PI * t as f64 / 4.0).sin() + alternating
        })
        .collect();

    for selection in [PeakSelection::GlobalMaximum, PeakSelection::FirstLocalMaximum] {
        let config = SeasonalityConfig::default()
            .with_max_lag(8)
            .with_method(AcfMethod::Direct)
            .with_selection(selection);
        let result = SeasonalityDetector::new(config).detect(&harmonic)?;
        println!("  {:?}: {:?}", selection, result.period);
    }

    // 4. Constant series
    println!("\n--- Constant Series ---");

    match detector.detect(&[5.0; 60]) {
        Ok(result) => println!("Detected: {:?}", result.period),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}
