//! # acfperiod
//!
//! Command-line interface for autocorrelation-based seasonality detection.

use std::path::PathBuf;

use acfperiod::data::{load_column, load_metric_csv, MetricSeries, VALUE_COLUMN};
use acfperiod::detection::{AcfMethod, PeakSelection, DEFAULT_MAX_LAG};
use acfperiod::synthetic::{generate_seasonal_series, SyntheticConfig};
use acfperiod::utils::stats::min_max;
use acfperiod::utils::{mean, std_dev};
use acfperiod::{SeasonalityConfig, SeasonalityDetector, SeasonalityResult};
use chrono::Duration;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

type CliResult<T> = std::result::Result<T, String>;

/// Search window of the synthetic demo.
const SYNTH_MAX_LAG: usize = 30;

#[derive(Parser)]
#[command(name = "acfperiod")]
#[command(about = "Seasonality period detection via autocorrelation", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the seasonality period of a column in a CSV file
    Detect {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Column holding the metric values
        #[arg(short, long, default_value = VALUE_COLUMN)]
        column: String,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Generate a synthetic seasonal series and detect its period
    Synth {
        /// True seasonal period in samples
        #[arg(short, long, default_value = "10")]
        period: usize,

        /// Number of samples
        #[arg(short, long, default_value = "500")]
        length: usize,

        /// Standard deviation of the Gaussian noise
        #[arg(short, long, default_value = "2.0")]
        noise: f64,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Print shape, sampling interval and statistics of a metric CSV
    Summary {
        /// Input CSV file with `timestamp` and `value` columns
        #[arg(short, long)]
        input: PathBuf,
    },
}

impl Commands {
    /// Search window used when `--max-lag` is not given.
    fn default_max_lag(&self) -> usize {
        match self {
            Commands::Synth { .. } => SYNTH_MAX_LAG,
            Commands::Detect { .. } | Commands::Summary { .. } => DEFAULT_MAX_LAG,
        }
    }
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Largest lag to evaluate [default: 50 for detect, 30 for synth]
    #[arg(short = 'm', long)]
    max_lag: Option<usize>,

    /// Autocorrelation estimator
    #[arg(long, value_enum, default_value = "fft")]
    method: MethodArg,

    /// Peak search strategy
    #[arg(long, value_enum, default_value = "global")]
    selection: SelectionArg,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Fft,
    Direct,
}

#[derive(Clone, Copy, ValueEnum)]
enum SelectionArg {
    Global,
    FirstLocal,
}

impl SearchArgs {
    fn detector(&self, default_max_lag: usize) -> SeasonalityDetector {
        let method = match self.method {
            MethodArg::Fft => AcfMethod::Fft,
            MethodArg::Direct => AcfMethod::Direct,
        };
        let selection = match self.selection {
            SelectionArg::Global => PeakSelection::GlobalMaximum,
            SelectionArg::FirstLocal => PeakSelection::FirstLocalMaximum,
        };
        SeasonalityDetector::new(
            SeasonalityConfig::default()
                .with_max_lag(self.max_lag.unwrap_or(default_max_lag))
                .with_method(method)
                .with_selection(selection),
        )
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "acfperiod=info",
        _ => "acfperiod=debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(result: &SeasonalityResult) -> CliResult<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| format!("Failed to encode JSON: {}", e))?;
    println!("{}", json);
    Ok(())
}

/// Render a duration as e.g. `1d 2h`, `45m` or `30s`.
fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let (days, hours) = (total / 86_400, (total % 86_400) / 3_600);
    let (minutes, seconds) = ((total % 3_600) / 60, total % 60);

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m"), (seconds, "s")]
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// Wall-clock length of `period` samples, or `None` if it does not fit a `Duration`.
fn period_span(step: Duration, period: usize) -> Option<Duration> {
    i32::try_from(period).ok().and_then(|p| step.checked_mul(p))
}

fn run_detect(
    input: PathBuf,
    column: String,
    search: SearchArgs,
    default_max_lag: usize,
) -> CliResult<()> {
    let detector = search.detector(default_max_lag);

    // Keep timestamps around when reading the standard layout
    let (values, metrics): (Vec<f64>, Option<MetricSeries>) = if column == VALUE_COLUMN {
        match load_metric_csv(&input) {
            Ok(metrics) => (metrics.values.clone(), Some(metrics)),
            Err(acfperiod::data::DataError::MissingColumn { column: missing, .. })
                if missing != VALUE_COLUMN =>
            {
                (load_column(&input, &column).map_err(|e| e.to_string())?, None)
            }
            Err(e) => return Err(e.to_string()),
        }
    } else {
        (load_column(&input, &column).map_err(|e| e.to_string())?, None)
    };

    let result = detector.detect(&values).map_err(|e| e.to_string())?;

    if search.json {
        return print_json(&result);
    }

    println!(
        "Loaded {} data points from {}",
        values.len(),
        input.display()
    );
    match result.period {
        Some(period) => {
            let span = metrics
                .as_ref()
                .and_then(MetricSeries::sampling_interval)
                .and_then(|step| period_span(step, period));
            match span {
                Some(span) => println!(
                    "Detected seasonality period: {} data points (~{})",
                    period,
                    format_duration(span)
                ),
                None => println!("Detected seasonality period: {} data points", period),
            }
        }
        None => println!("No seasonality detected within the given range of lags."),
    }

    Ok(())
}

fn run_synth(
    period: usize,
    length: usize,
    noise: f64,
    seed: Option<u64>,
    search: SearchArgs,
    default_max_lag: usize,
) -> CliResult<()> {
    let mut config = SyntheticConfig::new(period, length).with_noise(noise);
    config.seed = seed;
    let series = generate_seasonal_series(&config).map_err(|e| e.to_string())?;

    let result = search
        .detector(default_max_lag)
        .detect(&series)
        .map_err(|e| e.to_string())?;

    if search.json {
        return print_json(&result);
    }

    match result.period {
        Some(detected) => println!(
            "Detected seasonality period: {} data points (True: {})",
            detected, period
        ),
        None => println!("No seasonality detected within the given range of lags."),
    }

    Ok(())
}

fn run_summary(input: PathBuf) -> CliResult<()> {
    let metrics = load_metric_csv(&input).map_err(|e| e.to_string())?;
    let (rows, columns) = metrics.shape();

    println!("Shape of data: ({}, {})", rows, columns);
    println!("Number of observations: {}", metrics.len());
    if let Some(step) = metrics.sampling_interval() {
        println!("Sampling interval: {}", format_duration(step));
    }
    println!("Mean: {:.4}", mean(&metrics.values));
    if metrics.len() > 1 {
        println!("Std dev: {:.4}", std_dev(&metrics.values));
    }
    if let Some((lo, hi)) = min_max(&metrics.values) {
        println!("Min: {:.4}", lo);
        println!("Max: {:.4}", hi);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let default_max_lag = cli.command.default_max_lag();
    let result = match cli.command {
        Commands::Detect {
            input,
            column,
            search,
        } => run_detect(input, column, search, default_max_lag),

        Commands::Synth {
            period,
            length,
            noise,
            seed,
            search,
        } => run_synth(period, length, noise, seed, search, default_max_lag),

        Commands::Summary { input } => run_summary(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
