//! call_oracle CLI - rank, inspect and forecast API call volume.

use anyhow::{Context, Result};
use call_oracle::{CallOracle, Evaluation, EvaluationOutcome, ModelChoice, OracleConfig};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "call_oracle")]
#[command(about = "Rank and forecast API call volume from a CSV log", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Call log to read (overrides CALL_ORACLE_DATASET)
    #[arg(short, long, global = true)]
    dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the most frequently called APIs
    Top {
        /// Number of APIs to list (defaults to CALL_ORACLE_TOP_N)
        n: Option<usize>,
    },

    /// Print every parsed call time for an API, oldest first
    Calls {
        /// API identifier
        api: String,
    },

    /// Print daily call counts for an API
    Series {
        /// API identifier
        api: String,
    },

    /// Fit and score the forecasting models for an API
    Evaluate {
        /// API identifier
        api: String,

        /// Forecast to show: best, SES, Holt-Winters or ARIMA
        #[arg(short, long, default_value = "best")]
        model: ModelChoice,

        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an API's rows to a CSV file
    Export {
        /// API identifier
        api: String,

        /// Output file path. Defaults to <api>_calls.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = OracleConfig::from_env()?;
    if let Some(dataset) = cli.dataset {
        config.dataset = dataset;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    let oracle = CallOracle::open(&config.dataset)
        .with_context(|| format!("Failed to load call log {}", config.dataset.display()))?;

    match cli.command {
        Commands::Top { n } => {
            let n = n.unwrap_or(config.top_n);
            let frequencies = oracle.log().api_frequencies();
            for (rank, frequency) in frequencies.iter().take(n).enumerate() {
                println!(
                    "{:>3}. {} ({} calls)",
                    rank + 1,
                    frequency.api_code,
                    frequency.calls
                );
            }
        }
        Commands::Calls { api } => {
            for time in oracle.raw_calls(&api) {
                println!("{}", time.format("%Y-%m-%d %H:%M:%S"));
            }
        }
        Commands::Series { api } => {
            let series = oracle.build_daily_series(&api);
            if series.is_empty() {
                println!("No data available for API '{}'", api);
            }
            for point in series.points() {
                println!("{} {}", point.date, point.count);
            }
        }
        Commands::Evaluate { api, model, json } => {
            let outcome = oracle.evaluate(&api);
            if json {
                println!("{}", outcome.to_json()?);
            } else {
                println!("{}", outcome);
                if let EvaluationOutcome::Evaluated(evaluation) = &outcome {
                    print_forecast(evaluation, model);
                }
            }
        }
        Commands::Export { api, output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(oracle.export_file_name(&api)));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let rows = oracle.write_csv(&api, BufWriter::new(file))?;
            info!("Wrote {} rows for {} to {}", rows, api, path.display());
            println!("Wrote {} rows to {}", rows, path.display());
        }
    }

    Ok(())
}

fn print_forecast(evaluation: &Evaluation, choice: ModelChoice) {
    let Some(run) = evaluation.forecast_for(choice) else {
        println!("No usable forecast");
        return;
    };

    println!();
    println!("{} forecast:", run.model);
    println!("{:<12}{:>10}{:>12}", "date", "actual", "forecast");
    for ((date, actual), forecast) in evaluation
        .test_dates()
        .iter()
        .zip(evaluation.actual())
        .zip(&run.forecast)
    {
        match forecast {
            Some(value) => println!("{:<12}{:>10}{:>12.2}", date, actual, value),
            None => println!("{:<12}{:>10}{:>12}", date, actual, "NaN"),
        }
    }
}
