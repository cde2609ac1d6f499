//! tsanalysis CLI
//!
//! Loads a dated CSV file and prints moving averages, a seasonality report and
//! an ASCII trend chart for one column.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use tsanalysis::{
    AnalysisConfig, AsciiTrendPlotter, MovingAverage, Result, SeasonalPeriod,
    SeasonalityReport, TimeSeriesAnalysis, TrendPlotter,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "tsanalysis")]
#[command(about = "Moving averages and seasonality for dated CSV data", long_about = None)]
struct Cli {
    /// Input CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Column to analyse
    #[arg(short, long)]
    column: String,

    /// Name of the date field (overrides the config file)
    #[arg(short, long)]
    date_field: Option<String>,

    /// Moving average window size
    #[arg(short, long, default_value_t = 7)]
    window: usize,

    /// Configuration file (TOML or YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chart title
    #[arg(short, long)]
    title: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    column: &'a str,
    moving_average: &'a MovingAverage,
    seasonality: &'a SeasonalityReport,
    trend: &'a tsanalysis::TrendData,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AnalysisConfig::load(cli.config.as_deref())?;
    if let Some(field) = cli.date_field {
        config.loader.date_field = field;
    }

    let dataset = tsanalysis::io::read_csv(&cli.input, &config.loader)?;
    info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names(),
        cli.input.display()
    );

    let analysis = TimeSeriesAnalysis::with_trend_config(dataset, config.trend)?;
    let ma = analysis.moving_average(&cli.column, cli.window)?;
    let report = analysis.detect_seasonality(&cli.column)?;
    let trend = analysis.trend_data(&cli.column, cli.title.as_deref())?;

    match cli.format {
        OutputFormat::Json => {
            let output = JsonOutput {
                column: &cli.column,
                moving_average: &ma,
                seasonality: &report,
                trend: &trend,
            };
            serde_json::to_writer_pretty(io::stdout().lock(), &output)?;
            println!();
        }
        OutputFormat::Text => {
            println!(
                "{}-point moving average of '{}': {} defined values, latest {}",
                ma.window_size(),
                cli.column,
                ma.defined_count(),
                ma.last()
                    .map(|v| format!("{:.4}", v))
                    .unwrap_or_else(|| "NA".to_string())
            );

            println!("Seasonality ({} observations):", report.observations());
            if report.is_empty() {
                println!("  {}", empty_report_reason(&report));
            }
            for (period, score) in report.iter() {
                println!("  {:<8} (lag {:>2}): {:+.4}", period, period.lag(), score);
            }
            if let Some((period, score)) = report.strongest() {
                println!("  strongest: {} ({:+.4})", period, score);
            }
            println!();

            let mut plotter = AsciiTrendPlotter::new(io::stdout().lock());
            plotter.plot(&trend)?;
        }
    }

    Ok(())
}

/// Why no period could be scored
fn empty_report_reason(report: &SeasonalityReport) -> &'static str {
    // lag 1 already needs three observations
    if report.observations() <= 2 * SeasonalPeriod::Daily.lag() {
        "not enough data for any period"
    } else {
        "correlation undefined for every period (zero variance)"
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = StdError::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
