//! CLI entry point for the bike-share statistics tool.
//!
//! Provides subcommands for previewing raw trip files, condensing them into
//! the common five-column layout, and summarizing or comparing the results.

use anyhow::{Context, Result, anyhow};
use bike_share_stats::analyzers::compare::compare_cities;
use bike_share_stats::analyzers::histogram::{
    default_overall_edges, default_user_type_edges, duration_histogram, histograms_by_user_type,
};
use bike_share_stats::analyzers::ridership::ridership_split;
use bike_share_stats::analyzers::summarize;
use bike_share_stats::city::City;
use bike_share_stats::condense::{condense_file, first_raw_row, read_condensed_file};
use bike_share_stats::config::DatasetConfig;
use bike_share_stats::error::TripError;
use bike_share_stats::output::{append_summary, print_pretty, to_json};
use bike_share_stats::report::{describe_comparison, render_histogram, render_summary};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_share_stats")]
#[command(about = "Condense and summarize bike-share trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the first trip of each raw file
    First {
        /// Raw files to preview (defaults to every raw file in the config)
        files: Vec<PathBuf>,

        /// Dataset config JSON file
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Condense one raw city file into the five-column layout
    Condense {
        /// Raw trip file
        input: PathBuf,

        /// Condensed output file
        output: PathBuf,

        /// Source city (inferred from the input file name when omitted)
        #[arg(long)]
        city: Option<City>,
    },
    /// Condense every raw file listed in the config
    CondenseAll {
        /// Dataset config JSON file
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Summarize a condensed file
    Summarize {
        /// Condensed trip file
        file: PathBuf,

        /// City label (inferred from the file name when omitted)
        #[arg(long)]
        city: Option<City>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// CSV file to append the summary row to
        #[arg(short, long)]
        append: Option<String>,
    },
    /// Bin trip durations of a condensed file
    Histogram {
        /// Condensed trip file
        file: PathBuf,

        /// Bin edges in minutes, e.g. 0,10,20,30
        #[arg(long, value_delimiter = ',')]
        edges: Option<Vec<f64>>,

        /// Separate histograms for subscribers and customers
        #[arg(long, default_value_t = false)]
        by_user_type: bool,
    },
    /// Compare ridership across the condensed files in the config
    Compare {
        /// Dataset config JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_share_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_share_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::First { files, config } => {
            let files = if files.is_empty() {
                DatasetConfig::load_or_default(config.as_deref())?
                    .iter()
                    .map(|d| d.raw.clone())
                    .collect()
            } else {
                files
            };
            preview(&files)?;
        }
        Commands::Condense {
            input,
            output,
            city,
        } => {
            let city = resolve_city(city, &input)?;
            let rows = condense_file(city, &input, &output)
                .with_context(|| format!("failed to condense {}", input.display()))?;
            println!("Condensed {rows} {city} trips into {}.", output.display());
        }
        Commands::CondenseAll { config } => {
            let config = DatasetConfig::load_or_default(config.as_deref())?;
            for dataset in config.iter() {
                let rows = condense_file(dataset.city, &dataset.raw, &dataset.condensed)
                    .with_context(|| format!("failed to condense {}", dataset.raw.display()))?;
                println!(
                    "Condensed {rows} {} trips into {}.",
                    dataset.city,
                    dataset.condensed.display()
                );
            }
        }
        Commands::Summarize {
            file,
            city,
            json,
            append,
        } => {
            let city = resolve_city(city, &file)?;
            summarize_file(city, &file, json, append.as_deref())?;
        }
        Commands::Histogram {
            file,
            edges,
            by_user_type,
        } => {
            histogram_file(&file, edges, by_user_type)?;
        }
        Commands::Compare { config, json } => {
            let config = DatasetConfig::load_or_default(config.as_deref())?;
            compare(&config, json)?;
        }
    }

    Ok(())
}

/// Uses the explicit city, or falls back to the file name prefix.
fn resolve_city(city: Option<City>, path: &Path) -> Result<City> {
    city.or_else(|| City::from_path(path)).ok_or_else(|| {
        anyhow!(
            "cannot infer city from {}, pass --city",
            path.display()
        )
    })
}

#[tracing::instrument(skip_all, fields(files = files.len()))]
fn preview(files: &[PathBuf]) -> Result<()> {
    for file in files {
        let label = City::from_path(file)
            .map(|c| c.to_string())
            .unwrap_or_else(|| file.display().to_string());
        println!("\nCity: {label}");

        match first_raw_row(file).with_context(|| format!("failed to read {}", file.display()))? {
            Some(row) => println!("{row:#?}"),
            None => println!("(no trips)"),
        }
    }
    Ok(())
}

#[tracing::instrument(skip_all, fields(city = %city, file = %file.display()))]
fn summarize_file(city: City, file: &Path, json: bool, append: Option<&str>) -> Result<()> {
    let trips = read_condensed_file(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let summary = summarize(city, &trips)?;
    print_pretty(&summary);

    if json {
        println!("{}", to_json(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }

    if let Some(path) = append {
        append_summary(path, &summary)?;
        info!(path, "Summary row appended");
    }

    Ok(())
}

#[tracing::instrument(skip_all, fields(file = %file.display(), by_user_type = by_user_type))]
fn histogram_file(file: &Path, edges: Option<Vec<f64>>, by_user_type: bool) -> Result<()> {
    let trips = read_condensed_file(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    if by_user_type {
        let edges = edges.unwrap_or_else(default_user_type_edges);
        let histograms = histograms_by_user_type(&trips, edges)?;
        print!("{}", render_histogram("Subscriber trip duration (mins)", &histograms.subscriber));
        print!("{}", render_histogram("Customer trip duration (mins)", &histograms.customer));
    } else {
        let edges = edges.unwrap_or_else(default_overall_edges);
        let histogram = duration_histogram(&trips, edges)?;
        print!("{}", render_histogram("Trip duration (mins)", &histogram));
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
fn compare(config: &DatasetConfig, json: bool) -> Result<()> {
    let mut splits = Vec::new();

    for dataset in config.iter() {
        let trips = read_condensed_file(&dataset.condensed)
            .with_context(|| format!("failed to read {}", dataset.condensed.display()))?;
        match ridership_split(&trips) {
            Ok(split) => splits.push((dataset.city, split)),
            Err(TripError::DivisionUndefined(what)) => {
                warn!(city = %dataset.city, what, "Skipping city with undefined ridership split");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let Some(comparison) = compare_cities(&splits) else {
        println!("No city has a defined ridership split.");
        return Ok(());
    };

    if json {
        println!("{}", to_json(&comparison)?);
    } else {
        print!("{}", describe_comparison(&comparison));
    }

    Ok(())
}
