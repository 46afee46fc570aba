//! Output formatting and persistence for city summaries.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

use crate::analyzers::CitySummary;
use crate::city::City;
use crate::error::Result;
use crate::record::Season;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Renders any summary as pretty-printed JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Flat, one-line form of a [`CitySummary`] for CSV. Undefined statistics
/// are written as empty fields.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub city: City,
    pub n_total: u64,
    pub n_subscriber: u64,
    pub n_customer: u64,
    pub pct_subscriber: Option<f64>,
    pub pct_customer: Option<f64>,
    pub avg_duration_subscriber: Option<f64>,
    pub avg_duration_customer: Option<f64>,
    pub avg_duration: Option<f64>,
    pub n_long: Option<u64>,
    pub pct_long: Option<f64>,
    pub busiest_season: Season,
    pub busiest_season_for_subscribers: Season,
}

impl From<&CitySummary> for SummaryRow {
    fn from(summary: &CitySummary) -> Self {
        let r = summary.ridership.as_ref();
        let d = summary.durations.as_ref();
        let seasonal = &summary.seasonal;

        SummaryRow {
            city: summary.city,
            n_total: seasonal.n_total(),
            n_subscriber: seasonal.subscribers.iter().map(|(_, n)| n).sum(),
            n_customer: seasonal.customers.iter().map(|(_, n)| n).sum(),
            pct_subscriber: r.map(|r| r.pct_subscriber),
            pct_customer: r.map(|r| r.pct_customer),
            avg_duration_subscriber: r.map(|r| r.avg_duration_subscriber),
            avg_duration_customer: r.map(|r| r.avg_duration_customer),
            avg_duration: d.map(|d| d.avg_duration),
            n_long: d.map(|d| d.n_long),
            pct_long: d.map(|d| d.pct_long),
            busiest_season: summary.peaks.busiest,
            busiest_season_for_subscribers: summary.peaks.busiest_for_subscribers,
        }
    }
}

/// Appends a [`CitySummary`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summary(path: &str, summary: &CitySummary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending summary row");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(SummaryRow::from(summary))?;
    writer.flush()?;

    Ok(())
}
