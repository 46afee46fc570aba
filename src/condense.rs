//! Raw city file → normalized five-column trip file, and reading it back.
//!
//! The condensed layout is `duration,month,hour,day_of_week,user_type`,
//! never quoted. Durations are written with the shortest representation that
//! parses back to the same `f64`, so a condensed file re-reads exactly.

use chrono::Weekday;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::adapter::{ChicagoTrip, NycTrip, RawTrip, WashingtonTrip};
use crate::city::City;
use crate::error::{Result, TripError};
use crate::record::{TripRecord, UserType, weekday_name};

pub const CONDENSED_COLUMNS: [&str; 5] = ["duration", "month", "hour", "day_of_week", "user_type"];

/// One line of a condensed file.
#[derive(Debug, Serialize, Deserialize)]
struct CondensedRow {
    duration: f64,
    month: u32,
    hour: u32,
    day_of_week: String,
    user_type: UserType,
}

impl From<&TripRecord> for CondensedRow {
    fn from(trip: &TripRecord) -> Self {
        CondensedRow {
            duration: trip.duration_minutes(),
            month: trip.start_month(),
            hour: trip.start_hour(),
            day_of_week: weekday_name(trip.day_of_week()).to_string(),
            user_type: trip.user_type(),
        }
    }
}

impl CondensedRow {
    fn into_trip(self) -> Result<TripRecord> {
        let day = self
            .day_of_week
            .parse::<Weekday>()
            .map_err(|_| TripError::malformed(format!("unknown weekday {:?}", self.day_of_week)))?;
        TripRecord::new(self.duration, self.month, self.hour, day, self.user_type)
    }
}

/// Maps a per-row CSV failure to `MalformedRecord`, keeping I/O failures as-is.
fn row_error(err: csv::Error, line: u64) -> TripError {
    if err.is_io_error() {
        TripError::Csv(err)
    } else {
        TripError::malformed(err.to_string()).at_line(line)
    }
}

/// Opens a file for reading, gunzipping it when the name ends in `.gz`.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(MultiGzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Normalizes every row of a raw file in order. Stops at the first bad row.
pub fn adapt_all<T: RawTrip, R: Read>(reader: R) -> Result<Vec<TripRecord>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let mut trips = Vec::new();

    for (index, result) in rdr.deserialize::<T>().enumerate() {
        let line = index as u64 + 1;
        let raw = result.map_err(|e| row_error(e, line))?;
        trips.push(raw.to_trip().map_err(|e| e.at_line(line))?);
    }

    Ok(trips)
}

/// Picks the row layout for `city` once and normalizes the whole input.
pub fn adapt_city<R: Read>(city: City, reader: R) -> Result<Vec<TripRecord>> {
    match city {
        City::Nyc => adapt_all::<NycTrip, _>(reader),
        City::Chicago => adapt_all::<ChicagoTrip, _>(reader),
        City::Washington => adapt_all::<WashingtonTrip, _>(reader),
    }
}

/// Writes the header and one unquoted line per trip.
pub fn write_condensed<W: Write>(writer: W, trips: &[TripRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record(CONDENSED_COLUMNS)?;
    for trip in trips {
        wtr.serialize(CondensedRow::from(trip))?;
    }
    wtr.flush()?;

    Ok(())
}

/// Normalizes a raw city stream and writes the condensed form to `writer`.
///
/// Nothing is written if any row is malformed.
pub fn condense<R: Read, W: Write>(city: City, reader: R, writer: W) -> Result<Vec<TripRecord>> {
    let trips = adapt_city(city, reader)?;
    write_condensed(writer, &trips)?;
    Ok(trips)
}

/// File-to-file [`condense`]. The output file is created only after the
/// whole input has been normalized, so a malformed input leaves no output.
#[tracing::instrument(skip_all, fields(city = %city, input = %input.display(), output = %output.display()))]
pub fn condense_file(city: City, input: &Path, output: &Path) -> Result<usize> {
    let trips = adapt_city(city, open_input(input)?)?;
    debug!(rows = trips.len(), "Raw file normalized");

    let file = File::create(output)?;
    write_condensed(file, &trips)?;

    info!(rows = trips.len(), "Condensed file written");
    Ok(trips.len())
}

/// Reads a condensed stream back into trips, validating every field.
pub fn read_condensed<R: Read>(reader: R) -> Result<Vec<TripRecord>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let mut trips = Vec::new();

    for (index, result) in rdr.deserialize::<CondensedRow>().enumerate() {
        let line = index as u64 + 1;
        let row = result.map_err(|e| row_error(e, line))?;
        trips.push(row.into_trip().map_err(|e| e.at_line(line))?);
    }

    Ok(trips)
}

pub fn read_condensed_file(path: &Path) -> Result<Vec<TripRecord>> {
    let trips = read_condensed(open_input(path)?)?;
    debug!(path = %path.display(), rows = trips.len(), "Condensed file loaded");
    Ok(trips)
}

/// Returns the first data row of a raw file as column → value, or `None`
/// when the file has only a header.
pub fn first_raw_row(path: &Path) -> Result<Option<BTreeMap<String, String>>> {
    let mut rdr = ReaderBuilder::new().from_reader(open_input(path)?);
    let headers = rdr.headers()?.clone();

    let mut records = rdr.records();
    let Some(record) = records.next() else {
        return Ok(None);
    };
    let record = record?;

    Ok(Some(
        headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    ))
}
