//! Per-city raw row layouts and their mapping onto [`TripRecord`].
//!
//! Each city gets its own row type, deserialized from the raw CSV by column
//! name. Columns not named here are ignored.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, TripError};
use crate::record::{TripRecord, UserType};

const NYC_TIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";
const MINUTE_TIME_FORMAT: &str = "%m/%d/%Y %H:%M";

/// A city-specific raw row that can be normalized into a [`TripRecord`].
pub trait RawTrip: DeserializeOwned {
    fn duration_minutes(&self) -> Result<f64>;

    /// Start of the trip as naive local time.
    fn started_at(&self) -> Result<NaiveDateTime>;

    fn user_type(&self) -> Result<UserType>;

    fn to_trip(&self) -> Result<TripRecord> {
        let duration = self.duration_minutes()?;
        let started = self.started_at()?;
        TripRecord::new(
            duration,
            started.month(),
            started.hour(),
            started.weekday(),
            self.user_type()?,
        )
    }
}

fn parse_count(field: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|e| TripError::malformed(format!("{field} {value:?}: {e}")))
}

fn parse_time(field: &str, value: &str, format: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, format)
        .map_err(|e| TripError::malformed(format!("{field} {value:?}: {e}")))
}

/// Citi Bike layout: seconds, timestamp with seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct NycTrip {
    #[serde(rename = "tripduration")]
    pub trip_duration: String,
    #[serde(rename = "starttime")]
    pub start_time: String,
    #[serde(rename = "usertype")]
    pub user_type: String,
}

impl RawTrip for NycTrip {
    fn duration_minutes(&self) -> Result<f64> {
        Ok(parse_count("tripduration", &self.trip_duration)? as f64 / 60.0)
    }

    fn started_at(&self) -> Result<NaiveDateTime> {
        parse_time("starttime", &self.start_time, NYC_TIME_FORMAT)
    }

    fn user_type(&self) -> Result<UserType> {
        self.user_type.parse()
    }
}

/// Divvy layout: seconds, timestamp without seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct ChicagoTrip {
    #[serde(rename = "tripduration")]
    pub trip_duration: String,
    #[serde(rename = "starttime")]
    pub start_time: String,
    #[serde(rename = "usertype")]
    pub user_type: String,
}

impl RawTrip for ChicagoTrip {
    fn duration_minutes(&self) -> Result<f64> {
        Ok(parse_count("tripduration", &self.trip_duration)? as f64 / 60.0)
    }

    fn started_at(&self) -> Result<NaiveDateTime> {
        parse_time("starttime", &self.start_time, MINUTE_TIME_FORMAT)
    }

    fn user_type(&self) -> Result<UserType> {
        self.user_type.parse()
    }
}

/// Capital Bikeshare layout: milliseconds, timestamp without seconds,
/// Registered/Casual membership.
#[derive(Debug, Clone, Deserialize)]
pub struct WashingtonTrip {
    #[serde(rename = "Duration (ms)")]
    pub duration_ms: String,
    #[serde(rename = "Start date")]
    pub start_date: String,
    #[serde(rename = "Member Type")]
    pub member_type: String,
}

impl RawTrip for WashingtonTrip {
    fn duration_minutes(&self) -> Result<f64> {
        Ok(parse_count("Duration (ms)", &self.duration_ms)? as f64 / 60_000.0)
    }

    fn started_at(&self) -> Result<NaiveDateTime> {
        parse_time("Start date", &self.start_date, MINUTE_TIME_FORMAT)
    }

    /// Anything other than `Registered` counts as a customer.
    fn user_type(&self) -> Result<UserType> {
        if self.member_type == "Registered" {
            Ok(UserType::Subscriber)
        } else {
            Ok(UserType::Customer)
        }
    }
}
