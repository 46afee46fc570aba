use serde::Serialize;

use crate::analyzers::utility::{mean, share};
use crate::error::Result;
use crate::record::TripRecord;

/// Trips at or under this many minutes are short.
pub const LONG_TRIP_THRESHOLD_MINUTES: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationSplit {
    pub n_short: u64,
    pub n_long: u64,
    pub n_total: u64,
    pub total_duration: f64,
    pub avg_duration: f64,
    pub pct_long: f64,
    pub pct_short: f64,
}

pub fn is_long_trip(minutes: f64) -> bool {
    minutes > LONG_TRIP_THRESHOLD_MINUTES
}

/// Splits trips around [`LONG_TRIP_THRESHOLD_MINUTES`].
///
/// # Errors
///
/// `DivisionUndefined` for an empty slice.
pub fn duration_split(trips: &[TripRecord]) -> Result<DurationSplit> {
    let mut n_short = 0u64;
    let mut n_long = 0u64;
    let mut total_duration = 0.0;

    for trip in trips {
        let minutes = trip.duration_minutes();
        if is_long_trip(minutes) {
            n_long += 1;
        } else {
            n_short += 1;
        }
        total_duration += minutes;
    }

    let n_total = n_short + n_long;

    Ok(DurationSplit {
        n_short,
        n_long,
        n_total,
        total_duration,
        avg_duration: mean(total_duration, n_total, "trips")?,
        pct_long: share(n_long, n_total, "trips")?,
        pct_short: share(n_short, n_total, "trips")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TripError;
    use crate::record::UserType;
    use chrono::Weekday;

    fn trip(minutes: f64) -> TripRecord {
        TripRecord::new(minutes, 4, 8, Weekday::Mon, UserType::Subscriber).unwrap()
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(!is_long_trip(30.0));
        assert!(is_long_trip(30.0001));

        let split = duration_split(&[trip(30.0), trip(30.0001)]).unwrap();
        assert_eq!(split.n_short, 1);
        assert_eq!(split.n_long, 1);
    }

    #[test]
    fn test_totals_and_proportions() {
        let split = duration_split(&[trip(10.0), trip(20.0), trip(45.0), trip(5.0)]).unwrap();
        assert_eq!(split.n_total, 4);
        assert_eq!(split.total_duration, 80.0);
        assert_eq!(split.avg_duration, 20.0);
        assert_eq!(split.pct_long, 0.25);
        assert_eq!(split.pct_short, 0.75);
    }

    #[test]
    fn test_empty_dataset_is_undefined() {
        assert!(matches!(
            duration_split(&[]),
            Err(TripError::DivisionUndefined(_))
        ));
    }
}
