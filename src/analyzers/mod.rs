//! Summary statistics over normalized trips.
//!
//! Every function here is a pure reducer over a slice of [`TripRecord`]s:
//! fresh state per call, nothing carried between calls.
//!
//! [`TripRecord`]: crate::record::TripRecord

pub mod compare;
pub mod duration;
pub mod histogram;
pub mod ridership;
pub mod seasonal;
pub mod utility;

use serde::Serialize;

use crate::city::City;
use crate::record::TripRecord;
use duration::DurationSplit;
use ridership::RidershipSplit;
use seasonal::{PeakSeasons, SeasonalRidership};

/// Everything computed for one city's condensed file. Statistics that are
/// undefined for the data (e.g. no customers) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySummary {
    pub city: City,
    pub ridership: Option<RidershipSplit>,
    pub durations: Option<DurationSplit>,
    pub seasonal: SeasonalRidership,
    pub peaks: PeakSeasons,
}

/// Runs every reducer over `trips`, turning `DivisionUndefined` into `None`.
pub fn summarize(city: City, trips: &[TripRecord]) -> crate::error::Result<CitySummary> {
    let seasonal = seasonal::seasonal_ridership(trips);
    let peaks = seasonal::peak_seasons(&seasonal);

    Ok(CitySummary {
        city,
        ridership: undefined_as_none(ridership::ridership_split(trips))?,
        durations: undefined_as_none(duration::duration_split(trips))?,
        seasonal,
        peaks,
    })
}

fn undefined_as_none<T>(result: crate::error::Result<T>) -> crate::error::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(crate::error::TripError::DivisionUndefined(what)) => {
            tracing::warn!(what, "Statistic undefined for this dataset");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
