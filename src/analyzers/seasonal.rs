//! Ridership per season and the peak-season picks.
//!
//! A season with no customer trips has no subscriber/customer ratio. The
//! tally records that as `None` instead of failing the whole breakdown;
//! [`SeasonalRidership::ratio`] reports it as `DivisionUndefined`.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::ops::Index;

use crate::error::{Result, TripError};
use crate::record::{Season, TripRecord, UserType};

/// One value per season, stored in [`Season::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BySeason<T>([T; 4]);

impl<T> BySeason<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Season, &T)> {
        Season::ALL.into_iter().zip(self.0.iter())
    }

    fn get_mut(&mut self, season: Season) -> &mut T {
        &mut self.0[season.index()]
    }
}

impl<T> Index<Season> for BySeason<T> {
    type Output = T;

    fn index(&self, season: Season) -> &T {
        &self.0[season.index()]
    }
}

impl<T: Serialize> Serialize for BySeason<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (season, value) in self.iter() {
            map.serialize_entry(&season, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalRidership {
    pub subscribers: BySeason<u64>,
    pub customers: BySeason<u64>,
    pub totals: BySeason<u64>,
    /// Subscriber trips per customer trip; `None` where a season has no customers.
    pub ratios: BySeason<Option<f64>>,
}

impl SeasonalRidership {
    /// # Errors
    ///
    /// `DivisionUndefined` when `season` has no customer trips.
    pub fn ratio(&self, season: Season) -> Result<f64> {
        self.ratios[season].ok_or(TripError::DivisionUndefined("customer trips in season"))
    }

    pub fn n_total(&self) -> u64 {
        self.totals.iter().map(|(_, n)| n).sum()
    }
}

pub fn seasonal_ridership(trips: &[TripRecord]) -> SeasonalRidership {
    let mut subscribers = BySeason::<u64>::default();
    let mut customers = BySeason::<u64>::default();

    for trip in trips {
        let season = trip.season();
        match trip.user_type() {
            UserType::Subscriber => *subscribers.get_mut(season) += 1,
            UserType::Customer => *customers.get_mut(season) += 1,
        }
    }

    let mut totals = BySeason::<u64>::default();
    let mut ratios = BySeason::<Option<f64>>::default();
    for season in Season::ALL {
        *totals.get_mut(season) = subscribers[season] + customers[season];
        *ratios.get_mut(season) = match customers[season] {
            0 => None,
            n => Some(subscribers[season] as f64 / n as f64),
        };
    }

    SeasonalRidership {
        subscribers,
        customers,
        totals,
        ratios,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakSeasons {
    pub busiest: Season,
    pub busiest_total: u64,
    pub busiest_for_subscribers: Season,
    pub subscriber_total: u64,
}

/// Highest value, keeping the earliest season in canonical order on ties.
fn first_max(values: &BySeason<u64>) -> (Season, u64) {
    let mut best = (Season::ALL[0], values[Season::ALL[0]]);
    for (season, &n) in values.iter() {
        if n > best.1 {
            best = (season, n);
        }
    }
    best
}

/// Season with most trips overall and season with most subscriber trips.
/// Ties go to the first of Fall, Winter, Spring, Summer.
pub fn peak_seasons(seasonal: &SeasonalRidership) -> PeakSeasons {
    let (busiest, busiest_total) = first_max(&seasonal.totals);
    let (busiest_for_subscribers, subscriber_total) = first_max(&seasonal.subscribers);

    PeakSeasons {
        busiest,
        busiest_total,
        busiest_for_subscribers,
        subscriber_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn trip(month: u32, user: UserType) -> TripRecord {
        TripRecord::new(10.0, month, 9, Weekday::Tue, user).unwrap()
    }

    #[test]
    fn test_all_months_fill_all_seasons() {
        let trips: Vec<_> = (1..=12)
            .flat_map(|m| [trip(m, UserType::Subscriber), trip(m, UserType::Customer)])
            .collect();
        let seasonal = seasonal_ridership(&trips);

        for season in Season::ALL {
            assert_eq!(seasonal.subscribers[season], 3);
            assert_eq!(seasonal.customers[season], 3);
            assert_eq!(seasonal.totals[season], 6);
            assert_eq!(seasonal.ratio(season).unwrap(), 1.0);
        }
        assert_eq!(seasonal.n_total(), trips.len() as u64);
    }

    #[test]
    fn test_december_is_winter_august_is_summer() {
        let seasonal = seasonal_ridership(&[trip(12, UserType::Customer), trip(8, UserType::Subscriber)]);
        assert_eq!(seasonal.customers[Season::Winter], 1);
        assert_eq!(seasonal.subscribers[Season::Summer], 1);
        assert_eq!(seasonal.n_total(), 2);
    }

    #[test]
    fn test_season_without_customers_has_no_ratio() {
        let seasonal = seasonal_ridership(&[
            trip(7, UserType::Subscriber),
            trip(1, UserType::Subscriber),
            trip(1, UserType::Customer),
            trip(1, UserType::Customer),
        ]);
        assert_eq!(seasonal.ratios[Season::Summer], None);
        assert!(matches!(
            seasonal.ratio(Season::Summer),
            Err(TripError::DivisionUndefined(_))
        ));
        assert_eq!(seasonal.ratio(Season::Winter).unwrap(), 0.5);
    }

    #[test]
    fn test_peak_seasons_can_differ() {
        let mut trips = vec![trip(7, UserType::Customer); 5];
        trips.extend(vec![trip(7, UserType::Subscriber); 1]);
        trips.extend(vec![trip(10, UserType::Subscriber); 3]);

        let peaks = peak_seasons(&seasonal_ridership(&trips));
        assert_eq!(peaks.busiest, Season::Summer);
        assert_eq!(peaks.busiest_total, 6);
        assert_eq!(peaks.busiest_for_subscribers, Season::Fall);
        assert_eq!(peaks.subscriber_total, 3);
    }

    #[test]
    fn test_peak_ties_follow_canonical_order() {
        let trips = vec![
            trip(4, UserType::Subscriber),
            trip(1, UserType::Subscriber),
            trip(7, UserType::Subscriber),
        ];
        let peaks = peak_seasons(&seasonal_ridership(&trips));
        assert_eq!(peaks.busiest, Season::Winter);
        assert_eq!(peaks.busiest_for_subscribers, Season::Winter);

        let peaks = peak_seasons(&seasonal_ridership(&[]));
        assert_eq!(peaks.busiest, Season::Fall);
        assert_eq!(peaks.busiest_total, 0);
    }

    #[test]
    fn test_json_keys_are_season_names() {
        let seasonal = seasonal_ridership(&[trip(12, UserType::Subscriber)]);
        let json = serde_json::to_value(&seasonal).unwrap();
        assert_eq!(json["subscribers"]["Winter"], 1);
        assert!(json["ratios"]["Winter"].is_null());
    }
}
