//! Binned trip durations, the data behind the duration histograms.
//!
//! Bins are `[e_i, e_i+1)` except the last, which also includes its upper
//! edge. Durations outside the edges are counted in `below`/`above`.

use serde::Serialize;

use crate::error::{Result, TripError};
use crate::record::{TripRecord, UserType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationHistogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
    pub below: u64,
    pub above: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTypeHistograms {
    pub subscriber: DurationHistogram,
    pub customer: DurationHistogram,
}

/// Evenly spaced edges from `start` to `stop` inclusive.
pub fn uniform_edges(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || stop < start {
        return vec![start];
    }
    let n = ((stop - start) / step).round() as usize;
    (0..=n).map(|i| start + step * i as f64).collect()
}

/// 0, 20, …, 280 minutes.
pub fn default_overall_edges() -> Vec<f64> {
    uniform_edges(0.0, 280.0, 20.0)
}

/// 0, 5, …, 75 minutes.
pub fn default_user_type_edges() -> Vec<f64> {
    uniform_edges(0.0, 75.0, 5.0)
}

impl DurationHistogram {
    /// # Errors
    ///
    /// `InvalidBins` unless there are at least two strictly increasing, finite edges.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(TripError::InvalidBins(format!(
                "need at least two edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TripError::InvalidBins(
                "edges must be finite and strictly increasing".to_string(),
            ));
        }

        let bins = edges.len() - 1;
        Ok(DurationHistogram {
            edges,
            counts: vec![0; bins],
            below: 0,
            above: 0,
        })
    }

    pub fn add(&mut self, minutes: f64) {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];

        if minutes < first {
            self.below += 1;
        } else if minutes > last {
            self.above += 1;
        } else if minutes == last {
            let bins = self.counts.len();
            self.counts[bins - 1] += 1;
        } else {
            // edges[0] <= minutes < last, so the index is in 1..edges.len()
            let bin = self.edges.partition_point(|e| *e <= minutes) - 1;
            self.counts[bin] += 1;
        }
    }

    pub fn n_binned(&self) -> u64 {
        self.counts.iter().sum()
    }
}

pub fn duration_histogram(trips: &[TripRecord], edges: Vec<f64>) -> Result<DurationHistogram> {
    let mut histogram = DurationHistogram::new(edges)?;
    for trip in trips {
        histogram.add(trip.duration_minutes());
    }
    Ok(histogram)
}

/// Separate histograms for subscriber and customer trips over the same edges.
pub fn histograms_by_user_type(trips: &[TripRecord], edges: Vec<f64>) -> Result<UserTypeHistograms> {
    let mut subscriber = DurationHistogram::new(edges.clone())?;
    let mut customer = DurationHistogram::new(edges)?;

    for trip in trips {
        match trip.user_type() {
            UserType::Subscriber => subscriber.add(trip.duration_minutes()),
            UserType::Customer => customer.add(trip.duration_minutes()),
        }
    }

    Ok(UserTypeHistograms {
        subscriber,
        customer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn trip(minutes: f64, user: UserType) -> TripRecord {
        TripRecord::new(minutes, 2, 17, Weekday::Sun, user).unwrap()
    }

    #[test]
    fn test_uniform_edges() {
        assert_eq!(uniform_edges(0.0, 20.0, 5.0), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
        assert_eq!(default_user_type_edges().len(), 16);
        assert_eq!(default_overall_edges().last(), Some(&280.0));
    }

    #[test]
    fn test_bin_boundaries() {
        let mut h = DurationHistogram::new(vec![0.0, 5.0, 10.0]).unwrap();
        for minutes in [0.0, 4.99, 5.0, 9.99, 10.0, 10.01] {
            h.add(minutes);
        }
        assert_eq!(h.counts, vec![2, 3]);
        assert_eq!(h.above, 1);
        assert_eq!(h.below, 0);
        assert_eq!(h.n_binned(), 5);
    }

    #[test]
    fn test_rejects_bad_edges() {
        assert!(DurationHistogram::new(vec![0.0]).is_err());
        assert!(DurationHistogram::new(vec![0.0, 5.0, 5.0]).is_err());
        assert!(DurationHistogram::new(vec![10.0, 5.0]).is_err());
        assert!(DurationHistogram::new(vec![0.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_split_by_user_type() {
        let trips = vec![
            trip(3.0, UserType::Subscriber),
            trip(12.0, UserType::Subscriber),
            trip(40.0, UserType::Customer),
            trip(90.0, UserType::Customer),
        ];
        let h = histograms_by_user_type(&trips, default_user_type_edges()).unwrap();
        assert_eq!(h.subscriber.n_binned(), 2);
        assert_eq!(h.subscriber.counts[0], 1);
        assert_eq!(h.subscriber.counts[2], 1);
        assert_eq!(h.customer.counts[8], 1);
        assert_eq!(h.customer.above, 1);
    }

    #[test]
    fn test_overall_histogram_counts_every_trip_once() {
        let trips: Vec<_> = (0..50).map(|i| trip(i as f64 * 7.0, UserType::Customer)).collect();
        let h = duration_histogram(&trips, default_overall_edges()).unwrap();
        assert_eq!(h.n_binned() + h.above + h.below, 50);
    }
}
