use serde::Serialize;
use std::cmp::Ordering;

use crate::analyzers::utility::{mean, share};
use crate::error::Result;
use crate::record::{TripRecord, UserType};

/// Subscriber vs. customer counts, proportions and mean durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RidershipSplit {
    pub n_subscriber: u64,
    pub n_customer: u64,
    pub n_total: u64,
    pub pct_subscriber: f64,
    pub pct_customer: f64,
    pub avg_duration_subscriber: f64,
    pub avg_duration_customer: f64,
}

impl RidershipSplit {
    /// See [`longer_average_rider`].
    pub fn longer_riders(&self) -> Option<UserType> {
        longer_average_rider(self.avg_duration_subscriber, self.avg_duration_customer)
    }
}

/// Counts and averages trips by user type.
///
/// # Errors
///
/// `DivisionUndefined` when there are no trips, no subscriber trips, or no
/// customer trips.
pub fn ridership_split(trips: &[TripRecord]) -> Result<RidershipSplit> {
    let mut n_subscriber = 0u64;
    let mut n_customer = 0u64;
    let mut subscriber_minutes = 0.0;
    let mut customer_minutes = 0.0;

    for trip in trips {
        match trip.user_type() {
            UserType::Subscriber => {
                n_subscriber += 1;
                subscriber_minutes += trip.duration_minutes();
            }
            UserType::Customer => {
                n_customer += 1;
                customer_minutes += trip.duration_minutes();
            }
        }
    }

    let n_total = n_subscriber + n_customer;

    Ok(RidershipSplit {
        n_subscriber,
        n_customer,
        n_total,
        pct_subscriber: share(n_subscriber, n_total, "trips")?,
        pct_customer: share(n_customer, n_total, "trips")?,
        avg_duration_subscriber: mean(subscriber_minutes, n_subscriber, "subscriber trips")?,
        avg_duration_customer: mean(customer_minutes, n_customer, "customer trips")?,
    })
}

/// The user type with the strictly greater average duration, `None` on a tie.
pub fn longer_average_rider(avg_subscriber: f64, avg_customer: f64) -> Option<UserType> {
    match avg_subscriber.partial_cmp(&avg_customer)? {
        Ordering::Greater => Some(UserType::Subscriber),
        Ordering::Less => Some(UserType::Customer),
        Ordering::Equal => None,
    }
}
