use serde::Serialize;

use crate::analyzers::ridership::RidershipSplit;
use crate::city::City;

/// A city and the value that made it stand out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leader<T> {
    pub city: City,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityComparison {
    pub most_trips: Leader<u64>,
    pub highest_subscriber_share: Leader<f64>,
    pub highest_customer_share: Leader<f64>,
}

/// Earliest city holding the maximum of `key`.
fn leader<T: PartialOrd + Copy>(
    splits: &[(City, RidershipSplit)],
    key: impl Fn(&RidershipSplit) -> T,
) -> Option<Leader<T>> {
    let mut best: Option<Leader<T>> = None;
    for (city, split) in splits {
        let value = key(split);
        if best.is_none_or(|b| value > b.value) {
            best = Some(Leader { city: *city, value });
        }
    }
    best
}

/// Picks the leading city on trip volume and on each user type's share.
/// `None` when `splits` is empty.
pub fn compare_cities(splits: &[(City, RidershipSplit)]) -> Option<CityComparison> {
    Some(CityComparison {
        most_trips: leader(splits, |s| s.n_total)?,
        highest_subscriber_share: leader(splits, |s| s.pct_subscriber)?,
        highest_customer_share: leader(splits, |s| s.pct_customer)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(n_subscriber: u64, n_customer: u64) -> RidershipSplit {
        let n_total = n_subscriber + n_customer;
        RidershipSplit {
            n_subscriber,
            n_customer,
            n_total,
            pct_subscriber: n_subscriber as f64 / n_total as f64,
            pct_customer: n_customer as f64 / n_total as f64,
            avg_duration_subscriber: 12.0,
            avg_duration_customer: 30.0,
        }
    }

    #[test]
    fn test_compare_picks_each_leader() {
        let splits = vec![
            (City::Washington, split(50, 16)),
            (City::Nyc, split(245, 31)),
            (City::Chicago, split(54, 17)),
        ];
        let cmp = compare_cities(&splits).unwrap();
        assert_eq!(cmp.most_trips.city, City::Nyc);
        assert_eq!(cmp.most_trips.value, 276);
        assert_eq!(cmp.highest_subscriber_share.city, City::Nyc);
        assert_eq!(cmp.highest_customer_share.city, City::Washington);
    }

    #[test]
    fn test_ties_keep_first_city() {
        let splits = vec![(City::Chicago, split(10, 10)), (City::Nyc, split(10, 10))];
        let cmp = compare_cities(&splits).unwrap();
        assert_eq!(cmp.most_trips.city, City::Chicago);
        assert_eq!(cmp.highest_customer_share.city, City::Chicago);
    }

    #[test]
    fn test_empty_input() {
        assert!(compare_cities(&[]).is_none());
    }
}
