//! The normalized trip schema shared by every city.

use chrono::Weekday;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TripError};

/// Rider category after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    Subscriber,
    Customer,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Subscriber => "Subscriber",
            UserType::Customer => "Customer",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = TripError;

    /// Strict: only the two canonical labels are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Subscriber" => Ok(UserType::Subscriber),
            "Customer" => Ok(UserType::Customer),
            other => Err(TripError::malformed(format!(
                "unknown user type {other:?}"
            ))),
        }
    }
}

/// Three-month grouping of calendar months.
///
/// Declaration order is the canonical order used to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Season {
    Fall,
    Winter,
    Spring,
    Summer,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Fall, Season::Winter, Season::Spring, Season::Summer];

    /// Returns `None` for anything outside 1–12.
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Fall),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
        };
        f.write_str(name)
    }
}

/// Full English weekday name, e.g. `Friday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S: Serializer>(day: &Weekday, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*day))
}

/// One normalized trip. Fields are validated by [`TripRecord::new`] and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    duration_minutes: f64,
    start_month: u32,
    start_hour: u32,
    #[serde(serialize_with = "serialize_weekday")]
    day_of_week: Weekday,
    user_type: UserType,
}

impl TripRecord {
    pub fn new(
        duration_minutes: f64,
        start_month: u32,
        start_hour: u32,
        day_of_week: Weekday,
        user_type: UserType,
    ) -> Result<Self> {
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return Err(TripError::malformed(format!(
                "duration {duration_minutes} is not a non-negative number"
            )));
        }
        if !(1..=12).contains(&start_month) {
            return Err(TripError::malformed(format!("month {start_month} out of range")));
        }
        if start_hour > 23 {
            return Err(TripError::malformed(format!("hour {start_hour} out of range")));
        }

        Ok(TripRecord {
            duration_minutes,
            start_month,
            start_hour,
            day_of_week,
            user_type,
        })
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_minutes
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn season(&self) -> Season {
        // start_month is range-checked in `new`
        Season::from_month(self.start_month).unwrap_or(Season::Fall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parse_is_strict() {
        assert_eq!("Subscriber".parse::<UserType>().unwrap(), UserType::Subscriber);
        assert_eq!("Customer".parse::<UserType>().unwrap(), UserType::Customer);
        assert!("subscriber".parse::<UserType>().is_err());
        assert!("Dependent".parse::<UserType>().is_err());
    }

    #[test]
    fn test_season_buckets() {
        assert_eq!(Season::from_month(12), Some(Season::Winter));
        assert_eq!(Season::from_month(1), Some(Season::Winter));
        assert_eq!(Season::from_month(2), Some(Season::Winter));
        assert_eq!(Season::from_month(3), Some(Season::Spring));
        assert_eq!(Season::from_month(5), Some(Season::Spring));
        assert_eq!(Season::from_month(8), Some(Season::Summer));
        assert_eq!(Season::from_month(9), Some(Season::Fall));
        assert_eq!(Season::from_month(11), Some(Season::Fall));
        assert_eq!(Season::from_month(0), None);
        assert_eq!(Season::from_month(13), None);
    }

    #[test]
    fn test_season_canonical_order() {
        let mut sorted = Season::ALL;
        sorted.sort();
        assert_eq!(sorted, Season::ALL);
        assert_eq!(Season::ALL[0], Season::Fall);
    }

    #[test]
    fn test_new_rejects_out_of_range_fields() {
        assert!(TripRecord::new(-1.0, 1, 0, Weekday::Mon, UserType::Customer).is_err());
        assert!(TripRecord::new(f64::NAN, 1, 0, Weekday::Mon, UserType::Customer).is_err());
        assert!(TripRecord::new(1.0, 0, 0, Weekday::Mon, UserType::Customer).is_err());
        assert!(TripRecord::new(1.0, 13, 0, Weekday::Mon, UserType::Customer).is_err());
        assert!(TripRecord::new(1.0, 6, 24, Weekday::Mon, UserType::Customer).is_err());
    }

    #[test]
    fn test_record_season() {
        let trip = TripRecord::new(12.5, 12, 23, Weekday::Sat, UserType::Subscriber).unwrap();
        assert_eq!(trip.season(), Season::Winter);
        assert_eq!(trip.start_hour(), 23);
    }

    #[test]
    fn test_record_json_uses_full_weekday_name() {
        let trip = TripRecord::new(5.0, 1, 0, Weekday::Fri, UserType::Subscriber).unwrap();
        let json = serde_json::to_string(&trip).unwrap();
        assert!(json.contains("\"day_of_week\":\"Friday\""));
        assert!(json.contains("\"user_type\":\"Subscriber\""));
    }
}
