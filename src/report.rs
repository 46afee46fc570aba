use std::fmt::Write;

use crate::analyzers::CitySummary;
use crate::analyzers::compare::CityComparison;
use crate::analyzers::duration::{DurationSplit, LONG_TRIP_THRESHOLD_MINUTES};
use crate::analyzers::histogram::DurationHistogram;
use crate::analyzers::ridership::RidershipSplit;
use crate::analyzers::seasonal::{PeakSeasons, SeasonalRidership};
use crate::city::City;
use crate::record::{Season, UserType};

fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

pub fn describe_ridership(city: City, split: &RidershipSplit) -> String {
    format!(
        "{} has {} trips, {} made by subscribers and {} by customers",
        city,
        split.n_total,
        percent(split.pct_subscriber),
        percent(split.pct_customer)
    )
}

pub fn describe_durations(city: City, split: &DurationSplit) -> String {
    format!(
        "The average trip length for {} is {:.2} (min), the proportion of rides longer than {} mins is {}",
        city,
        split.avg_duration,
        LONG_TRIP_THRESHOLD_MINUTES,
        percent(split.pct_long)
    )
}

pub fn describe_longer_riders(city: City, split: &RidershipSplit) -> String {
    let lead = match split.longer_riders() {
        Some(UserType::Subscriber) => format!("Subscribers in {city} take longer rides on average."),
        Some(UserType::Customer) => format!("Customers in {city} take longer rides on average."),
        None => format!("Subscribers and customers in {city} ride equally long on average."),
    };
    format!(
        "{} The average subscriber trip duration is {:.2} (mins), the average customer trip duration is {:.2} (mins)",
        lead, split.avg_duration_subscriber, split.avg_duration_customer
    )
}

pub fn describe_peaks(city: City, peaks: &PeakSeasons) -> String {
    format!(
        "For {}, highest ridership is during {}, {}. {} has the highest subscriber ridership at {}",
        city,
        peaks.busiest,
        peaks.busiest_total,
        peaks.busiest_for_subscribers,
        peaks.subscriber_total
    )
}

pub fn describe_comparison(cmp: &CityComparison) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} has the maximum number of trips, the number is {}",
        cmp.most_trips.city, cmp.most_trips.value
    );
    let _ = writeln!(
        output,
        "{} has the highest proportion of trips made by subscribers, the percentage is {}",
        cmp.highest_subscriber_share.city,
        percent(cmp.highest_subscriber_share.value)
    );
    let _ = writeln!(
        output,
        "{} has the highest proportion of trips made by customers, the percentage is {}",
        cmp.highest_customer_share.city,
        percent(cmp.highest_customer_share.value)
    );
    output
}

fn season_table(output: &mut String, seasonal: &SeasonalRidership) {
    let _ = writeln!(
        output,
        "{:<8} {:>11} {:>10} {:>8} {:>7}",
        "Season", "Subscribers", "Customers", "Total", "Ratio"
    );
    for season in Season::ALL {
        let ratio = match seasonal.ratios[season] {
            Some(r) => format!("{r:.2}"),
            None => "n/a".to_string(),
        };
        let _ = writeln!(
            output,
            "{:<8} {:>11} {:>10} {:>8} {:>7}",
            season.to_string(),
            seasonal.subscribers[season],
            seasonal.customers[season],
            seasonal.totals[season],
            ratio
        );
    }
}

/// Multi-line text report for one city.
pub fn render_summary(summary: &CitySummary) -> String {
    let city = summary.city;
    let mut output = String::new();

    let _ = writeln!(output, "# {city}");
    match &summary.ridership {
        Some(split) => {
            let _ = writeln!(output, "{}", describe_ridership(city, split));
            let _ = writeln!(output, "{}", describe_longer_riders(city, split));
        }
        None => {
            let _ = writeln!(
                output,
                "Ridership split undefined for {city}: needs both subscriber and customer trips"
            );
        }
    }
    match &summary.durations {
        Some(split) => {
            let _ = writeln!(output, "{}", describe_durations(city, split));
        }
        None => {
            let _ = writeln!(output, "No trips recorded for {city}");
        }
    }
    let _ = writeln!(output, "{}", describe_peaks(city, &summary.peaks));
    let _ = writeln!(output);
    season_table(&mut output, &summary.seasonal);

    output
}

/// Text rendering of a histogram, one bin per line.
pub fn render_histogram(title: &str, histogram: &DurationHistogram) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{title}");

    let last = histogram.counts.len().saturating_sub(1);
    for (i, count) in histogram.counts.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        let _ = writeln!(
            output,
            "[{:>6}, {:>6}{} {}",
            histogram.edges[i],
            histogram.edges[i + 1],
            close,
            count
        );
    }
    if histogram.below > 0 || histogram.above > 0 {
        let _ = writeln!(
            output,
            "outside bins: {} below, {} above",
            histogram.below, histogram.above
        );
    }
    output
}
