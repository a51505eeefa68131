//! Statistics aggregation over normalized watch events
//!
//! [`aggregate`] is a pure function of its inputs: no hidden state, no I/O,
//! deterministic for a given event sequence. All sub-computations (channel
//! ranking, monthly series, day-of-week averages, hourly histogram, date
//! bounds) are independent tallies folded into one traversal.

use crate::types::{StatsSummary, WatchEvent, YearRange};
use chrono::{Datelike, Timelike};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Number of channels kept in the ranking.
pub const TOP_CHANNELS: usize = 10;

/// Restrict events to an inclusive year range.
///
/// The range applies to the event timestamp's year as written in the export.
pub fn filter_by_years(events: &[WatchEvent], range: YearRange) -> Vec<WatchEvent> {
    events
        .iter()
        .filter(|e| range.contains(e.timestamp.year()))
        .cloned()
        .collect()
}

/// Compute the full statistics summary for a set of events.
///
/// `ad_count` is passed through unchanged from normalization; the year-range
/// filter never re-counts ads.
///
/// Top-channel ties are broken by the order channels were first encountered
/// in the input sequence, which keeps the ranking stable and deterministic.
///
/// # Panics
///
/// Panics if `events` is empty: the date bounds are undefined without at
/// least one event. Callers guard first; sessions reject zero-event
/// datasets at construction and report an empty filter result as `None`
/// instead of aggregating.
pub fn aggregate(events: &[WatchEvent], ad_count: u64) -> StatsSummary {
    assert!(!events.is_empty(), "aggregate requires at least one event");

    // (first-seen index, count) per channel
    let mut channel_counts: HashMap<&str, (usize, u64)> = HashMap::new();
    let mut monthly: BTreeMap<String, u64> = BTreeMap::new();
    let mut weekday_totals = [0u64; 7];
    let mut weekday_dates: [HashSet<(i32, u32, u32)>; 7] =
        std::array::from_fn(|_| HashSet::new());
    let mut hourly = [0u64; 24];
    let mut min_date = events[0].timestamp;
    let mut max_date = events[0].timestamp;

    for event in events {
        let first_seen = channel_counts.len();
        let entry = channel_counts
            .entry(event.channel.as_str())
            .or_insert((first_seen, 0));
        entry.1 += 1;

        let ts = event.timestamp;
        let month_key = format!("{:04}-{:02}", ts.year(), ts.month());
        *monthly.entry(month_key).or_insert(0) += 1;

        let weekday = ts.weekday().num_days_from_sunday() as usize;
        weekday_totals[weekday] += 1;
        weekday_dates[weekday].insert((ts.year(), ts.month(), ts.day()));

        hourly[ts.hour() as usize] += 1;

        if ts < min_date {
            min_date = ts;
        }
        if ts > max_date {
            max_date = ts;
        }
    }

    let unique_channel_count = channel_counts.len() as u64;

    let mut ranked: Vec<(&str, usize, u64)> = channel_counts
        .into_iter()
        .map(|(name, (first_seen, count))| (name, first_seen, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
    ranked.truncate(TOP_CHANNELS);
    let top_channels = ranked
        .into_iter()
        .map(|(name, _, count)| (name.to_string(), count))
        .collect();

    // Mean events per distinct calendar date, floored; weekdays never
    // observed stay at 0 rather than dividing by zero.
    let mut day_of_week_averages = [0u64; 7];
    for (day, average) in day_of_week_averages.iter_mut().enumerate() {
        let dates = weekday_dates[day].len() as u64;
        if dates > 0 {
            *average = weekday_totals[day] / dates;
        }
    }

    StatsSummary {
        total_count: events.len() as u64,
        ad_count,
        unique_channel_count,
        min_date,
        max_date,
        top_channels,
        monthly_series: monthly.into_iter().collect(),
        day_of_week_averages,
        hourly_histogram: hourly,
    }
}

/// Weekday label for a summary index (0=Sunday..6=Saturday).
pub fn day_name(day: usize) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Unknown",
    }
}
