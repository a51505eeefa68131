//! Domain types for watchlens
//!
//! Data flows through two representations:
//! - [`RawRecord`]: one untrusted entry from the exported JSON array,
//!   deserialized leniently (every field defaulted, unknown fields ignored)
//! - [`WatchEvent`]: a normalized, validated watch event owned by a session
//!
//! Derived statistics live in [`StatsSummary`], which is rebuilt from scratch
//! on every aggregation and never mutated in place.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Provenance detail name that marks a record as ad-originated.
pub const AD_ORIGIN_MARKER: &str = "From Google Ads";

/// A single entry from the exported watch-history JSON array.
///
/// The export format is not under our control, so every field is optional
/// and defaulted. A record that fails even this lenient deserialization is
/// replaced with `RawRecord::default()` by the ingest layer, which then
/// classifies it as an ad for lack of channel attribution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    /// Video title
    pub title: Option<String>,
    /// Link to the watched video
    pub title_url: Option<String>,
    /// Watch instant as an ISO-8601 string
    pub time: Option<String>,
    /// Channel attribution; the first entry is authoritative
    pub subtitles: Vec<Subtitle>,
    /// Provenance details (e.g. ad origin)
    pub details: Vec<Detail>,
}

impl RawRecord {
    /// The record's channel attribution: the first subtitle name, if non-empty.
    pub fn channel(&self) -> Option<&str> {
        self.subtitles
            .first()
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Whether this record is classified as an advertisement.
    ///
    /// A record is an ad if a detail entry carries the ad-origin marker, or
    /// if it has no channel attribution at all. The second clause is a
    /// deliberate heuristic carried over from the original behavior: junk
    /// records without subtitle data are counted as ads too, because absence
    /// of channel attribution on exported watch history strongly correlates
    /// with server-side/ad entries.
    pub fn is_ad(&self) -> bool {
        self.details.iter().any(|d| d.name == AD_ORIGIN_MARKER) || self.channel().is_none()
    }
}

/// Channel attribution entry inside a raw record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Subtitle {
    pub name: String,
}

/// Provenance entry inside a raw record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Detail {
    pub name: String,
}

/// A normalized watch event: one video watched at one instant.
///
/// Invariants, enforced by the normalizer:
/// - `timestamp` parsed from a valid RFC 3339 instant, keeping the UTC
///   offset written in the export
/// - `channel` is non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// When the video was watched
    pub timestamp: DateTime<FixedOffset>,
    /// Channel the video belongs to
    pub channel: String,
}

/// Inclusive year range used to restrict events before aggregation.
///
/// `min == max` is a valid one-year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Create a range; swaps the bounds if given in reverse order.
    pub fn new(min: i32, max: i32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Range covering a single year.
    pub fn single(year: i32) -> Self {
        Self {
            min: year,
            max: year,
        }
    }

    /// Whether the given year falls inside this range.
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// Derived viewing statistics for one (possibly filtered) set of events.
///
/// Recomputed from scratch on every aggregation call; no identity persists
/// across calls.
#[derive(Debug, Clone)]
pub struct StatsSummary {
    /// Number of watch events covered by this summary
    pub total_count: u64,
    /// Number of raw records classified as ads during normalization
    pub ad_count: u64,
    /// Number of distinct channels
    pub unique_channel_count: u64,
    /// Earliest event timestamp
    pub min_date: DateTime<FixedOffset>,
    /// Latest event timestamp
    pub max_date: DateTime<FixedOffset>,
    /// Up to 10 channels, descending by count, ties stable by first-seen order
    pub top_channels: Vec<(String, u64)>,
    /// ("YYYY-MM", count) pairs in ascending (chronological) key order
    pub monthly_series: Vec<(String, u64)>,
    /// Floor of events-per-distinct-date by weekday (0=Sunday..6=Saturday)
    pub day_of_week_averages: [u64; 7],
    /// Event counts by hour of day (0..24)
    pub hourly_histogram: [u64; 24],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_contains_inclusive_bounds() {
        let range = YearRange::new(2020, 2023);
        assert!(range.contains(2020));
        assert!(range.contains(2023));
        assert!(!range.contains(2019));
        assert!(!range.contains(2024));
    }

    #[test]
    fn test_year_range_single_year_is_valid() {
        let range = YearRange::single(2022);
        assert_eq!(range.min, range.max);
        assert!(range.contains(2022));
        assert!(!range.contains(2021));
    }

    #[test]
    fn test_year_range_swaps_reversed_bounds() {
        let range = YearRange::new(2023, 2020);
        assert_eq!(range, YearRange::new(2020, 2023));
    }

    #[test]
    fn test_channel_first_subtitle_wins() {
        let record = RawRecord {
            subtitles: vec![
                Subtitle {
                    name: "First".to_string(),
                },
                Subtitle {
                    name: "Second".to_string(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(record.channel(), Some("First"));
    }

    #[test]
    fn test_channel_empty_name_is_absent() {
        let record = RawRecord {
            subtitles: vec![Subtitle {
                name: String::new(),
            }],
            ..Default::default()
        };
        assert_eq!(record.channel(), None);
        assert!(record.is_ad());
    }

    #[test]
    fn test_ad_marker_flags_record_with_channel() {
        let record = RawRecord {
            subtitles: vec![Subtitle {
                name: "Ch1".to_string(),
            }],
            details: vec![Detail {
                name: AD_ORIGIN_MARKER.to_string(),
            }],
            ..Default::default()
        };
        assert!(record.is_ad());
    }

    #[test]
    fn test_default_record_is_ad() {
        // Junk array elements degrade to the default record, which must be
        // counted as an ad (no channel attribution).
        assert!(RawRecord::default().is_ad());
    }

    #[test]
    fn test_raw_record_lenient_deserialization() {
        let json = r#"{
            "title": "Watched A",
            "titleUrl": "https://example.com/watch?v=a",
            "time": "2024-01-01T10:00:00Z",
            "subtitles": [{"name": "Ch1", "url": "https://example.com/ch1"}],
            "products": ["YouTube"]
        }"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title.as_deref(), Some("Watched A"));
        assert_eq!(record.channel(), Some("Ch1"));
        assert!(!record.is_ad());
    }
}
