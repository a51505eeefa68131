//! Session state for one loaded watch-history dataset
//!
//! [`HistorySession`] replaces the shared mutable globals of a typical
//! upload-and-render flow with an explicit state object: it owns the
//! normalized events, the ad count, and the active year-range filter, and is
//! the only caller of the aggregator. Loading a new file builds a new
//! session; nothing is mutated incrementally. There is exactly one writer
//! (the latest load or filter change) and the aggregator only ever reads a
//! consistent snapshot.

use crate::analytics;
use crate::error::{Error, Result};
use crate::ingest;
use crate::types::{StatsSummary, WatchEvent, YearRange};
use chrono::Datelike;
use std::path::Path;

/// One loaded dataset plus the active year-range filter.
#[derive(Debug)]
pub struct HistorySession {
    events: Vec<WatchEvent>,
    ad_count: u64,
    bounds: YearRange,
    filter: YearRange,
}

impl HistorySession {
    /// Build a session from watch-history JSON text.
    ///
    /// Returns [`Error::InvalidFormat`] when the text is not a JSON array
    /// and [`Error::NoValidEvents`] when normalization leaves zero events.
    /// The filter starts at the full year range of the dataset.
    pub fn from_json(text: &str) -> Result<Self> {
        let records = ingest::parse_history(text)?;
        let normalized = ingest::normalize(&records);
        Self::from_normalized(normalized)
    }

    /// Build a session by reading a watch-history file.
    pub fn load(path: &Path) -> Result<Self> {
        let records = ingest::read_history_file(path)?;
        let normalized = ingest::normalize(&records);
        Self::from_normalized(normalized)
    }

    fn from_normalized(normalized: ingest::Normalized) -> Result<Self> {
        let ingest::Normalized { events, ad_count } = normalized;
        let bounds = match events.first() {
            Some(first) => {
                let mut min = first.timestamp.year();
                let mut max = min;
                for event in &events[1..] {
                    let year = event.timestamp.year();
                    min = min.min(year);
                    max = max.max(year);
                }
                YearRange::new(min, max)
            }
            None => return Err(Error::NoValidEvents),
        };

        tracing::info!(
            events = events.len(),
            ad_count,
            min_year = bounds.min,
            max_year = bounds.max,
            "session ready"
        );

        Ok(Self {
            events,
            ad_count,
            bounds,
            filter: bounds,
        })
    }

    /// Full year range of the dataset, used to seed and clamp the filter
    /// control.
    pub fn year_bounds(&self) -> YearRange {
        self.bounds
    }

    /// The active year-range filter.
    pub fn filter(&self) -> YearRange {
        self.filter
    }

    /// Replace the active filter with the supplied inclusive range.
    ///
    /// The range is applied exactly as given, even when it lies entirely
    /// outside the dataset's year bounds; `summary()` then reports an empty
    /// filter result. Keeping the control inside the data is a UI
    /// affordance, not a session concern.
    pub fn set_filter(&mut self, range: YearRange) {
        if range != self.filter {
            tracing::debug!(min = range.min, max = range.max, "filter changed");
        }
        self.filter = range;
    }

    /// Number of normalized events in the full dataset (unfiltered).
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of ad records discarded during normalization.
    pub fn ad_count(&self) -> u64 {
        self.ad_count
    }

    /// Aggregate statistics under the active filter.
    ///
    /// Returns `None` when the filter selects zero events. That is not an
    /// error: the caller hides the stats display and keeps the filter
    /// control usable so the range can be widened again.
    pub fn summary(&self) -> Option<StatsSummary> {
        let filtered = analytics::filter_by_years(&self.events, self.filter);
        if filtered.is_empty() {
            tracing::debug!(
                min = self.filter.min,
                max = self.filter.max,
                "filter selected zero events"
            );
            return None;
        }
        Some(analytics::aggregate(&filtered, self.ad_count))
    }
}
