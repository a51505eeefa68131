//! Watch-history ingestion and normalization
//!
//! Converts the raw exported JSON array into a clean list of [`WatchEvent`]s,
//! counting discarded ad records along the way.
//!
//! # Error Handling
//!
//! Ingestion is designed to be resilient and recover from bad records:
//!
//! - **Non-array or unparseable JSON**: rejected up front with
//!   [`Error::InvalidFormat`], before normalization is attempted.
//! - **Malformed array elements**: degraded to an empty record rather than
//!   failing the whole file. The empty record has no channel attribution and
//!   is therefore counted as an ad by the classifier.
//! - **Records without title, URL, or a parseable timestamp**: silently
//!   dropped (a debug log line is emitted); counted neither as ads nor as
//!   events.
//!
//! # Classification
//!
//! Per record, evaluated in order:
//! 1. ad-origin detail marker present, or no channel attribution → **ad**
//! 2. title + titleUrl + channel present and timestamp parses → **event**
//! 3. anything else → dropped
//!
//! Rule 1 intentionally conflates "no channel metadata" with "advertisement";
//! see [`RawRecord::is_ad`] for the rationale. `ad_count` may therefore
//! include malformed non-ad records. Known accuracy caveat, preserved from
//! the observed export behavior.

use crate::error::{Error, Result};
use crate::types::{RawRecord, WatchEvent};
use chrono::DateTime;
use std::path::Path;

/// Expected export filename; a different name logs a warning but never fails.
pub const EXPECTED_FILENAME: &str = "watch-history.json";

/// Files larger than this log a warning before parsing.
const LARGE_FILE_BYTES: u64 = 256 * 1024 * 1024;

/// Result of normalizing a raw history export.
#[derive(Debug, Default)]
pub struct Normalized {
    /// Validated watch events, in input order
    pub events: Vec<WatchEvent>,
    /// Raw records classified as advertisements
    pub ad_count: u64,
}

/// Read and parse a watch-history export file.
///
/// Returns [`Error::InvalidFormat`] if the content is not a JSON array, and
/// [`Error::Io`] if the file cannot be read.
pub fn read_history_file(path: &Path) -> Result<Vec<RawRecord>> {
    if path.file_name().and_then(|n| n.to_str()) != Some(EXPECTED_FILENAME) {
        tracing::warn!(
            path = %path.display(),
            expected = EXPECTED_FILENAME,
            "history file has an unexpected name"
        );
    }

    if let Ok(metadata) = std::fs::metadata(path) {
        if metadata.len() > LARGE_FILE_BYTES {
            tracing::warn!(
                path = %path.display(),
                size_bytes = metadata.len(),
                "history file is unusually large; parsing may take a while"
            );
        }
    }

    let text = std::fs::read_to_string(path)?;
    parse_history(&text)
}

/// Parse watch-history text into raw records.
///
/// The top-level value must be a JSON array; individual elements are
/// deserialized leniently, with elements of unexpected shape degrading to
/// [`RawRecord::default`].
pub fn parse_history(text: &str) -> Result<Vec<RawRecord>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| Error::InvalidFormat(format!("not valid JSON: {e}")))?;

    let items = value
        .as_array()
        .ok_or_else(|| Error::InvalidFormat("top-level value is not an array".to_string()))?;

    let records = items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone()).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "record has unexpected shape, degrading to empty");
                RawRecord::default()
            })
        })
        .collect();

    Ok(records)
}

/// Normalize raw records into watch events, counting discarded ads.
///
/// Empty input yields an empty result, not an error. The caller decides
/// whether zero surviving events is acceptable (sessions reject it with
/// [`Error::NoValidEvents`]).
pub fn normalize(records: &[RawRecord]) -> Normalized {
    let mut events = Vec::with_capacity(records.len());
    let mut ad_count = 0u64;
    let mut dropped = 0u64;

    for record in records {
        if record.is_ad() {
            ad_count += 1;
            continue;
        }

        match event_from_record(record) {
            Some(event) => events.push(event),
            None => {
                dropped += 1;
                tracing::debug!(
                    title = record.title.as_deref().unwrap_or(""),
                    time = record.time.as_deref().unwrap_or(""),
                    "dropping incomplete record"
                );
            }
        }
    }

    tracing::info!(
        total = records.len(),
        events = events.len(),
        ads = ad_count,
        dropped,
        "normalized watch history"
    );

    Normalized { events, ad_count }
}

/// Build a watch event from a non-ad record, or `None` if the record is
/// incomplete or its timestamp does not parse.
fn event_from_record(record: &RawRecord) -> Option<WatchEvent> {
    let title = record.title.as_deref()?;
    let title_url = record.title_url.as_deref()?;
    if title.is_empty() || title_url.is_empty() {
        return None;
    }

    let channel = record.channel()?;
    let time = record.time.as_deref()?;
    let timestamp = DateTime::parse_from_rfc3339(time).ok()?;

    Some(WatchEvent {
        timestamp,
        channel: channel.to_string(),
    })
}
