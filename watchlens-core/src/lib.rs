//! # watchlens-core
//!
//! Core library for watchlens - a watch-history statistics analyzer.
//!
//! This library provides:
//! - Ingestion and normalization of exported watch-history JSON
//! - The statistics aggregation engine (totals, channel ranking, monthly
//!   trend, day-of-week averages, hourly histogram)
//! - Session state for one loaded dataset plus its year-range filter
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three stages:
//! - **Raw:** the exported JSON array, untrusted shape
//! - **Normalized:** validated [`WatchEvent`]s owned by a [`HistorySession`]
//! - **Derived:** a fresh [`StatsSummary`] per aggregation call (regenerable)
//!
//! ## Example
//!
//! ```rust,no_run
//! use watchlens_core::{HistorySession, YearRange};
//!
//! let mut session =
//!     HistorySession::load(std::path::Path::new("watch-history.json")).expect("load history");
//!
//! // Full-range statistics
//! let summary = session.summary().expect("dataset has events");
//! println!("{} videos across {} channels", summary.total_count, summary.unique_channel_count);
//!
//! // Narrow to one year and re-derive
//! session.set_filter(YearRange::single(2024));
//! if let Some(summary) = session.summary() {
//!     println!("{} videos in 2024", summary.total_count);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use session::HistorySession;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod session;
pub mod types;
