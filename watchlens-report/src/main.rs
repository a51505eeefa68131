//! watchlens-report - one-shot watch-history summary CLI
//!
//! Prints the statistics summary for an exported watch history to the
//! terminal, or exports it as Markdown or JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use watchlens_core::analytics::day_name;
use watchlens_core::format::{format_count, format_date, hour_display};
use watchlens_core::{Config, Error, HistorySession, StatsSummary, YearRange};

#[derive(Parser, Debug)]
#[command(name = "watchlens-report")]
#[command(about = "Summarize an exported watch history")]
#[command(version)]
struct Args {
    /// Path to the exported watch-history.json (falls back to the
    /// `history.path` config entry)
    history: Option<PathBuf>,

    /// First year to include (default: earliest year in the data)
    #[arg(long)]
    from: Option<i32>,

    /// Last year to include (default: latest year in the data)
    #[arg(long)]
    to: Option<i32>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = watchlens_core::logging::init(&config.logging).ok();

    let path = args
        .history
        .or(config.history.path)
        .context("no history file given; pass a path or set history.path in the config")?;

    let mut session = match HistorySession::load(&path) {
        Ok(session) => session,
        Err(Error::InvalidFormat(reason)) => {
            anyhow::bail!("please provide a valid watch-history file ({reason})");
        }
        Err(Error::NoValidEvents) => {
            anyhow::bail!("no valid videos found in {}", path.display());
        }
        Err(e) => return Err(e).context("failed to load watch history"),
    };

    let bounds = session.year_bounds();
    let range = YearRange::new(
        args.from.unwrap_or(bounds.min),
        args.to.unwrap_or(bounds.max),
    );
    session.set_filter(range);

    let summary = match session.summary() {
        Some(summary) => summary,
        None => {
            // Empty filter result is not an error; say so and exit cleanly.
            println!(
                "No videos found between {} and {}.",
                session.filter().min,
                session.filter().max
            );
            return Ok(());
        }
    };

    match args.export.as_deref() {
        Some("json") => print_json(&summary)?,
        Some("md") => print_markdown(&summary, session.filter()),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&summary, session.filter()),
    }

    Ok(())
}

fn print_terminal(summary: &StatsSummary, range: YearRange) {
    let title = format!("Watch History {}–{}", range.min, range.max);

    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    println!("SUMMARY");
    println!(
        "   Videos:   {:<12} Channels: {}",
        format_count(summary.total_count),
        format_count(summary.unique_channel_count)
    );
    println!(
        "   Ads:      {:<12} Range: {} – {}",
        format_count(summary.ad_count),
        format_date(summary.min_date),
        format_date(summary.max_date)
    );
    println!();

    if !summary.top_channels.is_empty() {
        println!("TOP CHANNELS");
        for (i, (name, count)) in summary.top_channels.iter().enumerate() {
            println!("   {:>2}. {:<30} {:>8}", i + 1, name, format_count(*count));
        }
        println!();
    }

    println!("MONTHLY");
    for (key, count) in &summary.monthly_series {
        println!("   {}  {:>8}", key, format_count(*count));
    }
    println!();

    println!("TYPICAL DAY");
    for (day, avg) in summary.day_of_week_averages.iter().enumerate() {
        println!("   {:<10} {:>4} videos/day", day_name(day), avg);
    }
    println!();

    let peak_hour = peak_hour(summary);
    println!("PEAK HOUR  {}", hour_display(peak_hour));
    println!();
}

fn print_markdown(summary: &StatsSummary, range: YearRange) {
    println!("# Watch History {}–{}", range.min, range.max);
    println!();

    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Videos | {} |", format_count(summary.total_count));
    println!(
        "| Channels | {} |",
        format_count(summary.unique_channel_count)
    );
    println!("| Ads skipped | {} |", format_count(summary.ad_count));
    println!("| First video | {} |", format_date(summary.min_date));
    println!("| Last video | {} |", format_date(summary.max_date));
    println!();

    if !summary.top_channels.is_empty() {
        println!("## Top Channels");
        println!();
        for (i, (name, count)) in summary.top_channels.iter().enumerate() {
            println!("{}. **{}** - {} videos", i + 1, name, format_count(*count));
        }
        println!();
    }

    println!("## Monthly Trend");
    println!();
    println!("| Month | Videos |");
    println!("|-------|--------|");
    for (key, count) in &summary.monthly_series {
        println!("| {} | {} |", key, count);
    }
    println!();

    println!("## Typical Day");
    println!();
    for (day, avg) in summary.day_of_week_averages.iter().enumerate() {
        println!("- **{}:** {} videos/day", day_name(day), avg);
    }
    println!();

    println!("- **Peak hour:** {}", hour_display(peak_hour(summary)));
    println!();

    println!("---");
    println!("*Generated by watchlens-report*");
}

fn print_json(summary: &StatsSummary) -> Result<()> {
    let json = serde_json::json!({
        "totals": {
            "videos": summary.total_count,
            "ads": summary.ad_count,
            "unique_channels": summary.unique_channel_count,
            "min_date": summary.min_date.to_rfc3339(),
            "max_date": summary.max_date.to_rfc3339(),
        },
        "top_channels": summary.top_channels.iter().map(|(name, count)| {
            serde_json::json!({"name": name, "count": count})
        }).collect::<Vec<_>>(),
        "monthly": summary.monthly_series.iter().map(|(key, count)| {
            serde_json::json!({"month": key, "count": count})
        }).collect::<Vec<_>>(),
        "day_of_week_averages": summary.day_of_week_averages,
        "hourly_histogram": summary.hourly_histogram,
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Hour with the most activity; earliest wins a tie.
fn peak_hour(summary: &StatsSummary) -> u8 {
    summary
        .hourly_histogram
        .iter()
        .enumerate()
        .max_by(|(ha, a), (hb, b)| a.cmp(b).then(hb.cmp(ha)))
        .map(|(hour, _)| hour as u8)
        .unwrap_or(0)
}
