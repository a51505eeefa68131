//! Rendering for the watchlens TUI.
//!
//! Every frame is rebuilt from scratch: replacing the visualization is one
//! atomic draw, never an incremental mutation of a previous chart.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Sparkline},
    Frame,
};
use watchlens_core::analytics::day_name;
use watchlens_core::format::{format_count, format_date};
use watchlens_core::StatsSummary;

use crate::app::App;

const ACCENT: Color = Color::Cyan;
const LABEL_COLOR: Color = Color::DarkGray;
const BAR_COLOR: Color = Color::LightMagenta;
const BORDER_COLOR: Color = Color::Blue;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Stats content
        Constraint::Length(1), // Footer
    ])
    .split(frame.area());

    render_header(frame, app, chunks[0]);

    match &app.summary {
        Some(summary) => render_stats(frame, summary, chunks[1]),
        None => render_empty_range(frame, chunks[1]),
    }

    render_footer(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let filter = app.filter();
    let bounds = app.bounds();

    let header = Paragraph::new(Line::from(vec![
        Span::styled("watchlens", Style::default().fg(ACCENT).bold()),
        Span::raw("  "),
        Span::styled(
            format!("{}–{}", filter.min, filter.max),
            Style::default().fg(Color::Yellow).bold(),
        ),
        Span::styled(
            format!("  (data: {}–{})", bounds.min, bounds.max),
            Style::default().fg(LABEL_COLOR),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " ←/→ min year · ↑/↓ max year · r reset · q quit",
        Style::default().fg(LABEL_COLOR),
    )));
    frame.render_widget(footer, area);
}

/// Shown instead of the stats panels when the filter selects zero events.
fn render_empty_range(frame: &mut Frame, area: Rect) {
    let message = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "No videos in the selected year range",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(
            "widen the range with ←/↑ or press r to reset",
            Style::default().fg(LABEL_COLOR),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(message, area);
}

fn render_stats(frame: &mut Frame, summary: &StatsSummary, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Overview counters
        Constraint::Length(5), // Monthly trend
        Constraint::Length(5), // Hourly histogram
        Constraint::Length(4), // Day-of-week averages
        Constraint::Min(5),    // Top channels
    ])
    .split(area);

    render_overview(frame, summary, chunks[0]);
    render_monthly(frame, summary, chunks[1]);
    render_hourly(frame, summary, chunks[2]);
    render_weekdays(frame, summary, chunks[3]);
    render_top_channels(frame, summary, chunks[4]);
}

fn render_overview(frame: &mut Frame, summary: &StatsSummary, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Videos: ", Style::default().fg(LABEL_COLOR)),
            Span::styled(
                format_count(summary.total_count),
                Style::default().fg(ACCENT).bold(),
            ),
            Span::styled("   Channels: ", Style::default().fg(LABEL_COLOR)),
            Span::styled(
                format_count(summary.unique_channel_count),
                Style::default().fg(ACCENT).bold(),
            ),
            Span::styled("   Ads skipped: ", Style::default().fg(LABEL_COLOR)),
            Span::styled(
                format_count(summary.ad_count),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::styled("From ", Style::default().fg(LABEL_COLOR)),
            Span::raw(format_date(summary.min_date)),
            Span::styled(" to ", Style::default().fg(LABEL_COLOR)),
            Span::raw(format_date(summary.max_date)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_COLOR))
            .title(" Overview ")
            .title_style(Style::default().fg(BORDER_COLOR).bold()),
    );
    frame.render_widget(paragraph, area);
}

fn render_monthly(frame: &mut Frame, summary: &StatsSummary, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(" Monthly trend ")
        .title_style(Style::default().fg(BORDER_COLOR).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Sparkline
        Constraint::Length(1), // Month labels
    ])
    .split(inner);

    let data: Vec<u64> = summary.monthly_series.iter().map(|(_, c)| *c).collect();
    let sparkline = Sparkline::default()
        .data(&data)
        .style(Style::default().fg(ACCENT))
        .bar_set(symbols::bar::NINE_LEVELS);
    frame.render_widget(sparkline, chunks[0]);

    if let (Some((first, _)), Some((last, _))) = (
        summary.monthly_series.first(),
        summary.monthly_series.last(),
    ) {
        let width = chunks[1].width as usize;
        let gap = width.saturating_sub(first.len() + last.len());
        let labels = Paragraph::new(Line::from(Span::styled(
            format!("{}{}{}", first, " ".repeat(gap), last),
            Style::default().fg(LABEL_COLOR),
        )));
        frame.render_widget(labels, chunks[1]);
    }
}

fn render_hourly(frame: &mut Frame, summary: &StatsSummary, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(" By hour ")
        .title_style(Style::default().fg(BORDER_COLOR).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Sparkline
        Constraint::Length(1), // Hour labels
    ])
    .split(inner);

    let sparkline = Sparkline::default()
        .data(&summary.hourly_histogram)
        .style(Style::default().fg(ACCENT))
        .bar_set(symbols::bar::NINE_LEVELS);
    frame.render_widget(sparkline, chunks[0]);

    let labels = Paragraph::new(Line::from(Span::styled(
        "0h        6h        12h       18h       23h",
        Style::default().fg(LABEL_COLOR),
    )));
    frame.render_widget(labels, chunks[1]);
}

fn render_weekdays(frame: &mut Frame, summary: &StatsSummary, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(" Typical day (avg videos) ")
        .title_style(Style::default().fg(BORDER_COLOR).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Intensity blocks scaled against the busiest weekday.
    let max_avg = summary
        .day_of_week_averages
        .iter()
        .max()
        .copied()
        .unwrap_or(1)
        .max(1) as f64;

    let mut spans: Vec<Span> = Vec::new();
    for (day, &avg) in summary.day_of_week_averages.iter().enumerate() {
        let intensity = (avg as f64 / max_avg * 4.0) as usize;
        let bar_char = match intensity {
            0 => "░",
            1 => "▒",
            2 => "▓",
            _ => "█",
        };
        spans.push(Span::styled(
            &day_name(day)[..3],
            Style::default().fg(LABEL_COLOR),
        ));
        spans.push(Span::styled(
            format!(" {} ", bar_char.repeat(2)),
            Style::default().fg(BAR_COLOR),
        ));
        spans.push(Span::styled(
            format!("{avg}  "),
            Style::default().fg(ACCENT),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_top_channels(frame: &mut Frame, summary: &StatsSummary, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(" Top channels ")
        .title_style(Style::default().fg(BORDER_COLOR).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max_count = summary
        .top_channels
        .first()
        .map(|(_, c)| *c)
        .unwrap_or(1)
        .max(1);
    let name_width = 24usize;
    let bar_width = inner.width.saturating_sub(name_width as u16 + 10) as usize;

    let lines: Vec<Line> = summary
        .top_channels
        .iter()
        .map(|(name, count)| {
            let mut label: String = name.chars().take(name_width).collect();
            if name.chars().count() > name_width {
                label.pop();
                label.push('…');
            }
            let filled = ((*count as f64 / max_count as f64) * bar_width as f64) as usize;
            Line::from(vec![
                Span::styled(format!("{label:<name_width$} "), Style::default()),
                Span::styled("█".repeat(filled.max(1)), Style::default().fg(BAR_COLOR)),
                Span::styled(
                    format!(" {}", format_count(*count)),
                    Style::default().fg(ACCENT),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
