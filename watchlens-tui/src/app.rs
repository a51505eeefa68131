//! Application state for the watchlens TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use watchlens_core::{HistorySession, StatsSummary, YearRange};

/// TUI state: the loaded session plus the summary derived under the active
/// filter.
///
/// `summary` is `None` when the filter selects zero events; the UI hides the
/// stats panels but keeps the filter control live so the range can be
/// widened again.
pub struct App {
    session: HistorySession,
    pub summary: Option<StatsSummary>,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: HistorySession) -> Self {
        let summary = session.summary();
        Self {
            session,
            summary,
            should_quit: false,
        }
    }

    /// Full year range of the dataset.
    pub fn bounds(&self) -> YearRange {
        self.session.year_bounds()
    }

    /// Active year-range filter.
    pub fn filter(&self) -> YearRange {
        self.session.filter()
    }

    /// Ads discarded during normalization (dataset-level, unfiltered).
    pub fn ad_count(&self) -> u64 {
        self.session.ad_count()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let bounds = self.bounds();
        let filter = self.filter();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Lower bound: left widens, right narrows. min may meet max but
            // never pass it, so a one-year range stays reachable.
            KeyCode::Left => {
                self.apply_filter(YearRange::new(
                    (filter.min - 1).max(bounds.min),
                    filter.max,
                ));
            }
            KeyCode::Right => {
                self.apply_filter(YearRange::new(
                    (filter.min + 1).min(filter.max),
                    filter.max,
                ));
            }
            // Upper bound: down narrows, up widens.
            KeyCode::Down => {
                self.apply_filter(YearRange::new(
                    filter.min,
                    (filter.max - 1).max(filter.min),
                ));
            }
            KeyCode::Up => {
                self.apply_filter(YearRange::new(
                    filter.min,
                    (filter.max + 1).min(bounds.max),
                ));
            }
            KeyCode::Char('r') => {
                self.apply_filter(bounds);
            }
            _ => {}
        }
    }

    fn apply_filter(&mut self, range: YearRange) {
        if range == self.session.filter() {
            return;
        }
        self.session.set_filter(range);
        // Re-derive from scratch; the previous summary is discarded.
        self.summary = self.session.summary();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const SAMPLE: &str = r#"[
        {"title":"A","titleUrl":"u1","time":"2020-03-05T10:00:00Z","subtitles":[{"name":"Ch1"}]},
        {"title":"B","titleUrl":"u2","time":"2022-07-10T20:00:00Z","subtitles":[{"name":"Ch2"}]},
        {"title":"C","titleUrl":"u3","time":"2024-01-01T08:00:00Z","subtitles":[{"name":"Ch1"}]}
    ]"#;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(HistorySession::from_json(SAMPLE).unwrap())
    }

    #[test]
    fn test_initial_summary_covers_full_range() {
        let app = test_app();
        assert_eq!(app.filter(), YearRange::new(2020, 2024));
        assert_eq!(app.summary.as_ref().unwrap().total_count, 3);
    }

    #[test]
    fn test_narrowing_recomputes_summary() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Right)); // min 2020 -> 2021
        app.handle_key(press(KeyCode::Right)); // min 2021 -> 2022
        assert_eq!(app.filter(), YearRange::new(2022, 2024));
        assert_eq!(app.summary.as_ref().unwrap().total_count, 2);
    }

    #[test]
    fn test_empty_range_hides_summary_but_recovers() {
        let mut app = test_app();
        // Narrow the upper bound down to 2021: only the 2020 event remains;
        // then push the lower bound up to 2021 for an empty one-year range.
        for _ in 0..3 {
            app.handle_key(press(KeyCode::Down));
        }
        assert_eq!(app.filter(), YearRange::new(2020, 2021));
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.filter(), YearRange::single(2021));
        assert!(app.summary.is_none());

        // Filter control stays usable: reset restores the stats.
        app.handle_key(press(KeyCode::Char('r')));
        assert_eq!(app.summary.as_ref().unwrap().total_count, 3);
    }

    #[test]
    fn test_bounds_are_clamped() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Left)); // already at dataset min
        app.handle_key(press(KeyCode::Up)); // already at dataset max
        assert_eq!(app.filter(), YearRange::new(2020, 2024));

        // min can never pass max
        for _ in 0..10 {
            app.handle_key(press(KeyCode::Right));
        }
        assert_eq!(app.filter().min, app.filter().max);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }
}
