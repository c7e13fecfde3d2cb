use {
    crate::buckets::{LEVEL_BUCKETS, WEALTH_BUCKETS},
    crate::filter::FilterState,
    crate::persistence::{self, Theme},
    crate::refresh::RefreshController,
    crate::store::DataStore,
    crate::ui::layout::{render_layout, RenderCtx},
    crate::views::{build_chart, ChartSlot},
    crossterm::event::{Event, KeyCode, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::{sync::Arc, time::Duration},
    tokio::sync::RwLock,
};

/// Which input the keyboard currently edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    LeaderboardSearch,
    TransactionSearch,
    TypeFilter,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::None => Focus::LeaderboardSearch,
            Focus::LeaderboardSearch => Focus::TransactionSearch,
            Focus::TransactionSearch => Focus::TypeFilter,
            Focus::TypeFilter => Focus::None,
        }
    }
}

/// Run the TUI event loop.
///
/// Owns the FilterState and theme; every frame re-reads the store and
/// re-renders all widgets, so displayed state always reflects the
/// current snapshot filtered by the current inputs.
pub async fn run_ui(
    store: Arc<RwLock<DataStore>>,
    controller: Arc<RefreshController>,
    initial_theme: Theme,
    theme_file: String,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Enable raw mode for keyboard input
    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen isolates the dashboard from stderr logs
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;

    terminal.clear()?;

    let mut filters = FilterState::default();
    let mut theme = initial_theme;
    let mut focus = Focus::None;
    let mut wealth_chart = ChartSlot::default();
    let mut levels_chart = ChartSlot::default();

    loop {
        // Check for keyboard input (non-blocking)
        if crossterm::event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press
                    && handle_key(
                        key.code,
                        &mut focus,
                        &mut filters,
                        &mut theme,
                        &theme_file,
                        &controller,
                    )
                {
                    break;
                }
            }
        }

        // Render UI from the current snapshot + filter state
        {
            let store = store.read().await;

            wealth_chart.update(build_chart(
                "Wealth Distribution",
                store.balances(),
                &WEALTH_BUCKETS,
            ));
            levels_chart.update(build_chart(
                "Level Distribution",
                store.levels(),
                &LEVEL_BUCKETS,
            ));

            let ctx = RenderCtx {
                theme,
                focus,
                refreshing: controller.is_refreshing(),
                wealth_chart: &wealth_chart,
                levels_chart: &levels_chart,
            };

            let area = terminal.size()?;
            terminal.draw(|f| render_layout(f, area, &store, &filters, &ctx))?;
        }
    }

    // Cleanup - restore terminal state
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}

/// Handle one key press. Returns true when the app should quit.
fn handle_key(
    code: KeyCode,
    focus: &mut Focus,
    filters: &mut FilterState,
    theme: &mut Theme,
    theme_file: &str,
    controller: &Arc<RefreshController>,
) -> bool {
    match code {
        KeyCode::Tab => *focus = focus.next(),
        KeyCode::Esc => {
            if *focus == Focus::None {
                return true;
            }
            *focus = Focus::None;
        }
        KeyCode::Backspace => match *focus {
            Focus::LeaderboardSearch => {
                filters.leaderboard_query.pop();
            }
            Focus::TransactionSearch => {
                filters.transaction_query.pop();
            }
            _ => {}
        },
        KeyCode::Left if *focus == Focus::TypeFilter => {
            filters.type_filter = filters.type_filter.prev();
        }
        KeyCode::Right if *focus == Focus::TypeFilter => {
            filters.type_filter = filters.type_filter.next();
        }
        KeyCode::Char(c) => match *focus {
            Focus::LeaderboardSearch => filters.leaderboard_query.push(c),
            Focus::TransactionSearch => filters.transaction_query.push(c),
            Focus::TypeFilter => {}
            Focus::None => match c {
                'q' => return true,
                'r' => {
                    // Manual refresh; ignored while a batch is in flight
                    if !controller.is_refreshing() {
                        let controller = controller.clone();
                        tokio::spawn(async move {
                            controller.refresh_all().await;
                        });
                    } else {
                        log::debug!("Manual refresh ignored: already in flight");
                    }
                }
                't' => {
                    *theme = theme.toggled();
                    if let Err(e) = persistence::save_theme(*theme, theme_file) {
                        log::warn!("Failed to save theme preference: {}", e);
                    }
                }
                _ => {}
            },
        },
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResult, EconomyUser, LevelUser, StatsResponse, StatsSource, Transaction};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct NullSource;

    #[async_trait]
    impl StatsSource for NullSource {
        async fn fetch_stats(&self) -> ApiResult<StatsResponse> {
            Ok(StatsResponse::default())
        }
        async fn fetch_transactions(&self) -> ApiResult<Vec<Transaction>> {
            Ok(vec![])
        }
        async fn fetch_economy(&self) -> ApiResult<HashMap<String, EconomyUser>> {
            Ok(HashMap::new())
        }
        async fn fetch_levels(&self) -> ApiResult<HashMap<String, LevelUser>> {
            Ok(HashMap::new())
        }
    }

    fn controller() -> Arc<RefreshController> {
        Arc::new(RefreshController::new(
            Arc::new(NullSource),
            Arc::new(RwLock::new(DataStore::new())),
        ))
    }

    #[tokio::test]
    async fn test_focus_cycle() {
        assert_eq!(Focus::None.next(), Focus::LeaderboardSearch);
        assert_eq!(Focus::TypeFilter.next(), Focus::None);
    }

    #[tokio::test]
    async fn test_typing_goes_to_focused_input() {
        let controller = controller();
        let mut filters = FilterState::default();
        let mut theme = Theme::Dark;
        let mut focus = Focus::TransactionSearch;

        for c in ['b', 'a', 'n', 'k'] {
            handle_key(
                KeyCode::Char(c),
                &mut focus,
                &mut filters,
                &mut theme,
                "unused",
                &controller,
            );
        }
        assert_eq!(filters.transaction_query, "bank");
        assert!(filters.leaderboard_query.is_empty());

        handle_key(
            KeyCode::Backspace,
            &mut focus,
            &mut filters,
            &mut theme,
            "unused",
            &controller,
        );
        assert_eq!(filters.transaction_query, "ban");
    }

    #[tokio::test]
    async fn test_q_quits_only_without_focus() {
        let controller = controller();
        let mut filters = FilterState::default();
        let mut theme = Theme::Dark;

        let mut focus = Focus::LeaderboardSearch;
        assert!(!handle_key(
            KeyCode::Char('q'),
            &mut focus,
            &mut filters,
            &mut theme,
            "unused",
            &controller,
        ));
        assert_eq!(filters.leaderboard_query, "q");

        let mut focus = Focus::None;
        assert!(handle_key(
            KeyCode::Char('q'),
            &mut focus,
            &mut filters,
            &mut theme,
            "unused",
            &controller,
        ));
    }

    #[tokio::test]
    async fn test_esc_clears_focus_before_quitting() {
        let controller = controller();
        let mut filters = FilterState::default();
        let mut theme = Theme::Dark;
        let mut focus = Focus::TypeFilter;

        assert!(!handle_key(
            KeyCode::Esc,
            &mut focus,
            &mut filters,
            &mut theme,
            "unused",
            &controller,
        ));
        assert_eq!(focus, Focus::None);
        assert!(handle_key(
            KeyCode::Esc,
            &mut focus,
            &mut filters,
            &mut theme,
            "unused",
            &controller,
        ));
    }
}
