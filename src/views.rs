//! View-model builders for the dashboard widgets.
//!
//! Everything here is pure: the same filtered dataset always produces
//! the same rows, so a re-render fully replaces the previous content.
//! Terminal drawing lives in `ui::layout`; these types exist so widget
//! output can be asserted on without a terminal.

use {
    crate::api::{LeaderboardEntry, Transaction},
    crate::buckets::{bucketize, BucketSpec},
    crate::format,
    chrono::{DateTime, Utc},
};

/// Transaction feed shows at most this many rows after filtering.
pub const TRANSACTION_ROW_LIMIT: usize = 50;

/// Rank badge distinguishing the podium from the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBadge {
    Gold,
    Silver,
    Bronze,
    Plain,
}

impl RankBadge {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => RankBadge::Gold,
            2 => RankBadge::Silver,
            3 => RankBadge::Bronze,
            _ => RankBadge::Plain,
        }
    }
}

/// Which metric a leaderboard ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMetric {
    Balance,
    Level,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub badge: RankBadge,
    pub user: String,
    pub detail: String,
    pub value: String,
}

/// Why a widget has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The unfiltered source itself is empty.
    NoData,
    /// The source has entries but the active filters excluded them all.
    NoResults,
}

/// Decide between the two empty messages, or `None` when there are rows.
pub fn empty_state(source_len: usize, filtered_len: usize) -> Option<EmptyState> {
    if filtered_len > 0 {
        None
    } else if source_len == 0 {
        Some(EmptyState::NoData)
    } else {
        Some(EmptyState::NoResults)
    }
}

pub fn leaderboard_empty_text(state: EmptyState) -> &'static str {
    match state {
        EmptyState::NoData => "No data",
        EmptyState::NoResults => "No results",
    }
}

pub fn transactions_empty_text(state: EmptyState) -> &'static str {
    match state {
        EmptyState::NoData => "No transactions",
        EmptyState::NoResults => "No results",
    }
}

/// Resolve the ranked value for an entry: prefer the flat `value`,
/// fall back to the metric's field inside `data`, default 0.
fn resolve_value(entry: &LeaderboardEntry, metric: LeaderboardMetric) -> f64 {
    entry
        .value
        .or_else(|| {
            entry.data.as_ref().and_then(|d| match metric {
                LeaderboardMetric::Balance => d.balance,
                LeaderboardMetric::Level => d.level,
            })
        })
        .unwrap_or(0.0)
}

/// Build rows for the rich/levels leaderboards.
pub fn build_leaderboard(
    entries: &[&LeaderboardEntry],
    metric: LeaderboardMetric,
) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let rank = i + 1;
            let value = resolve_value(entry, metric);

            let detail = match metric {
                LeaderboardMetric::Balance => {
                    format!("{} 💎", format::format_number(value))
                }
                LeaderboardMetric::Level => {
                    let xp = entry.data.as_ref().and_then(|d| d.xp).unwrap_or(0.0);
                    format!("{} XP", format::format_number(xp))
                }
            };

            let value_text = match metric {
                LeaderboardMetric::Balance => format::format_number(value),
                LeaderboardMetric::Level => format!("Lv. {}", format::format_number(value)),
            };

            LeaderboardRow {
                rank,
                badge: RankBadge::for_rank(rank),
                user: format::short_user_id(&entry.user_id),
                detail,
                value: value_text,
            }
        })
        .collect()
}

/// Win percentage to one decimal; "0" when the user has never dueled.
pub fn win_rate(wins: u64, losses: u64) -> String {
    let total = wins + losses;
    if total == 0 {
        "0".to_string()
    } else {
        format!("{:.1}", wins as f64 / total as f64 * 100.0)
    }
}

/// Build rows for the PvP leaderboard.
pub fn build_pvp(entries: &[&LeaderboardEntry]) -> Vec<LeaderboardRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let rank = i + 1;
            let wins = entry.wins.unwrap_or(0);
            let losses = entry.losses.unwrap_or(0);
            let title = entry.rank.as_deref().unwrap_or("Rookie");

            LeaderboardRow {
                rank,
                badge: RankBadge::for_rank(rank),
                user: format::short_user_id(&entry.user_id),
                detail: format!("{} • {}% wins", title, win_rate(wins, losses)),
                value: format!("{}W/{}L", wins, losses),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub icon: &'static str,
    pub details: String,
    pub user: String,
    pub time: String,
    pub amount: String,
    pub positive: bool,
}

/// Build feed rows from an already-filtered transaction list,
/// truncated to [`TRANSACTION_ROW_LIMIT`].
pub fn build_transactions(items: &[&Transaction], now: DateTime<Utc>) -> Vec<TransactionRow> {
    items
        .iter()
        .take(TRANSACTION_ROW_LIMIT)
        .map(|t| {
            let positive = t.amount >= 0.0;
            let sign = if positive { "+" } else { "-" };

            TransactionRow {
                icon: format::icon_for(t.kind),
                details: t.details.clone(),
                user: format::short_user_id(&t.user_id),
                time: format::format_relative_time(&t.timestamp, now),
                amount: format!("{}{} 💎", sign, format::format_number(t.amount.abs())),
                positive,
            }
        })
        .collect()
}

/// Built distribution chart, ready for the bar-chart widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: &'static str,
    pub buckets: Vec<(&'static str, u64)>,
}

pub fn build_chart(title: &'static str, values: &[f64], spec: &BucketSpec) -> ChartModel {
    ChartModel {
        title,
        buckets: bucketize(values, spec),
    }
}

/// Owns the lifecycle of one chart mount point. Installing a new model
/// drops the previous one first, so repeated refreshes never leave two
/// charts bound to the same slot.
#[derive(Debug, Default)]
pub struct ChartSlot {
    model: Option<ChartModel>,
    generation: u64,
}

impl ChartSlot {
    pub fn update(&mut self, model: ChartModel) {
        let _disposed = self.model.take();
        self.model = Some(model);
        self.generation += 1;
    }

    pub fn current(&self) -> Option<&ChartModel> {
        self.model.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{EntryData, TransactionType};
    use crate::buckets::WEALTH_BUCKETS;

    fn rich_entry(user: &str, value: Option<f64>, balance: Option<f64>) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: user.to_string(),
            value,
            data: Some(EntryData {
                balance,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_rank_badges() {
        assert_eq!(RankBadge::for_rank(1), RankBadge::Gold);
        assert_eq!(RankBadge::for_rank(2), RankBadge::Silver);
        assert_eq!(RankBadge::for_rank(3), RankBadge::Bronze);
        assert_eq!(RankBadge::for_rank(4), RankBadge::Plain);
    }

    #[test]
    fn test_value_resolution_prefers_flat_value() {
        let a = rich_entry("1", Some(9_000.0), Some(1.0));
        let b = rich_entry("2", None, Some(5_000.0));
        let entries = vec![&a, &b];
        let rows = build_leaderboard(&entries, LeaderboardMetric::Balance);
        assert_eq!(rows[0].value, "9.0K");
        assert_eq!(rows[1].value, "5.0K");
    }

    #[test]
    fn test_level_rows_surface_xp_default_zero() {
        let entry = LeaderboardEntry {
            user_id: "7".to_string(),
            value: Some(42.0),
            data: Some(EntryData::default()),
            ..Default::default()
        };
        let entries = vec![&entry];
        let rows = build_leaderboard(&entries, LeaderboardMetric::Level);
        assert_eq!(rows[0].detail, "0 XP");
        assert_eq!(rows[0].value, "Lv. 42");
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(win_rate(3, 0), "100.0");
        assert_eq!(win_rate(0, 0), "0");
        assert_eq!(win_rate(1, 2), "33.3");
    }

    #[test]
    fn test_pvp_rows() {
        let entry = LeaderboardEntry {
            user_id: "99".to_string(),
            wins: Some(7),
            losses: Some(3),
            rank: Some("Veteran".to_string()),
            ..Default::default()
        };
        let entries = vec![&entry];
        let rows = build_pvp(&entries);
        assert_eq!(rows[0].value, "7W/3L");
        assert_eq!(rows[0].detail, "Veteran • 70.0% wins");
    }

    #[test]
    fn test_transaction_sign_rendering() {
        let now = Utc::now();
        let plus = Transaction {
            user_id: "1".to_string(),
            kind: TransactionType::Work,
            amount: 500.0,
            details: "shift".to_string(),
            timestamp: now.to_rfc3339(),
        };
        let minus = Transaction {
            amount: -1_500.0,
            ..plus.clone()
        };

        let items = vec![&plus, &minus];
        let rows = build_transactions(&items, now);
        assert_eq!(rows[0].amount, "+500 💎");
        assert!(rows[0].positive);
        assert_eq!(rows[1].amount, "-1.5K 💎");
        assert!(!rows[1].positive);
    }

    #[test]
    fn test_transaction_feed_truncates() {
        let now = Utc::now();
        let tx = Transaction {
            user_id: "1".to_string(),
            timestamp: now.to_rfc3339(),
            ..Default::default()
        };
        let many: Vec<Transaction> = (0..80).map(|_| tx.clone()).collect();
        let refs: Vec<&Transaction> = many.iter().collect();
        assert_eq!(build_transactions(&refs, now).len(), TRANSACTION_ROW_LIMIT);
    }

    #[test]
    fn test_empty_states() {
        assert_eq!(empty_state(0, 0), Some(EmptyState::NoData));
        assert_eq!(empty_state(5, 0), Some(EmptyState::NoResults));
        assert_eq!(empty_state(5, 2), None);
        assert_eq!(transactions_empty_text(EmptyState::NoData), "No transactions");
    }

    #[test]
    fn test_chart_slot_disposes_previous_instance() {
        let mut slot = ChartSlot::default();
        slot.update(build_chart("Wealth", &[5_000.0], &WEALTH_BUCKETS));
        slot.update(build_chart("Wealth", &[15_000.0], &WEALTH_BUCKETS));

        // exactly one model installed, reflecting only the latest update
        assert_eq!(slot.generation(), 2);
        let model = slot.current().unwrap();
        assert_eq!(model.buckets[0], ("0-10K", 0));
        assert_eq!(model.buckets[1], ("10K-100K", 1));
    }

    #[test]
    fn test_builders_are_deterministic() {
        let entry = rich_entry("1", Some(100.0), None);
        let entries = vec![&entry];
        let first = build_leaderboard(&entries, LeaderboardMetric::Balance);
        let second = build_leaderboard(&entries, LeaderboardMetric::Balance);
        assert_eq!(first, second);
    }
}
