//! In-memory store for the latest fetched snapshot of each dataset.
//!
//! The store is the single source of truth the filters read from. Each
//! dataset is replaced wholesale on a successful fetch, never mutated
//! in place. Because fetches from an older refresh batch can resolve
//! after a newer batch has already landed, every write carries the
//! batch sequence number and is dropped if a newer batch already
//! updated that dataset.

use {
    crate::api::{EconomyUser, LeaderboardEntry, LevelUser, Overview, StatsResponse, Transaction},
    chrono::{DateTime, Utc},
    std::collections::HashMap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dataset {
    Stats = 0,
    Transactions = 1,
    Economy = 2,
    Levels = 3,
}

/// Snapshot holder for all dashboard datasets.
#[derive(Default)]
pub struct DataStore {
    overview: Option<Overview>,
    top_rich: Vec<LeaderboardEntry>,
    top_levels: Vec<LeaderboardEntry>,
    top_pvp: Vec<LeaderboardEntry>,
    transactions: Vec<Transaction>,
    balances: Vec<f64>,
    levels: Vec<f64>,
    last_updated: Option<DateTime<Utc>>,
    /// Last applied batch sequence number per dataset.
    applied_seq: [u64; 4],
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn accept(&mut self, dataset: Dataset, seq: u64) -> bool {
        let slot = &mut self.applied_seq[dataset as usize];
        if seq < *slot {
            log::debug!(
                "Dropping stale response for {:?} (batch {} < applied {})",
                dataset,
                seq,
                *slot
            );
            return false;
        }
        *slot = seq;
        true
    }

    fn mark_updated(&mut self) {
        self.last_updated = Some(Utc::now());
    }

    /// Apply a `/stats` response: overview and all three leaderboards.
    /// Returns false when a newer batch already landed.
    pub fn apply_stats(&mut self, seq: u64, stats: StatsResponse) -> bool {
        if !self.accept(Dataset::Stats, seq) {
            return false;
        }
        self.overview = Some(stats.overview);
        self.top_rich = stats.leaderboards.top_rich;
        self.top_levels = stats.leaderboards.top_levels;
        self.top_pvp = stats.leaderboards.top_pvp;
        self.mark_updated();
        true
    }

    pub fn apply_transactions(&mut self, seq: u64, transactions: Vec<Transaction>) -> bool {
        if !self.accept(Dataset::Transactions, seq) {
            return false;
        }
        self.transactions = transactions;
        self.mark_updated();
        true
    }

    /// Apply `/economy`: keep only the balance values the wealth chart
    /// buckets over. Missing balances default to 0.
    pub fn apply_economy(&mut self, seq: u64, economy: HashMap<String, EconomyUser>) -> bool {
        if !self.accept(Dataset::Economy, seq) {
            return false;
        }
        self.balances = economy.values().map(|u| u.balance.unwrap_or(0.0)).collect();
        self.mark_updated();
        true
    }

    pub fn apply_levels(&mut self, seq: u64, levels: HashMap<String, LevelUser>) -> bool {
        if !self.accept(Dataset::Levels, seq) {
            return false;
        }
        self.levels = levels.values().map(|u| u.level.unwrap_or(0.0)).collect();
        self.mark_updated();
        true
    }

    pub fn overview(&self) -> Option<&Overview> {
        self.overview.as_ref()
    }

    pub fn top_rich(&self) -> &[LeaderboardEntry] {
        &self.top_rich
    }

    pub fn top_levels(&self) -> &[LeaderboardEntry] {
        &self.top_levels
    }

    pub fn top_pvp(&self) -> &[LeaderboardEntry] {
        &self.top_pvp
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}
