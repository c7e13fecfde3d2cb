//! Refresh orchestration: fetch -> store -> render-ready state.
//!
//! The controller runs Idle -> Refreshing -> Idle with no failure
//! terminal state: every fetch error is caught and logged per dataset,
//! and the machine always returns to Idle. One failing dataset never
//! blocks the others from updating.

use {
    crate::api::StatsSource,
    crate::store::DataStore,
    std::sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    tokio::sync::RwLock,
    tokio::time::{interval, Duration},
};

pub struct RefreshController {
    source: Arc<dyn StatsSource>,
    store: Arc<RwLock<DataStore>>,
    in_flight: AtomicBool,
    batch_seq: AtomicU64,
}

impl RefreshController {
    pub fn new(source: Arc<dyn StatsSource>, store: Arc<RwLock<DataStore>>) -> Self {
        Self {
            source,
            store,
            in_flight: AtomicBool::new(false),
            batch_seq: AtomicU64::new(1),
        }
    }

    /// True while a refresh batch is in flight. The UI uses this to
    /// show the manual trigger as disabled and to ignore it.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one full refresh batch.
    ///
    /// All four datasets are fetched concurrently under a single batch
    /// sequence number; each one is applied to the store independently.
    /// Timer ticks are not guarded against overlapping a manual refresh;
    /// the store's sequence guard makes such races harmless.
    pub async fn refresh_all(&self) {
        self.in_flight.store(true, Ordering::Release);
        let seq = self.batch_seq.fetch_add(1, Ordering::SeqCst);

        log::debug!("Refresh batch {} started", seq);

        tokio::join!(
            self.update_stats(seq),
            self.update_transactions(seq),
            self.update_economy(seq),
            self.update_levels(seq),
        );

        self.in_flight.store(false, Ordering::Release);
        log::debug!("Refresh batch {} finished", seq);
    }

    async fn update_stats(&self, seq: u64) {
        match self.source.fetch_stats().await {
            Ok(stats) => {
                let mut store = self.store.write().await;
                store.apply_stats(seq, stats);
            }
            Err(e) => log::error!("Error fetching stats: {}", e),
        }
    }

    async fn update_transactions(&self, seq: u64) {
        match self.source.fetch_transactions().await {
            Ok(transactions) => {
                let mut store = self.store.write().await;
                store.apply_transactions(seq, transactions);
            }
            Err(e) => log::error!("Error fetching transactions: {}", e),
        }
    }

    async fn update_economy(&self, seq: u64) {
        match self.source.fetch_economy().await {
            Ok(economy) => {
                let mut store = self.store.write().await;
                store.apply_economy(seq, economy);
            }
            Err(e) => log::error!("Error fetching economy: {}", e),
        }
    }

    async fn update_levels(&self, seq: u64) {
        match self.source.fetch_levels().await {
            Ok(levels) => {
                let mut store = self.store.write().await;
                store.apply_levels(seq, levels);
            }
            Err(e) => log::error!("Error fetching levels: {}", e),
        }
    }
}

/// Recurring refresh task. The first tick fires immediately, which
/// doubles as the unconditional initial load; failures are logged and
/// the next tick retries regardless.
pub async fn refresh_scheduler_task(controller: Arc<RefreshController>, period: Duration) {
    log::info!("Starting refresh scheduler (interval: {:?})", period);

    let mut timer = interval(period);
    loop {
        timer.tick().await;
        controller.refresh_all().await;
    }
}
