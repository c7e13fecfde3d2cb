//! End-to-end dashboard flow: fake backend -> refresh -> filter -> views.

use {
    async_trait::async_trait,
    chrono::Utc,
    ecodash::api::{
        ApiResult, EconomyUser, Leaderboards, LeaderboardEntry, LevelUser, StatsResponse,
        StatsSource, Transaction, TransactionType,
    },
    ecodash::filter::{filter_transactions, FilterState, TypeFilter},
    ecodash::refresh::RefreshController,
    ecodash::store::DataStore,
    ecodash::views,
    std::collections::HashMap,
    std::sync::Arc,
    tokio::sync::RwLock,
};

struct FakeBackend {
    transactions: Vec<Transaction>,
    leaderboards: Leaderboards,
}

#[async_trait]
impl StatsSource for FakeBackend {
    async fn fetch_stats(&self) -> ApiResult<StatsResponse> {
        Ok(StatsResponse {
            leaderboards: self.leaderboards.clone(),
            ..Default::default()
        })
    }

    async fn fetch_transactions(&self) -> ApiResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    async fn fetch_economy(&self) -> ApiResult<HashMap<String, EconomyUser>> {
        Ok(HashMap::new())
    }

    async fn fetch_levels(&self) -> ApiResult<HashMap<String, LevelUser>> {
        Ok(HashMap::new())
    }
}

fn tx(user: &str, kind: TransactionType, details: &str) -> Transaction {
    Transaction {
        user_id: user.to_string(),
        kind,
        amount: 250.0,
        details: details.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }
}

async fn refreshed_store(backend: FakeBackend) -> Arc<RwLock<DataStore>> {
    let store = Arc::new(RwLock::new(DataStore::new()));
    let controller = RefreshController::new(Arc::new(backend), store.clone());
    controller.refresh_all().await;
    store
}

#[tokio::test]
async fn empty_transaction_source_shows_no_transactions_not_no_results() {
    let store = refreshed_store(FakeBackend {
        transactions: vec![],
        leaderboards: Leaderboards::default(),
    })
    .await;

    let store = store.read().await;
    let filters = FilterState::default();
    let filtered = filter_transactions(store.transactions(), &filters);

    let state = views::empty_state(store.transactions().len(), filtered.len()).unwrap();
    assert_eq!(views::transactions_empty_text(state), "No transactions");
}

#[tokio::test]
async fn filters_excluding_everything_show_no_results() {
    let store = refreshed_store(FakeBackend {
        transactions: vec![tx("1", TransactionType::Game, "slots")],
        leaderboards: Leaderboards::default(),
    })
    .await;

    let store = store.read().await;
    let filters = FilterState {
        transaction_query: "nothing matches this".to_string(),
        ..Default::default()
    };
    let filtered = filter_transactions(store.transactions(), &filters);

    let state = views::empty_state(store.transactions().len(), filtered.len()).unwrap();
    assert_eq!(views::transactions_empty_text(state), "No results");
}

#[tokio::test]
async fn bank_type_filter_with_cleared_search_returns_all_banks_in_order() {
    let store = refreshed_store(FakeBackend {
        transactions: vec![
            tx("alice", TransactionType::Bank, "deposit"),
            tx("bob", TransactionType::Game, "roulette"),
            tx("carol", TransactionType::Bank, "withdrawal"),
            tx("dave", TransactionType::Work, "shift"),
            tx("erin", TransactionType::Bank, "interest"),
        ],
        leaderboards: Leaderboards::default(),
    })
    .await;

    let store = store.read().await;

    // user narrows the search, then clears it; the type filter stays active
    let mut filters = FilterState {
        transaction_query: "withdraw".to_string(),
        type_filter: TypeFilter::Only(TransactionType::Bank),
        ..Default::default()
    };
    assert_eq!(filter_transactions(store.transactions(), &filters).len(), 1);

    filters.transaction_query.clear();
    let filtered = filter_transactions(store.transactions(), &filters);

    let users: Vec<&str> = filtered.iter().map(|t| t.user_id.as_str()).collect();
    assert_eq!(users, vec!["alice", "carol", "erin"]);
}

#[tokio::test]
async fn leaderboards_render_after_refresh() {
    let entry = |user: &str, wins: u64, losses: u64| LeaderboardEntry {
        user_id: user.to_string(),
        wins: Some(wins),
        losses: Some(losses),
        rank: Some("Veteran".to_string()),
        ..Default::default()
    };

    let store = refreshed_store(FakeBackend {
        transactions: vec![],
        leaderboards: Leaderboards {
            top_pvp: vec![entry("champ", 3, 0), entry("rookie", 0, 0)],
            ..Default::default()
        },
    })
    .await;

    let store = store.read().await;
    let pvp: Vec<&LeaderboardEntry> = store.top_pvp().iter().collect();
    let rows = views::build_pvp(&pvp);

    assert_eq!(rows[0].badge, views::RankBadge::Gold);
    assert!(rows[0].detail.contains("100.0% wins"));
    assert!(rows[1].detail.contains("0% wins"));
    assert_eq!(rows[1].value, "0W/0L");
}
