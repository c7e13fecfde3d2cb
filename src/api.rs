//! Dashboard API client
//!
//! Typed access to the backend aggregate-statistics endpoints:
//! - `GET {base}/stats` - overview totals and the three leaderboards
//! - `GET {base}/transactions` - recent economy events
//! - `GET {base}/economy` - per-user balances (wealth chart input)
//! - `GET {base}/levels` - per-user levels (level chart input)
//!
//! All fetching goes through the [`StatsSource`] trait so the refresh
//! path can be exercised in tests without a live backend.

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    std::{collections::HashMap, time::Duration},
};

pub type ApiResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Closed set of economy event types. The backend is free to grow new
/// ones; anything unrecognized deserializes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Daily,
    Weekly,
    Monthly,
    Work,
    Game,
    Bank,
    Business,
    Social,
    Tournament,
    LevelUp,
    Crime,
    Pvp,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Daily => "daily",
            TransactionType::Weekly => "weekly",
            TransactionType::Monthly => "monthly",
            TransactionType::Work => "work",
            TransactionType::Game => "game",
            TransactionType::Bank => "bank",
            TransactionType::Business => "business",
            TransactionType::Social => "social",
            TransactionType::Tournament => "tournament",
            TransactionType::LevelUp => "level_up",
            TransactionType::Crime => "crime",
            TransactionType::Pvp => "pvp",
            TransactionType::Unknown => "unknown",
        }
    }

    /// The fixed enumeration, in selector order.
    pub fn all() -> [TransactionType; 12] {
        [
            TransactionType::Daily,
            TransactionType::Weekly,
            TransactionType::Monthly,
            TransactionType::Work,
            TransactionType::Game,
            TransactionType::Bank,
            TransactionType::Business,
            TransactionType::Social,
            TransactionType::Tournament,
            TransactionType::LevelUp,
            TransactionType::Crime,
            TransactionType::Pvp,
        ]
    }
}

/// One economy event from `/transactions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub details: String,
    /// ISO datetime string; parsed tolerantly at display time.
    pub timestamp: String,
}

/// Optional per-user payload attached to a leaderboard entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryData {
    pub balance: Option<f64>,
    pub level: Option<f64>,
    pub xp: Option<f64>,
}

/// One ranked user snapshot. Which fields are present depends on the
/// leaderboard: rich/levels carry `value`/`data`, pvp carries
/// `wins`/`losses`/`rank`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub value: Option<f64>,
    pub data: Option<EntryData>,
    pub wins: Option<u64>,
    pub losses: Option<u64>,
    pub rank: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Leaderboards {
    pub top_rich: Vec<LeaderboardEntry>,
    pub top_levels: Vec<LeaderboardEntry>,
    pub top_pvp: Vec<LeaderboardEntry>,
}

/// Overview totals from `/stats`. Missing fields default to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub total_users: u64,
    pub total_balance: f64,
    pub total_bank_balance: f64,
    pub total_loans: f64,
    pub total_businesses: u64,
    pub total_games_played: u64,
    pub total_games_won: u64,
    pub total_duels: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsResponse {
    pub overview: Overview,
    pub leaderboards: Leaderboards,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyUser {
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelUser {
    pub level: Option<f64>,
}

/// Source of dashboard datasets. Implemented by [`ApiClient`] for the
/// real backend and by in-memory fakes in tests.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch_stats(&self) -> ApiResult<StatsResponse>;
    async fn fetch_transactions(&self) -> ApiResult<Vec<Transaction>>;
    async fn fetch_economy(&self) -> ApiResult<HashMap<String, EconomyUser>>;
    async fn fetch_levels(&self) -> ApiResult<HashMap<String, LevelUser>>;
}

/// HTTP client for the backend dashboard API.
pub struct ApiClient {
    base: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base: base.into(),
            client,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}/{}", self.base.trim_end_matches('/'), path);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(format!("dashboard API error on /{}: {}", path, response.status()).into());
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl StatsSource for ApiClient {
    async fn fetch_stats(&self) -> ApiResult<StatsResponse> {
        self.get_json("stats").await
    }

    async fn fetch_transactions(&self) -> ApiResult<Vec<Transaction>> {
        self.get_json("transactions").await
    }

    async fn fetch_economy(&self) -> ApiResult<HashMap<String, EconomyUser>> {
        self.get_json("economy").await
    }

    async fn fetch_levels(&self) -> ApiResult<HashMap<String, LevelUser>> {
        self.get_json("levels").await
    }
}
