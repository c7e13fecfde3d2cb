use std::env;

/// Configuration loaded from environment variables
pub struct Config {
    pub api_base: String,
    pub refresh_interval_secs: u64,
    pub theme_file: String,
    pub rust_log: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Everything has a default so the dashboard runs against a local
    /// backend with no .env file at all.
    pub fn from_env() -> Self {
        let api_base =
            env::var("API_BASE").unwrap_or_else(|_| "http://localhost:5001/api".to_string());

        let refresh_interval_secs = env::var("REFRESH_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(30);

        let theme_file =
            env::var("THEME_FILE").unwrap_or_else(|_| "dashboard-theme.json".to_string());

        let rust_log = env::var("RUST_LOG").ok();

        Self {
            api_base,
            refresh_interval_secs,
            theme_file,
            rust_log,
        }
    }
}
