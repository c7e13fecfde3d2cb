pub mod api;
pub mod buckets;
pub mod config;
pub mod filter;
pub mod format;
pub mod persistence;
pub mod refresh;
pub mod store;
pub mod ui;
pub mod views;

use {
    api::ApiClient,
    config::Config,
    refresh::RefreshController,
    std::{sync::Arc, time::Duration},
    store::DataStore,
    tokio::sync::RwLock,
};

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Write logs to stderr (suppressed once the UI enters the alternate screen)
    let mut builder = if config.rust_log.is_some() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    } else {
        env_logger::Builder::from_default_env()
    };
    builder.target(env_logger::Target::Stderr).init();

    log::info!("Starting ecodash");
    log::info!("   API_BASE: {}", config.api_base);
    log::info!("   Refresh interval: {}s", config.refresh_interval_secs);

    let theme = persistence::load_theme(&config.theme_file);
    log::info!("   Theme: {}", theme.as_str());

    let store = Arc::new(RwLock::new(DataStore::new()));
    let client = ApiClient::new(&config.api_base)
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    let controller = Arc::new(RefreshController::new(Arc::new(client), store.clone()));

    // Recurring refresh; the first tick fires immediately and doubles
    // as the initial load.
    let scheduler = controller.clone();
    let period = Duration::from_secs(config.refresh_interval_secs);
    tokio::spawn(async move {
        refresh::refresh_scheduler_task(scheduler, period).await;
    });

    ui::run_ui(store, controller, theme, config.theme_file).await?;

    log::info!("ecodash exited");
    Ok(())
}
