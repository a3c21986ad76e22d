//! Midwatch binary: one check pass, intended to run as a scheduled task.
//!
//! Startup order matters: the config precondition and scheduler provisioning
//! come first so a fresh install gets its scripts and remediation hints even
//! when no check can run yet.

use midwatch::{PercentStore, StatusClient, TelegramNotifier, WatchConfig, app_dirs, schedule};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("midwatch=info")),
        )
        .init();

    tracing::info!("midwatch v{} starting", env!("CARGO_PKG_VERSION"));

    let home = app_dirs::home_dir();
    let config_path = app_dirs::config_file();

    if schedule::ensure_config_present(&config_path).is_err() {
        schedule::wait_for_acknowledgment();
        std::process::exit(1);
    }

    let config = WatchConfig::from_file(&config_path)?;

    let exe_path = std::env::current_exe()?;
    schedule::provision_scripts(&home, &exe_path)?;

    let client = StatusClient::new(&config.endpoint);
    let store = PercentStore::new(&home);
    let notifier = TelegramNotifier::new(&config.bot_token, config.chat_id);

    let summary = midwatch::run_checks(&config, &client, &store, &notifier).await;

    tracing::info!(
        checked = summary.checked,
        notified = summary.notified,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "check pass complete"
    );
    Ok(())
}
