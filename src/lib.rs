//! Midwatch: passport application status watcher.
//!
//! Polls the MID status endpoint for each tracked application identifier,
//! detects completion-percent changes against a per-identifier state file,
//! and sends a Telegram notification when something moved.
//!
//! # Architecture
//!
//! One check pass is a sequential loop over the configured identifiers:
//! - **Status client**: Fetches and classifies the status endpoint response
//! - **Percent store**: One plain-text integer file per identifier
//! - **Notifier**: Best-effort, single-attempt Telegram delivery
//! - **Scheduler provisioner**: Writes the `schtasks` registration scripts once
//!
//! The tool is designed to run as a non-overlapping scheduled task, so a run
//! owns its state files exclusively and no locking is needed.

pub mod app_dirs;
pub mod config;
pub mod error;
pub mod notify;
pub mod run;
pub mod schedule;
pub mod state;
pub mod status;

pub use config::WatchConfig;
pub use error::{Result, WatchError};
pub use notify::TelegramNotifier;
pub use run::{RunSummary, run_checks};
pub use state::PercentStore;
pub use status::{StatusClient, StatusSnapshot};
