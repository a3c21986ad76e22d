//! Scheduler provisioning and the config-file precondition.
//!
//! Provisioning writes two Windows Task Scheduler registration scripts next
//! to the executable. Idempotence is file-existence based: a script that is
//! already on disk is never touched, so operator edits survive reruns.

use crate::error::{Result, WatchError};
use std::path::Path;

/// Install-schedule script filename.
pub const CREATE_SCRIPT_NAME: &str = "create_task.bat";
/// Uninstall-schedule script filename.
pub const DELETE_SCRIPT_NAME: &str = "delete_task.bat";

const TASK_NAME_MORNING: &str = "MidwatchMorningTask";
const TASK_NAME_EVENING: &str = "MidwatchEveningTask";

fn create_script_content(exe_path: &str) -> String {
    format!(
        ":: Register the twice-daily status check\r\n\
         schtasks /create /tn \"{TASK_NAME_MORNING}\" /tr \"{exe_path}\" /sc daily /st 09:00\r\n\
         schtasks /create /tn \"{TASK_NAME_EVENING}\" /tr \"{exe_path}\" /sc daily /st 21:00\r\n\
         \r\n\
         pause\r\n"
    )
}

fn delete_script_content() -> String {
    format!(
        ":: Remove the scheduled status checks\r\n\
         schtasks /delete /tn \"{TASK_NAME_MORNING}\" /f\r\n\
         schtasks /delete /tn \"{TASK_NAME_EVENING}\" /f\r\n\
         \r\n\
         pause\r\n"
    )
}

/// Hard precondition: the config file must exist before anything else runs.
///
/// On a missing file, logs step-by-step remediation instructions and returns
/// a config error; the binary waits for operator acknowledgment and exits
/// with status 1.
///
/// # Errors
///
/// Returns [`WatchError::Config`] when the file does not exist.
pub fn ensure_config_present(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    tracing::error!("config file not found: {}", path.display());
    tracing::error!("1. copy config.sample.toml to config.toml");
    tracing::error!("2. open config.toml in a text editor");
    tracing::error!("3. fill in your bot token, chat id, and application numbers");
    tracing::error!("4. restart the program");
    Err(WatchError::Config(format!(
        "config file not found: {}",
        path.display()
    )))
}

/// Block until the operator presses Enter.
///
/// Called before exiting on the missing-config path so the message stays
/// visible when the program was launched by double-click.
pub fn wait_for_acknowledgment() {
    eprintln!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

/// Write the install/uninstall scheduler scripts if they are not present.
///
/// Check-then-write once per script; repeated runs are no-ops once both
/// files exist.
///
/// # Errors
///
/// Returns an error if a missing script cannot be written.
pub fn provision_scripts(home: &Path, exe_path: &Path) -> Result<()> {
    let exe = exe_path.display().to_string();
    let scripts = [
        (home.join(CREATE_SCRIPT_NAME), create_script_content(&exe)),
        (home.join(DELETE_SCRIPT_NAME), delete_script_content()),
    ];

    for (path, content) in scripts {
        if path.exists() {
            tracing::info!(path = %path.display(), "scheduler script already exists, skipping");
            continue;
        }
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "scheduler script created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use std::path::PathBuf;

    #[test]
    fn provision_writes_both_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let exe = PathBuf::from(r"C:\midwatch\midwatch.exe");

        provision_scripts(dir.path(), &exe).unwrap();

        let create = std::fs::read_to_string(dir.path().join(CREATE_SCRIPT_NAME)).unwrap();
        let delete = std::fs::read_to_string(dir.path().join(DELETE_SCRIPT_NAME)).unwrap();

        assert!(create.contains(r"C:\midwatch\midwatch.exe"));
        assert!(create.contains("MidwatchMorningTask"));
        assert!(create.contains("/st 09:00"));
        assert!(create.contains("/st 21:00"));
        assert!(delete.contains("/delete /tn \"MidwatchEveningTask\" /f"));
        assert!(!delete.contains("midwatch.exe"));
    }

    #[test]
    fn provision_twice_leaves_existing_scripts_alone() {
        let dir = tempfile::tempdir().unwrap();
        let exe = PathBuf::from("/usr/local/bin/midwatch");

        provision_scripts(dir.path(), &exe).unwrap();

        // Operator edit must survive a rerun.
        let create_path = dir.path().join(CREATE_SCRIPT_NAME);
        std::fs::write(&create_path, "edited by hand").unwrap();

        provision_scripts(dir.path(), &exe).unwrap();
        let content = std::fs::read_to_string(&create_path).unwrap();
        assert_eq!(content, "edited by hand");
    }

    #[test]
    fn config_precondition_passes_when_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(ensure_config_present(&path).is_ok());
    }

    #[test]
    fn config_precondition_fails_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let result = ensure_config_present(&path);
        assert!(matches!(result, Err(WatchError::Config(_))));
    }
}
