//! Browser utilities

use std::process::Stdio;
use tokio::process::Command;

/// Command that opens `url` with the platform's default handler
fn browser_command(url: &str) -> Command {
    #[cfg(target_os = "macos")]
    let command = {
        let mut command = Command::new("open");
        command.arg(url);
        command
    };

    #[cfg(target_os = "windows")]
    let command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", url]);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    };

    command
}

/// Open a URL in the system's default browser
///
/// Output of the helper is discarded so it cannot draw over the TUI.
pub async fn open_url(url: String) {
    let result = browser_command(&url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match result {
        Ok(status) if status.success() => log::debug!("Opened {}", url),
        Ok(status) => log::warn!("Browser command for {} exited with {}", url, status),
        Err(e) => log::error!("Failed to open URL in browser: {}", e),
    }
}
