//! Drives an Android device through `adb`.

use super::traits::{AppPresence, UriLauncher};
use crate::config::DeviceConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, error, info};
use std::process::Output;
use tokio::process::Command;

const FLAG_ACTIVITY_NEW_TASK: u32 = 0x1000_0000;
const FLAG_ACTIVITY_LAUNCH_ADJACENT: u32 = 0x0000_1000;

/// Intent flags asking for a new task placed next to the current one.
pub const SPLIT_SCREEN_FLAGS: u32 = FLAG_ACTIVITY_NEW_TASK | FLAG_ACTIVITY_LAUNCH_ADJACENT;

#[derive(Debug, Clone)]
pub struct AdbDevice {
    adb_path: String,
    serial: Option<String>,
}

impl AdbDevice {
    pub fn from_config(cfg: &DeviceConfig) -> Self {
        Self {
            adb_path: cfg.adb_path.clone(),
            serial: cfg.serial.clone(),
        }
    }

    /// Run `args` in a shell on the device.
    async fn shell(&self, args: &[String]) -> Result<Output> {
        let mut command = Command::new(&self.adb_path);
        if let Some(serial) = &self.serial {
            command.arg("-s").arg(serial);
        }
        command.arg("shell").args(args);

        debug!("Running {} shell {}", self.adb_path, args.join(" "));

        command
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.adb_path))
    }
}

#[async_trait]
impl UriLauncher for AdbDevice {
    async fn open_uri(&self, uri: &str) -> Result<()> {
        info!("Opening {}", uri);

        let output = self.shell(&start_activity_args(uri)).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(anyhow!(
                "adb exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        // `am start` exits with 0 even when no activity handles the uri
        match start_error(&stdout).or_else(|| start_error(&stderr)) {
            Some(message) => Err(anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AppPresence for AdbDevice {
    async fn is_installed(&self, package: &str) -> bool {
        if package.is_empty() {
            return false;
        }

        match self
            .shell(&["pm".to_string(), "path".to_string(), shell_quote(package)])
            .await
        {
            Ok(output) => {
                output.status.success()
                    && lists_package(&String::from_utf8_lossy(&output.stdout))
            }
            Err(e) => {
                error!("App not found: {}: {:#}", package, e);
                false
            }
        }
    }
}

fn start_activity_args(uri: &str) -> Vec<String> {
    vec![
        "am".to_string(),
        "start".to_string(),
        "-a".to_string(),
        "android.intent.action.VIEW".to_string(),
        "-f".to_string(),
        format!("{:#x}", SPLIT_SCREEN_FLAGS),
        "-d".to_string(),
        shell_quote(uri),
    ]
}

/// Quote for the device side shell, which would otherwise split on `&`.
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

fn start_error(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Error"))
        .map(str::to_string)
}

fn lists_package(output: &str) -> bool {
    output
        .lines()
        .any(|line| line.trim().starts_with("package:"))
}
