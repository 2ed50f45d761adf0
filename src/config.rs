use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file filename (with path)
    #[arg(short, long, default_value = "ride-compare.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open both ride apps side by side with the trip pre-filled
    Compare {
        /// Pickup address, or `lat,lng`. Asked for when missing.
        #[arg(long)]
        pickup: Option<String>,
        /// Dropoff address, or `lat,lng`. Asked for when missing.
        #[arg(long)]
        dropoff: Option<String>,
        /// Print the links instead of opening them on the device
        #[arg(long)]
        dry_run: bool,
    },
    /// Print both deep links without launching anything
    Links {
        #[arg(long)]
        pickup: String,
        #[arg(long)]
        dropoff: String,
    },
    /// Check whether both ride apps are installed
    Check,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_launch_delay_ms")]
    pub launch_delay_ms: u64,
    pub address_provider: Provider,
    pub coordinate_provider: Provider,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub device: DeviceConfig,
}

/// A ride app, as seen by the deep link builders and the device.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Shown to the user, e.g. in "Could not open Uber app"
    pub name: String,
    /// URI scheme without `://`
    pub scheme: String,
    /// Package id used for the installed check
    pub package: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("ride-compare/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            max_retries: 3,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DeviceConfig {
    pub adb_path: String,
    pub serial: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adb_path: "adb".to_string(),
            serial: None,
        }
    }
}

fn default_launch_delay_ms() -> u64 {
    500
}

pub const DEFAULT_CONFIG: &str = r#"
# Wait this long (milliseconds) between opening the first
# and the second app, so the window manager has time to
# put them side by side.
launch_delay_ms = 500

# The app that gets pickup and dropoff as addresses
[address_provider]
name = "Uber"
scheme = "uber"
package = "com.ubercab"

# The app that prefers coordinates, with 6 decimals
[coordinate_provider]
name = "Bolt"
scheme = "bolt"
package = "ee.mtakso.client"

# Any Nominatim compatible geocoding service.
# Please set a user agent that identifies you, see
# https://operations.osmfoundation.org/policies/nominatim/
[geocoder]
endpoint = "https://nominatim.openstreetmap.org"
user_agent = "ride-compare"
timeout_secs = 10
max_retries = 3

# The Android device the apps are opened on
[device]
adb_path = "adb"
# serial = "emulator-5554"
"#;

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read config from `path`. Writes and uses the default config when
    /// the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Config file {} not found, creating default config file",
                    path.display()
                );
                if let Err(e) = std::fs::write(path, DEFAULT_CONFIG.trim()) {
                    warn!("Failed to write default config file: {}", e);
                }
                DEFAULT_CONFIG.to_string()
            }
            Err(e) => {
                return Err(anyhow::Error::from(e)
                    .context(format!("Failed to read config file {}", path.display())))
            }
        };

        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn launch_delay(&self) -> Duration {
        Duration::from_millis(self.launch_delay_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::from_toml(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.launch_delay(), Duration::from_millis(500));
        assert_eq!(config.address_provider.scheme, "uber");
        assert_eq!(config.coordinate_provider.package, "ee.mtakso.client");
        assert_eq!(config.device.adb_path, "adb");
        assert_eq!(config.device.serial, None);
        assert_eq!(config.geocoder.max_retries, 3);
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let config = Config::from_toml(
            r#"
            [address_provider]
            name = "A"
            scheme = "providerA"
            package = "com.example.a"

            [coordinate_provider]
            name = "B"
            scheme = "providerB"
            package = "com.example.b"
            "#,
        )
        .unwrap();

        assert_eq!(config.launch_delay_ms, 500);
        assert_eq!(config.geocoder.endpoint, "https://nominatim.openstreetmap.org");
        assert_eq!(config.device.adb_path, "adb");
    }

    #[test]
    fn missing_provider_is_an_error() {
        assert!(Config::from_toml("launch_delay_ms = 100").is_err());
    }

    #[test]
    fn parses_compare_arguments() {
        let args = Args::parse_from([
            "ride-compare",
            "--config",
            "/tmp/rides.toml",
            "compare",
            "--pickup",
            "Times Square",
            "--dry-run",
        ]);

        assert_eq!(args.config, PathBuf::from("/tmp/rides.toml"));
        match args.command {
            Command::Compare {
                pickup,
                dropoff,
                dry_run,
            } => {
                assert_eq!(pickup.as_deref(), Some("Times Square"));
                assert_eq!(dropoff, None);
                assert!(dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
