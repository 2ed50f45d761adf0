use crate::adapters::adb::AdbDevice;
use crate::adapters::dry_run::DryRun;
use crate::adapters::nominatim::NominatimGeocoder;
use crate::adapters::traits::{AppPresence, UriLauncher};
use crate::compare::Comparer;
use crate::config::{Command, Config};
use anyhow::{anyhow, Result};
use log::{info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Compare {
            pickup,
            dropoff,
            dry_run,
        } => {
            let comparer = build_comparer(&config, dry_run)?;
            let (pickup, dropoff) = match (pickup, dropoff) {
                (Some(pickup), Some(dropoff)) => (pickup, dropoff),
                (pickup, dropoff) => {
                    let mut input = BufReader::new(tokio::io::stdin());
                    let pickup = match pickup {
                        Some(pickup) => pickup,
                        None => prompt(&mut input, "Pickup location: ").await?,
                    };
                    let dropoff = match dropoff {
                        Some(dropoff) => dropoff,
                        None => prompt(&mut input, "Dropoff location: ").await?,
                    };
                    (pickup, dropoff)
                }
            };

            if let Some(warning) = comparer.check_required_apps().await.warning() {
                warn!("{}", warning);
                println!("Warning: {}", warning);
            }

            match comparer.compare(&pickup, &dropoff).await {
                Ok(report) => {
                    for notice in report.notices() {
                        println!("{}", notice);
                    }
                    if report.all_opened() {
                        info!("Both apps opened");
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        Command::Links { pickup, dropoff } => {
            let comparer = build_comparer(&config, true)?;
            match comparer.prepare(&pickup, &dropoff).await {
                Ok(links) => {
                    println!("{}: {}", links.address_link.provider, links.address_link.uri);
                    println!(
                        "{}: {}",
                        links.coordinate_link.provider, links.coordinate_link.uri
                    );
                }
                Err(e) => println!("{}", e),
            }
        }
        Command::Check => {
            let comparer = build_comparer(&config, false)?;
            let availability = comparer.check_required_apps().await;
            for status in [
                &availability.address_provider,
                &availability.coordinate_provider,
            ] {
                println!(
                    "{}: {}",
                    status.name,
                    if status.installed {
                        "installed"
                    } else {
                        "not installed"
                    }
                );
            }
        }
    }

    Ok(())
}

fn build_comparer(config: &Config, dry_run: bool) -> Result<Comparer> {
    let geocoder = Arc::new(NominatimGeocoder::from_config(&config.geocoder)?);
    let presence: Arc<dyn AppPresence>;
    let launcher: Arc<dyn UriLauncher>;
    if dry_run {
        presence = Arc::new(DryRun);
        launcher = Arc::new(DryRun);
    } else {
        let device = Arc::new(AdbDevice::from_config(&config.device));
        presence = device.clone();
        launcher = device;
    }

    Ok(Comparer::new(
        config.address_provider.clone(),
        config.coordinate_provider.clone(),
        config.launch_delay(),
        geocoder,
        presence,
        launcher,
    ))
}

async fn prompt<R>(input: &mut R, question: &str) -> Result<String>
where
    R: AsyncBufReadExt + Unpin,
{
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Err(anyhow!("Input closed before {}", question.trim_end()));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn prompt_reads_one_trimmed_line() {
        let mut input: &[u8] = b"  Times Square \nCentral Park\n";

        assert_eq!(prompt(&mut input, "").await.unwrap(), "Times Square");
        assert_eq!(prompt(&mut input, "").await.unwrap(), "Central Park");
        assert!(prompt(&mut input, "").await.is_err());
    }
}
