//! One comparison: check the input, resolve both ends, build both links,
//! open both apps.

pub mod launch;

use crate::adapters::traits::{AppPresence, Geocoder, UriLauncher};
use crate::config::Provider;
use crate::deeplink::{address_provider_link, coordinate_provider_link, Coordinate};
use crate::error::CompareError;
use launch::{launch_side_by_side, LaunchReport, LaunchTarget};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;

/// An end of the trip after geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Free text sent to providers that want addresses
    pub address: String,
    /// `None` when geocoding gave nothing
    pub coordinate: Option<Coordinate>,
}

/// The two deep links for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RideLinks {
    pub pickup: Place,
    pub dropoff: Place,
    pub address_link: LaunchTarget,
    pub coordinate_link: LaunchTarget,
}

impl RideLinks {
    /// Whether the coordinate provider got coordinates rather than addresses.
    pub fn uses_coordinates(&self) -> bool {
        self.pickup.coordinate.is_some() && self.dropoff.coordinate.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub name: String,
    pub installed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppAvailability {
    pub address_provider: ProviderStatus,
    pub coordinate_provider: ProviderStatus,
}

impl AppAvailability {
    pub fn as_pair(&self) -> (bool, bool) {
        (
            self.address_provider.installed,
            self.coordinate_provider.installed,
        )
    }

    pub fn all_installed(&self) -> bool {
        self.address_provider.installed && self.coordinate_provider.installed
    }

    /// A warning naming the missing apps, if any are missing.
    pub fn warning(&self) -> Option<String> {
        let missing: Vec<&str> = [&self.address_provider, &self.coordinate_provider]
            .into_iter()
            .filter(|status| !status.installed)
            .map(|status| status.name.as_str())
            .collect();

        match missing.as_slice() {
            [] => None,
            [one] => Some(format!("{} app is not installed", one)),
            many => Some(format!("{} apps are not installed", many.join(" and "))),
        }
    }
}

#[derive(Debug)]
pub struct Comparer {
    address_provider: Provider,
    coordinate_provider: Provider,
    launch_delay: Duration,
    geocoder: Arc<dyn Geocoder>,
    presence: Arc<dyn AppPresence>,
    launcher: Arc<dyn UriLauncher>,
}

impl Comparer {
    pub fn new(
        address_provider: Provider,
        coordinate_provider: Provider,
        launch_delay: Duration,
        geocoder: Arc<dyn Geocoder>,
        presence: Arc<dyn AppPresence>,
        launcher: Arc<dyn UriLauncher>,
    ) -> Self {
        Self {
            address_provider,
            coordinate_provider,
            launch_delay,
            geocoder,
            presence,
            launcher,
        }
    }

    pub async fn check_required_apps(&self) -> AppAvailability {
        let status = |provider: &Provider, installed| ProviderStatus {
            name: provider.name.clone(),
            installed,
        };

        AppAvailability {
            address_provider: status(
                &self.address_provider,
                self.presence.is_installed(&self.address_provider.package).await,
            ),
            coordinate_provider: status(
                &self.coordinate_provider,
                self.presence.is_installed(&self.coordinate_provider.package).await,
            ),
        }
    }

    /// Build both links for a trip. Only empty input is refused; every
    /// geocoding problem degrades to address based links.
    pub async fn prepare(&self, pickup: &str, dropoff: &str) -> Result<RideLinks, CompareError> {
        let (pickup, dropoff) = (pickup.trim(), dropoff.trim());
        if pickup.is_empty() || dropoff.is_empty() {
            return Err(CompareError::MissingAddress);
        }

        let pickup = self.resolve(pickup).await;
        let dropoff = self.resolve(dropoff).await;

        let address_link = LaunchTarget {
            provider: self.address_provider.name.clone(),
            uri: address_provider_link(
                &self.address_provider.scheme,
                &pickup.address,
                &dropoff.address,
            ),
        };
        let coordinate_link = LaunchTarget {
            provider: self.coordinate_provider.name.clone(),
            uri: coordinate_provider_link(
                &self.coordinate_provider.scheme,
                &pickup.address,
                &dropoff.address,
                pickup.coordinate,
                dropoff.coordinate,
            ),
        };

        let links = RideLinks {
            pickup,
            dropoff,
            address_link,
            coordinate_link,
        };
        if !links.uses_coordinates() {
            warn!(
                "Geocoding failed, using fallback {} deep link format",
                self.coordinate_provider.name
            );
        }

        Ok(links)
    }

    /// Prepare the links and open both apps.
    pub async fn compare(&self, pickup: &str, dropoff: &str) -> Result<LaunchReport, CompareError> {
        let links = self.prepare(pickup, dropoff).await?;
        Ok(self.launch(&links).await)
    }

    pub async fn launch(&self, links: &RideLinks) -> LaunchReport {
        launch_side_by_side(
            self.launcher.as_ref(),
            &links.address_link,
            &links.coordinate_link,
            self.launch_delay,
        )
        .await
    }

    async fn resolve(&self, input: &str) -> Place {
        if let Some(coordinate) = Coordinate::parse_literal(input) {
            let address = match self.geocoder.reverse_geocode(coordinate).await {
                Ok(Some(address)) => address,
                Ok(None) => {
                    warn!("No address found for {}, sending it as typed", coordinate);
                    input.to_string()
                }
                Err(e) => {
                    error!("Reverse geocoding failed for {}: {:#}", coordinate, e);
                    input.to_string()
                }
            };
            return Place {
                address,
                coordinate: Some(coordinate),
            };
        }

        let coordinate = match self.geocoder.geocode(input).await {
            Ok(Some(coordinate)) => {
                info!("Geocoded {:?} to {}", input, coordinate);
                Some(coordinate)
            }
            Ok(None) => {
                warn!("No results found for address: {}", input);
                None
            }
            Err(e) => {
                error!("Geocoding failed for address: {}: {:#}", input, e);
                None
            }
        };

        Place {
            address: input.to_string(),
            coordinate,
        }
    }
}
