//! In-memory adapters for tests.

use super::traits::{AppPresence, Geocoder, UriLauncher};
use crate::deeplink::Coordinate;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeGeocoder {
    places: HashMap<String, Coordinate>,
    broken: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub fn with_place(mut self, address: &str, coordinate: Coordinate) -> Self {
        self.places.insert(address.to_string(), coordinate);
        self
    }

    /// Lookups of `address` fail as if the service were down.
    pub fn with_broken(mut self, address: &str) -> Self {
        self.broken.insert(address.to_string());
        self
    }

    /// Every address and coordinate looked up so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>> {
        self.calls.lock().unwrap().push(address.to_string());
        if self.broken.contains(address) {
            return Err(anyhow!("service unavailable"));
        }
        Ok(self.places.get(address).copied())
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<String>> {
        self.calls.lock().unwrap().push(coordinate.to_string());
        Ok(self
            .places
            .iter()
            .find(|(_, place)| **place == coordinate)
            .map(|(address, _)| address.clone()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingLauncher {
    failing_schemes: HashSet<String>,
    opened: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    /// Opening any uri with this scheme fails.
    pub fn failing(mut self, scheme: &str) -> Self {
        self.failing_schemes.insert(scheme.to_string());
        self
    }

    /// Every uri an open was attempted for, failed ones included.
    pub fn attempts(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl UriLauncher for RecordingLauncher {
    async fn open_uri(&self, uri: &str) -> Result<()> {
        self.opened.lock().unwrap().push(uri.to_string());

        let scheme = uri.split("://").next().unwrap_or_default();
        if self.failing_schemes.contains(scheme) {
            return Err(anyhow!("No activity found to handle {}", uri));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakePresence {
    installed: HashSet<String>,
}

impl FakePresence {
    pub fn with_installed(mut self, package: &str) -> Self {
        self.installed.insert(package.to_string());
        self
    }
}

#[async_trait]
impl AppPresence for FakePresence {
    async fn is_installed(&self, package: &str) -> bool {
        self.installed.contains(package)
    }
}
