use crate::deeplink::Coordinate;
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Turns free text addresses into coordinates and back.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Look up the coordinate of an address.
    ///
    /// `Ok(None)` means the lookup worked but nothing matched.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>>;

    /// Look up a human readable address for a coordinate.
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<String>>;
}

/// Opens a deep link in whatever app handles its scheme.
///
/// Implementations should ask for the app to be placed next to the
/// current one, in a new task, when the platform supports it.
#[async_trait]
pub trait UriLauncher: Send + Sync + Debug {
    async fn open_uri(&self, uri: &str) -> Result<()>;
}

/// Answers whether an app is installed.
#[async_trait]
pub trait AppPresence: Send + Sync + Debug {
    async fn is_installed(&self, package: &str) -> bool;
}
