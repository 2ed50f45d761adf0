use crate::adapters::traits::UriLauncher;
use crate::error::LaunchError;
use log::{error, info};
use std::time::Duration;

/// A deep link and the name of the app it is meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub provider: String,
    pub uri: String,
}

/// What happened to each of the two launches.
#[derive(Debug)]
pub struct LaunchReport {
    pub first: Result<(), LaunchError>,
    pub second: Result<(), LaunchError>,
}

impl LaunchReport {
    /// Messages for the user, one per app that failed to open.
    pub fn notices(&self) -> Vec<String> {
        [&self.first, &self.second]
            .into_iter()
            .filter_map(|result| result.as_ref().err())
            .map(ToString::to_string)
            .collect()
    }

    pub fn all_opened(&self) -> bool {
        self.first.is_ok() && self.second.is_ok()
    }
}

/// Open `first` right away and `second` after `delay`.
///
/// The delay gives the window manager a chance to put the second app next
/// to the first. Nothing confirms that it did.
pub async fn launch_side_by_side(
    launcher: &dyn UriLauncher,
    first: &LaunchTarget,
    second: &LaunchTarget,
    delay: Duration,
) -> LaunchReport {
    let first_result = launch(launcher, first).await;

    tokio::time::sleep(delay).await;

    let second_result = launch(launcher, second).await;

    LaunchReport {
        first: first_result,
        second: second_result,
    }
}

async fn launch(launcher: &dyn UriLauncher, target: &LaunchTarget) -> Result<(), LaunchError> {
    info!("Opening {} app", target.provider);

    launcher.open_uri(&target.uri).await.map_err(|e| {
        error!("Could not open {} app: {:#}", target.provider, e);
        LaunchError::new(&target.provider, &e)
    })
}
