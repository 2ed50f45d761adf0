use super::traits::{AppPresence, UriLauncher};
use anyhow::Result;
use async_trait::async_trait;
use log::info;

/// Prints deep links instead of opening them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRun;

#[async_trait]
impl UriLauncher for DryRun {
    async fn open_uri(&self, uri: &str) -> Result<()> {
        info!("Dry run, not opening {}", uri);
        println!("{}", uri);
        Ok(())
    }
}

#[async_trait]
impl AppPresence for DryRun {
    async fn is_installed(&self, package: &str) -> bool {
        !package.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn pretends_every_named_app_exists() {
        assert!(DryRun.is_installed("com.ubercab").await);
        assert!(!DryRun.is_installed("").await);
        assert!(DryRun.open_uri("bolt://ride?pickup=a&destination=b").await.is_ok());
    }
}
