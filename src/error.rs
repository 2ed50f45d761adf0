use thiserror::Error;

/// Reasons a comparison is refused before any lookup happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("Please enter both pickup and dropoff locations")]
    MissingAddress,
}

/// One app could not be opened. The other launch is unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Could not open {provider} app")]
pub struct LaunchError {
    pub provider: String,
    pub reason: String,
}

impl LaunchError {
    pub fn new(provider: &str, reason: &anyhow::Error) -> Self {
        Self {
            provider: provider.to_string(),
            reason: format!("{:#}", reason),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn messages_name_the_provider() {
        let err = LaunchError::new("Bolt", &anyhow!("activity not found"));

        assert_eq!(err.to_string(), "Could not open Bolt app");
        assert_eq!(err.reason, "activity not found");
        assert_eq!(
            CompareError::MissingAddress.to_string(),
            "Please enter both pickup and dropoff locations"
        );
    }
}
