/// Geocoding, launching and installed checks behind traits
pub mod adapters;

/// Command line entry points
pub mod cli;

/// Resolve a trip and open both ride apps side by side
pub mod compare;

/// Parse command line arguments and the config file
pub mod config;

/// Build deep links for both ride apps
pub mod deeplink;

/// Errors shown to the user
pub mod error;

/// Timestamped, coloured log lines
pub mod log_format;
