/// Android device through `adb`: launching and installed checks
pub mod adb;
/// Launcher that only prints what it would open
pub mod dry_run;
/// HTTP geocoding
pub mod nominatim;
pub mod traits;

#[cfg(test)]
pub mod fake;
