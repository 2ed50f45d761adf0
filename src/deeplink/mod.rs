//! Pure deep link construction. No I/O happens in here.

/// Deep link builders for both providers
pub mod builders;
/// Coordinate type and six-decimal formatting
pub mod coordinate;

pub use builders::{address_provider_link, coordinate_provider_link};
pub use coordinate::{format_coordinate, Coordinate};
