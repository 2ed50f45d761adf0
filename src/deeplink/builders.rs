use super::coordinate::Coordinate;

/// Form-encode a free text address for use as a query value.
///
/// Spaces become `+`, ASCII alphanumerics and `*-._` are kept.
pub fn encode_address(address: &str) -> String {
    form_urlencoded::byte_serialize(address.as_bytes()).collect()
}

/// Deep link for the provider that only understands addresses.
pub fn address_provider_link(scheme: &str, pickup: &str, dropoff: &str) -> String {
    format!(
        "{}://?action=setPickup&pickup[formatted_address]={}&dropoff[formatted_address]={}",
        scheme,
        encode_address(pickup),
        encode_address(dropoff)
    )
}

/// Deep link for the provider that prefers coordinates.
///
/// Coordinates are only used when both ends have one. Otherwise both ends
/// fall back to their encoded addresses.
pub fn coordinate_provider_link(
    scheme: &str,
    pickup: &str,
    dropoff: &str,
    pickup_coordinate: Option<Coordinate>,
    dropoff_coordinate: Option<Coordinate>,
) -> String {
    match (pickup_coordinate, dropoff_coordinate) {
        (Some(pickup), Some(dropoff)) => {
            let (pickup_lat, pickup_lng) = pickup.formatted();
            let (destination_lat, destination_lng) = dropoff.formatted();
            format!(
                "{}://ride?pickup_lat={}&pickup_lng={}&destination_lat={}&destination_lng={}",
                scheme, pickup_lat, pickup_lng, destination_lat, destination_lng
            )
        }
        _ => format!(
            "{}://ride?pickup={}&destination={}",
            scheme,
            encode_address(pickup),
            encode_address(dropoff)
        ),
    }
}
