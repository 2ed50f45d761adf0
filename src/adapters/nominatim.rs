use super::traits::Geocoder;
use crate::config::GeocoderConfig;
use crate::deeplink::{format_coordinate, Coordinate};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;

/// Geocoder backed by a Nominatim compatible HTTP API.
pub struct NominatimGeocoder {
    endpoint: String,
    client: ClientWithMiddleware,
}

impl std::fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl NominatimGeocoder {
    pub fn from_config(cfg: &GeocoderConfig) -> Result<Self> {
        let client = reqwest_middleware::ClientBuilder::new(
            reqwest::ClientBuilder::new()
                .user_agent(cfg.user_agent.as_str())
                .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
                .build()?,
        )
        .with(RetryTransientMiddleware::new_with_policy(
            ExponentialBackoff::builder().build_with_max_retries(cfg.max_retries),
        ))
        .build();

        Ok(Self {
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>> {
        debug!("Geocoding {:?} via {}", address, self.endpoint);

        let hits = self
            .client
            .get(format!("{}/search", self.endpoint))
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<SearchHit>>()
            .await?;

        first_coordinate(hits)
    }

    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<String>> {
        debug!("Reverse geocoding {} via {}", coordinate, self.endpoint);

        let (lat, lon) = coordinate.formatted();
        let hit = self
            .client
            .get(format!("{}/reverse", self.endpoint))
            .query(&[("lat", lat), ("lon", lon), ("format", "jsonv2".to_string())])
            .send()
            .await?
            .error_for_status()?
            .json::<ReverseHit>()
            .await?;

        Ok(reverse_address(hit))
    }
}

#[derive(Deserialize, Debug)]
struct SearchHit {
    // Nominatim sends both as strings
    lat: String,
    lon: String,
}

#[derive(Deserialize, Debug)]
struct ReverseHit {
    display_name: Option<String>,
    error: Option<String>,
}

fn first_coordinate(hits: Vec<SearchHit>) -> Result<Option<Coordinate>> {
    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    let latitude = hit
        .lat
        .parse::<f64>()
        .with_context(|| format!("Invalid latitude {:?} from geocoder", hit.lat))?;
    let longitude = hit
        .lon
        .parse::<f64>()
        .with_context(|| format!("Invalid longitude {:?} from geocoder", hit.lon))?;

    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(anyhow!(
            "Geocoder returned a non finite position: {},{}",
            format_coordinate(latitude),
            format_coordinate(longitude)
        ));
    }

    Ok(Some(Coordinate::new(latitude, longitude)))
}

fn reverse_address(hit: ReverseHit) -> Option<String> {
    if let Some(error) = hit.error {
        debug!("Reverse geocoder found nothing: {}", error);
        return None;
    }
    hit.display_name.filter(|name| !name.trim().is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn takes_first_search_hit() {
        let hits: Vec<SearchHit> = serde_json::from_str(
            r#"[
                {"place_id": 1, "lat": "40.7588960", "lon": "-73.9851300", "display_name": "Times Square"},
                {"place_id": 2, "lat": "1.0", "lon": "2.0", "display_name": "Elsewhere"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            first_coordinate(hits).unwrap(),
            Some(Coordinate::new(40.758896, -73.98513))
        );
    }

    #[test]
    fn empty_search_is_no_match() {
        let hits: Vec<SearchHit> = serde_json::from_str("[]").unwrap();
        assert_eq!(first_coordinate(hits).unwrap(), None);
    }

    #[test]
    fn garbage_position_is_an_error() {
        let hits: Vec<SearchHit> =
            serde_json::from_str(r#"[{"lat": "north", "lon": "-73.98"}]"#).unwrap();
        assert!(first_coordinate(hits).is_err());
    }

    #[test]
    fn reverse_uses_display_name() {
        let hit: ReverseHit =
            serde_json::from_str(r#"{"display_name": "Central Park, New York"}"#).unwrap();
        assert_eq!(reverse_address(hit).as_deref(), Some("Central Park, New York"));

        let hit: ReverseHit = serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert_eq!(reverse_address(hit), None);
    }

    #[test]
    fn endpoint_loses_trailing_slash() {
        let cfg = GeocoderConfig {
            endpoint: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let geocoder = NominatimGeocoder::from_config(&cfg).unwrap();
        assert_eq!(geocoder.endpoint, "http://localhost:8080");
    }
}
