use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Coordinates resolved for a free-form location string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Forward-geocoding collaborator. Job handlers treat lookup failures as
/// "no coordinates", so implementations may error freely.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, query: &str) -> anyhow::Result<Option<GeoPoint>>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Geocoder backed by the OpenStreetMap Nominatim search API.
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jobboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn locate(&self, query: &str) -> anyhow::Result<Option<GeoPoint>> {
        let url = format!("{}/search", self.base_url);
        let places: Vec<NominatimPlace> = self
            .http
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(place) = places.into_iter().next() else {
            debug!(query, "no geocoding result");
            return Ok(None);
        };

        Ok(Some(GeoPoint {
            latitude: place.lat.parse()?,
            longitude: place.lon.parse()?,
        }))
    }
}

/// Resolves nothing. Used in tests and when geocoding is unavailable.
pub struct NoopGeocoder;

#[async_trait]
impl Geocoder for NoopGeocoder {
    async fn locate(&self, _query: &str) -> anyhow::Result<Option<GeoPoint>> {
        Ok(None)
    }
}
