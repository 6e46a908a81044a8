//! HTTP client for the Tencent location service geocoder.
//!
//! Resolves a free-text address to a coordinate pair. The provider reports
//! failures inside a 200 response via a non-zero `status`; those surface as
//! [`GeoError::Provider`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use storehub_core::{CollaboratorError, GeocodingProvider, LatLng};

use crate::error::GeoError;
use crate::types::GeocoderResponse;

const DEFAULT_BASE_URL: &str = "https://apis.map.qq.com/";
const GEOCODER_PATH: &str = "ws/geocoder/v1/";

/// Geocoding client for `GET {base}ws/geocoder/v1/?address=..&key=..`.
///
/// Use [`TencentGeocoder::new`] for production or
/// [`TencentGeocoder::with_base_url`] to point at a mock server in tests.
pub struct TencentGeocoder {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl TencentGeocoder {
    /// Creates a client pointed at the production service.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeoError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`GeoError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("storehub/0.1 (store-admin)")
            .build()?;

        // Exactly one trailing slash, so joining keeps any path prefix.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(GEOCODER_PATH))
            .map_err(|e| GeoError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    /// Looks up the coordinates of `address`.
    ///
    /// # Errors
    ///
    /// - [`GeoError::Http`] on network failure.
    /// - [`GeoError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`GeoError::Deserialize`] if the body does not match the envelope.
    /// - [`GeoError::Provider`] if the provider reports a failure or returns
    ///   no location.
    pub async fn geocode(&self, address: &str) -> Result<LatLng, GeoError> {
        let url = self.build_url(address);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        let envelope: GeocoderResponse =
            serde_json::from_str(&body).map_err(|e| GeoError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        if envelope.status != 0 {
            return Err(GeoError::Provider {
                status: envelope.status,
                message: envelope.message,
            });
        }

        let location = envelope
            .result
            .map(|result| result.location)
            .ok_or_else(|| GeoError::Provider {
                status: envelope.status,
                message: "response carried no location".to_string(),
            })?;

        tracing::debug!(address, lat = location.lat, lng = location.lng, "address geocoded");
        Ok(LatLng {
            lat: location.lat,
            lng: location.lng,
        })
    }

    fn build_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }
}

#[async_trait]
impl GeocodingProvider for TencentGeocoder {
    async fn resolve(&self, address: &str) -> Result<LatLng, CollaboratorError> {
        self.geocode(address)
            .await
            .map_err(CollaboratorError::geocoding)
    }
}

/// Stand-in used when no geocoder key is configured; every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeocoder;

#[async_trait]
impl GeocodingProvider for DisabledGeocoder {
    async fn resolve(&self, address: &str) -> Result<LatLng, CollaboratorError> {
        tracing::warn!(address, "geocoding requested but no geocoder key is configured");
        Err(CollaboratorError::geocoding(GeoError::NotConfigured))
    }
}
