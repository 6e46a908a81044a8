//! Response envelope of the `ws/geocoder/v1` endpoint.
//!
//! Only the fields the client reads are modelled; everything else is ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderResponse {
    /// `0` on success; any other value is a provider-side failure.
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub result: Option<GeocoderResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderResult {
    pub location: GeocoderLocation,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GeocoderLocation {
    pub lat: f64,
    pub lng: f64,
}
