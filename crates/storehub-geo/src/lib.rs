//! Address geocoding for store records.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DisabledGeocoder, TencentGeocoder};
pub use error::GeoError;
pub use types::{GeocoderLocation, GeocoderResponse, GeocoderResult};
