//! Domain types, collaborator contracts and configuration shared by the
//! storehub crates.

mod app_config;
mod config;
pub mod directory;
pub mod sanitize;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{
    BoxError, CollaboratorError, GeocodingProvider, InputSanitizer, LatLng, SessionResolver,
    StoreDirectory,
};
pub use sanitize::XssSanitizer;
pub use store::{
    AccountInfo, Merchant, MerchantFilter, PageRequest, Paginated, Status, Store, StoreFilter,
    StoreRecord, YesOrNo,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("invalid yes/no flag: {0}")]
    InvalidFlag(String),
}
