mod app_config;
mod brands;
mod config;
mod vehicles;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use brands::{
    load_brand_reference, parse_brand_reference, Brand, BrandReference, ReferenceFormat,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use vehicles::{
    Category, Fuel, Transmission, UnknownVariant, VehicleRecord, COLOR_NOT_INFORMED,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brand reference file {path}: {source}")]
    ReferenceFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brand reference file {path}: {reason}")]
    ReferenceFileParse { path: String, reason: String },

    #[error("brand reference validation failed: {0}")]
    Validation(String),
}
