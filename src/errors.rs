use thiserror::Error;

/// Errors raised while creating or initializing an IMU
#[derive(Error, Debug)]
pub enum ImuError {
    #[error("Unsupported IMU driver: '{driver}'")]
    UnsupportedDriver { driver: String },

    #[error("IMU '{imu}' initialization failed: {reason}")]
    InitError { imu: String, reason: String },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Dashboard publishing errors
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to serialize telemetry: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to publish telemetry: {reason}")]
    PublishError { reason: String },
}

/// Startup errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create IMU: {0}")]
    DriverCreationError(#[from] ImuError),
}

pub type ImuResult<T> = Result<T, ImuError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DashboardResult<T> = Result<T, DashboardError>;
pub type RegistryResult<T> = Result<T, RegistryError>;
