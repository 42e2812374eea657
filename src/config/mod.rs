pub mod imu_config;

pub use imu_config::{load_config, parse_config, ImuEntry, SwerveImuConfig, TelemetryConfig};
