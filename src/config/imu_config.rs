use crate::errors::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::fs;

/// Root configuration with an `[imu]` table and an optional `[telemetry]` table
#[derive(Debug, Deserialize)]
pub struct SwerveImuConfig {
    pub imu: ImuEntry,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// The IMU to create
#[derive(Debug, Clone, Deserialize)]
pub struct ImuEntry {
    pub id: String,
    pub driver: String,
    pub dashboard_key: Option<String>,
    /// Yaw in degrees applied right after construction
    pub initial_yaw: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_device_id")]
    pub device_id: String,
    /// Publish rate in Hz
    #[serde(default = "default_frequency")]
    pub frequency: u32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            device_id: default_device_id(),
            frequency: default_frequency(),
        }
    }
}

fn default_device_id() -> String {
    "swerve_robot".to_string()
}

fn default_frequency() -> u32 {
    50
}

/// Parse and validate configuration text
pub fn parse_config(content: &str) -> ConfigResult<SwerveImuConfig> {
    let parsed: SwerveImuConfig = toml::from_str(content)?;

    if parsed.telemetry.frequency == 0 {
        return Err(ConfigError::InvalidValue {
            field: "telemetry.frequency".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    if let Some(yaw) = parsed.imu.initial_yaw {
        if !yaw.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "imu.initial_yaw".to_string(),
                reason: format!("must be finite, got {}", yaw),
            });
        }
    }

    Ok(parsed)
}

/// Loads config from TOML file
pub fn load_config(path: &str) -> ConfigResult<SwerveImuConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [imu]
            id = "gyro"
            driver = "adis16470_sim"
            dashboard_key = "Gyro"
            initial_yaw = 180.0

            [telemetry]
            device_id = "bot"
            frequency = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.imu.id, "gyro");
        assert_eq!(config.imu.driver, "adis16470_sim");
        assert_eq!(config.imu.dashboard_key.as_deref(), Some("Gyro"));
        assert_eq!(config.imu.initial_yaw, Some(180.0));
        assert_eq!(config.telemetry.device_id, "bot");
        assert_eq!(config.telemetry.frequency, 100);
    }

    #[test]
    fn test_telemetry_defaults() {
        let config = parse_config(
            r#"
            [imu]
            id = "gyro"
            driver = "adis16470_sim"
            "#,
        )
        .unwrap();

        assert!(config.imu.dashboard_key.is_none());
        assert!(config.imu.initial_yaw.is_none());
        assert_eq!(config.telemetry.device_id, "swerve_robot");
        assert_eq!(config.telemetry.frequency, 50);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let err = parse_config(
            r#"
            [imu]
            id = "gyro"
            driver = "adis16470_sim"

            [telemetry]
            frequency = 0
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "telemetry.frequency"));
    }

    #[test]
    fn test_non_finite_initial_yaw_rejected() {
        let err = parse_config(
            r#"
            [imu]
            id = "gyro"
            driver = "adis16470_sim"
            initial_yaw = nan
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "imu.initial_yaw"));
    }

    #[test]
    fn test_missing_imu_table() {
        let err = parse_config("[telemetry]\nfrequency = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::FormatError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("does/not/exist/imu.toml").unwrap_err();
        match err {
            ConfigError::LoadError { path, .. } => assert_eq!(path, "does/not/exist/imu.toml"),
            other => panic!("unexpected error: {}", other),
        }
    }
}
