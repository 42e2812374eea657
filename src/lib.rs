// Public modules
pub mod config;
pub mod dashboard;
pub mod driver;
pub mod errors;
pub mod geometry;
pub mod imu;
pub mod messages;
pub mod registry;
pub mod scheduler;

// Re-export commonly used types
pub use config::{load_config, SwerveImuConfig};
pub use dashboard::{Dashboard, TelemetrySink};
pub use errors::{ConfigError, ImuError, RegistryError};
pub use geometry::{Rotation3d, Translation3d};
pub use imu::SwerveImu;
#[cfg(feature = "adis16470")]
pub use imu::Adis16470Swerve;
pub use registry::init_imu;
pub use scheduler::spawn_imu_task;

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_stream::StreamExt;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Initialize tracing, honouring `RUST_LOG` and falling back to `info`
pub fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .init();
}

/// Filter from `RUST_LOG`-style directives; unset, blank or invalid means `info`
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Run the IMU telemetry loop from `<config_path>/imu.toml` until Ctrl-C
pub async fn run_imu_telemetry(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("[SwerveImu] starting up...");

    let imu_config_path = format!("{}/imu.toml", config_path);
    let config = load_config(&imu_config_path)?;
    info!("[config] loaded IMU '{}' ({})", config.imu.id, config.imu.driver);

    let dashboard = Dashboard::new();
    let imu = init_imu(&config, &dashboard)?;
    info!("[registry] IMU initialized");

    let mut updates = dashboard.subscribe();
    let watcher = tokio::spawn(async move {
        while let Some(update) = updates.next().await {
            match update {
                Ok(update) => debug!("[dashboard] {} = {:?}", update.key, update.value),
                Err(e) => debug!("[dashboard] subscriber lagged: {}", e),
            }
        }
    });

    let imu = Arc::new(Mutex::new(imu));
    let task = spawn_imu_task(imu, Arc::new(dashboard), &config);
    info!("[main] telemetry task launched");

    tokio::signal::ctrl_c().await?;
    info!("[main] shutting down");
    task.abort();
    watcher.abort();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_rust_log_debug_enables_debug() {
        let filter = env_filter(Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            env_filter(Some("swerve_imu=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_default_filter_is_info() {
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_warn_silences_info() {
        assert_eq!(env_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }
}
