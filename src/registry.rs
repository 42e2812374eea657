use crate::config::{ImuEntry, SwerveImuConfig};
use crate::dashboard::Dashboard;
use crate::errors::{ImuError, ImuResult, RegistryResult};
use crate::imu::SwerveImu;
use tracing::info;

/// Builds a [`SwerveImu`] for one driver name
pub trait ImuFactory: Sync {
    fn name(&self) -> &'static str;
    fn create(&self, entry: &ImuEntry, dashboard: &Dashboard) -> ImuResult<Box<dyn SwerveImu>>;
}

#[cfg(feature = "adis16470")]
pub use self::sim_adis16470::SIM_ADIS16470_FACTORY;

#[cfg(feature = "adis16470")]
mod sim_adis16470 {
    use super::*;
    use crate::driver::SimAdis16470;
    use crate::imu::adis16470::{Adis16470Swerve, DEFAULT_DASHBOARD_KEY};
    use std::sync::Arc;

    pub static SIM_ADIS16470_FACTORY: SimAdis16470Factory = SimAdis16470Factory;

    pub struct SimAdis16470Factory;

    impl ImuFactory for SimAdis16470Factory {
        fn name(&self) -> &'static str {
            "adis16470_sim"
        }

        fn create(&self, entry: &ImuEntry, dashboard: &Dashboard) -> ImuResult<Box<dyn SwerveImu>> {
            let key = entry.dashboard_key.as_deref().unwrap_or(DEFAULT_DASHBOARD_KEY);
            if key.is_empty() {
                return Err(ImuError::InitError {
                    imu: entry.id.clone(),
                    reason: "dashboard key must not be empty".to_string(),
                });
            }
            let device = Arc::new(SimAdis16470::new());
            Ok(Box::new(Adis16470Swerve::with_key(device, dashboard, key)))
        }
    }
}

pub static IMU_FACTORIES: &[&dyn ImuFactory] = &[
    #[cfg(feature = "adis16470")]
    &SIM_ADIS16470_FACTORY,
];

pub fn create_imu(entry: &ImuEntry, dashboard: &Dashboard) -> ImuResult<Box<dyn SwerveImu>> {
    IMU_FACTORIES
        .iter()
        .find(|f| f.name() == entry.driver)
        .ok_or_else(|| ImuError::UnsupportedDriver {
            driver: entry.driver.clone(),
        })?
        .create(entry, dashboard)
}

/// Create the configured IMU and apply its initial yaw
pub fn init_imu(config: &SwerveImuConfig, dashboard: &Dashboard) -> RegistryResult<Box<dyn SwerveImu>> {
    let entry = &config.imu;
    info!("[registry] creating IMU: id={} driver={}", entry.id, entry.driver);

    let mut imu = create_imu(entry, dashboard)?;
    if let Some(yaw) = entry.initial_yaw {
        imu.set_yaw(yaw);
    }

    Ok(imu)
}
