use super::SwerveImu;
use crate::dashboard::Dashboard;
use crate::driver::{Adis16470Device, GyroSendable};
use crate::geometry::{Rotation3d, Translation3d};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info};

/// Dashboard key the gyro is published under unless configured otherwise
pub const DEFAULT_DASHBOARD_KEY: &str = "ADIS16470";

/// Swerve IMU backed by an ADIS16470.
///
/// The device reports an unbounded accumulated angle; yaw is reported relative
/// to an offset captured on factory reset or `set_yaw`.
pub struct Adis16470Swerve<D: Adis16470Device> {
    imu: Arc<D>,
    yaw_offset: f64,
}

impl<D: Adis16470Device> Adis16470Swerve<D> {
    /// Wrap the device, capture the yaw offset and publish the gyro.
    pub fn new(imu: Arc<D>, dashboard: &Dashboard) -> Self {
        Self::with_key(imu, dashboard, DEFAULT_DASHBOARD_KEY)
    }

    /// Like [`Adis16470Swerve::new`], publishing the gyro under `key`.
    pub fn with_key(imu: Arc<D>, dashboard: &Dashboard, key: &str) -> Self {
        let mut swerve = Self {
            imu,
            yaw_offset: 0.0,
        };
        swerve.factory_default();
        dashboard.put_data(key, Arc::new(GyroSendable::new(swerve.imu.clone())));
        info!("[adis16470] ready, dashboard key '{}'", key);
        swerve
    }

    /// Current yaw offset in degrees
    pub fn yaw_offset(&self) -> f64 {
        self.yaw_offset
    }
}

impl<D: Adis16470Device> SwerveImu for Adis16470Swerve<D> {
    fn factory_default(&mut self) {
        self.yaw_offset = self.imu.angle() % 360.0;
        debug!("[adis16470] yaw offset reset to {:.3}", self.yaw_offset);
    }

    fn clear_sticky_faults(&mut self) {
        // The ADIS16470 has no sticky faults.
    }

    /// The next yaw reading equals `yaw` (modulo 360); the offset stays
    /// within (-360, 360).
    fn set_yaw(&mut self, yaw: f64) {
        self.yaw_offset = ((self.imu.angle() % 360.0) - (yaw % 360.0)) % 360.0;
        info!(
            "[adis16470] yaw set to {:.3}, offset {:.3}",
            yaw, self.yaw_offset
        );
    }

    fn yaw_pitch_roll(&self) -> [f64; 3] {
        [
            (self.imu.angle() % 360.0) - self.yaw_offset,
            self.imu.x_complementary_angle() % 360.0,
            self.imu.y_complementary_angle() % 360.0,
        ]
    }

    fn rotation3d(&self) -> Rotation3d {
        Rotation3d::new(
            self.imu.y_complementary_angle().to_radians(),
            self.imu.x_complementary_angle().to_radians(),
            self.imu.angle().to_radians(),
        )
        .minus(&Rotation3d::new(0.0, 0.0, self.yaw_offset.to_radians()))
    }

    fn accel(&self) -> Option<Translation3d> {
        Some(Translation3d::new(
            self.imu.accel_x(),
            self.imu.accel_y(),
            self.imu.accel_z(),
        ))
    }

    fn imu(&self) -> &dyn Any {
        self.imu.as_ref()
    }
}
