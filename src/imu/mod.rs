#[cfg(feature = "adis16470")]
pub mod adis16470;

#[cfg(feature = "adis16470")]
pub use adis16470::Adis16470Swerve;

use crate::geometry::{Rotation3d, Translation3d};
use std::any::Any;

/// Gravity used to express acceleration in g
pub const GRAVITY_MPS2: f64 = 9.81;

/// IMU abstraction consumed by the swerve drive.
///
/// Angles are in degrees unless stated otherwise. Every call forwards to the
/// underlying device and cannot fail.
pub trait SwerveImu: Send {
    /// Reset the IMU to its factory defaults.
    fn factory_default(&mut self);

    /// Clear sticky faults on the IMU.
    fn clear_sticky_faults(&mut self);

    /// Set the current yaw in degrees.
    fn set_yaw(&mut self, yaw: f64);

    /// `[yaw, pitch, roll]` in degrees.
    fn yaw_pitch_roll(&self) -> [f64; 3];

    /// Robot-relative rotation.
    fn rotation3d(&self) -> Rotation3d;

    /// Acceleration in m/s², or `None` if the device has no accelerometer.
    fn accel(&self) -> Option<Translation3d>;

    /// Acceleration `[x, y, z]` in g.
    fn accel_g(&self) -> Option<[f64; 3]> {
        self.accel().map(|a| {
            [
                a.x() / GRAVITY_MPS2,
                a.y() / GRAVITY_MPS2,
                a.z() / GRAVITY_MPS2,
            ]
        })
    }

    /// The underlying device, for downcasting to the concrete driver.
    fn imu(&self) -> &dyn Any;
}
