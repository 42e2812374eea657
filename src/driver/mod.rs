//! Vendor driver surface for the ADIS16470 IMU.
//!
//! The adapter in [`crate::imu`] only ever talks to the device through
//! [`Adis16470Device`]. Acquisition, filtering and the SPI link belong to the
//! driver behind this trait.

pub mod sim;

pub use sim::SimAdis16470;

use crate::dashboard::Sendable;
use std::sync::Arc;

/// Readings exposed by an ADIS16470 driver.
///
/// Implementations refresh their values from their own acquisition thread, so
/// every accessor takes `&self` and the handle is shared behind an `Arc`.
pub trait Adis16470Device: Send + Sync + 'static {
    /// Accumulated yaw angle in degrees. Not wrapped.
    fn angle(&self) -> f64;
    /// Complementary-filter angle about the X axis in degrees
    fn x_complementary_angle(&self) -> f64;
    /// Complementary-filter angle about the Y axis in degrees
    fn y_complementary_angle(&self) -> f64;
    /// Acceleration along X in m/s²
    fn accel_x(&self) -> f64;
    /// Acceleration along Y in m/s²
    fn accel_y(&self) -> f64;
    /// Acceleration along Z in m/s²
    fn accel_z(&self) -> f64;
}

/// Dashboard view of a gyro: a single "Value" property holding the angle.
pub struct GyroSendable<D: Adis16470Device> {
    device: Arc<D>,
}

impl<D: Adis16470Device> GyroSendable<D> {
    pub fn new(device: Arc<D>) -> Self {
        Self { device }
    }
}

impl<D: Adis16470Device> Sendable for GyroSendable<D> {
    fn dashboard_type(&self) -> &'static str {
        "Gyro"
    }

    fn properties(&self) -> Vec<(&'static str, f64)> {
        vec![("Value", self.device.angle())]
    }
}
