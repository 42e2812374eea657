use super::Adis16470Device;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default, Clone, Copy)]
struct SimState {
    angle: f64,
    x_comp: f64,
    y_comp: f64,
    accel: [f64; 3],
}

/// Simulated ADIS16470 whose readings are set by the caller
#[derive(Debug, Default)]
pub struct SimAdis16470 {
    state: Mutex<SimState>,
}

impl SimAdis16470 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_angle(&self, degrees: f64) {
        self.update(|s| s.angle = degrees);
    }

    pub fn set_complementary_angles(&self, x_degrees: f64, y_degrees: f64) {
        self.update(|s| {
            s.x_comp = x_degrees;
            s.y_comp = y_degrees;
        });
    }

    /// Set acceleration in m/s²
    pub fn set_accel(&self, x: f64, y: f64, z: f64) {
        self.update(|s| s.accel = [x, y, z]);
    }

    fn update(&self, f: impl FnOnce(&mut SimState)) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    fn read(&self) -> SimState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Adis16470Device for SimAdis16470 {
    fn angle(&self) -> f64 {
        self.read().angle
    }

    fn x_complementary_angle(&self) -> f64 {
        self.read().x_comp
    }

    fn y_complementary_angle(&self) -> f64 {
        self.read().y_comp
    }

    fn accel_x(&self) -> f64 {
        self.read().accel[0]
    }

    fn accel_y(&self) -> f64 {
        self.read().accel[1]
    }

    fn accel_z(&self) -> f64 {
        self.read().accel[2]
    }
}
