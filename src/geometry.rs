//! Minimal 3D geometry types handed to the drive stack.

use nalgebra::{UnitQuaternion, Vector3};

/// An orientation in 3D space.
///
/// Built from extrinsic roll (about X), pitch (about Y) and yaw (about Z),
/// all in radians, applied in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation3d {
    q: UnitQuaternion<f64>,
}

impl Rotation3d {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            q: UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        }
    }

    pub fn from_quaternion(q: UnitQuaternion<f64>) -> Self {
        Self { q }
    }

    pub fn quaternion(&self) -> &UnitQuaternion<f64> {
        &self.q
    }

    /// Apply `other` after this rotation.
    pub fn rotate_by(&self, other: &Rotation3d) -> Rotation3d {
        Rotation3d::from_quaternion(other.q * self.q)
    }

    /// Rotation relative to `other`.
    pub fn minus(&self, other: &Rotation3d) -> Rotation3d {
        self.rotate_by(&other.inverse())
    }

    pub fn inverse(&self) -> Rotation3d {
        Rotation3d::from_quaternion(self.q.inverse())
    }

    /// Roll in radians
    pub fn x(&self) -> f64 {
        self.q.euler_angles().0
    }

    /// Pitch in radians
    pub fn y(&self) -> f64 {
        self.q.euler_angles().1
    }

    /// Yaw in radians
    pub fn z(&self) -> f64 {
        self.q.euler_angles().2
    }
}

impl Default for Rotation3d {
    fn default() -> Self {
        Self {
            q: UnitQuaternion::identity(),
        }
    }
}

/// A position or vector quantity in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation3d {
    v: Vector3<f64>,
}

impl Translation3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            v: Vector3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f64 {
        self.v.x
    }

    pub fn y(&self) -> f64 {
        self.v.y
    }

    pub fn z(&self) -> f64 {
        self.v.z
    }

    pub fn norm(&self) -> f64 {
        self.v.norm()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.v.x, self.v.y, self.v.z]
    }
}
