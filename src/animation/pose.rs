use std::ops::{Add, Mul};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Position plus Euler rotation (radians, XYZ order).
///
/// Used both for absolute rest poses and for offsets from them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Pose {
    pub const ZERO: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }
}

impl Add for Pose {
    type Output = Pose;

    fn add(self, rhs: Pose) -> Pose {
        Pose {
            position: self.position + rhs.position,
            rotation: self.rotation + rhs.rotation,
        }
    }
}

impl Mul<f32> for Pose {
    type Output = Pose;

    fn mul(self, rhs: f32) -> Pose {
        Pose {
            position: self.position * rhs,
            rotation: self.rotation * rhs,
        }
    }
}

/// Offset from an object's rest pose, produced once per frame.
pub type TransformDelta = Pose;
