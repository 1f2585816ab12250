use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::bounds::{ScreenRect, AABB};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 75.0,
        }
    }
}

impl Camera {
    pub fn get_vp_matrix(&self, resolution: Vec2) -> Mat4 {
        let aspect = if resolution.y > 0.0 {
            resolution.x / resolution.y
        } else {
            1.0
        };
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let projection = Mat4::perspective_rh(self.fov_y.to_radians(), aspect, 0.1, 1000.0);
        projection * view
    }

    /// Screen-space rectangle covered by `aabb`, in normalized device
    /// coordinates. `None` if any corner is behind the camera.
    pub fn project_aabb(&self, aabb: &AABB, resolution: Vec2) -> Option<ScreenRect> {
        let vp = self.get_vp_matrix(resolution);
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);

        for corner in aabb.corners() {
            let clip = vp * corner.extend(1.0);
            if clip.w <= 0.0 {
                return None;
            }
            let ndc = Vec2::new(clip.x, clip.y) / clip.w;
            min = min.min(ndc);
            max = max.max(ndc);
        }

        Some(ScreenRect { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::default();
        let aabb = AABB::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let rect = camera.project_aabb(&aabb, Vec2::new(800.0, 600.0)).unwrap();

        assert!(rect.contains(Vec2::ZERO));
        assert!(!rect.contains(Vec2::new(0.9, 0.9)));
        assert!((rect.min + rect.max).length() < 1e-5);
    }

    #[test]
    fn test_box_behind_camera() {
        let camera = Camera::default();
        let aabb = AABB::new(Vec3::new(-1.0, -1.0, 6.0), Vec3::new(1.0, 1.0, 7.0));
        assert!(camera.project_aabb(&aabb, Vec2::new(800.0, 600.0)).is_none());
    }

    #[test]
    fn test_zero_height_resolution() {
        let camera = Camera::default();
        assert!(camera.get_vp_matrix(Vec2::new(800.0, 0.0)).is_finite());
    }
}
