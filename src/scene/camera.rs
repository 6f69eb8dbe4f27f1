//! Camera intrinsics, screen-to-world rays, and frustum extents.

use glam::{EulerRot, Mat4, Vec3, Vec4};

use crate::config::CameraConfig;

/// A world-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    /// Euler rotation in radians around X, Y, Z; unused when `lookat` is set.
    pub rotation: Vec3,
    pub lookat: Option<Vec3>,
    pub up: Vec3,
}

impl Camera {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Camera {
            fov_deg: cfg.fov,
            aspect: cfg.aspect,
            near: cfg.near,
            far: cfg.far,
            position: Vec3::from(cfg.position),
            rotation: Vec3::from(cfg.rotation),
            lookat: cfg.lookat.map(Vec3::from),
            up: Vec3::from(cfg.up),
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        match self.lookat {
            Some(target) => Mat4::look_at_rh(self.position, target, self.up),
            None => {
                let world = Mat4::from_translation(self.position)
                    * Mat4::from_euler(
                        EulerRot::YXZ,
                        self.rotation.y,
                        self.rotation.x,
                        self.rotation.z,
                    );
                world.inverse()
            }
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.lookat = Some(target);
    }

    /// Cast a world-space ray through a normalized-device-coordinate point.
    pub fn ndc_ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let inv = (self.projection() * self.view()).inverse();
        let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Ray {
            origin: near,
            direction: (far - near).normalize(),
        }
    }

    /// Project a world point into normalized device coordinates.
    pub fn world_to_ndc(&self, point: Vec3) -> Vec3 {
        (self.projection() * self.view()).project_point3(point)
    }
}

/// Convert a pixel point in a `w`×`h` viewport to normalized device
/// coordinates (x rightward, y upward, both in [-1, 1]).
pub fn screen_to_ndc(px: f32, py: f32, w: f32, h: f32) -> (f32, f32) {
    let w = w.max(1.0);
    let h = h.max(1.0);
    (px / w * 2.0 - 1.0, -(py / h * 2.0 - 1.0))
}

/// Four corners of one clipping plane.
#[derive(Debug, Clone, Copy)]
pub struct PlaneCorners {
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_left: Vec3,
    pub bottom_right: Vec3,
}

impl PlaneCorners {
    pub fn width(&self) -> f32 {
        self.top_right.x - self.top_left.x
    }

    pub fn height(&self) -> f32 {
        self.top_left.y - self.bottom_left.y
    }
}

/// Near- and far-plane extents of a camera's view frustum.
#[derive(Debug, Clone, Copy)]
pub struct FrustumExtents {
    pub near_plane: PlaneCorners,
    pub far_plane: PlaneCorners,
}

/// Compute the frustum's near/far plane corner extents.
///
/// Pure function of the camera intrinsics and `position.z`. The plane Z
/// coordinates are expressed along the camera's position axis, which
/// assumes an unrotated camera looking down -Z; rotated cameras are a
/// documented limitation. Validation rejects a non-finite far plane before
/// this is ever reached.
pub fn compute_frustum(camera: &Camera) -> FrustumExtents {
    let tan_half = (camera.fov_deg.to_radians() / 2.0).tan();
    let plane = |distance: f32| -> PlaneCorners {
        let height = 2.0 * tan_half * distance;
        let width = height * camera.aspect;
        let z = camera.position.z - distance;
        PlaneCorners {
            top_left: Vec3::new(-width / 2.0, height / 2.0, z),
            top_right: Vec3::new(width / 2.0, height / 2.0, z),
            bottom_left: Vec3::new(-width / 2.0, -height / 2.0, z),
            bottom_right: Vec3::new(width / 2.0, -height / 2.0, z),
        }
    };
    FrustumExtents {
        near_plane: plane(camera.near),
        far_plane: plane(camera.far),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera {
            fov_deg: 60.0,
            aspect: 1.0,
            near: 1.0,
            far: 100.0,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            lookat: None,
            up: Vec3::Y,
        }
    }

    #[test]
    fn frustum_scaling_law() {
        let cam = test_camera();
        let frustum = compute_frustum(&cam);

        let expected = 2.0 * 30.0_f32.to_radians().tan() * 100.0;
        assert!((frustum.far_plane.width() - expected).abs() < 1e-3);
        assert!((frustum.far_plane.height() - expected).abs() < 1e-3);

        let mut far_cam = test_camera();
        far_cam.far = 200.0;
        let doubled = compute_frustum(&far_cam);
        assert!((doubled.far_plane.width() - 2.0 * frustum.far_plane.width()).abs() < 1e-3);
        assert!((doubled.far_plane.height() - 2.0 * frustum.far_plane.height()).abs() < 1e-3);
        assert!((doubled.near_plane.width() - frustum.near_plane.width()).abs() < 1e-6);
    }

    #[test]
    fn frustum_planes_sit_along_position_z() {
        let mut cam = test_camera();
        cam.position.z = 800.0;
        let frustum = compute_frustum(&cam);
        assert!((frustum.near_plane.top_left.z - 799.0).abs() < 1e-4);
        assert!((frustum.far_plane.top_left.z - 700.0).abs() < 1e-4);
    }

    #[test]
    fn center_ray_points_down_negative_z() {
        let mut cam = test_camera();
        cam.position = Vec3::new(0.0, 0.0, 10.0);
        let ray = cam.ndc_ray(0.0, 0.0);
        assert!(ray.direction.z < -0.99);
        assert!(ray.direction.x.abs() < 1e-4);
    }

    #[test]
    fn ndc_round_trip() {
        let mut cam = test_camera();
        cam.position = Vec3::new(0.0, 0.0, 50.0);
        let ray = cam.ndc_ray(0.4, -0.3);
        // A point along the ray projects back to the same NDC x/y.
        let sample = ray.origin + ray.direction * 20.0;
        let ndc = cam.world_to_ndc(sample);
        assert!((ndc.x - 0.4).abs() < 1e-3);
        assert!((ndc.y - -0.3).abs() < 1e-3);
    }

    #[test]
    fn screen_to_ndc_corners() {
        assert_eq!(screen_to_ndc(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
        let (x, y) = screen_to_ndc(800.0, 600.0, 800.0, 600.0);
        assert!((x - 1.0).abs() < 1e-6 && (y + 1.0).abs() < 1e-6);
        let (cx, cy) = screen_to_ndc(400.0, 300.0, 800.0, 600.0);
        assert!(cx.abs() < 1e-6 && cy.abs() < 1e-6);
    }
}
