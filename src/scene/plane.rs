//! The placement plane: an invisible, very large flat target used solely
//! for mapping 2D screen coordinates into 3D via ray intersection. Never
//! rendered; created once per scene build and shared by reference.

use glam::Vec3;

use crate::scene::camera::Ray;

/// Half-extent of the placement plane in world units.
pub const PLACEMENT_EXTENT: f32 = 200_000.0;

#[derive(Debug, Clone, Copy)]
pub struct PlacementPlane {
    pub point: Vec3,
    pub normal: Vec3,
    /// Hits farther than this from `point` count as misses.
    pub extent: f32,
}

impl PlacementPlane {
    /// A plane at the given world Z, facing +Z.
    pub fn at_z(z: f32) -> Self {
        PlacementPlane {
            point: Vec3::new(0.0, 0.0, z),
            normal: Vec3::Z,
            extent: PLACEMENT_EXTENT,
        }
    }

    /// Intersect a ray with the plane.
    ///
    /// Returns `None` when the ray is parallel, points away, or the hit
    /// falls outside the plane's extent: the "element cannot be placed"
    /// signal callers must treat as a skip.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = self.normal.dot(self.point - ray.origin) / denom;
        if t < 0.0 {
            return None;
        }
        let hit = ray.origin + ray.direction * t;
        if (hit - self.point).length() > self.extent {
            return None;
        }
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_ray_hits_plane() {
        let plane = PlacementPlane::at_z(0.0);
        let ray = Ray {
            origin: Vec3::new(3.0, 4.0, 100.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = plane.intersect(&ray).unwrap();
        assert!((hit - Vec3::new(3.0, 4.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn ray_facing_away_misses() {
        let plane = PlacementPlane::at_z(0.0);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 100.0),
            direction: Vec3::new(0.0, 0.0, 1.0),
        };
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let plane = PlacementPlane::at_z(0.0);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 100.0),
            direction: Vec3::X,
        };
        assert!(plane.intersect(&ray).is_none());
    }
}
