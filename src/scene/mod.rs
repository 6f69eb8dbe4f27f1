//! Scene object model: what the generators emit and the render backend
//! consumes.

pub mod camera;
pub mod mapper;
pub mod plane;

use glam::Vec3;

use crate::dom::css::Color;
use crate::scene::camera::Ray;

/// A decoded RGBA texture.
#[derive(Clone, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Texture({}x{})", self.width, self.height)
    }
}

/// Surface appearance for one face group of an object.
#[derive(Debug, Clone)]
pub struct Material {
    pub texture: Option<Texture>,
    pub color: Color,
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Material {
            texture: None,
            color,
        }
    }

    pub fn textured(texture: Texture) -> Self {
        Material {
            texture: Some(texture),
            color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Box,
    Plane,
}

/// Creation request for one 3D object.
#[derive(Debug, Clone)]
pub struct ObjectDesc {
    pub kind: ObjectKind,
    /// Center of the volume.
    pub position: [f32; 3],
    /// Width, height, depth.
    pub dims: [f32; 3],
    /// Material of the content-bearing face.
    pub front: Material,
    /// Material of the remaining faces.
    pub sides: Material,
    pub mass: f32,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: ObjectId,
    pub desc: ObjectDesc,
}

/// One light, in declaration order.
#[derive(Debug, Clone)]
pub struct LightDesc {
    pub kind: String,
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: [f32; 3],
}

/// The assembled scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<LightDesc>,
    pub background: Color,
    pub gravity: [f32; 3],
}

impl Scene {
    pub fn new() -> Self {
        Scene {
            objects: Vec::new(),
            lights: Vec::new(),
            background: Color::WHITE,
            gravity: [0.0, 0.0, 0.0],
        }
    }

    /// Nearest visible object hit by `ray`, with the hit point.
    pub fn pick(&self, ray: &Ray) -> Option<(ObjectId, Vec3)> {
        let mut best: Option<(f32, ObjectId)> = None;
        for obj in &self.objects {
            if !obj.desc.visible {
                continue;
            }
            if let Some(t) = ray_aabb(ray, obj.desc.position, obj.desc.dims) {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, obj.id));
                }
            }
        }
        best.map(|(t, id)| (id, ray.origin + ray.direction * t))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// Slab-method ray / axis-aligned-box intersection; returns entry distance.
fn ray_aabb(ray: &Ray, center: [f32; 3], dims: [f32; 3]) -> Option<f32> {
    let center = Vec3::from(center);
    let half = Vec3::from(dims) * 0.5;
    let min = center - half;
    let max = center + half;

    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        if dir.abs() < 1e-9 {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let (t0, t1) = {
            let a = (min[axis] - origin) * inv;
            let b = (max[axis] - origin) * inv;
            if a < b {
                (a, b)
            } else {
                (b, a)
            }
        };
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(id: usize, position: [f32; 3]) -> SceneObject {
        SceneObject {
            id: ObjectId(id),
            desc: ObjectDesc {
                kind: ObjectKind::Box,
                position,
                dims: [2.0, 2.0, 2.0],
                front: Material::solid(Color::WHITE),
                sides: Material::solid(Color::BLACK),
                mass: 1.0,
                visible: true,
            },
        }
    }

    #[test]
    fn pick_returns_nearest() {
        let mut scene = Scene::new();
        scene.objects.push(boxed(0, [0.0, 0.0, -10.0]));
        scene.objects.push(boxed(1, [0.0, 0.0, -5.0]));

        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        let (id, hit) = scene.pick(&ray).unwrap();
        assert_eq!(id, ObjectId(1));
        assert!((hit.z - -4.0).abs() < 1e-4);
    }

    #[test]
    fn pick_ignores_invisible_and_misses() {
        let mut scene = Scene::new();
        let mut hidden = boxed(0, [0.0, 0.0, -5.0]);
        hidden.desc.visible = false;
        scene.objects.push(hidden);

        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, -1.0),
        };
        assert!(scene.pick(&ray).is_none());

        let miss = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::new(0.0, 1.0, 0.0),
        };
        assert!(scene.pick(&miss).is_none());
    }
}
