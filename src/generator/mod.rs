//! Generator strategies: scene-layout algorithms that turn matched
//! elements into positioned, textured, physics-ready objects.
//!
//! A generator is selected by name from the registry, initialized exactly
//! once per scene build, runs its `generate` pass over the elements in
//! query order, and is then discarded. Layout policies differ in how they
//! prepare the scene (ground/backdrop planes, camera pose for layout) and
//! where each element's box goes: mapped from its screen position
//! (extrude, wall, gallery, city, float) or procedurally (tile, book,
//! direct).

pub mod book;
pub mod boxgen;
pub mod city;
pub mod direct;
pub mod extrude;
pub mod float;
pub mod gallery;
pub mod tile;
pub mod wall;

use serde_json::Value;

use crate::config::Config;
use crate::dom::css::Color;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::error::ConfigError;
use crate::scene::camera::compute_frustum;
use crate::scene::mapper::PlacementResult;
use crate::scene::{Material, ObjectDesc, ObjectKind};

/// A pluggable scene-layout strategy.
pub trait Generator {
    fn name(&self) -> &'static str;

    /// Config fragment merged beneath user options.
    fn default_options(&self) -> Value {
        Value::Object(Default::default())
    }

    /// Camera pose required while laying out; the user's final pose is
    /// restored after generation.
    fn init_cam_opts(&self) -> Option<Value> {
        None
    }

    /// One-time setup: placement plane position, ground/backdrop planes,
    /// generator-private materials.
    fn init(&mut self, config: &Config, merged: &Value, state: &mut EngineState) {
        let _ = (config, merged, state);
    }

    /// Emit objects for the elements, preserving their order. Returns the
    /// number of objects created; unplaceable elements are skipped, never
    /// fatal.
    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize;
}

/// Look up a generator by registry name.
pub fn create(name: &str) -> Result<Box<dyn Generator>, ConfigError> {
    match name {
        "extrude" => Ok(Box::new(extrude::ExtrudeGenerator::default())),
        "box" => Ok(Box::new(boxgen::BoxGenerator::default())),
        "wall" => Ok(Box::new(wall::WallGenerator::default())),
        "gallery" => Ok(Box::new(gallery::GalleryGenerator::default())),
        "tile" => Ok(Box::new(tile::TileGenerator::default())),
        "city" => Ok(Box::new(city::CityGenerator::default())),
        "float" => Ok(Box::new(float::FloatGenerator::default())),
        "book" => Ok(Box::new(book::BookGenerator::default())),
        "direct" => Ok(Box::new(direct::DirectGenerator::default())),
        other => Err(ConfigError::UnknownGenerator(other.to_string())),
    }
}

/// Box description for a mapped placement.
pub(crate) fn placed_box(
    placed: &PlacementResult,
    front: Material,
    sides: Material,
    mass: f32,
) -> ObjectDesc {
    ObjectDesc {
        kind: ObjectKind::Box,
        position: placed.pos.into(),
        dims: [placed.width, placed.height, placed.depth],
        front,
        sides,
        mass,
        visible: true,
    }
}

/// A static ground slab at `y`, sized from the camera frustum's far plane
/// so it fills the viewport.
pub(crate) fn ground_object(state: &EngineState, y: f32, color: Color) -> ObjectDesc {
    let frustum = compute_frustum(&state.camera);
    let far = frustum.far_plane;
    ObjectDesc {
        kind: ObjectKind::Plane,
        position: [0.0, y, (far.top_left.z + state.camera.position.z) / 2.0],
        dims: [far.width(), 1.0, state.camera.far],
        front: Material::solid(color),
        sides: Material::solid(color),
        mass: 0.0,
        visible: true,
    }
}

/// A static backdrop slab at `z`, frustum-sized.
pub(crate) fn backdrop_object(state: &EngineState, z: f32, color: Color) -> ObjectDesc {
    let frustum = compute_frustum(&state.camera);
    let far = frustum.far_plane;
    ObjectDesc {
        kind: ObjectKind::Plane,
        position: [0.0, 0.0, z],
        dims: [far.width(), far.height(), 1.0],
        front: Material::solid(color),
        sides: Material::solid(color),
        mass: 0.0,
        visible: true,
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use glam::Vec3;

    use crate::config::BlockConfig;
    use crate::dom::layout::LayoutBox;
    use crate::dom::query::SourceElement;
    use crate::engine::physics::InertPhysics;
    use crate::engine::{Callbacks, EngineState, RecordingBackend};
    use crate::rasterizer::RasterOptions;
    use crate::scene::camera::Camera;
    use crate::scene::plane::PlacementPlane;
    use crate::scene::Scene;

    pub fn test_state() -> EngineState {
        EngineState {
            camera: Camera {
                fov_deg: 35.0,
                aspect: 1.0,
                near: 1.0,
                far: 2000.0,
                position: Vec3::new(0.0, 0.0, 800.0),
                rotation: Vec3::ZERO,
                lookat: None,
                up: Vec3::Y,
            },
            plane: PlacementPlane::at_z(0.0),
            scene: Scene::new(),
            container: LayoutBox::new(0.0, 0.0, 1024.0, 1024.0),
            block: BlockConfig {
                width: 250.0,
                height: 250.0,
                depth: 2.0,
            },
            default_mass: 1000.0,
            move_with_physics: true,
            backend: Box::new(RecordingBackend::default()),
            physics: Box::new(InertPhysics),
            callbacks: Callbacks::default(),
            rasterizer: crate::rasterizer::create("element").unwrap(),
            raster_opts: RasterOptions::default(),
        }
    }

    pub fn test_element(index: usize, x: f32, y: f32, w: f32, h: f32) -> SourceElement {
        SourceElement {
            index,
            tag: "div".into(),
            bounds: LayoutBox::new(x, y, w, h),
            font_size: 16.0,
            title: format!("title {index}"),
            text: format!("body text for element {index}"),
            background: None,
            image_src: None,
        }
    }

    pub fn grid_elements(n: usize) -> Vec<SourceElement> {
        (0..n)
            .map(|i| test_element(i, 50.0 + (i as f32) * 150.0, 80.0, 120.0, 90.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_all_generators() {
        for name in [
            "extrude", "box", "wall", "gallery", "tile", "city", "float", "book", "direct",
        ] {
            assert_eq!(create(name).unwrap().name(), name);
        }
    }

    #[test]
    fn unknown_generator_is_a_hard_failure() {
        assert!(matches!(
            create("helix"),
            Err(ConfigError::UnknownGenerator(_))
        ));
    }
}
