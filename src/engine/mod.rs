//! Engine context and collaborator interfaces.
//!
//! [`EngineState`] is the per-instance context the orchestrator owns and
//! passes by reference into generators and input handling, never as a
//! module-level singleton, so multiple independent scenes can coexist.

pub mod controls;
pub mod physics;
pub mod pipeline;

use log::warn;

use crate::config::BlockConfig;
use crate::dom::css::Color;
use crate::dom::layout::LayoutBox;
use crate::dom::query::SourceElement;
use crate::rasterizer::{PaintInfo, RasterOptions, Rasterizer};
use crate::scene::camera::Camera;
use crate::scene::mapper::{self, DepthPolicy, PlacementResult};
use crate::scene::plane::PlacementPlane;
use crate::scene::{LightDesc, Material, ObjectDesc, ObjectId, Scene, SceneObject, Texture};

use self::physics::PhysicsWorld;

/// Shade applied to side faces relative to an element's background.
const SIDE_SHADE: f32 = -0.25;

/// The scene-graph / renderer collaborator.
pub trait RenderBackend {
    /// Whether this backend can render in the host environment.
    fn is_available(&self) -> bool;
    fn create_object(&mut self, desc: &ObjectDesc) -> ObjectId;
    fn add_light(&mut self, light: &LightDesc);
    fn render(&mut self, scene: &Scene, camera: &Camera);
}

/// A backend that records creation requests; always available. Used by the
/// demo bin and tests, and as the default when no real renderer is wired.
#[derive(Default)]
pub struct RecordingBackend {
    pub created: Vec<ObjectDesc>,
    pub lights: Vec<LightDesc>,
    pub frames: usize,
}

impl RenderBackend for RecordingBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn create_object(&mut self, desc: &ObjectDesc) -> ObjectId {
        let id = ObjectId(self.created.len());
        self.created.push(desc.clone());
        id
    }

    fn add_light(&mut self, light: &LightDesc) {
        self.lights.push(light.clone());
    }

    fn render(&mut self, _scene: &Scene, _camera: &Camera) {
        self.frames += 1;
    }
}

/// Lifecycle callbacks, invoked synchronously at documented points.
#[derive(Default)]
pub struct Callbacks {
    /// After scene assembly completes.
    pub onload: Option<Box<dyn FnMut()>>,
    /// Before each object is handed to the backend.
    pub creating: Option<Box<dyn FnMut(&SourceElement, &ObjectDesc)>>,
    /// After each object exists.
    pub created: Option<Box<dyn FnMut(&SourceElement, ObjectId)>>,
    /// On every resolved mouse click.
    pub clicked: Option<Box<dyn FnMut(ObjectId)>>,
}

/// Shared mutable engine state for one scene build.
///
/// Generators and rasterizers receive this by reference during their
/// synchronous calls; only the orchestrator replaces its fields.
pub struct EngineState {
    pub camera: Camera,
    pub plane: PlacementPlane,
    pub scene: Scene,
    /// Layout box of the positioning container.
    pub container: LayoutBox,
    pub block: BlockConfig,
    /// Mass for generated objects; zero while physics is disabled.
    pub default_mass: f32,
    pub move_with_physics: bool,
    pub backend: Box<dyn RenderBackend>,
    pub physics: Box<dyn PhysicsWorld>,
    pub callbacks: Callbacks,
    pub rasterizer: Box<dyn Rasterizer>,
    pub raster_opts: RasterOptions,
}

impl EngineState {
    /// Map one element into world space, logging and yielding `None` on a
    /// placement failure so the caller can skip it.
    pub fn place(&self, element: &SourceElement, policy: DepthPolicy) -> Option<PlacementResult> {
        let placed = mapper::map_element_to_world(
            &element.bounds,
            &self.container,
            policy,
            &self.camera,
            &self.plane,
        );
        if placed.is_none() {
            warn!(
                "element {} ({}) cannot be placed: no ray/plane intersection for {:?}",
                element.index, element.tag, element.bounds
            );
        }
        placed
    }

    /// Rasterize one element's content.
    ///
    /// A rasterization failure never aborts the batch: the element gets a
    /// single fallback swatch (its background color, else mid gray) and the
    /// failure is logged.
    pub fn paint(&self, element: &SourceElement) -> (Vec<Texture>, PaintInfo) {
        let mut info = PaintInfo::default();
        match self
            .rasterizer
            .paint(element, &self.raster_opts, &mut info)
        {
            Ok(textures) if !textures.is_empty() => (textures, info),
            Ok(_) => (vec![self.fallback_texture(element)], info),
            Err(e) => {
                warn!(
                    "rasterization failed for element {} ({}): {}",
                    element.index, element.tag, e
                );
                (vec![self.fallback_texture(element)], PaintInfo::default())
            }
        }
    }

    fn fallback_texture(&self, element: &SourceElement) -> Texture {
        let color = element.background.unwrap_or(Color::rgb(128, 128, 128));
        Texture {
            width: 1,
            height: 1,
            rgba: vec![color.r, color.g, color.b, color.a],
        }
    }

    /// Plain material for an object's non-content faces.
    pub fn side_material(&self, element: &SourceElement) -> Material {
        let base = element.background.unwrap_or(self.raster_opts.background);
        Material::solid(base.blend(SIDE_SHADE))
    }

    /// Create one object: fires `creating`, hands the request to the
    /// backend, registers mass with the physics collaborator, records the
    /// object in the scene, and fires `created`.
    pub fn create_object(
        &mut self,
        element: Option<&SourceElement>,
        desc: ObjectDesc,
    ) -> ObjectId {
        if let (Some(el), Some(cb)) = (element, self.callbacks.creating.as_mut()) {
            cb(el, &desc);
        }
        let id = self.backend.create_object(&desc);
        if desc.mass > 0.0 {
            self.physics.set_mass(id, desc.mass);
        }
        self.scene.objects.push(SceneObject { id, desc });
        if let (Some(el), Some(cb)) = (element, self.callbacks.created.as_mut()) {
            cb(el, id);
        }
        id
    }
}
