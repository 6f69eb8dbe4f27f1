//! Scene assembly orchestrator.
//!
//! `Engine::init` runs the whole synchronous build: parse → layout →
//! merge/validate configuration → generator pass(es) → final camera pose →
//! lights → `onload`. Everything must complete (or fail) before the frame
//! loop starts; later steps depend on completed placement.

use log::{debug, warn};
use serde_json::Value;

use crate::config::{self, Config, StrategyDesc};
use crate::dom::parser::parse_html;
use crate::dom::query;
use crate::engine::controls::{create_controls, CameraControls};
use crate::engine::physics::{InertPhysics, PhysicsWorld};
use crate::engine::{Callbacks, EngineState, RecordingBackend, RenderBackend};
use crate::error::EngineError;
use crate::generator::{self, Generator};
use crate::net::fetch::fetch_url;
use crate::rasterizer::{self, RasterOptions, Rasterizer};
use crate::scene::camera::{screen_to_ndc, Camera};
use crate::scene::plane::PlacementPlane;
use crate::scene::{LightDesc, ObjectId, Scene};

/// Impulse magnitude per unit mass for physics-driven clicks.
const CLICK_IMPULSE: f32 = 40.0;

/// One validated transform, ready to run.
struct Transform {
    generator: Box<dyn Generator>,
    merged: Value,
    config: Config,
    rasterizer: Box<dyn Rasterizer>,
    raster_opts: RasterOptions,
}

/// A library instance: one scene per `init` call.
///
/// All state lives on the instance; several engines can coexist on a page.
pub struct Engine {
    backend: Option<Box<dyn RenderBackend>>,
    physics: Option<Box<dyn PhysicsWorld>>,
    callbacks: Callbacks,
    state: Option<EngineState>,
    controls: Option<Box<dyn CameraControls>>,
    physics_enabled: bool,
    move_with_physics: bool,
    clicks_enabled: bool,
}

impl Engine {
    /// An engine wired to the recording backend and inert physics; use the
    /// `with_*` builders to attach real collaborators.
    pub fn new() -> Self {
        Engine {
            backend: None,
            physics: None,
            callbacks: Callbacks::default(),
            state: None,
            controls: None,
            physics_enabled: false,
            move_with_physics: false,
            clicks_enabled: false,
        }
    }

    pub fn with_backend(mut self, backend: Box<dyn RenderBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_physics(mut self, physics: Box<dyn PhysicsWorld>) -> Self {
        self.physics = Some(physics);
        self
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Fetch a page and build a scene from it.
    pub fn init_from_url(&mut self, url: &str, options: Value) -> Result<bool, EngineError> {
        let fetched = fetch_url(url)?;
        debug!("fetched {} ({})", fetched.url, fetched.status);
        self.init(&fetched.html, &fetched.url, options)
    }

    /// Build a scene from an HTML document.
    ///
    /// Returns `Ok(false)`, not an error, when no rendering backend is
    /// available, so the embedder can keep its plain 2D content.
    /// Configuration problems are fatal and reported before any scene
    /// object is created.
    pub fn init(&mut self, html: &str, url: &str, options: Value) -> Result<bool, EngineError> {
        // Re-initialization reclaims the collaborators from the old scene.
        if let Some(old) = self.state.take() {
            self.backend = Some(old.backend);
            self.physics = Some(old.physics);
            self.callbacks = old.callbacks;
            self.controls = None;
        }

        if !options.is_object() {
            return Err(crate::error::ConfigError::Invalid(
                "options must be a JSON object".into(),
            )
            .into());
        }

        let backend = self
            .backend
            .take()
            .unwrap_or_else(|| Box::new(RecordingBackend::default()));
        if !backend.is_available() {
            warn!("no rendering backend available, leaving document as-is");
            self.backend = Some(backend);
            return Ok(false);
        }

        // Validate every transform (generator name, merged config,
        // rasterizer name) before creating anything.
        let descs = config::normalize_generators(options.get("generator"))?;
        let mut transforms = Vec::with_capacity(descs.len());
        for desc in &descs {
            transforms.push(self.prepare_transform(desc, &options)?);
        }
        let first = &transforms[0];
        let scene_config = first.config.clone();

        let mut doc = parse_html(html, url);
        doc.layout(scene_config.src.viewport_width);
        let container = query::resolve_container(&doc, &scene_config.src.container)?;

        let layout_camera = layout_camera_for(first)?;

        let physics_enabled = scene_config.physics.enabled;
        let mut physics = self
            .physics
            .take()
            .unwrap_or_else(|| Box::new(InertPhysics));
        if physics_enabled {
            physics.set_gravity(scene_config.gravity);
        }

        let mut scene = Scene::new();
        scene.gravity = scene_config.gravity;
        scene.background = first.raster_opts.background;

        let mut state = EngineState {
            camera: layout_camera,
            plane: PlacementPlane::at_z(0.0),
            scene,
            container,
            block: scene_config.block,
            default_mass: if physics_enabled {
                scene_config.physics.mass
            } else {
                0.0
            },
            move_with_physics: scene_config.move_with_physics,
            backend,
            physics,
            callbacks: std::mem::take(&mut self.callbacks),
            rasterizer: Box::new(rasterizer::element::ElementRasterizer),
            raster_opts: RasterOptions::default(),
        };

        let mut total = 0;
        for mut transform in transforms {
            state.camera = layout_camera_for(&transform)?;
            state.block = transform.config.block;
            state.raster_opts = transform.raster_opts.clone();
            state.rasterizer = transform.rasterizer;

            let elements = query::extract_elements(&doc, &transform.config.src)?;
            debug!(
                "generator `{}` over {} elements",
                transform.generator.name(),
                elements.len()
            );
            transform
                .generator
                .init(&transform.config, &transform.merged, &mut state);
            total += transform.generator.generate(&elements, &mut state);
        }
        debug!("created {total} objects");

        // Layout is done: restore the user's camera pose.
        state.camera = Camera::from_config(&scene_config.camera);

        let lights = if scene_config.lights.is_empty() {
            default_lights(&state.camera)
        } else {
            scene_config
                .lights
                .iter()
                .map(|l| LightDesc {
                    kind: l.kind.clone(),
                    color: l.color,
                    intensity: l.intensity,
                    position: l.position,
                })
                .collect()
        };
        for light in lights {
            state.backend.add_light(&light);
            state.scene.lights.push(light);
        }

        self.controls = Some(create_controls(&scene_config.controls.kind, &state.camera));
        self.physics_enabled = physics_enabled;
        self.move_with_physics = scene_config.move_with_physics;
        self.clicks_enabled = scene_config.clicks_enabled;

        if let Some(onload) = state.callbacks.onload.as_mut() {
            onload();
        }
        self.state = Some(state);
        Ok(true)
    }

    fn prepare_transform(
        &self,
        desc: &StrategyDesc,
        user: &Value,
    ) -> Result<Transform, EngineError> {
        let generator = generator::create(&desc.name)?;
        let merged = config::merge::merge(&[
            &config::engine_defaults(),
            &generator.default_options(),
            user,
            &desc.options,
        ]);
        let config = Config::from_merged(&merged)?;
        let raster_desc = config::normalize_rasterizer(merged.get("rasterizer"))?
            .unwrap_or_else(|| StrategyDesc {
                name: "element".into(),
                options: Value::Object(Default::default()),
            });
        let rasterizer = rasterizer::create(&raster_desc.name)?;
        let raster_opts = RasterOptions::from_value(&raster_desc.options)?;
        Ok(Transform {
            generator,
            merged,
            config,
            rasterizer,
            raster_opts,
        })
    }

    /// Advance one animation frame: controls, physics, render.
    pub fn frame(&mut self, dt: f32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if let Some(controls) = self.controls.as_mut() {
            controls.update(&mut state.camera, dt);
        }
        if self.physics_enabled {
            state.physics.simulate(dt);
        }
        state.backend.render(&state.scene, &state.camera);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, button: u8) {
        if let Some(controls) = self.controls.as_mut() {
            controls.on_pointer_down(x, y, button);
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(controls) = self.controls.as_mut() {
            controls.on_pointer_move(x, y);
        }
    }

    pub fn pointer_up(&mut self, button: u8) {
        if let Some(controls) = self.controls.as_mut() {
            controls.on_pointer_up(button);
        }
    }

    pub fn key_down(&mut self, key: char) {
        if let Some(controls) = self.controls.as_mut() {
            controls.on_key_down(key);
        }
    }

    pub fn key_up(&mut self, key: char) {
        if let Some(controls) = self.controls.as_mut() {
            controls.on_key_up(key);
        }
    }

    /// Resolve a click at container pixel coordinates: pick the nearest
    /// object under the cursor, fire the `clicked` callback, and strike it
    /// with an impulse when physics-driven movement is on.
    pub fn click(&mut self, px: f32, py: f32) -> Option<ObjectId> {
        if !self.clicks_enabled {
            return None;
        }
        let state = self.state.as_mut()?;
        let (ndc_x, ndc_y) = screen_to_ndc(px, py, state.container.width, state.container.height);
        let ray = state.camera.ndc_ray(ndc_x, ndc_y);
        let (id, hit) = state.scene.pick(&ray)?;

        if let Some(clicked) = state.callbacks.clicked.as_mut() {
            clicked(id);
        }
        if self.physics_enabled && self.move_with_physics {
            let mass = state
                .scene
                .objects
                .iter()
                .find(|o| o.id == id)
                .map(|o| o.desc.mass)
                .unwrap_or(0.0);
            if mass > 0.0 {
                let impulse = ray.direction * mass * CLICK_IMPULSE;
                state.physics.apply_impulse(id, hit.into(), impulse.into());
            }
        }
        Some(id)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.state.as_ref().map(|s| &s.scene)
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.state.as_ref().map(|s| &s.camera)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge a generator's layout-time camera requirements over the transform
/// configuration; the user's pose is restored once generation finishes.
fn layout_camera_for(transform: &Transform) -> Result<Camera, EngineError> {
    let config = match transform.generator.init_cam_opts() {
        Some(cam_opts) => {
            let merged = config::merge::merge2(&transform.merged, &cam_opts);
            Config::from_merged(&merged)?
        }
        None => transform.config.clone(),
    };
    Ok(Camera::from_config(&config.camera))
}

fn default_lights(camera: &Camera) -> Vec<LightDesc> {
    vec![
        LightDesc {
            kind: "ambient".into(),
            color: [1.0, 1.0, 1.0],
            intensity: 0.8,
            position: [0.0, 0.0, 0.0],
        },
        // Keyed off the final camera pose so the lit side faces the viewer.
        LightDesc {
            kind: "point".into(),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            position: camera.position.into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    const FIVE_CARDS: &str = r#"
    <html><head><title>Cards</title></head><body>
        <div class="card">one</div>
        <div class="card">two</div>
        <div class="card">three</div>
        <div class="card">four</div>
        <div class="card">five</div>
    </body></html>
    "#;

    fn card_options() -> Value {
        json!({
            "generator": "extrude",
            "rasterizer": "image",
            "src": {"selector": ".card"},
        })
    }

    #[test]
    fn end_to_end_five_cards() {
        let mut engine = Engine::new();
        let ok = engine
            .init(FIVE_CARDS, "https://example.com", card_options())
            .unwrap();
        assert!(ok);

        let scene = engine.scene().unwrap();
        assert_eq!(scene.objects.len(), 5);

        // Re-derive expected extents from the documented NDC formula for
        // the default camera ([0,0,800], fov 35, aspect 1, plane z=0).
        let mut doc = parse_html(FIVE_CARDS, "https://example.com");
        doc.layout(1024.0);
        let container = query::resolve_container(&doc, "body").unwrap();
        let src = crate::config::SrcConfig {
            selector: ".card".into(),
            title: None,
            content: None,
            container: "body".into(),
            viewport_width: 1024.0,
        };
        let elements = query::extract_elements(&doc, &src).unwrap();
        assert_eq!(elements.len(), 5);

        let tan_half = (35.0_f32.to_radians() / 2.0).tan();
        for (element, obj) in elements.iter().zip(&scene.objects) {
            let expected_w = 2.0 * element.bounds.width / container.width * tan_half * 800.0;
            let expected_h = 2.0 * element.bounds.height / container.height * tan_half * 800.0;
            assert!((obj.desc.dims[0] - expected_w).abs() < 0.05);
            assert!((obj.desc.dims[1] - expected_h).abs() < 0.05);
            // Configured default block depth.
            assert_eq!(obj.desc.dims[2], 2.0);
        }

        // The image rasterizer had no sources: every front face carries the
        // fallback swatch, and the batch still completed.
        for obj in &scene.objects {
            let tex = obj.desc.front.texture.as_ref().unwrap();
            assert_eq!((tex.width, tex.height), (1, 1));
        }
    }

    #[test]
    fn unknown_generator_aborts_before_any_object() {
        let mut engine = Engine::new();
        let err = engine
            .init(FIVE_CARDS, "https://example.com", json!({"generator": "warp"}))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::UnknownGenerator(_))
        ));
        assert!(engine.scene().is_none());
    }

    #[test]
    fn unavailable_backend_degrades_gracefully() {
        struct Offline;
        impl RenderBackend for Offline {
            fn is_available(&self) -> bool {
                false
            }
            fn create_object(&mut self, _: &crate::scene::ObjectDesc) -> ObjectId {
                unreachable!()
            }
            fn add_light(&mut self, _: &LightDesc) {}
            fn render(&mut self, _: &Scene, _: &Camera) {}
        }

        let mut engine = Engine::new().with_backend(Box::new(Offline));
        let ok = engine
            .init(FIVE_CARDS, "https://example.com", card_options())
            .unwrap();
        assert!(!ok);
        assert!(engine.scene().is_none());
    }

    #[test]
    fn callbacks_fire_in_order() {
        let creating = Rc::new(Cell::new(0));
        let created = Rc::new(Cell::new(0));
        let loaded = Rc::new(Cell::new(false));

        let callbacks = Callbacks {
            onload: Some(Box::new({
                let loaded = loaded.clone();
                move || loaded.set(true)
            })),
            creating: Some(Box::new({
                let creating = creating.clone();
                move |_, _| creating.set(creating.get() + 1)
            })),
            created: Some(Box::new({
                let created = created.clone();
                move |_, _| created.set(created.get() + 1)
            })),
            clicked: None,
        };

        let mut engine = Engine::new().with_callbacks(callbacks);
        engine
            .init(FIVE_CARDS, "https://example.com", card_options())
            .unwrap();

        assert_eq!(creating.get(), 5);
        assert_eq!(created.get(), 5);
        assert!(loaded.get());
    }

    #[test]
    fn multi_transform_runs_each_generator() {
        let mut engine = Engine::new();
        engine
            .init(
                FIVE_CARDS,
                "https://example.com",
                json!({
                    "generator": ["extrude", {"name": "tile", "tile": {"cols": 2}}],
                    "src": {"selector": ".card"},
                }),
            )
            .unwrap();
        // Five extruded boxes plus five tiles.
        assert_eq!(engine.scene().unwrap().objects.len(), 10);
    }

    #[test]
    fn click_resolves_an_object() {
        let clicked = Rc::new(Cell::new(false));
        let callbacks = Callbacks {
            clicked: Some(Box::new({
                let clicked = clicked.clone();
                move |_| clicked.set(true)
            })),
            ..Default::default()
        };

        let mut engine = Engine::new().with_callbacks(callbacks);
        engine
            .init(
                FIVE_CARDS,
                "https://example.com",
                json!({"generator": "extrude", "src": {"selector": ".card"}}),
            )
            .unwrap();

        // The cards span the container; the center of the third card's
        // screen rect must hit it.
        let state_container = {
            let mut doc = parse_html(FIVE_CARDS, "https://example.com");
            doc.layout(1024.0);
            query::resolve_container(&doc, "body").unwrap()
        };
        let hit = engine.click(
            state_container.width / 2.0,
            state_container.height / 2.0,
        );
        assert!(hit.is_some());
        assert!(clicked.get());
    }

    #[test]
    fn frame_advances_without_panicking() {
        let mut engine = Engine::new();
        engine
            .init(FIVE_CARDS, "https://example.com", card_options())
            .unwrap();
        engine.pointer_down(10.0, 10.0, 0);
        engine.pointer_move(30.0, 12.0);
        engine.pointer_up(0);
        engine.frame(0.016);
        engine.frame(0.016);
        assert!(engine.camera().is_some());
    }
}
