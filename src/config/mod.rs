//! Scene configuration.
//!
//! Three layers feed the authoritative configuration: engine defaults,
//! the selected generator's defaults, and user options. The merge engine
//! combines them; the merged value then deserializes into the typed
//! [`Config`] and is validated before any scene object exists.

pub mod merge;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ConfigError;

/// Source-document options: what to select and where it lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SrcConfig {
    /// Selector for the elements that become 3D objects.
    pub selector: String,
    /// Sub-selector for an element's title text.
    pub title: Option<String>,
    /// Sub-selector for an element's body text.
    pub content: Option<String>,
    /// Selector for the positioning container.
    pub container: String,
    /// Layout viewport width in pixels.
    pub viewport_width: f32,
}

/// Camera intrinsics and pose.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub position: [f32; 3],
    /// Euler rotation in radians around X, Y, Z; ignored when `lookat` is set.
    pub rotation: [f32; 3],
    pub lookat: Option<[f32; 3]>,
    pub up: [f32; 3],
}

/// One light in the scene, in declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    pub kind: String,
    pub color: [f32; 3],
    pub intensity: f32,
    #[serde(default)]
    pub position: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicsConfig {
    pub enabled: bool,
    /// Whether generated objects get a physics material (friction/restitution).
    pub material: bool,
    /// Default mass for generated objects while physics is enabled.
    pub mass: f32,
}

/// Default dimensions for generated geometry.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BlockConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControlsConfig {
    pub kind: String,
    pub allow_drag: bool,
}

/// The authoritative merged configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub src: SrcConfig,
    pub camera: CameraConfig,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    pub physics: PhysicsConfig,
    pub block: BlockConfig,
    pub gravity: [f32; 3],
    pub controls: ControlsConfig,
    pub move_with_physics: bool,
    pub clicks_enabled: bool,
}

/// Canonical strategy descriptor: every accepted option shape
/// (bare name string, object with a `name` field, list of either)
/// normalizes to this before any component sees it.
#[derive(Debug, Clone)]
pub struct StrategyDesc {
    pub name: String,
    /// Strategy-specific option overrides (the descriptor minus `name`).
    pub options: Value,
}

/// Built-in engine defaults, the lowest-priority merge layer.
pub fn engine_defaults() -> Value {
    json!({
        "src": {
            "selector": "div",
            "container": "body",
            "viewport_width": 1024.0,
        },
        "camera": {
            "fov": 35.0,
            "near": 1.0,
            "far": 2000.0,
            "aspect": 1.0,
            "position": [0.0, 0.0, 800.0],
            "rotation": [0.0, 0.0, 0.0],
            "up": [0.0, 1.0, 0.0],
        },
        "lights": [],
        "physics": { "enabled": true, "material": true, "mass": 1000.0 },
        "block": { "width": 250.0, "height": 250.0, "depth": 2.0 },
        "gravity": [0.0, 0.0, 0.0],
        "controls": { "kind": "orbit", "allow_drag": true },
        "rasterizer": "element",
        "move_with_physics": true,
        "clicks_enabled": true,
    })
}

impl Config {
    /// Deserialize a merged value and validate it.
    pub fn from_merged(merged: &Value) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_value(merged.clone())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on numerics that would otherwise propagate NaN or an
    /// infinite far plane into the frustum math.
    fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if !cam.fov.is_finite() || cam.fov <= 0.0 || cam.fov >= 180.0 {
            return Err(ConfigError::Invalid(format!(
                "camera.fov must be in (0, 180), got {}",
                cam.fov
            )));
        }
        if !cam.near.is_finite() || cam.near <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera.near must be positive and finite, got {}",
                cam.near
            )));
        }
        if !cam.far.is_finite() || cam.far <= cam.near {
            return Err(ConfigError::Invalid(format!(
                "camera.far must be finite and greater than near, got {}",
                cam.far
            )));
        }
        if !cam.aspect.is_finite() || cam.aspect <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera.aspect must be positive, got {}",
                cam.aspect
            )));
        }
        if self.src.viewport_width <= 0.0 {
            return Err(ConfigError::Invalid(
                "src.viewport_width must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Normalize the `generator` option into a list of canonical descriptors.
///
/// Accepted shapes: absent (default `extrude`), `"wall"`,
/// `{"name": "wall", ...opts}`, or a list of either for multi-transform
/// configurations.
pub fn normalize_generators(value: Option<&Value>) -> Result<Vec<StrategyDesc>, ConfigError> {
    let Some(value) = value else {
        return Ok(vec![StrategyDesc {
            name: "extrude".into(),
            options: json!({}),
        }]);
    };
    match value {
        Value::Array(items) if items.is_empty() => Err(ConfigError::Invalid(
            "generator list is empty".into(),
        )),
        Value::Array(items) => items.iter().map(normalize_one).collect(),
        other => Ok(vec![normalize_one(other)?]),
    }
}

/// Normalize the `rasterizer` option into a canonical descriptor, if present.
pub fn normalize_rasterizer(value: Option<&Value>) -> Result<Option<StrategyDesc>, ConfigError> {
    value.map(normalize_one).transpose()
}

fn normalize_one(value: &Value) -> Result<StrategyDesc, ConfigError> {
    match value {
        Value::String(name) => Ok(StrategyDesc {
            name: name.clone(),
            options: json!({}),
        }),
        Value::Object(map) => {
            let name = map
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ConfigError::Invalid("strategy descriptor is missing `name`".into())
                })?
                .to_string();
            let mut options = map.clone();
            options.remove("name");
            Ok(StrategyDesc {
                name,
                options: Value::Object(options),
            })
        }
        other => Err(ConfigError::Invalid(format!(
            "strategy must be a name or descriptor object, got {other}"
        ))),
    }
}
