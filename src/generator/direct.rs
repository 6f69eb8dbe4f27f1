//! Direct generator: a plain linear pixel-to-world scale, no raycast.
//! Useful when the camera is posed arbitrarily and mapped placement would
//! not apply.

use serde_json::Value;

use crate::config::Config;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::Generator;
use crate::scene::{Material, ObjectDesc, ObjectKind};

pub struct DirectGenerator {
    scale: f32,
    depth: f32,
}

impl Default for DirectGenerator {
    fn default() -> Self {
        DirectGenerator {
            scale: 0.1,
            depth: 2.0,
        }
    }
}

impl Generator for DirectGenerator {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn init(&mut self, config: &Config, merged: &Value, state: &mut EngineState) {
        let _ = state;
        self.scale = merged
            .get("direct")
            .and_then(|o| o.get("scale"))
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(0.1);
        self.depth = config.block.depth;
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let s = self.scale;
        let half_w = state.container.width / 2.0;
        let half_h = state.container.height / 2.0;
        let mut count = 0;
        for element in elements {
            let b = element.bounds;
            let (textures, _) = state.paint(element);
            let front = Material::textured(textures.into_iter().next().unwrap());
            let sides = state.side_material(element);
            let desc = ObjectDesc {
                kind: ObjectKind::Box,
                position: [
                    (b.x - state.container.x + b.width / 2.0 - half_w) * s,
                    -((b.y - state.container.y + b.height / 2.0 - half_h) * s),
                    0.0,
                ],
                dims: [(b.width * s).max(0.01), (b.height * s).max(0.01), self.depth],
                front,
                sides,
                mass: state.default_mass,
                visible: true,
            };
            state.create_object(Some(element), desc);
            count += 1;
        }
        count
    }
}
