//! Float generator: thin panels hovering at staggered heights over the
//! mapped page plane, light enough for physics to toss around.

use serde_json::Value;

use crate::config::Config;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::Generator;
use crate::scene::mapper::DepthPolicy;
use crate::scene::plane::PlacementPlane;
use crate::scene::{Material, ObjectDesc, ObjectKind};

pub struct FloatGenerator {
    base_y: f32,
    lift_step: f32,
    depth: f32,
}

impl Default for FloatGenerator {
    fn default() -> Self {
        FloatGenerator {
            base_y: 60.0,
            lift_step: 45.0,
            depth: 2.0,
        }
    }
}

impl Generator for FloatGenerator {
    fn name(&self) -> &'static str {
        "float"
    }

    fn init(&mut self, config: &Config, merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
        let opts = merged.get("float");
        self.base_y = opts
            .and_then(|o| o.get("base"))
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(60.0);
        self.lift_step = opts
            .and_then(|o| o.get("step"))
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(45.0);
        self.depth = config.block.depth;
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let mut count = 0;
        for element in elements {
            let Some(placed) = state.place(element, DepthPolicy::Fixed(self.depth)) else {
                continue;
            };
            let (textures, _) = state.paint(element);
            let front = Material::textured(textures.into_iter().next().unwrap());
            let sides = state.side_material(element);
            let lift = self.base_y + (element.index % 4) as f32 * self.lift_step;
            let desc = ObjectDesc {
                kind: ObjectKind::Box,
                position: [placed.pos.x, lift, -placed.pos.y],
                dims: [placed.width, placed.height, placed.depth],
                front,
                sides,
                // Light panels drift more convincingly under impulses.
                mass: state.default_mass * 0.1,
                visible: true,
            };
            state.create_object(Some(element), desc);
            count += 1;
        }
        count
    }
}
