//! Extrude generator: every matched element becomes a box at its mapped
//! screen position, content on the front face, shaded sides, configurable
//! depth policy.

use serde_json::Value;

use crate::config::Config;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::{placed_box, Generator};
use crate::scene::mapper::DepthPolicy;
use crate::scene::plane::PlacementPlane;
use crate::scene::Material;

pub struct ExtrudeGenerator {
    policy: DepthPolicy,
}

impl Default for ExtrudeGenerator {
    fn default() -> Self {
        ExtrudeGenerator {
            policy: DepthPolicy::Auto,
        }
    }
}

impl Generator for ExtrudeGenerator {
    fn name(&self) -> &'static str {
        "extrude"
    }

    fn init(&mut self, config: &Config, merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
        let depth_opt = merged.get("extrude").and_then(|o| o.get("depth"));
        self.policy = DepthPolicy::from_option(depth_opt, config.block.depth);
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let mut count = 0;
        for element in elements {
            let Some(placed) = state.place(element, self.policy) else {
                continue;
            };
            let (textures, _info) = state.paint(element);
            let front = Material::textured(textures.into_iter().next().unwrap());
            let sides = state.side_material(element);
            let desc = placed_box(&placed, front, sides, state.default_mass);
            state.create_object(Some(element), desc);
            count += 1;
        }
        count
    }
}
