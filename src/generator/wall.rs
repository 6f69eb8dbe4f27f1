//! Wall generator: elements become upright slabs standing on a ground
//! plane, keeping their mapped horizontal order.

use serde_json::Value;

use crate::config::Config;
use crate::dom::css::Color;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::{ground_object, placed_box, Generator};
use crate::scene::mapper::DepthPolicy;
use crate::scene::plane::PlacementPlane;
use crate::scene::Material;

const GROUND_COLOR: Color = Color::rgb(0xcc, 0xcc, 0xd2);

pub struct WallGenerator {
    floor_y: f32,
    policy: DepthPolicy,
}

impl Default for WallGenerator {
    fn default() -> Self {
        WallGenerator {
            floor_y: 0.0,
            policy: DepthPolicy::Auto,
        }
    }
}

impl Generator for WallGenerator {
    fn name(&self) -> &'static str {
        "wall"
    }

    fn init(&mut self, config: &Config, merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
        let opts = merged.get("wall");
        self.floor_y = opts
            .and_then(|o| o.get("floor"))
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(0.0);
        self.policy =
            DepthPolicy::from_option(opts.and_then(|o| o.get("depth")), config.block.depth);

        let ground = ground_object(state, self.floor_y, GROUND_COLOR);
        state.create_object(None, ground);
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let mut count = 0;
        for element in elements {
            let Some(placed) = state.place(element, self.policy) else {
                continue;
            };
            let (textures, _) = state.paint(element);
            let front = Material::textured(textures.into_iter().next().unwrap());
            let sides = state.side_material(element);
            let mut desc = placed_box(&placed, front, sides, state.default_mass);
            // Stand the slab on the floor.
            desc.position[1] = self.floor_y + placed.height / 2.0;
            state.create_object(Some(element), desc);
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testutil::{grid_elements, test_state};
    use serde_json::json;

    #[test]
    fn slabs_stand_on_the_floor() {
        let mut state = test_state();
        let config = crate::config::Config::from_merged(&crate::config::engine_defaults()).unwrap();
        let mut gen = WallGenerator::default();
        gen.init(&config, &json!({"wall": {"floor": -50.0}}), &mut state);
        let count = gen.generate(&grid_elements(3), &mut state);

        assert_eq!(count, 3);
        // Ground plane plus three slabs.
        assert_eq!(state.scene.objects.len(), 4);
        for obj in state.scene.objects.iter().skip(1) {
            let bottom = obj.desc.position[1] - obj.desc.dims[1] / 2.0;
            assert!((bottom - -50.0).abs() < 1e-3);
        }
    }
}
