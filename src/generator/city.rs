//! City generator: the page is laid flat on the ground and every element
//! rises from it as a building, footprint from its mapped box, height from
//! its mapped height.

use serde_json::Value;

use crate::config::Config;
use crate::dom::css::Color;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::{ground_object, Generator};
use crate::scene::mapper::DepthPolicy;
use crate::scene::plane::PlacementPlane;
use crate::scene::{Material, ObjectDesc, ObjectKind};

const GROUND_COLOR: Color = Color::rgb(0x6e, 0x70, 0x74);

#[derive(Default)]
pub struct CityGenerator;

impl Generator for CityGenerator {
    fn name(&self) -> &'static str {
        "city"
    }

    fn init(&mut self, _config: &Config, _merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
        let ground = ground_object(state, 0.0, GROUND_COLOR);
        state.create_object(None, ground);
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let mut count = 0;
        for element in elements {
            // Square-ish footprint: depth follows the mapped width.
            let Some(placed) = state.place(element, DepthPolicy::Width) else {
                continue;
            };
            let (textures, _) = state.paint(element);
            let front = Material::textured(textures.into_iter().next().unwrap());
            let sides = state.side_material(element);
            let height = placed.height.max(1.0);
            let desc = ObjectDesc {
                kind: ObjectKind::Box,
                // The mapped vertical position becomes the street axis.
                position: [placed.pos.x, height / 2.0, -placed.pos.y],
                dims: [placed.width, height, placed.depth],
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testutil::{grid_elements, test_state};
    use serde_json::json;

    #[test]
    fn buildings_rise_from_the_ground() {
        let mut state = test_state();
        let config = crate::config::Config::from_merged(&crate::config::engine_defaults()).unwrap();
        let mut gen = CityGenerator;
        gen.init(&config, &json!({}), &mut state);
        let count = gen.generate(&grid_elements(4), &mut state);

        assert_eq!(count, 4);
        for obj in state.scene.objects.iter().skip(1) {
            let bottom = obj.desc.position[1] - obj.desc.dims[1] / 2.0;
            assert!(bottom.abs() < 1e-3);
        }
    }
}
