//! Box generator: the minimal mapped layout. One plain box per element at
//! its mapped position, content on the front face only; the richer
//! variants elaborate on this.

use serde_json::Value;

use crate::config::Config;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::{placed_box, Generator};
use crate::scene::mapper::DepthPolicy;
use crate::scene::plane::PlacementPlane;
use crate::scene::Material;

#[derive(Default)]
pub struct BoxGenerator {
    depth: f32,
}

impl Generator for BoxGenerator {
    fn name(&self) -> &'static str {
        "box"
    }

    fn init(&mut self, config: &Config, _merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
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
            let sides = Material::solid(state.raster_opts.background);
            let desc = placed_box(&placed, front, sides, state.default_mass);
            state.create_object(Some(element), desc);
            count += 1;
        }
        count
    }
}
