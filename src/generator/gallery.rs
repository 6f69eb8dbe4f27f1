//! Gallery generator: a wall layout with a frustum-filling backdrop and a
//! dark frame material around each exhibit.

use serde_json::Value;

use crate::config::Config;
use crate::dom::css::Color;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::{backdrop_object, ground_object, placed_box, Generator};
use crate::scene::mapper::DepthPolicy;
use crate::scene::plane::PlacementPlane;
use crate::scene::Material;

const GROUND_COLOR: Color = Color::rgb(0xb8, 0xb4, 0xac);
const BACKDROP_COLOR: Color = Color::rgb(0xf2, 0xf0, 0xea);
const FRAME_SHADE: f32 = -0.55;

pub struct GalleryGenerator {
    policy: DepthPolicy,
    frame: Material,
}

impl Default for GalleryGenerator {
    fn default() -> Self {
        GalleryGenerator {
            policy: DepthPolicy::Auto,
            frame: Material::solid(Color::BLACK),
        }
    }
}

impl Generator for GalleryGenerator {
    fn name(&self) -> &'static str {
        "gallery"
    }

    fn init(&mut self, config: &Config, merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
        self.policy = DepthPolicy::from_option(
            merged.get("gallery").and_then(|o| o.get("depth")),
            config.block.depth,
        );
        self.frame = Material::solid(state.raster_opts.background.blend(FRAME_SHADE));

        let ground = ground_object(state, 0.0, GROUND_COLOR);
        state.create_object(None, ground);
        let backdrop = backdrop_object(state, -config.block.depth * 4.0, BACKDROP_COLOR);
        state.create_object(None, backdrop);
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let mut count = 0;
        for element in elements {
            let Some(placed) = state.place(element, self.policy) else {
                continue;
            };
            let (textures, _) = state.paint(element);
            let front = Material::textured(textures.into_iter().next().unwrap());
            let mut desc = placed_box(&placed, front, self.frame.clone(), state.default_mass);
            desc.position[1] = placed.height / 2.0;
            state.create_object(Some(element), desc);
            count += 1;
        }
        count
    }
}
