//! Book generator: each element's paginated textures become a spread of
//! page slabs, left/right of a spine, ignoring DOM position. Page index
//! is the only layout input.

use serde_json::{json, Value};

use crate::config::Config;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::Generator;
use crate::scene::plane::PlacementPlane;
use crate::scene::{Material, ObjectDesc, ObjectKind};

pub struct BookGenerator {
    page: [f32; 2],
    thickness: f32,
    spine_gap: f32,
}

impl Default for BookGenerator {
    fn default() -> Self {
        BookGenerator {
            page: [250.0, 250.0],
            thickness: 1.0,
            spine_gap: 6.0,
        }
    }
}

impl Generator for BookGenerator {
    fn name(&self) -> &'static str {
        "book"
    }

    fn default_options(&self) -> Value {
        // Books only make sense with a paginating rasterizer.
        json!({"rasterizer": "pages"})
    }

    fn init_cam_opts(&self) -> Option<Value> {
        Some(json!({"camera": {"position": [0.0, 150.0, 700.0]}}))
    }

    fn init(&mut self, config: &Config, _merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
        self.page = [config.block.width, config.block.height];
        self.thickness = (config.block.depth * 0.25).max(0.5);
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let [w, h] = self.page;
        let mut count = 0;
        for element in elements {
            let (textures, _info) = state.paint(element);
            let book_x = element.index as f32 * w * 2.5;
            let sides = state.side_material(element);
            for (page_index, texture) in textures.into_iter().enumerate() {
                // Even pages open to the left of the spine, odd to the
                // right; each pair sits slightly behind the previous one.
                let side = if page_index % 2 == 0 { -1.0 } else { 1.0 };
                let pair = (page_index / 2) as f32;
                let desc = ObjectDesc {
                    kind: ObjectKind::Box,
                    position: [
                        book_x + side * (w / 2.0 + self.spine_gap),
                        h / 2.0,
                        -pair * self.thickness * 2.0,
                    ],
                    dims: [w, h, self.thickness],
                    front: Material::textured(texture),
                    sides: sides.clone(),
                    mass: 0.0,
                    visible: true,
                };
                state.create_object(Some(element), desc);
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testutil::{test_element, test_state};

    #[test]
    fn one_slab_per_page_in_reading_order() {
        let mut state = test_state();
        state.rasterizer = crate::rasterizer::create("pages").unwrap();
        state.raster_opts.canvas_height = 128;

        let mut element = test_element(0, 0.0, 0.0, 300.0, 200.0);
        element.text = std::iter::repeat("word")
            .take(1500)
            .collect::<Vec<_>>()
            .join(" ");

        let config = crate::config::Config::from_merged(&crate::config::engine_defaults()).unwrap();
        let mut gen = BookGenerator::default();
        gen.init(&config, &json!({}), &mut state);
        let count = gen.generate(&[element], &mut state);

        assert!(count > 1, "long text should paginate into multiple slabs");
        assert_eq!(state.scene.objects.len(), count);
        // Pages alternate around the spine.
        let x0 = state.scene.objects[0].desc.position[0];
        let x1 = state.scene.objects[1].desc.position[0];
        assert!(x0 < 0.0 && x1 > 0.0);
    }
}
