//! Tile generator: a procedural row-major grid. DOM positions are
//! ignored; query order alone determines each element's cell.

use serde_json::{json, Value};

use crate::config::Config;
use crate::dom::query::SourceElement;
use crate::engine::EngineState;
use crate::generator::Generator;
use crate::scene::plane::PlacementPlane;
use crate::scene::{Material, ObjectDesc, ObjectKind};

pub struct TileGenerator {
    cols: usize,
    gap: f32,
    tile: [f32; 2],
    depth: f32,
}

impl Default for TileGenerator {
    fn default() -> Self {
        TileGenerator {
            cols: 6,
            gap: 20.0,
            tile: [250.0, 250.0],
            depth: 2.0,
        }
    }
}

impl Generator for TileGenerator {
    fn name(&self) -> &'static str {
        "tile"
    }

    fn init_cam_opts(&self) -> Option<Value> {
        // Pull the camera back far enough to frame the grid during layout.
        Some(json!({"camera": {"position": [0.0, 0.0, 1600.0]}}))
    }

    fn init(&mut self, config: &Config, merged: &Value, state: &mut EngineState) {
        state.plane = PlacementPlane::at_z(0.0);
        let opts = merged.get("tile");
        self.cols = opts
            .and_then(|o| o.get("cols"))
            .and_then(Value::as_u64)
            .map(|c| c.max(1) as usize)
            .unwrap_or(6);
        self.gap = opts
            .and_then(|o| o.get("gap"))
            .and_then(Value::as_f64)
            .map(|g| g as f32)
            .unwrap_or(20.0);
        self.tile = [config.block.width, config.block.height];
        self.depth = config.block.depth;
    }

    fn generate(&mut self, elements: &[SourceElement], state: &mut EngineState) -> usize {
        let [w, h] = self.tile;
        let step_x = w + self.gap;
        let step_y = h + self.gap;
        let x_offset = (self.cols as f32 - 1.0) / 2.0 * step_x;

        let mut count = 0;
        for element in elements {
            let row = element.index / self.cols;
            let col = element.index % self.cols;
            let (textures, _) = state.paint(element);
            let front = Material::textured(textures.into_iter().next().unwrap());
            let sides = state.side_material(element);
            let desc = ObjectDesc {
                kind: ObjectKind::Box,
                position: [
                    col as f32 * step_x - x_offset,
                    -(row as f32) * step_y,
                    0.0,
                ],
                dims: [w, h, self.depth],
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

    #[test]
    fn elements_fill_rows_in_query_order() {
        let cols = 3;
        let mut state = test_state();
        let config = crate::config::Config::from_merged(&crate::config::engine_defaults()).unwrap();
        let mut gen = TileGenerator::default();
        gen.init(&config, &json!({"tile": {"cols": cols, "gap": 10.0}}), &mut state);

        let elements = grid_elements(7);
        let count = gen.generate(&elements, &mut state);
        assert_eq!(count, 7);

        let step_x = 250.0 + 10.0;
        let step_y = 250.0 + 10.0;
        let x_offset = (cols as f32 - 1.0) / 2.0 * step_x;
        for (i, obj) in state.scene.objects.iter().enumerate() {
            let row = (i / cols) as f32;
            let col = (i % cols) as f32;
            let pos = obj.desc.position;
            assert!((pos[0] - (col * step_x - x_offset)).abs() < 1e-3, "col of {i}");
            assert!((pos[1] - -(row * step_y)).abs() < 1e-3, "row of {i}");
        }
    }
}
