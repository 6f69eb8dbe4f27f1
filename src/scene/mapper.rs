//! Coordinate mapper: converts a 2D element rectangle (relative to its
//! container) into a 3D world-space placement via rays cast against the
//! placement plane.

use glam::Vec3;
use serde_json::Value;

use crate::dom::layout::LayoutBox;
use crate::scene::camera::{screen_to_ndc, Camera};
use crate::scene::plane::PlacementPlane;

/// How an element's depth is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthPolicy {
    /// Use the mapped block width.
    Width,
    /// Use the mapped block height.
    Height,
    /// Use a configured number.
    Fixed(f32),
    /// Fall back to the raw Z delta, then 1.0.
    Auto,
}

impl DepthPolicy {
    /// Parse a generator's `depth` option: `"width"`, `"height"`, a number,
    /// or absent, with the configured block depth as the number fallback.
    pub fn from_option(value: Option<&Value>, default_depth: f32) -> Self {
        match value {
            Some(Value::String(s)) if s == "width" => DepthPolicy::Width,
            Some(Value::String(s)) if s == "height" => DepthPolicy::Height,
            Some(Value::Number(n)) => n
                .as_f64()
                .map(|d| DepthPolicy::Fixed(d as f32))
                .unwrap_or(DepthPolicy::Fixed(default_depth)),
            _ if default_depth > 0.0 => DepthPolicy::Fixed(default_depth),
            _ => DepthPolicy::Auto,
        }
    }
}

/// One element mapped into 3D: the center of its volume plus its extents.
#[derive(Debug, Clone, Copy)]
pub struct PlacementResult {
    pub pos: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Map an element's document-coordinate box into world space.
///
/// The element's top-left and bottom-right corners, taken relative to the
/// container, are converted to NDC, cast through the camera, and
/// intersected with the placement plane. Returns `None` when either ray
/// misses; callers skip the element and continue.
///
/// Reads nothing but its arguments: layout can reflow between calls and
/// each call sees current geometry.
pub fn map_element_to_world(
    bounds: &LayoutBox,
    container: &LayoutBox,
    policy: DepthPolicy,
    camera: &Camera,
    plane: &PlacementPlane,
) -> Option<PlacementResult> {
    let left = bounds.x - container.x;
    let top = bounds.y - container.y;

    let (tl_x, tl_y) = screen_to_ndc(left, top, container.width, container.height);
    let (br_x, br_y) = screen_to_ndc(
        left + bounds.width,
        top + bounds.height,
        container.width,
        container.height,
    );

    let top_left = plane.intersect(&camera.ndc_ray(tl_x, tl_y))?;
    let bottom_right = plane.intersect(&camera.ndc_ray(br_x, br_y))?;

    let width = (bottom_right.x - top_left.x).abs();
    let height = (top_left.y - bottom_right.y).abs();
    let depth = match policy {
        DepthPolicy::Width => width,
        DepthPolicy::Height => height,
        DepthPolicy::Fixed(d) if d > 0.0 => d,
        _ => {
            let dz = (top_left.z - bottom_right.z).abs();
            if dz > 0.0 {
                dz
            } else {
                1.0
            }
        }
    };

    Some(PlacementResult {
        pos: Vec3::new(
            top_left.x + width / 2.0,
            top_left.y - height / 2.0,
            top_left.z - depth / 2.0,
        ),
        width,
        height,
        depth,
    })
}
