//! Rasterizer strategies: convert an element's content into textures.
//!
//! Every strategy implements the same `paint` contract; the registry maps
//! configuration names to instances. Strategies are stateless across calls
//! apart from the [`PaintInfo`] output record the caller may inspect.

pub mod canvas;
pub mod element;
pub mod image;
pub mod pages;
pub mod text;

use serde::Deserialize;
use serde_json::Value;

use crate::dom::css::Color;
use crate::dom::query::SourceElement;
use crate::error::{ConfigError, RasterError};
use crate::scene::Texture;

/// Painting options shared by the canvas-based strategies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_px: f32,
    pub title_font_px: f32,
    pub padding: f32,
    pub text_color: Color,
    pub background: Color,
    /// Blend factor applied to the page background for the title panel.
    pub title_shade: f32,
    /// Streaming chunk size, in characters, for the paginating strategy.
    pub chunk_chars: usize,
}

impl Default for RasterOptions {
    fn default() -> Self {
        RasterOptions {
            canvas_width: 512,
            canvas_height: 512,
            font_px: 13.0,
            title_font_px: 16.0,
            padding: 10.0,
            text_color: Color::BLACK,
            background: Color::WHITE,
            title_shade: -0.25,
            chunk_chars: 250,
        }
    }
}

impl RasterOptions {
    /// Deserialize from a normalized strategy descriptor's options.
    pub fn from_value(options: &Value) -> Result<Self, ConfigError> {
        serde_json::from_value(options.clone())
            .map_err(|e| ConfigError::Invalid(format!("rasterizer options: {e}")))
    }
}

/// Output record a paint call fills in for the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintInfo {
    /// Text lines painted.
    pub lines: usize,
    /// Pages emitted (1 for single-texture strategies).
    pub pages: usize,
}

/// A pluggable content-to-texture strategy.
pub trait Rasterizer {
    fn name(&self) -> &'static str;

    /// Paint an element's content.
    ///
    /// Paginating strategies return one texture per page, in reading order;
    /// everything else returns a single texture.
    fn paint(
        &self,
        element: &SourceElement,
        options: &RasterOptions,
        info: &mut PaintInfo,
    ) -> Result<Vec<Texture>, RasterError>;
}

/// Look up a rasterizer by registry name.
pub fn create(name: &str) -> Result<Box<dyn Rasterizer>, ConfigError> {
    match name {
        "image" => Ok(Box::new(image::ImageRasterizer)),
        "element" => Ok(Box::new(element::ElementRasterizer)),
        "text" => Ok(Box::new(text::TextRasterizer)),
        "pages" => Ok(Box::new(pages::PagesRasterizer)),
        other => Err(ConfigError::UnknownRasterizer(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_knows_all_strategies() {
        for name in ["image", "element", "text", "pages"] {
            assert_eq!(create(name).unwrap().name(), name);
        }
    }

    #[test]
    fn unknown_name_is_a_config_error() {
        assert!(matches!(
            create("holograph"),
            Err(ConfigError::UnknownRasterizer(_))
        ));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts = RasterOptions::from_value(&json!({"font_px": 20.0})).unwrap();
        assert_eq!(opts.font_px, 20.0);
        assert_eq!(opts.canvas_width, 512);
        assert_eq!(opts.text_color, Color::BLACK);
    }

    #[test]
    fn css_colors_in_options() {
        let opts =
            RasterOptions::from_value(&json!({"background": "#202428", "text_color": "white"}))
                .unwrap();
        assert_eq!(opts.background, Color::rgb(0x20, 0x24, 0x28));
        assert_eq!(opts.text_color, Color::WHITE);
    }
}
