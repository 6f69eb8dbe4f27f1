//! Element-snapshot rasterizer: a flat color swatch of the element's
//! computed background, sized to its layout box.

use crate::dom::query::SourceElement;
use crate::error::RasterError;
use crate::rasterizer::canvas::Canvas;
use crate::rasterizer::{PaintInfo, RasterOptions, Rasterizer};
use crate::scene::Texture;

const MAX_SWATCH: f32 = 1024.0;

pub struct ElementRasterizer;

impl Rasterizer for ElementRasterizer {
    fn name(&self) -> &'static str {
        "element"
    }

    fn paint(
        &self,
        element: &SourceElement,
        options: &RasterOptions,
        info: &mut PaintInfo,
    ) -> Result<Vec<Texture>, RasterError> {
        // Transparent or unset backgrounds normalize to the page default.
        let color = element.background.unwrap_or(options.background);
        let w = element.bounds.width.clamp(1.0, MAX_SWATCH) as u32;
        let h = element.bounds.height.clamp(1.0, MAX_SWATCH) as u32;
        let canvas = Canvas::new(w, h, color);
        info.pages = 1;
        Ok(vec![canvas.into_texture()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::css::Color;
    use crate::dom::layout::LayoutBox;

    fn swatch_element(background: Option<Color>) -> SourceElement {
        SourceElement {
            index: 0,
            tag: "div".into(),
            bounds: LayoutBox::new(0.0, 0.0, 8.0, 4.0),
            font_size: 16.0,
            title: String::new(),
            text: String::new(),
            background,
            image_src: None,
        }
    }

    #[test]
    fn swatch_uses_element_background() {
        let el = swatch_element(Some(Color::rgb(10, 20, 30)));
        let mut info = PaintInfo::default();
        let textures = ElementRasterizer
            .paint(&el, &RasterOptions::default(), &mut info)
            .unwrap();
        assert_eq!(textures.len(), 1);
        assert_eq!((textures[0].width, textures[0].height), (8, 4));
        assert_eq!(&textures[0].rgba[0..3], &[10, 20, 30]);
    }

    #[test]
    fn transparent_background_normalizes_to_default() {
        let el = swatch_element(None);
        let mut info = PaintInfo::default();
        let textures = ElementRasterizer
            .paint(&el, &RasterOptions::default(), &mut info)
            .unwrap();
        assert_eq!(&textures[0].rgba[0..3], &[255, 255, 255]);
    }
}
