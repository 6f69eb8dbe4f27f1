//! Image rasterizer: loads the element's image source directly as a
//! texture. Load failure is a per-element [`RasterError`]; the caller
//! substitutes the fallback swatch and continues the batch.

use crate::dom::query::SourceElement;
use crate::error::RasterError;
use crate::net;
use crate::rasterizer::{PaintInfo, RasterOptions, Rasterizer};
use crate::scene::Texture;

pub struct ImageRasterizer;

impl Rasterizer for ImageRasterizer {
    fn name(&self) -> &'static str {
        "image"
    }

    fn paint(
        &self,
        element: &SourceElement,
        _options: &RasterOptions,
        info: &mut PaintInfo,
    ) -> Result<Vec<Texture>, RasterError> {
        let src = element.image_src.as_deref().ok_or(RasterError::NoSource)?;
        let texture = net::image::load(src)?;
        info.pages = 1;
        Ok(vec![texture])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::layout::LayoutBox;

    #[test]
    fn missing_source_is_a_raster_error() {
        let el = SourceElement {
            index: 0,
            tag: "div".into(),
            bounds: LayoutBox::ZERO,
            font_size: 16.0,
            title: String::new(),
            text: String::new(),
            background: None,
            image_src: None,
        };
        let mut info = PaintInfo::default();
        assert!(matches!(
            ImageRasterizer.paint(&el, &RasterOptions::default(), &mut info),
            Err(RasterError::NoSource)
        ));
    }
}
