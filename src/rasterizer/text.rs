//! Plain-text rasterizer: a shaded title panel followed by word-wrapped
//! body text on a single canvas.

use crate::dom::query::SourceElement;
use crate::error::RasterError;
use crate::rasterizer::canvas::{wrap_text, Canvas, LINE_HEIGHT_EM};
use crate::rasterizer::{PaintInfo, RasterOptions, Rasterizer};
use crate::scene::Texture;

pub struct TextRasterizer;

/// Paint the title panel onto a fresh canvas.
///
/// Returns the Y cursor below the panel and the number of title lines.
/// The panel background is the page background shaded by `title_shade`.
pub(crate) fn paint_title(canvas: &mut Canvas, title: &str, options: &RasterOptions) -> (f32, usize) {
    if title.trim().is_empty() {
        return (options.padding, 0);
    }
    let font = options.title_font_px;
    let line_height = font * LINE_HEIGHT_EM;
    let max_width = canvas.width() as f32 - options.padding * 2.0;
    let wrapped = wrap_text(title, font, max_width);

    let panel_height = wrapped.line_count() as f32 * line_height + options.padding * 2.0;
    let panel_color = options.background.blend(options.title_shade);
    canvas.fill_rect(0.0, 0.0, canvas.width() as f32, panel_height, panel_color);

    let mut y = options.padding;
    for line in &wrapped.lines {
        canvas.draw_text_line(options.padding, y, line, font, options.text_color);
        y += line_height;
    }
    (panel_height + options.padding, wrapped.line_count())
}

impl Rasterizer for TextRasterizer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn paint(
        &self,
        element: &SourceElement,
        options: &RasterOptions,
        info: &mut PaintInfo,
    ) -> Result<Vec<Texture>, RasterError> {
        let mut canvas = Canvas::new(options.canvas_width, options.canvas_height, options.background);
        let (mut y, title_lines) = paint_title(&mut canvas, &element.title, options);

        let line_height = options.font_px * LINE_HEIGHT_EM;
        let max_width = options.canvas_width as f32 - options.padding * 2.0;
        let wrapped = wrap_text(&element.text, options.font_px, max_width);
        for line in &wrapped.lines {
            // Overflow past the canvas bottom is clipped, not paginated.
            canvas.draw_text_line(options.padding, y, line, options.font_px, options.text_color);
            y += line_height;
        }

        info.lines = title_lines + wrapped.line_count();
        info.pages = 1;
        Ok(vec![canvas.into_texture()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::css::Color;
    use crate::dom::layout::LayoutBox;

    fn text_element(title: &str, text: &str) -> SourceElement {
        SourceElement {
            index: 0,
            tag: "article".into(),
            bounds: LayoutBox::new(0.0, 0.0, 300.0, 200.0),
            font_size: 16.0,
            title: title.into(),
            text: text.into(),
            background: None,
            image_src: None,
        }
    }

    #[test]
    fn reports_line_count() {
        let el = text_element(
            "A Title",
            "some body words that will wrap across a couple of lines when narrow",
        );
        let mut opts = RasterOptions::default();
        opts.canvas_width = 200;
        let mut info = PaintInfo::default();
        let textures = TextRasterizer.paint(&el, &opts, &mut info).unwrap();
        assert_eq!(textures.len(), 1);
        assert!(info.lines >= 3);
    }

    #[test]
    fn title_panel_is_shaded_darker() {
        let el = text_element("Title", "");
        let opts = RasterOptions::default();
        let mut info = PaintInfo::default();
        let textures = TextRasterizer.paint(&el, &opts, &mut info).unwrap();

        let expected = opts.background.blend(opts.title_shade);
        // Top-left pixel belongs to the panel.
        assert_eq!(
            &textures[0].rgba[0..3],
            &[expected.r, expected.g, expected.b]
        );
        assert_ne!(expected, Color::WHITE);
    }

    #[test]
    fn no_title_paints_body_only() {
        let el = text_element("", "just body");
        let mut info = PaintInfo::default();
        TextRasterizer
            .paint(&el, &RasterOptions::default(), &mut info)
            .unwrap();
        assert_eq!(info.lines, 1);
    }
}
