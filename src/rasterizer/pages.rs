//! Paginating text rasterizer: streams body text in fixed-size chunks and
//! emits one texture per canvas page as content overflows, in reading
//! order. The title panel appears on the first page only.

use crate::dom::query::SourceElement;
use crate::error::RasterError;
use crate::rasterizer::canvas::{wrap_text, Canvas, LINE_HEIGHT_EM};
use crate::rasterizer::text::paint_title;
use crate::rasterizer::{PaintInfo, RasterOptions, Rasterizer};
use crate::scene::Texture;

pub struct PagesRasterizer;

impl Rasterizer for PagesRasterizer {
    fn name(&self) -> &'static str {
        "pages"
    }

    fn paint(
        &self,
        element: &SourceElement,
        options: &RasterOptions,
        info: &mut PaintInfo,
    ) -> Result<Vec<Texture>, RasterError> {
        let line_height = options.font_px * LINE_HEIGHT_EM;
        let max_width = options.canvas_width as f32 - options.padding * 2.0;
        let bottom = options.canvas_height as f32 - options.padding;

        let mut pages = Vec::new();
        let mut canvas = Canvas::new(options.canvas_width, options.canvas_height, options.background);
        let (mut y, title_lines) = paint_title(&mut canvas, &element.title, options);
        let mut lines_painted = title_lines;

        for chunk in chunk_words(&element.text, options.chunk_chars) {
            let wrapped = wrap_text(&chunk, options.font_px, max_width);
            for line in &wrapped.lines {
                if y + line_height > bottom {
                    // Page full: emit it and continue on a fresh canvas.
                    let full = std::mem::replace(
                        &mut canvas,
                        Canvas::new(options.canvas_width, options.canvas_height, options.background),
                    );
                    pages.push(full.into_texture());
                    y = options.padding;
                }
                canvas.draw_text_line(options.padding, y, line, options.font_px, options.text_color);
                y += line_height;
                lines_painted += 1;
            }
        }
        pages.push(canvas.into_texture());

        info.lines = lines_painted;
        info.pages = pages.len();
        Ok(pages)
    }
}

/// Split text into word-aligned chunks of roughly `chunk_chars` characters.
fn chunk_words(text: &str, chunk_chars: usize) -> Vec<String> {
    let chunk_chars = chunk_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > chunk_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
