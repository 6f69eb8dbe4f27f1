//! Image loading for the image rasterizer.
//!
//! Fetches or reads an image source and decodes it into an RGBA pixel
//! buffer, capped to a reasonable texture width.

use crate::error::RasterError;
use crate::scene::Texture;

/// Maximum texture width; wider sources are downscaled.
const MAX_WIDTH: u32 = 800;

/// Load an image source into a texture.
///
/// `http(s)` sources are fetched with a blocking client; anything else is
/// treated as a local path.
pub fn load(src: &str) -> Result<Texture, RasterError> {
    let bytes = if src.starts_with("http://") || src.starts_with("https://") {
        fetch_bytes(src)?
    } else {
        std::fs::read(src).map_err(|_| RasterError::ImageLoad(src.to_string()))?
    };
    decode(&bytes).ok_or_else(|| RasterError::ImageLoad(src.to_string()))
}

/// Decode raw image bytes into a texture.
pub fn decode(bytes: &[u8]) -> Option<Texture> {
    let img = image::load_from_memory(bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (w, h, pixels) = if w > MAX_WIDTH {
        let ratio = MAX_WIDTH as f32 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized = image::imageops::resize(
            &rgba,
            MAX_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        );
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Some(Texture {
        width: w,
        height: h,
        rgba: pixels,
    })
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>, RasterError> {
    let resp = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|_| RasterError::ImageLoad(url.to_string()))?
        .get(url)
        .send()
        .map_err(|_| RasterError::ImageLoad(url.to_string()))?;

    if !resp.status().is_success() {
        return Err(RasterError::ImageLoad(url.to_string()));
    }

    resp.bytes()
        .map(|b| b.to_vec())
        .map_err(|_| RasterError::ImageLoad(url.to_string()))
}
