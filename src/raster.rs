//! Raster input handling: loading a file into an RGBA buffer and padding
//! it with a white border before the pipeline sees it.

use crate::error::CoreError;
use rgb::RGBA8;

/// Row-major RGBA8 pixel buffer, as supplied by a caller or decoded from disk.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<RGBA8>,
}

impl PixelBuffer {
    /// Build a buffer from a flat row-major `(R,G,B,A)` byte slice, validating
    /// the contract the core promises callers.
    pub fn from_raw(width: u32, height: u32, bytes: &[u8]) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(CoreError::InvalidBuffer {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Load an image file from disk into an RGBA8 pixel buffer.
pub fn load_image(path: &std::path::Path) -> anyhow::Result<PixelBuffer> {
    let img = image::open(path)?;
    let rgba = img.to_rgba8();
    let pixels: Vec<RGBA8> = rgba
        .pixels()
        .map(|p| RGBA8::new(p[0], p[1], p[2], p[3]))
        .collect();
    Ok(PixelBuffer {
        width: rgba.width(),
        height: rgba.height(),
        pixels,
    })
}

/// White border width added on all sides before binarization.
pub const PAD: u32 = 10;

/// Surround the buffer with `PAD` pixels of opaque white on every side.
/// Needed so outermost strokes are not mistaken for image-boundary
/// artefacts by the background flood-fill, and so the silhouette contour
/// is well-defined (its flood seed at `(0,0)` is guaranteed background).
pub fn pad_with_white(buf: &PixelBuffer) -> PixelBuffer {
    let new_w = buf.width + 2 * PAD;
    let new_h = buf.height + 2 * PAD;
    let white = RGBA8::new(255, 255, 255, 255);
    let mut pixels = vec![white; new_w as usize * new_h as usize];

    for y in 0..buf.height {
        let src_row = y as usize * buf.width as usize;
        let dst_row = (y + PAD) as usize * new_w as usize + PAD as usize;
        pixels[dst_row..dst_row + buf.width as usize]
            .copy_from_slice(&buf.pixels[src_row..src_row + buf.width as usize]);
    }

    PixelBuffer {
        width: new_w,
        height: new_h,
        pixels,
    }
}
