//! RGBA to binary mask conversion: alpha-aware luminance thresholding
//! for dark-on-light line art.

use crate::raster::PixelBuffer;

/// Default luminance threshold below which a pixel counts as foreground.
pub const DEFAULT_THRESHOLD: f64 = 180.0;

/// Alpha below this value is treated as fully transparent background,
/// regardless of colour.
const ALPHA_CUTOFF: u8 = 50;

/// Row-major mask of `width*height` cells in `{0, 1}`. `1` is foreground.
#[derive(Debug, Clone)]
pub struct BinaryMask {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<u8>,
}

impl BinaryMask {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            0
        } else {
            self.cells[y as usize * self.width as usize + x as usize]
        }
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: u8) {
        self.cells[y as usize * self.width as usize + x as usize] = v;
    }

    pub fn invert(&self) -> BinaryMask {
        BinaryMask {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| 1 - c).collect(),
        }
    }
}

/// Binarize an RGBA buffer: alpha below [`ALPHA_CUTOFF`] is background;
/// otherwise luminance `Y = 0.299R + 0.587G + 0.114B` below `threshold`
/// is foreground. Dark-on-light line art is assumed throughout.
///
/// Idempotent: feeding in an already-binary mask rendered back out as
/// RGBA (black foreground, white background) reproduces itself, since
/// pure black falls under any positive threshold and pure white never
/// does.
pub fn binarize(buf: &PixelBuffer, threshold: f64) -> BinaryMask {
    let mut mask = BinaryMask::blank(buf.width, buf.height);
    for (i, p) in buf.pixels.iter().enumerate() {
        if p.a < ALPHA_CUTOFF {
            continue;
        }
        let y = 0.299 * p.r as f64 + 0.587 * p.g as f64 + 0.114 * p.b as f64;
        if y < threshold {
            mask.cells[i] = 1;
        }
    }
    mask
}
