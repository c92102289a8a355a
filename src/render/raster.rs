// Copyright 2026 the Foilmatch Authors
// SPDX-License-Identifier: Apache-2.0

//! Decoded bitmap pixels.
//!
//! The analysis model stores the photo as its raw encoded bytes; this
//! module decodes them to RGBA8 and applies the two model-driven pixel
//! operations, mirroring and hue tinting. Decoding runs only when the
//! `bmp`, `mirror` or `hue` attribute changes, never per frame.

use crate::model::analysis::DEFAULT_HUE;

#[derive(Debug, thiserror::Error)]
#[error("could not decode image: {0}")]
pub struct RasterError(#[from] image::ImageError);

/// An RGBA8 pixel buffer in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Decode encoded image bytes (PNG, JPEG or GIF).
    pub fn decode(bytes: &[u8]) -> Result<Self, RasterError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(Self {
            width,
            height,
            pixels: decoded.into_raw(),
        })
    }

    /// Build a raster from raw RGBA8 pixels. `pixels` must hold exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Horizontally flipped copy.
    pub fn mirrored(&self) -> Raster {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        let row_len = (self.width * 4) as usize;
        for row in self.pixels.chunks_exact(row_len) {
            for px in row.chunks_exact(4).rev() {
                pixels.extend_from_slice(px);
            }
        }
        Raster {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Copy with the hue tint applied.
    ///
    /// `hue` above the neutral 0.5 blends toward white with alpha
    /// `500·hue − 255`; below it blends toward black with alpha
    /// `255 − 500·hue`. At exactly 0.5 the raster is returned unchanged.
    /// Pixel alpha is preserved.
    pub fn tinted(&self, hue: f64) -> Raster {
        if hue == DEFAULT_HUE {
            return self.clone();
        }
        let (target, alpha) = if hue > DEFAULT_HUE {
            (255.0, (500.0 * hue - 255.0).clamp(0.0, 255.0))
        } else {
            (0.0, (255.0 - 500.0 * hue).clamp(0.0, 255.0))
        };
        let f = alpha / 255.0;
        let mut pixels = self.pixels.clone();
        for px in pixels.chunks_exact_mut(4) {
            for channel in &mut px[..3] {
                let c = f64::from(*channel);
                *channel = (c + (target - c) * f).round() as u8;
            }
        }
        Raster {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_one(left: [u8; 4], right: [u8; 4]) -> Raster {
        let mut pixels = Vec::new();
        pixels.extend_from_slice(&left);
        pixels.extend_from_slice(&right);
        Raster::from_rgba8(2, 1, pixels)
    }

    #[test]
    fn mirrored_reverses_each_row() {
        let r = two_by_one([1, 2, 3, 255], [4, 5, 6, 255]);
        let m = r.mirrored();
        assert_eq!(m.pixel(0, 0), [4, 5, 6, 255]);
        assert_eq!(m.pixel(1, 0), [1, 2, 3, 255]);
        // Mirroring twice restores the original.
        assert_eq!(m.mirrored(), r);
    }

    #[test]
    fn neutral_hue_leaves_pixels_untouched() {
        let r = two_by_one([10, 20, 30, 255], [200, 100, 0, 128]);
        assert_eq!(r.tinted(0.5), r);
    }

    #[test]
    fn full_hue_blends_to_white() {
        let r = two_by_one([0, 0, 0, 255], [10, 20, 30, 128]);
        let t = r.tinted(1.0);
        // alpha = 500·1 − 255 = 245 → f ≈ 0.961
        assert_eq!(t.pixel(0, 0), [245, 245, 245, 255]);
        // Pixel alpha is preserved.
        assert_eq!(t.pixel(1, 0)[3], 128);
    }

    #[test]
    fn zero_hue_blends_to_black() {
        let r = two_by_one([255, 255, 255, 255], [100, 100, 100, 255]);
        let t = r.tinted(0.0);
        // alpha = 255 − 0 = 255 → fully black.
        assert_eq!(t.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(t.pixel(1, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn slightly_above_neutral_is_a_faint_tint() {
        let r = two_by_one([0, 0, 0, 255], [0, 0, 0, 255]);
        // alpha = 500·0.51 − 255 = 0: no visible change yet.
        let t = r.tinted(0.51);
        assert_eq!(t.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn decode_round_trips_a_png() {
        use image::{ImageBuffer, Rgba};
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(3, 2, |x, y| Rgba([x as u8 * 10, y as u8 * 10, 7, 255]));
        let mut encoded = std::io::Cursor::new(Vec::new());
        img.write_to(&mut encoded, image::ImageFormat::Png).unwrap();

        let raster = Raster::decode(encoded.get_ref()).unwrap();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.pixel(2, 1), [20, 10, 7, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(Raster::decode(b"not an image").is_err());
    }
}
