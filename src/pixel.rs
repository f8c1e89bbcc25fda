//! RGB888 to the panels' native big-endian RGB565.

use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::Rgb888, prelude::RgbColor};

use crate::canvas::Canvas;

pub const BYTES_PER_PIXEL: usize = 2;

/// `[(R & 0xF8) | (G >> 5), ((G << 3) & 0xE0) | (B >> 3)]`
#[inline(always)]
pub const fn pack_565(r: u8, g: u8, b: u8) -> [u8; 2] {
    [(r & 0xF8) | (g >> 5), ((g << 3) & 0xE0) | (b >> 3)]
}

#[inline]
pub fn color_to_565(color: Rgb888) -> [u8; 2] {
    pack_565(color.r(), color.g(), color.b())
}

/// Row-major, two bytes per pixel.
pub fn to_native_565(canvas: &Canvas) -> Vec<u8> {
    let rgb = canvas.as_bytes();
    let mut out = Vec::with_capacity(rgb.len() / 3 * BYTES_PER_PIXEL);
    for px in rgb.chunks_exact(3) {
        out.extend_from_slice(&pack_565(px[0], px[1], px[2]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_colours() {
        assert_eq!(pack_565(255, 255, 255), [0xFF, 0xFF]);
        assert_eq!(pack_565(0, 0, 0), [0x00, 0x00]);
        assert_eq!(color_to_565(Rgb888::RED), [0xF8, 0x00]);
        assert_eq!(color_to_565(Rgb888::GREEN), [0x07, 0xE0]);
        assert_eq!(color_to_565(Rgb888::BLUE), [0x00, 0x1F]);
    }

    #[test]
    fn packing_matches_formula() {
        for (r, g, b) in [(0x12u8, 0x34u8, 0x56u8), (0xAB, 0xCD, 0xEF), (7, 3, 250)] {
            let [hi, lo] = pack_565(r, g, b);
            assert_eq!(hi, (r & 0xF8) | (g >> 5));
            assert_eq!(lo, (g.wrapping_shl(3) & 0xE0) | (b >> 3));
        }
    }

    #[test]
    fn output_is_two_bytes_per_pixel_row_major() {
        let mut c = Canvas::new(3, 2, Rgb888::BLACK);
        c.set_pixel(1, 0, Rgb888::WHITE);
        c.set_pixel(0, 1, Rgb888::RED);
        let out = to_native_565(&c);
        assert_eq!(out.len(), 3 * 2 * 2);
        assert_eq!(&out[2..4], &[0xFF, 0xFF]);
        assert_eq!(&out[6..8], &[0xF8, 0x00]);
        assert!(out[..2].iter().chain(&out[4..6]).all(|b| *b == 0));
    }
}
