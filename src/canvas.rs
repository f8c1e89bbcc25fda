//! In-memory RGB raster the text is drawn onto before conversion.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};

use crate::scroll;

/// Row-major RGB888 raster, three bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    pixels: Vec<[u8; 3]>,
}

impl Canvas {
    pub fn new(width: u16, height: u16, background: Rgb888) -> Self {
        let px = [background.r(), background.g(), background.b()];
        Self {
            width,
            height,
            pixels: vec![px; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb888> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.pixels[self.index(x, y)];
        Some(Rgb888::new(r, g, b))
    }

    pub fn set_pixel(&mut self, x: u16, y: u16, color: Rgb888) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.index(x, y);
        self.pixels[i] = [color.r(), color.g(), color.b()];
    }

    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill([color.r(), color.g(), color.b()]);
    }

    /// Raw samples, `R G B` per pixel, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb888>>,
    {
        for Pixel(p, c) in pixels {
            if p.x < 0 || p.y < 0 || p.x > u16::MAX as i32 || p.y > u16::MAX as i32 {
                continue;
            }
            self.set_pixel(p.x as u16, p.y as u16, c);
        }
        Ok(())
    }

    fn clear(&mut self, color: Rgb888) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

/// Where text goes on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextArea {
    pub left_padding: u16,
    pub top_padding: u16,
    pub bottom_padding: u16,
    pub line_height: u16,
}

impl TextArea {
    pub const fn viewport_lines(&self, canvas_height: u16) -> usize {
        scroll::viewport_lines(canvas_height, self.top_padding, self.bottom_padding, self.line_height)
    }
}

/// Draw `lines` top-down; stops before a line would reach the bottom padding.
/// Returns how many lines were drawn.
pub fn draw_lines<S: AsRef<str>>(
    canvas: &mut Canvas,
    lines: &[S],
    area: &TextArea,
    style: MonoTextStyle<'_, Rgb888>,
) -> usize {
    let limit = canvas.height().saturating_sub(area.bottom_padding) as u32;
    let mut y = area.top_padding as u32;
    let mut drawn = 0;

    for line in lines {
        if y + area.line_height as u32 > limit {
            break;
        }
        Text::with_baseline(
            line.as_ref(),
            Point::new(area.left_padding as i32, y as i32),
            style,
            Baseline::Top,
        )
        .draw(canvas)
        .ok();
        y += area.line_height as u32;
        drawn += 1;
    }
    drawn
}
