//! Quarter-turn rotation and nearest-neighbour resize of a canvas.

use core::fmt;

use crate::canvas::Canvas;

/// Clockwise rotation applied to the composed canvas before it is sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Angle that is not a multiple of 90 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedRotation(pub i32);

impl fmt::Display for UnsupportedRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported rotation: {} degrees", self.0)
    }
}

impl Rotation {
    /// Any multiple of 90, negative angles turn counter-clockwise.
    pub fn from_degrees(degrees: i32) -> Result<Self, UnsupportedRotation> {
        if degrees % 90 != 0 {
            return Err(UnsupportedRotation(degrees));
        }
        Ok(match degrees.rem_euclid(360) {
            0 => Rotation::Deg0,
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            _ => Rotation::Deg270,
        })
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// 90 and 270 exchange width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Size of the rotated result for a `(width, height)` source.
    pub fn rotated_size(self, (width, height): (u16, u16)) -> (u16, u16) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = UnsupportedRotation;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

/// Rotate clockwise by a quarter-turn multiple.
pub fn rotate(canvas: &Canvas, rotation: Rotation) -> Canvas {
    let (w, h) = canvas.dimensions();
    if rotation == Rotation::Deg0 {
        return canvas.clone();
    }

    let (ow, oh) = rotation.rotated_size((w, h));
    let mut out = Canvas::new(ow, oh, embedded_graphics::pixelcolor::Rgb888::new(0, 0, 0));

    for y in 0..oh {
        for x in 0..ow {
            let (sx, sy) = match rotation {
                Rotation::Deg0 => (x, y),
                Rotation::Deg90 => (y, h - 1 - x),
                Rotation::Deg180 => (w - 1 - x, h - 1 - y),
                Rotation::Deg270 => (w - 1 - y, x),
            };
            if let Some(c) = canvas.pixel(sx, sy) {
                out.set_pixel(x, y, c);
            }
        }
    }
    out
}

/// Same as [`rotate`], taking the angle in degrees.
pub fn rotate_degrees(canvas: &Canvas, degrees: i32) -> Result<Canvas, UnsupportedRotation> {
    Ok(rotate(canvas, Rotation::from_degrees(degrees)?))
}

/// Nearest-neighbour resample: destination `(x, y)` takes source
/// `(x * src_w / dst_w, y * src_h / dst_h)`, rounded down.
pub fn resize_nearest(canvas: &Canvas, width: u16, height: u16) -> Canvas {
    let (sw, sh) = canvas.dimensions();
    if (sw, sh) == (width, height) {
        return canvas.clone();
    }

    let mut out = Canvas::new(width, height, embedded_graphics::pixelcolor::Rgb888::new(0, 0, 0));
    if sw == 0 || sh == 0 {
        return out;
    }
    for y in 0..height {
        let sy = (y as u32 * sh as u32 / height as u32) as u16;
        for x in 0..width {
            let sx = (x as u32 * sw as u32 / width as u32) as u16;
            if let Some(c) = canvas.pixel(sx, sy) {
                out.set_pixel(x, y, c);
            }
        }
    }
    out
}

/// Rotate, then resize if the result does not match the panel.
pub fn to_display_frame(canvas: &Canvas, rotation: Rotation, target: (u16, u16)) -> Canvas {
    let rotated = rotate(canvas, rotation);
    if rotated.dimensions() == target {
        rotated
    } else {
        resize_nearest(&rotated, target.0, target.1)
    }
}
