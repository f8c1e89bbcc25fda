//! Font selection from the built-in embedded-graphics mono fonts.
//!
//! Callers list the fonts they would like in order; the first one that can be
//! loaded wins and [`FALLBACK`] is used when none can.

use core::fmt;

use embedded_graphics::mono_font::{ascii, iso_8859_1, MonoFont};

/// Always available.
pub static FALLBACK: &MonoFont<'static> = &iso_8859_1::FONT_6X10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRequest {
    /// Latin-1 glyph set at the given pixel height.
    Latin1 { height: u32 },
    /// 7-bit ASCII only.
    Ascii { height: u32 },
}

impl FontRequest {
    pub fn height(&self) -> u32 {
        match self {
            FontRequest::Latin1 { height } | FontRequest::Ascii { height } => *height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontError {
    /// No built-in font of that height.
    NoSuchSize(u32),
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::NoSuchSize(h) => write!(f, "no {} px font available", h),
        }
    }
}

pub fn load(request: FontRequest) -> Result<&'static MonoFont<'static>, FontError> {
    let font = match request {
        FontRequest::Latin1 { height } => match height {
            6 => &iso_8859_1::FONT_4X6,
            7 => &iso_8859_1::FONT_5X7,
            8 => &iso_8859_1::FONT_5X8,
            9 => &iso_8859_1::FONT_6X9,
            10 => &iso_8859_1::FONT_6X10,
            12 => &iso_8859_1::FONT_6X12,
            13 => &iso_8859_1::FONT_6X13,
            14 => &iso_8859_1::FONT_7X14,
            15 => &iso_8859_1::FONT_9X15,
            18 => &iso_8859_1::FONT_9X18,
            20 => &iso_8859_1::FONT_10X20,
            h => return Err(FontError::NoSuchSize(h)),
        },
        FontRequest::Ascii { height } => match height {
            6 => &ascii::FONT_4X6,
            7 => &ascii::FONT_5X7,
            8 => &ascii::FONT_5X8,
            9 => &ascii::FONT_6X9,
            10 => &ascii::FONT_6X10,
            12 => &ascii::FONT_6X12,
            13 => &ascii::FONT_6X13,
            14 => &ascii::FONT_7X14,
            15 => &ascii::FONT_9X15,
            18 => &ascii::FONT_9X18,
            20 => &ascii::FONT_10X20,
            h => return Err(FontError::NoSuchSize(h)),
        },
    };
    Ok(font)
}

/// First request that loads, else [`FALLBACK`].
pub fn select_font(requests: &[FontRequest]) -> &'static MonoFont<'static> {
    for req in requests {
        match load(*req) {
            Ok(font) => return font,
            Err(e) => log::warn!("font {:?}: {}", req, e),
        }
    }
    FALLBACK
}
