//! 0.85" 128x128 panel. The glass sits at column 2, row 1 of controller RAM.

use super::{InitStep, Lcd, PanelGeometry, PanelVariant};

pub struct Lcd0in85;

/// Driver for the 0.85" panel.
pub type Lcd0in85Display<T, RST> = Lcd<Lcd0in85, T, RST>;

const INIT: &[InitStep] = &[
    InitStep::new(0x36, &[0xC8]),
    InitStep::new(0xB0, &[0xC0]),
    InitStep::new(0xB2, &[0x2F]),
    InitStep::new(0xB3, &[0x03]),
    InitStep::new(0xB6, &[0x19]),
    InitStep::new(0xB7, &[0x01]),
    InitStep::new(0xAC, &[0xCB]),
    InitStep::new(0xAB, &[0x0E]),
    InitStep::new(0xB4, &[0x04]),
    InitStep::new(0xA8, &[0x19]),
    InitStep::new(0x3A, &[0x05]),
    InitStep::new(0xB8, &[0x08]),
    InitStep::new(0xE8, &[0x24]),
    InitStep::new(0xE9, &[0x48]),
    InitStep::new(0xEA, &[0x22]),
    InitStep::new(0xC6, &[0x30]),
    InitStep::new(0xC7, &[0x18]),
    // gamma
    InitStep::new(
        0xF0,
        &[0x1F, 0x28, 0x04, 0x3E, 0x2A, 0x2E, 0x20, 0x00, 0x0C, 0x06, 0x00, 0x1C, 0x1F, 0x0F],
    ),
    InitStep::new(
        0xF1,
        &[0x00, 0x2D, 0x2F, 0x3C, 0x6F, 0x1C, 0x0B, 0x00, 0x00, 0x00, 0x07, 0x0D, 0x11, 0x0F],
    ),
    InitStep::new(0x21, &[]),
    InitStep::new(0x11, &[]),
    InitStep::new(0x29, &[]),
];

impl PanelVariant for Lcd0in85 {
    const NAME: &'static str = "LCD 0.85in";
    const GEOMETRY: PanelGeometry = PanelGeometry {
        width: 128,
        height: 128,
        x_offset: 2,
        y_offset: 1,
    };
    const INIT_SEQUENCE: &'static [InitStep] = INIT;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::cmd;

    #[test]
    fn geometry() {
        assert_eq!(Lcd0in85::GEOMETRY.dimensions(), (128, 128));
        assert_eq!(Lcd0in85::GEOMETRY.frame_bytes(), 32_768);
    }

    #[test]
    fn table_selects_rgb565_and_ends_with_display_on() {
        assert!(INIT.contains(&InitStep::new(cmd::PIXEL_FORMAT_SET, &[0x05])));
        let tail: Vec<u8> = INIT[INIT.len() - 3..].iter().map(|s| s.cmd).collect();
        assert_eq!(tail, [cmd::INVERSION_ON, cmd::SLEEP_OUT, cmd::DISPLAY_ON]);
        assert_eq!(INIT.len(), 22);
    }
}
