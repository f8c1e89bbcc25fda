//! 1.5" 240x280 panel, rows start 20 lines into controller RAM.

use super::{InitStep, Lcd, PanelGeometry, PanelVariant};

pub struct Lcd1in5;

/// Driver for the 1.5" panel.
pub type Lcd1in5Display<T, RST> = Lcd<Lcd1in5, T, RST>;

const INIT: &[InitStep] = &[
    InitStep::new(0x36, &[0x00]),
    // unlock vendor registers
    InitStep::new(0xFD, &[0x06, 0x08]),
    InitStep::new(0x61, &[0x07, 0x04]),
    InitStep::new(0x62, &[0x00, 0x44, 0x45]),
    InitStep::new(0x63, &[0x41, 0x07, 0x12, 0x12]),
    InitStep::new(0x64, &[0x37]),
    InitStep::new(0x65, &[0x09, 0x10, 0x21]),
    InitStep::new(0x66, &[0x09, 0x10, 0x21]),
    InitStep::new(0x67, &[0x21, 0x40]),
    InitStep::new(0x68, &[0x90, 0x4C, 0x50, 0x70]),
    InitStep::new(0xB1, &[0x0F, 0x02, 0x01]),
    InitStep::new(0xB4, &[0x01]),
    InitStep::new(0xB5, &[0x02, 0x02, 0x0A, 0x14]),
    InitStep::new(0xB6, &[0x04, 0x01, 0x9F, 0x00, 0x02]),
    InitStep::new(0xDF, &[0x11]),
    InitStep::new(0xE2, &[0x03, 0x00, 0x00, 0x30, 0x33, 0x3F]),
    InitStep::new(0xE5, &[0x3F, 0x33, 0x30, 0x00, 0x00, 0x03]),
    InitStep::new(0xE1, &[0x05, 0x67]),
    InitStep::new(0xE4, &[0x67, 0x06]),
    InitStep::new(0xE0, &[0x05, 0x06, 0x0A, 0x0C, 0x0B, 0x0B, 0x13, 0x19]),
    InitStep::new(0xE3, &[0x18, 0x13, 0x0D, 0x09, 0x0B, 0x0B, 0x05, 0x06]),
    InitStep::new(0xE6, &[0x00, 0xFF]),
    InitStep::new(0xE7, &[0x01, 0x04, 0x03, 0x03, 0x00, 0x12]),
    InitStep::new(0xE8, &[0x00, 0x70, 0x00]),
    InitStep::new(0xEC, &[0x52]),
    InitStep::new(0xF1, &[0x01, 0x01, 0x02]),
    InitStep::new(0xF6, &[0x01, 0x30, 0x00, 0x00]),
    // lock
    InitStep::new(0xFD, &[0xFA, 0xFC]),
    InitStep::new(0x3A, &[0x55]),
    InitStep::new(0x35, &[0x00]),
    InitStep::new(0x21, &[]),
    InitStep::new(0x11, &[]),
    InitStep::new(0x29, &[]),
];

impl PanelVariant for Lcd1in5 {
    const NAME: &'static str = "LCD 1.5in";
    const GEOMETRY: PanelGeometry = PanelGeometry {
        width: 240,
        height: 280,
        x_offset: 0,
        y_offset: 20,
    };
    const INIT_SEQUENCE: &'static [InitStep] = INIT;
}
