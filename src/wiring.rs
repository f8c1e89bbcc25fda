//! Board pin map for the ESP32-S3 viewer.
//!
//! The following wiring is assumed:
//! - LCD SCK  => GPIO10
//! - LCD MOSI => GPIO11
//! - LCD CS   => GPIO9
//! - LCD DC   => GPIO8
//! - LCD RST  => GPIO14
//! - LCD BL   => GPIO2
//! - CAPTURE button => GPIO15
//! - UP button      => GPIO21
//! - DOWN button    => GPIO16
//!
//! Buttons short to GND when pressed; the internal pull-ups are enabled.

use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::peripherals::{Peripherals, GPIO10, GPIO11, SPI2};

/// Everything `display::setup_display` consumes.
pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,
    pub lcd_dc: Output<'a>,
    pub lcd_rst: Output<'a>,
    pub lcd_bl: Output<'a>,
}

pub struct BoardPins<'a> {
    pub btn_capture: Input<'a>,
    pub btn_up: Input<'a>,
    pub btn_down: Input<'a>,
    pub display_pins: DisplayPins<'a>,
}

pub fn init_board_pins<'a>(p: Peripherals) -> BoardPins<'a> {
    let pull_up = InputConfig::default().with_pull(Pull::Up);
    let btn_capture = Input::new(p.GPIO15, pull_up);
    let btn_up = Input::new(p.GPIO21, pull_up);
    let btn_down = Input::new(p.GPIO16, pull_up);

    // LCD control pins; GPIO10/11 stay with SPI2
    let lcd_cs = Output::new(p.GPIO9, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(p.GPIO8, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(p.GPIO14, Level::High, OutputConfig::default());
    let lcd_bl = Output::new(p.GPIO2, Level::Low, OutputConfig::default());

    BoardPins {
        btn_capture,
        btn_up,
        btn_down,
        display_pins: DisplayPins {
            spi2: p.SPI2,
            spi_sck: p.GPIO10,
            spi_mosi: p.GPIO11,
            lcd_cs,
            lcd_dc,
            lcd_rst,
            lcd_bl,
        },
    }
}
