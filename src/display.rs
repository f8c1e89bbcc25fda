//! Panel bring-up on the ESP32-S3.
//
// - The fitted panel is picked with the `panel-0in85` / `panel-1in5` features.
// - SPI2 at 40 MHz, mode 0; CS is owned by the `ExclusiveDevice`.

use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    gpio::Output,
    spi::master::{Config, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};

use crate::panel::{DisplayController, Lcd, CLEAR_COLOR};
use crate::transport::SpiTransport;
use crate::wiring::DisplayPins;

cfg_if::cfg_if! {
    if #[cfg(feature = "panel-0in85")] {
        pub type BoardPanel = crate::panel::Lcd0in85;
    } else {
        pub type BoardPanel = crate::panel::Lcd1in5;
    }
}

pub type PanelSpi<'a> = ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>;

pub type DisplayType<'a> = Lcd<BoardPanel, SpiTransport<PanelSpi<'a>, Output<'a>>, Output<'a>>;

const SPI_HZ: u32 = 40_000_000;

/// Returns the initialised, blanked panel and the lit backlight pin, which
/// must be kept alive.
pub fn setup_display<'a>(
    display_pins: DisplayPins<'a>,
    delay: &mut impl DelayNs,
) -> (DisplayType<'a>, Output<'a>) {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        lcd_rst,
        mut lcd_bl,
    } = display_pins;

    let spi = Spi::new(
        spi2,
        Config::default()
            .with_frequency(Rate::from_hz(SPI_HZ))
            .with_mode(Mode::_0),
    )
    .unwrap()
    .with_sck(spi_sck)
    .with_mosi(spi_mosi);

    let spi_dev = ExclusiveDevice::new(spi, lcd_cs, NoDelay).unwrap();
    let mut lcd = Lcd::new(SpiTransport::new(spi_dev, lcd_dc), lcd_rst);
    lcd.initialize(delay).expect("panel init failed");
    lcd.clear(CLEAR_COLOR).expect("panel clear failed");

    // backlight only once the panel shows defined content
    lcd_bl.set_high();
    (lcd, lcd_bl)
}
