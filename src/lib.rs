//! Text viewer for small SPI colour LCDs.
//!
//! Lays text out into wrapped lines, scrolls a viewport over them, draws the
//! visible lines onto an RGB canvas, rotates it for the panel mounting and
//! streams it to the panel as RGB565 over a D/C-selected SPI bus.
//!
//! Board modules (`wiring`, `display`) are only built for the ESP32-S3 firmware.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod canvas;
pub mod font;
pub mod input;
pub mod layout;
pub mod panel;
pub mod pixel;
pub mod render;
pub mod rotate;
pub mod scroll;
pub mod session;
pub mod transport;

#[cfg(feature = "esp32s3")]
pub mod display;
#[cfg(feature = "esp32s3")]
pub mod wiring;

#[cfg(test)]
pub(crate) mod mock;
