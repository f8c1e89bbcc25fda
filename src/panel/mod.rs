//! Panel controllers: reset, vendor init, window addressing and frame writes.
//!
//! Every supported panel speaks the same MIPI-DCS style command set over the
//! D/C transport. What differs is captured by [`PanelVariant`]: geometry, the
//! RAM window offset of the glass inside the controller's address space and
//! the vendor init table. [`Lcd`] implements [`DisplayController`] for any
//! variant, so adding a panel means adding a variant module.

pub mod lcd_0in85;
pub mod lcd_1in5;

use core::fmt;
use core::marker::PhantomData;

use embedded_graphics::{pixelcolor::Rgb888, prelude::RgbColor};
use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::canvas::Canvas;
use crate::pixel::{self, BYTES_PER_PIXEL};
use crate::transport::{DisplayTransport, MAX_CHUNK};

pub use lcd_0in85::Lcd0in85;
pub use lcd_1in5::Lcd1in5;

/// Opcodes shared by both controllers.
pub mod cmd {
    pub const SLEEP_OUT: u8 = 0x11;
    pub const INVERSION_ON: u8 = 0x21;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const ROW_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const TEARING_EFFECT_ON: u8 = 0x35;
    pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;
    pub const PIXEL_FORMAT_SET: u8 = 0x3A;
}

/// Blank level for bring-up, `clear_before_render` and shutdown.
pub const CLEAR_COLOR: Rgb888 = Rgb888::WHITE;

/// Reset line settle time between level changes.
pub const RESET_SETTLE_MS: u32 = 10;

/// Fixed per-panel constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelGeometry {
    pub width: u16,
    pub height: u16,
    /// Added to column addresses.
    pub x_offset: u16,
    /// Added to row addresses.
    pub y_offset: u16,
}

impl PanelGeometry {
    pub const fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Size of one full RGB565 frame.
    pub const fn frame_bytes(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

/// One entry of a vendor init table: opcode plus its parameter bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitStep {
    pub cmd: u8,
    pub data: &'static [u8],
}

impl InitStep {
    pub const fn new(cmd: u8, data: &'static [u8]) -> Self {
        Self { cmd, data }
    }
}

/// Static description of one panel model.
pub trait PanelVariant {
    const NAME: &'static str;
    const GEOMETRY: PanelGeometry;
    const INIT_SEQUENCE: &'static [InitStep];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Uninitialized,
    Resetting,
    Initializing,
    Ready,
}

#[derive(Debug)]
pub enum PanelError<TE, RstE> {
    Transport(TE),
    Reset(RstE),
    /// Frame size differs from the panel geometry.
    DimensionMismatch {
        expected: (u16, u16),
        actual: (u16, u16),
    },
    /// Window outside the panel or empty.
    OutOfBounds,
    /// `initialize` has not completed.
    NotReady,
}

impl<TE: fmt::Debug, RstE: fmt::Debug> fmt::Display for PanelError<TE, RstE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::Transport(e) => write!(f, "transport: {:?}", e),
            PanelError::Reset(e) => write!(f, "reset pin: {:?}", e),
            PanelError::DimensionMismatch { expected, actual } => write!(
                f,
                "frame is {}x{}, panel is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            PanelError::OutOfBounds => f.write_str("window out of bounds"),
            PanelError::NotReady => f.write_str("panel not initialized"),
        }
    }
}

/// What the render pipeline needs from a panel.
pub trait DisplayController {
    type Error: fmt::Debug;

    fn geometry(&self) -> PanelGeometry;

    fn state(&self) -> PanelState;

    /// Hardware reset followed by the vendor init table.
    fn initialize(&mut self, delay: &mut impl DelayNs) -> Result<(), Self::Error>;

    /// Address the window `x0..x1`, `y0..y1` (end exclusive) and start a
    /// memory write into it.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error>;

    /// Convert and send a frame that exactly matches the panel size.
    fn show_frame(&mut self, frame: &Canvas) -> Result<(), Self::Error>;

    /// Fill the whole panel with one colour.
    fn clear(&mut self, color: Rgb888) -> Result<(), Self::Error>;
}

/// Panel driver for one [`PanelVariant`].
pub struct Lcd<V, T, RST> {
    transport: T,
    rst: RST,
    state: PanelState,
    _variant: PhantomData<V>,
}

impl<V, T, RST> Lcd<V, T, RST>
where
    V: PanelVariant,
    T: DisplayTransport,
    RST: OutputPin,
{
    /// Takes ownership of the bus; nothing is sent until [`DisplayController::initialize`].
    pub fn new(transport: T, rst: RST) -> Self {
        Self {
            transport,
            rst,
            state: PanelState::Uninitialized,
            _variant: PhantomData,
        }
    }

    /// High, low, high with a 10 ms settle after each edge.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), PanelError<T::Error, RST::Error>> {
        self.rst.set_high().map_err(PanelError::Reset)?;
        delay.delay_ms(RESET_SETTLE_MS);
        self.rst.set_low().map_err(PanelError::Reset)?;
        delay.delay_ms(RESET_SETTLE_MS);
        self.rst.set_high().map_err(PanelError::Reset)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    pub fn release(self) -> (T, RST) {
        (self.transport, self.rst)
    }

    fn write_init_sequence(&mut self) -> Result<(), PanelError<T::Error, RST::Error>> {
        for step in V::INIT_SEQUENCE {
            self.transport
                .command(step.cmd, step.data)
                .map_err(PanelError::Transport)?;
        }
        Ok(())
    }

    fn ensure_ready(&self) -> Result<(), PanelError<T::Error, RST::Error>> {
        if self.state == PanelState::Ready {
            Ok(())
        } else {
            Err(PanelError::NotReady)
        }
    }
}

impl<V, T, RST> DisplayController for Lcd<V, T, RST>
where
    V: PanelVariant,
    T: DisplayTransport,
    RST: OutputPin,
{
    type Error = PanelError<T::Error, RST::Error>;

    fn geometry(&self) -> PanelGeometry {
        V::GEOMETRY
    }

    fn state(&self) -> PanelState {
        self.state
    }

    fn initialize(&mut self, delay: &mut impl DelayNs) -> Result<(), Self::Error> {
        self.state = PanelState::Resetting;
        if let Err(e) = self.reset(delay) {
            self.state = PanelState::Uninitialized;
            return Err(e);
        }

        self.state = PanelState::Initializing;
        if let Err(e) = self.write_init_sequence() {
            self.state = PanelState::Uninitialized;
            return Err(e);
        }

        self.state = PanelState::Ready;
        log::info!("{} ready ({}x{})", V::NAME, V::GEOMETRY.width, V::GEOMETRY.height);
        Ok(())
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        self.ensure_ready()?;

        let g = V::GEOMETRY;
        if x0 >= x1 || y0 >= y1 || x1 > g.width || y1 > g.height {
            return Err(PanelError::OutOfBounds);
        }

        // Apply panel offsets; the controller takes inclusive end addresses
        let xs = x0 + g.x_offset;
        let xe = x1 + g.x_offset - 1;
        let ys = y0 + g.y_offset;
        let ye = y1 + g.y_offset - 1;

        let ca = [(xs >> 8) as u8, (xs & 0xFF) as u8, (xe >> 8) as u8, (xe & 0xFF) as u8];
        let ra = [(ys >> 8) as u8, (ys & 0xFF) as u8, (ye >> 8) as u8, (ye & 0xFF) as u8];

        self.transport
            .command(cmd::COLUMN_ADDRESS_SET, &ca)
            .map_err(PanelError::Transport)?;
        self.transport
            .command(cmd::ROW_ADDRESS_SET, &ra)
            .map_err(PanelError::Transport)?;
        self.transport
            .send_command(cmd::MEMORY_WRITE)
            .map_err(PanelError::Transport)
    }

    fn show_frame(&mut self, frame: &Canvas) -> Result<(), Self::Error> {
        self.ensure_ready()?;

        let g = V::GEOMETRY;
        if frame.dimensions() != g.dimensions() {
            return Err(PanelError::DimensionMismatch {
                expected: g.dimensions(),
                actual: frame.dimensions(),
            });
        }

        let native = pixel::to_native_565(frame);
        self.set_window(0, 0, g.width, g.height)?;
        log::debug!("{}: frame {} bytes", V::NAME, native.len());
        self.transport.send_data(&native).map_err(PanelError::Transport)
    }

    fn clear(&mut self, color: Rgb888) -> Result<(), Self::Error> {
        self.ensure_ready()?;

        let g = V::GEOMETRY;
        let [hi, lo] = pixel::color_to_565(color);

        // One chunk of the fill pattern, streamed until the frame is covered
        let mut chunk = [0u8; MAX_CHUNK];
        for px in chunk.chunks_exact_mut(2) {
            px[0] = hi;
            px[1] = lo;
        }

        self.set_window(0, 0, g.width, g.height)?;
        let mut remaining = g.frame_bytes();
        while remaining > 0 {
            let take = remaining.min(MAX_CHUNK);
            self.transport
                .send_data(&chunk[..take])
                .map_err(PanelError::Transport)?;
            remaining -= take;
        }
        Ok(())
    }
}
