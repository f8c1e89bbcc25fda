//! Command/data transport over SPI with a D/C select line.
//!
//! D/C low selects a command byte, high selects parameter or pixel data.
//! Data bursts are split into writes of at most [`MAX_CHUNK`] bytes; the bus
//! driver refuses anything larger.

use core::fmt;

use embedded_hal::{digital::OutputPin, spi::SpiDevice};

/// Largest single SPI write.
pub const MAX_CHUNK: usize = 4096;

/// Byte-level command/data channel to a panel.
pub trait DisplayTransport {
    type Error: fmt::Debug;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Opcode followed by its parameters, if any.
    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.send_command(cmd)?;
        if !params.is_empty() {
            self.send_data(params)?;
        }
        Ok(())
    }
}

/// Error type that wraps SPI and D/C pin errors.
#[derive(Debug)]
pub enum TransportError<SpiE, DcE> {
    Spi(SpiE),
    Dc(DcE),
}

impl<SpiE: fmt::Debug, DcE: fmt::Debug> fmt::Display for TransportError<SpiE, DcE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Spi(e) => write!(f, "spi write failed: {:?}", e),
            TransportError::Dc(e) => write!(f, "d/c pin failed: {:?}", e),
        }
    }
}

/// Four-wire SPI: CS is handled by the `SpiDevice`, D/C by `dc`.
pub struct SpiTransport<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiTransport<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Give back the bus and pin.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> DisplayTransport for SpiTransport<SPI, DC>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
{
    type Error = TransportError<SPI::Error, DC::Error>;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(TransportError::Dc)?;
        self.spi.write(&[cmd]).map_err(TransportError::Spi)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(TransportError::Dc)?;
        for chunk in data.chunks(MAX_CHUNK) {
            self.spi.write(chunk).map_err(TransportError::Spi)?;
        }
        Ok(())
    }
}
