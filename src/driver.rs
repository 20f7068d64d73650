//! Bus transport for the TEA5767.
//! Provides blocking I2C helpers; the async versions mirror this API behind the `async` feature.

use crate::error::Error;
use crate::registers::{DEFAULT_I2C_ADDRESS, IMAGE_LEN};

/// TEA5767 on an I2C bus.
pub struct Tea5767<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Tea5767<I2C> {
    /// Create a new driver instance with the fixed TEA5767 address (0x60).
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_I2C_ADDRESS,
        }
    }

    /// Create a new driver instance with a custom I2C address (address translators, muxes).
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back.
    pub fn free(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Tea5767<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Write the whole 5-byte control image. The chip does not accept partial writes.
    pub fn write_control(&mut self, control: &[u8; IMAGE_LEN]) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, control).map_err(Error::I2c)
    }

    /// Read the 5-byte status image.
    ///
    /// The read is preceded by a one-byte write of `pll_msb` (control byte 0). The chip has no
    /// register pointer, so the leading byte lands in PLL[13:8] and must match what is already
    /// programmed.
    pub fn read_status(&mut self, pll_msb: u8) -> Result<[u8; IMAGE_LEN], Error<I2C::Error>> {
        let mut buf = [0u8; IMAGE_LEN];
        self.i2c
            .write_read(self.address, &[pll_msb], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf)
    }
}

#[cfg(feature = "async")]
impl<I2C> Tea5767<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Async version of [`Tea5767::write_control`].
    pub async fn write_control_async(&mut self, control: &[u8; IMAGE_LEN]) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, control).await.map_err(Error::I2c)
    }

    /// Async version of [`Tea5767::read_status`].
    pub async fn read_status_async(&mut self, pll_msb: u8) -> Result<[u8; IMAGE_LEN], Error<I2C::Error>> {
        let mut buf = [0u8; IMAGE_LEN];
        self.i2c
            .write_read(self.address, &[pll_msb], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(buf)
    }
}
