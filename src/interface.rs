//! Bus interface implementations for the ADXL345
//!
//! The driver talks to the device through the byte-level [`RegisterBus`]
//! trait. [`I2cInterface`] and [`SpiInterface`] implement it on top of the
//! `embedded-hal` 1.0 bus traits; any other transport (a Linux `i2cdev`
//! handle, a test double) only has to provide the three primitives.
//!
//! [`BusInterface`] adapts a `RegisterBus` to the `device-driver` register
//! interface used by the generated register map.

use crate::{Error, I2C_ADDRESS_ALT_HIGH, I2C_ADDRESS_ALT_LOW};
use device_driver::RegisterInterface;

/// SPI read flag (R/W bit)
const SPI_READ: u8 = 0x80;
/// SPI multi-byte flag (MB bit)
const SPI_MULTI_BYTE: u8 = 0x40;
/// SPI register address bits
const SPI_ADDRESS_MASK: u8 = 0x3F;

/// Transport-agnostic register bus
///
/// Implementations must perform each call as one complete bus transaction.
/// The driver assumes it is the only user of the bus for the device.
pub trait RegisterBus {
    /// Transport error type
    type Error;

    /// Read a single register
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn read_byte(&mut self, address: u8) -> Result<u8, Self::Error>;

    /// Read consecutive registers starting at `address` into `buffer`
    ///
    /// Returns the number of bytes actually read. A count below
    /// `buffer.len()` is treated by the driver as a failed read.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn read_burst(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write a single register
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

/// Adapter from a [`RegisterBus`] to the `device-driver` register interface
pub struct BusInterface<B> {
    bus: B,
}

impl<B> BusInterface<B> {
    /// Wrap a register bus
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Consume the adapter and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: RegisterBus> RegisterInterface for BusInterface<B> {
    type Error = Error<B::Error>;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len()
        match read_data.len() {
            0 => Ok(()),
            1 => {
                read_data[0] = self.bus.read_byte(address)?;
                Ok(())
            }
            expected => {
                let actual = self.bus.read_burst(address, read_data)?;
                if actual < expected {
                    return Err(Error::ShortRead { expected, actual });
                }
                Ok(())
            }
        }
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len()
        for (offset, &value) in (0u8..).zip(write_data) {
            self.bus.write_byte(address.wrapping_add(offset), value)?;
        }
        Ok(())
    }
}

/// I2C interface for the ADXL345
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x53, ALT ADDRESS pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut accel = Adxl345Driver::new(interface, clock, Config::default())?;
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_ALT_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x1D, ALT ADDRESS pin HIGH)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_ALT_HIGH,
        }
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterBus for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;

    fn read_byte(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        self.i2c.write_read(self.address, &[address], &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_burst(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        // The device auto-increments the register address during a burst
        self.i2c.write_read(self.address, &[address], buffer)?;
        Ok(buffer.len())
    }

    fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[address, value])
    }
}

/// SPI interface for the ADXL345
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which manages
/// the chip select (CS) pin automatically. The ADXL345 needs SPI mode 3.
///
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay);
/// let interface = SpiInterface::new(spi_device);
/// ```
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterBus for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = E;

    fn read_byte(&mut self, address: u8) -> Result<u8, Self::Error> {
        let mut buffer = [0u8; 1];
        let read_address = (address & SPI_ADDRESS_MASK) | SPI_READ;

        let mut operations = [
            embedded_hal::spi::Operation::Write(&[read_address]),
            embedded_hal::spi::Operation::Read(&mut buffer),
        ];
        self.spi.transaction(&mut operations)?;

        Ok(buffer[0])
    }

    fn read_burst(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        let read_address = (address & SPI_ADDRESS_MASK) | SPI_READ | SPI_MULTI_BYTE;
        let len = buffer.len();

        let mut operations = [
            embedded_hal::spi::Operation::Write(&[read_address]),
            embedded_hal::spi::Operation::Read(buffer),
        ];
        self.spi.transaction(&mut operations)?;

        Ok(len)
    }

    fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        self.spi.write(&[address & SPI_ADDRESS_MASK, value])
    }
}
