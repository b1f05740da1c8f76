#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod calibration;
pub mod config;
pub mod conversion;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod registers;
pub mod time;

// Re-export main types
pub use calibration::{CALIBRATION_WINDOW, Calibration, CalibrationSet};
pub use config::{Adxl345Builder, BusKind, Config, DataRate, Range};
pub use conversion::{SCALE_G_PER_LSB, STANDARD_GRAVITY};
pub use device::Adxl345Driver;
pub use fifo::{
    Axis, DRAIN_WATERMARK, FIFO_TRIGGER_SAMPLES, FifoMode, MAX_BATCH_ENTRIES, Measurement,
    MeasurementBatch, Quality, SAMPLE_QUEUE_DEPTH, SampleQueue,
};
pub use interface::{BusInterface, I2cInterface, RegisterBus, SpiInterface};
pub use time::TimeSource;

/// ADXL345 I2C address when the ALT ADDRESS pin is low (default: 0x53)
pub const I2C_ADDRESS_ALT_LOW: u8 = 0x53;

/// ADXL345 I2C address when the ALT ADDRESS pin is high (alternative: 0x1D)
pub const I2C_ADDRESS_ALT_HIGH: u8 = 0x1D;

/// Expected value of the `DEVID` register
pub const DEVICE_ID_VALUE: u8 = 0xE5;

/// Driver errors
///
/// `E` is the error type of the underlying transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// A required construction parameter is missing or unusable
    InvalidConfig,
    /// Invalid `DEVID` register value (contains the actual value read)
    InvalidDevice(u8),
    /// A burst read returned fewer bytes than requested
    ShortRead {
        /// Bytes requested
        expected: usize,
        /// Bytes actually returned by the transport
        actual: usize,
    },
    /// The sample queue has no room for another batch
    QueueFull,
    /// The device has not been initialized (or was put into standby)
    NotInitialized,
}

impl<E> Error<E> {
    /// Whether this is a driver-level device failure rather than a transport
    /// or configuration error.
    ///
    /// Device failures are generally not recoverable without re-initializing.
    #[must_use]
    pub const fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDevice(_) | Self::ShortRead { .. } | Self::QueueFull
        )
    }
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
            Self::InvalidConfig => write!(f, "invalid configuration"),
            Self::InvalidDevice(id) => write!(f, "device id mismatch: {id:#04x}"),
            Self::ShortRead { expected, actual } => {
                write!(f, "short read: expected {expected} bytes, got {actual}")
            }
            Self::QueueFull => write!(f, "sample queue full"),
            Self::NotInitialized => write!(f, "device not initialized"),
        }
    }
}
