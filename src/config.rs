//! Driver configuration
//!
//! Provides the enumerated configuration codes of the ADXL345 (output data rate,
//! measurement range, bus kind), the immutable [`Config`] and the
//! [`Adxl345Builder`] used to assemble a driver from optional parts.

use crate::device::Adxl345Driver;
use crate::fifo::FifoMode;
use crate::interface::RegisterBus;
use crate::time::TimeSource;
use crate::Error;

/// Output data rate
///
/// The discriminant is the `BW_RATE.rate` code. Rates are listed for normal
/// power operation; the bandwidth is half the output data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataRate {
    /// 3200 Hz
    Hz3200 = 0x0F,
    /// 1600 Hz
    Hz1600 = 0x0E,
    /// 800 Hz
    Hz800 = 0x0D,
    /// 400 Hz
    Hz400 = 0x0C,
    /// 200 Hz
    Hz200 = 0x0B,
    /// 100 Hz (power-on default)
    Hz100 = 0x0A,
    /// 50 Hz
    Hz50 = 0x09,
    /// 25 Hz
    Hz25 = 0x08,
    /// 12.5 Hz
    Hz12_5 = 0x07,
    /// 6.25 Hz
    Hz6_25 = 0x06,
    /// 3.13 Hz
    Hz3_13 = 0x05,
    /// 1.56 Hz
    Hz1_56 = 0x04,
    /// 0.78 Hz
    Hz0_78 = 0x03,
    /// 0.39 Hz
    Hz0_39 = 0x02,
    /// 0.20 Hz
    Hz0_20 = 0x01,
    /// 0.10 Hz
    Hz0_10 = 0x00,
}

impl DataRate {
    /// All data rates, fastest first
    pub const ALL: [Self; 16] = [
        Self::Hz3200,
        Self::Hz1600,
        Self::Hz800,
        Self::Hz400,
        Self::Hz200,
        Self::Hz100,
        Self::Hz50,
        Self::Hz25,
        Self::Hz12_5,
        Self::Hz6_25,
        Self::Hz3_13,
        Self::Hz1_56,
        Self::Hz0_78,
        Self::Hz0_39,
        Self::Hz0_20,
        Self::Hz0_10,
    ];

    /// `BW_RATE.rate` code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a data rate from its `BW_RATE.rate` code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        let mut i = 0;
        while i < Self::ALL.len() {
            if Self::ALL[i] as u8 == code {
                return Some(Self::ALL[i]);
            }
            i += 1;
        }
        None
    }

    /// Output data rate in millihertz
    #[must_use]
    pub const fn output_data_rate_mhz(self) -> u32 {
        match self {
            Self::Hz3200 => 3_200_000,
            Self::Hz1600 => 1_600_000,
            Self::Hz800 => 800_000,
            Self::Hz400 => 400_000,
            Self::Hz200 => 200_000,
            Self::Hz100 => 100_000,
            Self::Hz50 => 50_000,
            Self::Hz25 => 25_000,
            Self::Hz12_5 => 12_500,
            Self::Hz6_25 => 6_250,
            Self::Hz3_13 => 3_130,
            Self::Hz1_56 => 1_560,
            Self::Hz0_78 => 780,
            Self::Hz0_39 => 390,
            Self::Hz0_20 => 200,
            Self::Hz0_10 => 100,
        }
    }

    /// Output data rate in Hz
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn output_data_rate_hz(self) -> f32 {
        self.output_data_rate_mhz() as f32 / 1000.0
    }

    /// Bandwidth in millihertz (half the output data rate)
    #[must_use]
    pub const fn bandwidth_mhz(self) -> u32 {
        self.output_data_rate_mhz() / 2
    }

    /// Nominal sample period in whole milliseconds, truncated
    ///
    /// Rates above 1 kHz have a period below one millisecond and yield 0, so
    /// every sample of a drain at those rates carries the same timestamp.
    #[must_use]
    pub const fn period_ms(self) -> u64 {
        1_000_000 / self.output_data_rate_mhz() as u64
    }
}

/// Measurement range
///
/// The discriminant is the `DATA_FORMAT.range` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    /// ±2g
    G2 = 0b00,
    /// ±4g
    G4 = 0b01,
    /// ±8g
    G8 = 0b10,
    /// ±16g
    G16 = 0b11,
}

impl Range {
    /// All ranges, most sensitive first
    pub const ALL: [Self; 4] = [Self::G2, Self::G4, Self::G8, Self::G16];

    /// `DATA_FORMAT.range` code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Full-scale value in g
    #[must_use]
    pub const fn max_g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Nominal scale factor of one LSB in g for this range
    ///
    /// In full resolution mode every range keeps 4 mg/LSB; in 10-bit mode the
    /// LSB doubles with each range step. The driver's gain does not follow
    /// this value; it is provided so callers can rescale 10-bit readings.
    #[must_use]
    pub fn scale_g_per_lsb(self, full_resolution: bool) -> f32 {
        if full_resolution {
            return 0.004;
        }
        match self {
            Self::G2 => 0.004,
            Self::G4 => 0.008,
            Self::G8 => 0.016,
            Self::G16 => 0.032,
        }
    }
}

/// Bus used to reach the device
///
/// Informational only: the register protocol is the same on both buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusKind {
    /// I2C
    #[default]
    I2c,
    /// 4-wire SPI
    Spi,
}

/// Driver configuration, fixed for the lifetime of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output data rate
    pub data_rate: DataRate,
    /// Measurement range
    pub range: Range,
    /// FIFO mode
    pub fifo_mode: FifoMode,
    /// Bus the device is attached to
    pub bus_kind: BusKind,
    /// Set `DATA_FORMAT.FULL_RES`
    ///
    /// Off by default, which clears the bit. With it on, the fixed 4 mg/LSB
    /// gain is correct at every range; with it off it is only correct at ±2g.
    pub full_resolution: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_rate: DataRate::Hz100,
            range: Range::G2,
            fifo_mode: FifoMode::Stream,
            bus_kind: BusKind::I2c,
            full_resolution: false,
        }
    }
}

impl Config {
    /// Check that the configuration can drive the FIFO drain
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for [`FifoMode::Bypass`], where the
    /// FIFO never fills and no batch could ever be produced.
    pub fn validate<E>(&self) -> Result<(), Error<E>> {
        match self.fifo_mode {
            FifoMode::Bypass => Err(Error::InvalidConfig),
            FifoMode::Fifo | FifoMode::Stream | FifoMode::Trigger => Ok(()),
        }
    }
}

/// Builder for [`Adxl345Driver`]
///
/// The bus, clock, data rate and range are required. `build` checks them
/// before any bus traffic, so a missing part never touches the device.
///
/// # Example
///
/// ```ignore
/// let mut accel = Adxl345Builder::new()
///     .bus(I2cInterface::default(i2c))
///     .clock(clock)
///     .data_rate(DataRate::Hz100)
///     .range(Range::G2)
///     .build()?;
/// ```
pub struct Adxl345Builder<B, T> {
    bus: Option<B>,
    clock: Option<T>,
    data_rate: Option<DataRate>,
    range: Option<Range>,
    fifo_mode: FifoMode,
    bus_kind: BusKind,
    full_resolution: bool,
}

impl<B, T> Default for Adxl345Builder<B, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, T> Adxl345Builder<B, T> {
    /// Create an empty builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bus: None,
            clock: None,
            data_rate: None,
            range: None,
            fifo_mode: FifoMode::Stream,
            bus_kind: BusKind::I2c,
            full_resolution: false,
        }
    }

    /// Register bus the device is attached to
    #[must_use]
    pub fn bus(mut self, bus: B) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Time source used to stamp FIFO drains
    #[must_use]
    pub fn clock(mut self, clock: T) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Output data rate
    #[must_use]
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.data_rate = Some(data_rate);
        self
    }

    /// Measurement range
    #[must_use]
    pub fn range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// FIFO mode (default: stream)
    #[must_use]
    pub fn fifo_mode(mut self, fifo_mode: FifoMode) -> Self {
        self.fifo_mode = fifo_mode;
        self
    }

    /// Bus kind (default: I2C)
    #[must_use]
    pub fn bus_kind(mut self, bus_kind: BusKind) -> Self {
        self.bus_kind = bus_kind;
        self
    }

    /// Enable full resolution mode (default: off)
    #[must_use]
    pub fn full_resolution(mut self, enable: bool) -> Self {
        self.full_resolution = enable;
        self
    }
}

impl<B, T> Adxl345Builder<B, T>
where
    B: RegisterBus,
    T: TimeSource,
{
    /// Construct, initialize and calibrate the driver
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] without touching the bus if the bus,
    /// clock, data rate or range is missing. Otherwise returns any error from
    /// [`Adxl345Driver::new`].
    pub fn build(self) -> Result<Adxl345Driver<B, T>, Error<B::Error>> {
        let (Some(bus), Some(clock), Some(data_rate), Some(range)) =
            (self.bus, self.clock, self.data_rate, self.range)
        else {
            return Err(Error::InvalidConfig);
        };

        let config = Config {
            data_rate,
            range,
            fifo_mode: self.fifo_mode,
            bus_kind: self.bus_kind,
            full_resolution: self.full_resolution,
        };

        Adxl345Driver::new(bus, clock, config)
    }
}
