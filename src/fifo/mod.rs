//! FIFO (First In First Out) buffer management
//!
//! The ADXL345 buffers up to 32 XYZ samples in its FIFO. The driver polls the
//! entry count in `FIFO_STATUS` and, once it reaches [`DRAIN_WATERMARK`],
//! drains every buffered sample into one [`MeasurementBatch`]. Each sample is
//! stamped from a single "now" captured at the start of the drain, stepping
//! back one output data period per slot.
//!
//! # Example
//!
//! ```ignore
//! # use adxl345::{Adxl345Driver, Axis};
//! # let mut accel: Adxl345Driver<_, _> = todo!();
//! // Called once per scheduler tick
//! accel.poll()?;
//!
//! while let Some(batch) = accel.next_measurement() {
//!     for m in batch.for_axis(Axis::Z) {
//!         // m.timestamp_ms, m.value (m/s²)
//!     }
//! }
//! # Ok::<(), adxl345::Error<()>>(())
//! ```

mod queue;

pub use queue::{SAMPLE_QUEUE_DEPTH, SampleQueue};

/// FIFO entry count at which `poll` drains the FIFO
pub const DRAIN_WATERMARK: u8 = 32;

/// Value written to `FIFO_CTL.samples`
pub const FIFO_TRIGGER_SAMPLES: u8 = 15;

/// Upper bound of measurements in one batch (6-bit entry count, three axes)
pub const MAX_BATCH_ENTRIES: usize = 64 * 3;

/// FIFO operating mode
///
/// The discriminant is the `FIFO_CTL.fifo_mode` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FifoMode {
    /// FIFO is bypassed
    Bypass = 0b00,
    /// FIFO collects until full, then stops
    Fifo = 0b01,
    /// FIFO holds the latest 32 samples; oldest data is dropped when full
    #[default]
    Stream = 0b10,
    /// Stream until a trigger event, then hold
    Trigger = 0b11,
}

impl FifoMode {
    /// `FIFO_CTL.fifo_mode` code
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// All axes in register order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Position of the axis within an XYZ burst
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Quality tag of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Quality {
    /// Decoded from a complete burst read
    Good,
}

/// A single timestamped acceleration reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Axis the value belongs to
    pub axis: Axis,
    /// Sample time in milliseconds of the driver's time source
    pub timestamp_ms: u64,
    /// Acceleration in m/s²
    pub value: f32,
    /// Quality tag
    pub quality: Quality,
}

/// Measurements produced by one FIFO drain
///
/// Ordered oldest sample first; within a sample X, Y, Z. A batch cannot be
/// modified once the driver hands it out.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementBatch {
    measurements: heapless::Vec<Measurement, MAX_BATCH_ENTRIES>,
}

impl MeasurementBatch {
    pub(crate) const fn new() -> Self {
        Self {
            measurements: heapless::Vec::new(),
        }
    }

    /// Returns `false` if the batch is full
    pub(crate) fn push(&mut self, measurement: Measurement) -> bool {
        self.measurements.push(measurement).is_ok()
    }

    /// Number of measurements in the batch
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Whether the batch holds no measurements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Iterate over all measurements in order
    pub fn iter(&self) -> core::slice::Iter<'_, Measurement> {
        self.measurements.iter()
    }

    /// Iterate over the measurements of one axis in order
    pub fn for_axis(&self, axis: Axis) -> impl Iterator<Item = &Measurement> {
        self.measurements.iter().filter(move |m| m.axis == axis)
    }

    /// All measurements as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Measurement] {
        &self.measurements
    }
}

impl<'a> IntoIterator for &'a MeasurementBatch {
    type Item = &'a Measurement;
    type IntoIter = core::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
