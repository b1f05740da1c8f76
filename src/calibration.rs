//! Stationary calibration statistics
//!
//! A calibration is a window of consecutive readings of one axis, reduced to
//! mean, maximum and minimum. It is a diagnostic for the caller: the driver
//! never applies it to later readings and does not check that the device was
//! actually still while it was taken.

use crate::fifo::Axis;

/// Number of consecutive readings per axis calibration
pub const CALIBRATION_WINDOW: usize = 20;

/// Per-axis calibration statistics, in m/s²
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Mean of the window
    pub mean: f32,
    /// Largest reading of the window
    pub max: f32,
    /// Smallest reading of the window
    pub min: f32,
}

impl Calibration {
    /// Reduce a window of readings to its statistics
    ///
    /// Returns `None` for an empty window.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_readings(readings: &[f32]) -> Option<Self> {
        let (&first, rest) = readings.split_first()?;

        let mut sum = first;
        let mut max = first;
        let mut min = first;
        for &reading in rest {
            sum += reading;
            max = max.max(reading);
            min = min.min(reading);
        }

        Some(Self {
            mean: sum / readings.len() as f32,
            max,
            min,
        })
    }

    /// Spread of the window (`max - min`)
    #[must_use]
    pub fn spread(&self) -> f32 {
        self.max - self.min
    }
}

/// One calibration per axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationSet {
    /// X-axis calibration
    pub x: Calibration,
    /// Y-axis calibration
    pub y: Calibration,
    /// Z-axis calibration
    pub z: Calibration,
}

impl CalibrationSet {
    /// Calibration of `axis`
    #[must_use]
    pub const fn get(&self, axis: Axis) -> &Calibration {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Iterate over `(axis, calibration)` pairs in X, Y, Z order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &Calibration)> {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }
}
