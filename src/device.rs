//! High-level driver API for the ADXL345
//!
//! [`Adxl345Driver`] owns the register bus and a time source. It configures the
//! device, takes per-axis calibrations, and turns the FIFO into timestamped
//! [`MeasurementBatch`]es for the caller to pop.

use crate::calibration::{CALIBRATION_WINDOW, Calibration, CalibrationSet};
use crate::config::Config;
use crate::conversion;
use crate::fifo::{
    Axis, DRAIN_WATERMARK, FIFO_TRIGGER_SAMPLES, Measurement, MeasurementBatch, Quality,
    SampleQueue,
};
use crate::interface::{BusInterface, RegisterBus};
use crate::registers::{AXIS_DATA_LEN, DATAX0, RegisterDevice};
use crate::time::TimeSource;
use crate::{DEVICE_ID_VALUE, Error};

use device_driver::RegisterInterface;

/// Main driver for the ADXL345
pub struct Adxl345Driver<B, T> {
    device: RegisterDevice<BusInterface<B>>,
    clock: T,
    config: Config,
    gain: f32,
    calibration: CalibrationSet,
    queue: SampleQueue,
    initialized: bool,
}

impl<B, T> Adxl345Driver<B, T>
where
    B: RegisterBus,
    T: TimeSource,
{
    /// Create, initialize and calibrate a driver
    ///
    /// The device is configured by [`init`](Self::init) and all three axes are
    /// calibrated before the driver is returned, so the device must be at rest.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is rejected by [`Config::validate`]
    /// - Communication with the device fails
    /// - The `DEVID` register contains an unexpected value
    pub fn new(bus: B, clock: T, config: Config) -> Result<Self, Error<B::Error>> {
        config.validate::<B::Error>()?;

        let mut driver = Self {
            device: RegisterDevice::new(BusInterface::new(bus)),
            clock,
            config,
            gain: conversion::gain(),
            calibration: CalibrationSet::default(),
            queue: SampleQueue::new(),
            initialized: false,
        };

        driver.init()?;
        driver.calibrate()?;

        Ok(driver)
    }

    /// Verify the device and apply the configuration
    ///
    /// Each setting is a read-modify-write of its own bit-field; all other bits
    /// of the touched registers are preserved. Ends by setting
    /// `POWER_CTL.MEASURE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if `DEVID` is not 0xE5, or a bus error.
    pub fn init(&mut self) -> Result<(), Error<B::Error>> {
        let device_id = self.read_device_id()?;
        if device_id != DEVICE_ID_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADXL345: unexpected DEVID {=u8:#x}", device_id);
            return Err(Error::InvalidDevice(device_id));
        }

        let rate = self.config.data_rate.code();
        self.device.bw_rate().modify(|w| {
            w.set_rate(rate);
        })?;

        let mode = self.config.fifo_mode.code();
        self.device.fifo_ctl().modify(|w| {
            w.set_fifo_mode(mode);
            w.set_samples(FIFO_TRIGGER_SAMPLES);
        })?;

        let range = self.config.range.code();
        let full_resolution = self.config.full_resolution;
        self.device.data_format().modify(|w| {
            w.set_range(range);
            w.set_full_res(full_resolution);
        })?;

        self.device.power_ctl().modify(|w| {
            w.set_measure(true);
        })?;

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("ADXL345: initialized with {}", self.config);

        Ok(())
    }

    /// Read the `DEVID` register
    ///
    /// Should return 0xE5 for a valid ADXL345
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_device_id(&mut self) -> Result<u8, Error<B::Error>> {
        let reg = self.device.dev_id().read()?;
        Ok(reg.devid())
    }

    /// Read one axis in m/s²
    ///
    /// Low and high bytes are read with two separate single-register reads, so
    /// the pair can tear if the device updates in between. Use
    /// [`read_axes`](Self::read_axes) for a consistent sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init`, or a bus error.
    pub fn read_axis(&mut self, axis: Axis) -> Result<f32, Error<B::Error>> {
        self.ensure_initialized()?;

        let (low, high) = match axis {
            Axis::X => (
                self.device.data_x_low().read()?.x_low(),
                self.device.data_x_high().read()?.x_high(),
            ),
            Axis::Y => (
                self.device.data_y_low().read()?.y_low(),
                self.device.data_y_high().read()?.y_high(),
            ),
            Axis::Z => (
                self.device.data_z_low().read()?.z_low(),
                self.device.data_z_high().read()?.z_high(),
            ),
        };

        let raw = conversion::raw_from_bytes(low, high);
        Ok(conversion::to_acceleration(raw, self.gain))
    }

    /// Read all three axes in m/s² with one burst read
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init`, [`Error::ShortRead`]
    /// if the burst comes back short, or a bus error.
    pub fn read_axes(&mut self) -> Result<[f32; 3], Error<B::Error>> {
        self.ensure_initialized()?;
        let raw = self.read_sample()?;
        Ok(raw.map(|value| conversion::to_acceleration(value, self.gain)))
    }

    /// Number of samples currently stored in the FIFO (0-32)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_fifo_entries(&mut self) -> Result<u8, Error<B::Error>> {
        let status = self.device.fifo_status().read()?;
        Ok(status.entries())
    }

    /// Take a calibration of one axis over [`CALIBRATION_WINDOW`] readings
    ///
    /// The stored calibration set is not changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init`, or a bus error.
    pub fn calibrate_axis(&mut self, axis: Axis) -> Result<Calibration, Error<B::Error>> {
        let mut readings = [0.0_f32; CALIBRATION_WINDOW];
        for reading in &mut readings {
            *reading = self.read_axis(axis)?;
        }
        Ok(Calibration::from_readings(&readings).unwrap_or_default())
    }

    /// Recalibrate all three axes
    ///
    /// The stored set is replaced only if every axis succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init`, or a bus error.
    pub fn calibrate(&mut self) -> Result<(), Error<B::Error>> {
        let x = self.calibrate_axis(Axis::X)?;
        let y = self.calibrate_axis(Axis::Y)?;
        let z = self.calibrate_axis(Axis::Z)?;
        self.calibration = CalibrationSet { x, y, z };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ADXL345: calibrated, means x={} y={} z={}",
            x.mean,
            y.mean,
            z.mean
        );

        Ok(())
    }

    /// Check the FIFO and drain it once it reaches the watermark
    ///
    /// Call periodically. Drains only when the FIFO holds at least
    /// [`DRAIN_WATERMARK`] samples and no batch is waiting in the queue;
    /// otherwise this is a single status read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init`. A failed drain is
    /// returned and no batch is queued for it.
    pub fn poll(&mut self) -> Result<(), Error<B::Error>> {
        self.ensure_initialized()?;

        let entries = self.read_fifo_entries()?;
        if entries < DRAIN_WATERMARK || !self.queue.is_empty() {
            return Ok(());
        }

        let result = self.drain(entries);

        #[cfg(feature = "defmt")]
        if result.is_err() {
            defmt::warn!("ADXL345: FIFO drain of {} entries failed", entries);
        }

        result
    }

    /// Read `entries` samples out of the FIFO into one batch
    fn drain(&mut self, entries: u8) -> Result<(), Error<B::Error>> {
        let now = self.clock.now_ms();
        let period_ms = self.config.data_rate.period_ms();
        let mut batch = MeasurementBatch::new();

        // The FIFO pops oldest first; slot `entries - 1` is the oldest
        for slot in (0..u64::from(entries)).rev() {
            let timestamp_ms = now.saturating_sub(slot * period_ms);
            let raw = self.read_sample()?;

            for axis in Axis::ALL {
                let measurement = Measurement {
                    axis,
                    timestamp_ms,
                    value: conversion::to_acceleration(raw[axis.index()], self.gain),
                    quality: Quality::Good,
                };
                if !batch.push(measurement) {
                    return Err(Error::QueueFull);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ADXL345: drained {} samples at {=u64} ms", entries, now);

        self.queue.push(batch).map_err(|_| Error::QueueFull)
    }

    /// One XYZ burst read from `DATAX0`
    fn read_sample(&mut self) -> Result<[i16; 3], Error<B::Error>> {
        let mut buffer = [0u8; AXIS_DATA_LEN];
        self.device
            .interface
            .read_register(DATAX0, 48, &mut buffer)?;
        Ok(conversion::decode_axes(&buffer))
    }

    /// Pop the oldest pending batch, if any
    pub fn next_measurement(&mut self) -> Option<MeasurementBatch> {
        self.queue.pop()
    }

    /// Number of batches waiting to be popped
    #[must_use]
    pub fn pending_batches(&self) -> usize {
        self.queue.len()
    }

    /// Put the device into standby (clears `POWER_CTL.MEASURE`)
    ///
    /// Readings and polling return [`Error::NotInitialized`] until
    /// [`init`](Self::init) runs again. Queued batches are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn standby(&mut self) -> Result<(), Error<B::Error>> {
        self.device.power_ctl().modify(|w| {
            w.set_measure(false);
        })?;
        self.initialized = false;
        Ok(())
    }

    /// Whether the device is configured and measuring
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) -> Result<(), Error<B::Error>> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}

impl<B, T> Adxl345Driver<B, T> {
    /// Latest calibration set
    pub const fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    /// Configuration the driver was built with
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Gain from raw LSB to m/s²
    pub const fn gain(&self) -> f32 {
        self.gain
    }

    /// Get a mutable reference to the underlying register device (for advanced usage)
    ///
    /// Register writes made through it bypass the driver's state tracking.
    pub const fn device_mut(&mut self) -> &mut RegisterDevice<BusInterface<B>> {
        &mut self.device
    }

    /// Consume the driver and return the underlying bus
    pub fn release(self) -> B {
        self.device.interface.release()
    }
}
