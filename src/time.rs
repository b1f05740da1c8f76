//! Time source abstraction
//!
//! The ADXL345 does not timestamp FIFO samples, so the driver needs a clock to
//! stamp a drain with "now" and derive the age of each buffered sample. The
//! clock is supplied by the caller (an `embassy_time::Instant` wrapper, a
//! `std::time::SystemTime` wrapper, or a controllable mock in tests).

/// Monotonic or wall-clock millisecond time source
///
/// # Example
///
/// ```ignore
/// struct EmbassyClock;
///
/// impl adxl345::TimeSource for EmbassyClock {
///     fn now_ms(&self) -> u64 {
///         embassy_time::Instant::now().as_millis()
///     }
/// }
/// ```
pub trait TimeSource {
    /// Current time in milliseconds
    fn now_ms(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
