//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use adxl345::{Adxl345Driver, Config, TimeSource};
use std::cell::Cell;
use std::rc::Rc;

/// Mock time source for testing
///
/// Clones share the same clock, so a test can keep a handle and move time
/// while the driver owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTime {
    now_ms: Rc<Cell<u64>>,
}

impl MockTime {
    /// Create a clock reading `now_ms`
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(now_ms)),
        }
    }

    /// Set the current time
    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    /// Move the clock forward
    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

/// Driver type used throughout the tests
pub type MockDriver = Adxl345Driver<MockInterface, MockTime>;

/// Create a mock driver with the default configuration
/// Returns (driver, interface, clock) where interface and clock share state with the driver
pub fn create_mock_driver() -> (MockDriver, MockInterface, MockTime) {
    create_mock_driver_with(Config::default())
}

/// Create a mock driver with a specific configuration
pub fn create_mock_driver_with(config: Config) -> (MockDriver, MockInterface, MockTime) {
    let interface = MockInterface::new();
    let clock = MockTime::new(10_000);
    let driver = Adxl345Driver::new(interface.clone(), clock.clone(), config)
        .expect("Failed to create mock driver");
    (driver, interface, clock)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
