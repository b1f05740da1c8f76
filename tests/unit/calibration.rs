//! Unit tests for per-axis calibration

use crate::common::{MockError, MockInterface, MockTime, assert_float_eq, create_mock_driver};
use adxl345::{Adxl345Driver, Axis, CALIBRATION_WINDOW, Config, Error, conversion};

const EPSILON: f32 = 1e-4;

fn driver_with(interface: &MockInterface) -> Adxl345Driver<MockInterface, MockTime> {
    Adxl345Driver::new(interface.clone(), MockTime::new(0), Config::default())
        .expect("Failed to create mock driver")
}

#[test]
fn test_calibration_identical_readings() {
    let interface = MockInterface::new();
    interface.set_axis_data(25, -40, 250);

    let driver = driver_with(&interface);
    let gain = conversion::gain();
    let cal = driver.calibration();

    for (value, axis_cal) in [(25.0, cal.x), (-40.0, cal.y), (250.0, cal.z)] {
        let expected = value * gain;
        assert_float_eq(axis_cal.mean, expected, EPSILON);
        assert_float_eq(axis_cal.max, expected, EPSILON);
        assert_float_eq(axis_cal.min, expected, EPSILON);
    }
}

#[test]
fn test_calibration_alternating_readings() {
    let interface = MockInterface::new();
    interface.set_sample_sequence(vec![[100, -50, 250], [200, -150, 250]]);

    let driver = driver_with(&interface);
    let gain = conversion::gain();
    let cal = driver.calibration();

    assert_float_eq(cal.x.max, 200.0 * gain, EPSILON);
    assert_float_eq(cal.x.min, 100.0 * gain, EPSILON);
    assert_float_eq(cal.x.mean, 150.0 * gain, EPSILON);

    assert_float_eq(cal.y.max, -50.0 * gain, EPSILON);
    assert_float_eq(cal.y.min, -150.0 * gain, EPSILON);
    assert_float_eq(cal.y.mean, -100.0 * gain, EPSILON);

    assert_float_eq(cal.z.mean, 250.0 * gain, EPSILON);
}

#[test]
fn test_calibrate_axis_reads_window() {
    let (mut driver, interface, _clock) = create_mock_driver();
    interface.clear_operations();

    driver.calibrate_axis(Axis::Y).unwrap();

    // Two single-byte reads per reading, no bursts
    let ops = interface.operations();
    assert_eq!(ops.len(), CALIBRATION_WINDOW * 2);
    assert_eq!(interface.burst_read_count(), 0);
}

#[test]
fn test_calibrate_axis_leaves_stored_set() {
    let interface = MockInterface::new();
    interface.set_axis_data(10, 10, 10);
    let mut driver = driver_with(&interface);

    interface.set_axis_data(500, 500, 500);
    let fresh = driver.calibrate_axis(Axis::X).unwrap();

    let gain = conversion::gain();
    assert_float_eq(fresh.mean, 500.0 * gain, EPSILON);
    assert_float_eq(driver.calibration().x.mean, 10.0 * gain, EPSILON);
}

#[test]
fn test_calibrate_replaces_set() {
    let interface = MockInterface::new();
    interface.set_axis_data(10, 20, 30);
    let mut driver = driver_with(&interface);

    interface.set_axis_data(-10, -20, -30);
    driver.calibrate().unwrap();

    let gain = conversion::gain();
    let cal = driver.calibration();
    assert_float_eq(cal.x.mean, -10.0 * gain, EPSILON);
    assert_float_eq(cal.y.mean, -20.0 * gain, EPSILON);
    assert_float_eq(cal.z.mean, -30.0 * gain, EPSILON);
}

#[test]
fn test_failed_calibrate_keeps_previous_set() {
    let interface = MockInterface::new();
    interface.set_axis_data(10, 20, 30);
    let mut driver = driver_with(&interface);
    let before = *driver.calibration();

    interface.set_axis_data(300, 300, 300);
    // X and Y complete (2 x 20 readings x 2 bytes), the first Z read fails
    interface.fail_read_after(CALIBRATION_WINDOW * 2 * 2);

    let result = driver.calibrate();
    assert_eq!(result, Err(Error::Bus(MockError::Communication)));
    assert_eq!(*driver.calibration(), before);

    // Recovers once the bus works again
    driver.calibrate().unwrap();
    assert_float_eq(
        driver.calibration().z.mean,
        300.0 * conversion::gain(),
        EPSILON,
    );
}

#[test]
fn test_calibration_iter_covers_all_axes() {
    let (driver, _interface, _clock) = create_mock_driver();
    let axes: Vec<Axis> = driver.calibration().iter().map(|(axis, _)| axis).collect();
    assert_eq!(axes, Axis::ALL.to_vec());
}
