//! Unit tests for FIFO polling, draining and timestamping

use crate::common::{MockError, assert_float_eq, create_mock_driver, create_mock_driver_with};
use adxl345::{
    Axis, Config, DRAIN_WATERMARK, DataRate, Error, Quality, STANDARD_GRAVITY,
};

const GAIN: f32 = 0.004 * STANDARD_GRAVITY;

#[test]
fn test_empty_queue_returns_none() {
    let (mut driver, _interface, _clock) = create_mock_driver();
    assert!(driver.next_measurement().is_none());
    assert_eq!(driver.pending_batches(), 0);
}

#[test]
fn test_below_watermark_no_drain() {
    let (mut driver, interface, _clock) = create_mock_driver();

    for entries in [0, 1, 15, DRAIN_WATERMARK - 1] {
        interface.set_fifo_entries(entries);
        interface.clear_operations();

        driver.poll().unwrap();

        assert_eq!(interface.burst_read_count(), 0);
        assert_eq!(interface.operations().len(), 1, "only FIFO_STATUS is read");
        assert!(driver.next_measurement().is_none());
    }
}

#[test]
fn test_drain_timestamps_at_100hz() {
    let (mut driver, interface, clock) = create_mock_driver();
    clock.set(5_000);
    interface.set_fifo_entries(32);

    driver.poll().unwrap();
    assert_eq!(interface.burst_read_count(), 32);

    let batch = driver.next_measurement().expect("a batch should be queued");
    assert_eq!(batch.len(), 96);

    for axis in Axis::ALL {
        let timestamps: Vec<u64> = batch.for_axis(axis).map(|m| m.timestamp_ms).collect();
        assert_eq!(timestamps.len(), 32);
        // Oldest slot (31) first, newest slot (0) last
        assert_eq!(timestamps[0], 5_000 - 310);
        assert_eq!(timestamps[31], 5_000);
        for (i, ts) in timestamps.iter().enumerate() {
            assert_eq!(*ts, 5_000 - 10 * (31 - i as u64));
        }
    }

    assert!(driver.next_measurement().is_none());
}

#[test]
fn test_drain_values_in_sample_order() {
    let (mut driver, interface, _clock) = create_mock_driver();
    let sequence: Vec<[i16; 3]> = (0..32).map(|i| [i, -i, 2 * i]).collect();
    interface.set_sample_sequence(sequence);
    interface.set_fifo_entries(32);

    driver.poll().unwrap();
    let batch = driver.next_measurement().unwrap();

    for (sample, chunk) in batch.as_slice().chunks(3).enumerate() {
        let raw = sample as f32;
        assert_eq!(chunk[0].axis, Axis::X);
        assert_eq!(chunk[1].axis, Axis::Y);
        assert_eq!(chunk[2].axis, Axis::Z);
        assert_float_eq(chunk[0].value, raw * GAIN, 1e-4);
        assert_float_eq(chunk[1].value, -raw * GAIN, 1e-4);
        assert_float_eq(chunk[2].value, 2.0 * raw * GAIN, 1e-4);
        assert!(chunk.iter().all(|m| m.quality == Quality::Good));
        assert!(chunk.iter().all(|m| m.timestamp_ms == chunk[0].timestamp_ms));
    }
}

#[test]
fn test_drain_reads_all_entries() {
    let (mut driver, interface, _clock) = create_mock_driver();
    interface.set_fifo_entries(33);

    driver.poll().unwrap();

    assert_eq!(interface.burst_read_count(), 33);
    assert_eq!(driver.next_measurement().unwrap().len(), 99);
}

#[test]
fn test_pending_batch_blocks_drain() {
    let (mut driver, interface, _clock) = create_mock_driver();
    interface.set_fifo_entries(32);

    driver.poll().unwrap();
    assert_eq!(driver.pending_batches(), 1);

    interface.clear_operations();
    driver.poll().unwrap();
    assert_eq!(interface.burst_read_count(), 0);
    assert_eq!(driver.pending_batches(), 1);

    // Once the batch is taken the next poll drains again
    assert!(driver.next_measurement().is_some());
    driver.poll().unwrap();
    assert_eq!(interface.burst_read_count(), 32);
    assert_eq!(driver.pending_batches(), 1);
}

#[test]
fn test_short_burst_fails_drain() {
    let (mut driver, interface, _clock) = create_mock_driver();
    interface.set_fifo_entries(32);
    interface.short_next_burst(4);

    let error = driver.poll().expect_err("drain should fail");
    assert_eq!(
        error,
        Error::ShortRead {
            expected: 6,
            actual: 4
        }
    );
    assert!(error.is_device_error());
    assert_eq!(driver.pending_batches(), 0);
    assert!(driver.next_measurement().is_none());
}

#[test]
fn test_short_burst_mid_drain_discards_batch() {
    let (mut driver, interface, _clock) = create_mock_driver();
    interface.set_fifo_entries(32);
    // First burst is complete, the second comes back empty
    interface.short_next_burst(6);
    interface.short_next_burst(0);

    let result = driver.poll();
    assert_eq!(
        result,
        Err(Error::ShortRead {
            expected: 6,
            actual: 0
        })
    );
    assert_eq!(interface.burst_read_count(), 2);
    assert_eq!(driver.pending_batches(), 0);
}

#[test]
fn test_bus_failure_mid_drain() {
    let (mut driver, interface, _clock) = create_mock_driver();
    interface.set_fifo_entries(32);
    // FIFO_STATUS and five bursts succeed
    interface.fail_read_after(6);

    assert_eq!(driver.poll(), Err(Error::Bus(MockError::Communication)));
    assert_eq!(driver.pending_batches(), 0);

    // The next poll drains normally
    driver.poll().unwrap();
    assert_eq!(driver.next_measurement().unwrap().len(), 96);
}

#[test]
fn test_fast_rate_timestamps_collapse() {
    let config = Config {
        data_rate: DataRate::Hz3200,
        ..Config::default()
    };
    let (mut driver, interface, clock) = create_mock_driver_with(config);
    clock.set(42_000);
    interface.set_fifo_entries(32);

    driver.poll().unwrap();
    let batch = driver.next_measurement().unwrap();
    assert!(batch.iter().all(|m| m.timestamp_ms == 42_000));
}

#[test]
fn test_slow_rate_timestamps() {
    let config = Config {
        data_rate: DataRate::Hz12_5,
        ..Config::default()
    };
    let (mut driver, interface, clock) = create_mock_driver_with(config);
    clock.set(100_000);
    interface.set_fifo_entries(32);

    driver.poll().unwrap();
    let batch = driver.next_measurement().unwrap();
    let first = batch.as_slice()[0].timestamp_ms;
    assert_eq!(first, 100_000 - 31 * 80);
}

#[test]
fn test_timestamps_saturate_at_zero() {
    let (mut driver, interface, clock) = create_mock_driver();
    clock.set(100);
    interface.set_fifo_entries(32);

    driver.poll().unwrap();
    let batch = driver.next_measurement().unwrap();
    let x: Vec<u64> = batch.for_axis(Axis::X).map(|m| m.timestamp_ms).collect();

    assert_eq!(x[0], 0);
    assert_eq!(x[21], 0);
    assert_eq!(x[22], 10);
    assert_eq!(x[31], 100);
}

#[test]
fn test_fifo_trigger_bit_ignored_below_watermark() {
    let (mut driver, interface, _clock) = create_mock_driver();
    // FIFO_TRIG set, 20 entries
    interface.set_fifo_entries(0x80 | 20);

    assert_eq!(driver.read_fifo_entries().unwrap(), 20);
    driver.poll().unwrap();

    assert_eq!(interface.burst_read_count(), 0);
    assert!(driver.next_measurement().is_none());
}

#[test]
fn test_fifo_trigger_bit_masked_from_entry_count() {
    let (mut driver, interface, _clock) = create_mock_driver();
    interface.set_fifo_entries(0x80 | 32);

    driver.poll().unwrap();
    assert_eq!(interface.burst_read_count(), 32);
    assert_eq!(driver.next_measurement().unwrap().len(), 96);

    // All six count bits in use
    interface.clear_operations();
    interface.set_fifo_entries(0x80 | 63);

    assert_eq!(driver.read_fifo_entries().unwrap(), 63);
    driver.poll().unwrap();
    assert_eq!(interface.burst_read_count(), 63);
    assert_eq!(
        driver.next_measurement().unwrap().len(),
        adxl345::MAX_BATCH_ENTRIES - 3
    );
}
