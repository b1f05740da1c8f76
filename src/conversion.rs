//! Raw-to-physical conversion helpers
//!
//! ADXL345 axis data is a signed 16-bit two's complement value split over two
//! registers, low byte first.

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Scale factor of one raw LSB in g (4 mg/LSB)
///
/// This is the full-resolution scale factor. It is also exact for the ±2g
/// range in 10-bit mode; see [`crate::Config::full_resolution`] for the other
/// ranges.
pub const SCALE_G_PER_LSB: f32 = 0.004;

/// Gain converting a raw LSB reading into m/s²
#[must_use]
pub fn gain() -> f32 {
    SCALE_G_PER_LSB * STANDARD_GRAVITY
}

/// Combine a low and high data byte into a signed raw value
#[must_use]
pub const fn raw_from_bytes(low: u8, high: u8) -> i16 {
    i16::from_le_bytes([low, high])
}

/// Decode one XYZ burst (X0,X1,Y0,Y1,Z0,Z1) into raw values
#[must_use]
pub const fn decode_axes(buffer: &[u8; 6]) -> [i16; 3] {
    [
        raw_from_bytes(buffer[0], buffer[1]),
        raw_from_bytes(buffer[2], buffer[3]),
        raw_from_bytes(buffer[4], buffer[5]),
    ]
}

/// Convert a raw reading into acceleration using `gain`
#[must_use]
pub fn to_acceleration(raw: i16, gain: f32) -> f32 {
    f32::from(raw) * gain
}
